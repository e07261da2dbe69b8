use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("board dimensions must be at least 1x1")]
    InvalidDimensions,
    #[error("mine count must leave at least one safe cell")]
    TooManyMines,
    #[error("coordinates outside the board")]
    OutOfBounds,
}

pub type Result<T> = std::result::Result<T, GameError>;
