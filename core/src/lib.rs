//! Minesweeper board engine.
//!
//! Owns all state for a single rectangular Minesweeper game: mine
//! placement, adjacency counts, reveal propagation and win/loss tracking.
//! A presentation layer drives it through [`Board::reveal`],
//! [`Board::chord_reveal`] and [`Board::toggle_flag`] and reads state back
//! through the snapshot accessors; no rendering code lives in this crate.
//!
//! ```
//! use minefield_core::{Board, BoardConfig, RandomMines};
//!
//! let config = BoardConfig::new(9, 9, 10)?;
//! let mut board = Board::generate(config, RandomMines::from_seed(1));
//! let outcome = board.reveal((4, 4))?;
//! assert!(outcome.has_update());
//! # Ok::<(), minefield_core::GameError>(())
//! ```

use serde::{Deserialize, Serialize};

pub use cell::Cell;
pub use engine::{Board, FlagOutcome, GameStatus, RevealOutcome};
pub use error::{GameError, Result};
pub use field::MineField;
pub use generator::{MineGenerator, RandomMines};
pub use types::{area, neighbors, Area, CellPos, Coord};

mod cell;
mod engine;
mod error;
mod field;
mod generator;
mod types;

/// Validated game configuration: grid extent and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: Area,
}

impl BoardConfig {
    /// Checks a requested configuration. Dimensions must be positive and at
    /// least one safe cell must exist; out-of-range requests are rejected,
    /// never clamped.
    pub fn new(rows: Coord, cols: Coord, mines: Area) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if mines >= area(rows, cols) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self { rows, cols, mines })
    }

    pub const fn total_cells(&self) -> Area {
        area(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> Area {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn size(&self) -> CellPos {
        (self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_realistic_configurations() {
        let config = BoardConfig::new(9, 9, 10).unwrap();
        assert_eq!(config.total_cells(), 81);
        assert_eq!(config.safe_cells(), 71);
        assert_eq!(config.size(), (9, 9));
    }

    #[test]
    fn zero_mines_is_legal() {
        assert!(BoardConfig::new(3, 3, 0).is_ok());
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(BoardConfig::new(0, 5, 1), Err(GameError::InvalidDimensions));
        assert_eq!(BoardConfig::new(5, 0, 1), Err(GameError::InvalidDimensions));
    }

    #[test]
    fn rejects_a_fully_mined_board() {
        assert_eq!(BoardConfig::new(3, 3, 9), Err(GameError::TooManyMines));
        assert_eq!(BoardConfig::new(3, 3, 10), Err(GameError::TooManyMines));
        assert!(BoardConfig::new(3, 3, 8).is_ok());
    }
}
