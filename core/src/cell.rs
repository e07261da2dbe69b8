use serde::{Deserialize, Serialize};

/// Per-cell view exposed to the presentation layer.
///
/// `Hidden` and `Flagged` carry no mine information: mine placement only
/// surfaces through `Exploded` and `Mine` once the game has ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Not yet revealed.
    Hidden,
    /// Marked by the player; protected from reveal.
    Flagged,
    /// Revealed safe cell carrying its adjacent-mine count.
    Revealed(u8),
    /// The mine whose reveal ended the game.
    Exploded,
    /// Any other mine, disclosed when the game is lost.
    Mine,
}

impl Cell {
    /// Whether the cell still hides its content.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    /// Whether the cell shows a mine.
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Exploded | Self::Mine)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Hidden
    }
}
