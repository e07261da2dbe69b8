use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::types::{neighbors, Area, CellPos, Coord};
use crate::BoardConfig;

/// Immutable mine placement for one game: the mine mask, the mine count and
/// the precomputed per-cell adjacency numbers. Built once by a generator (or
/// [`MineField::with_mines`]) and never modified for the life of the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    mines: Array2<bool>,
    count: Area,
    adjacent: Array2<u8>,
}

impl MineField {
    /// Wraps a raw mine mask, counting mines and computing adjacency.
    pub fn from_mask(mines: Array2<bool>) -> Self {
        let count = mines.iter().filter(|&&mined| mined).count() as Area;
        let adjacent = adjacency_counts(&mines);
        Self {
            mines,
            count,
            adjacent,
        }
    }

    /// Builds a field with mines at exactly the given positions. Intended
    /// for deterministic tests and scripted games; duplicates collapse into
    /// a single mine.
    pub fn with_mines(rows: Coord, cols: Coord, mines: &[CellPos]) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let mut mask = Array2::default((rows as usize, cols as usize));
        for &(row, col) in mines {
            if row >= rows || col >= cols {
                return Err(GameError::OutOfBounds);
            }
            mask[(row as usize, col as usize)] = true;
        }
        let field = Self::from_mask(mask);
        if field.safe_cells() == 0 {
            return Err(GameError::TooManyMines);
        }
        Ok(field)
    }

    pub fn config(&self) -> BoardConfig {
        let (rows, cols) = self.size();
        BoardConfig {
            rows,
            cols,
            mines: self.count,
        }
    }

    pub fn size(&self) -> CellPos {
        let (rows, cols) = self.mines.dim();
        (rows as Coord, cols as Coord)
    }

    /// Checks `pos` against the grid extent.
    pub fn check_pos(&self, pos: CellPos) -> Result<CellPos> {
        let (rows, cols) = self.size();
        if pos.0 < rows && pos.1 < cols {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn total_cells(&self) -> Area {
        self.mines.len() as Area
    }

    pub fn mine_count(&self) -> Area {
        self.count
    }

    pub fn safe_cells(&self) -> Area {
        self.total_cells() - self.count
    }

    pub fn is_mine(&self, (row, col): CellPos) -> bool {
        self.mines[(row as usize, col as usize)]
    }

    /// Number of mines among the up-to-8 neighbors. Mine cells keep a zero
    /// here; their number is never shown.
    pub fn adjacent_mines(&self, (row, col): CellPos) -> u8 {
        self.adjacent[(row as usize, col as usize)]
    }
}

/// One pass over the mask, counting in-bounds mined neighbors per cell.
fn adjacency_counts(mines: &Array2<bool>) -> Array2<u8> {
    let (rows, cols) = mines.dim();
    let bounds = (rows as Coord, cols as Coord);
    let mut counts = Array2::zeros((rows, cols));
    for row in 0..rows {
        for col in 0..cols {
            if mines[(row, col)] {
                continue;
            }
            counts[(row, col)] = neighbors((row as Coord, col as Coord), bounds)
                .filter(|&(r, c)| mines[(r as usize, c as usize)])
                .count() as u8;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_mines_and_safe_cells() {
        let field = MineField::with_mines(3, 3, &[(0, 0), (2, 1)]).unwrap();
        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.total_cells(), 9);
        assert_eq!(field.safe_cells(), 7);
        assert!(field.is_mine((0, 0)));
        assert!(!field.is_mine((1, 1)));
    }

    #[test]
    fn adjacency_matches_real_neighbors() {
        let field = MineField::with_mines(3, 3, &[(0, 0), (2, 1)]).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                if field.is_mine((row, col)) {
                    continue;
                }
                let expected = neighbors((row, col), (3, 3))
                    .filter(|&pos| field.is_mine(pos))
                    .count() as u8;
                assert_eq!(field.adjacent_mines((row, col)), expected);
            }
        }
        assert_eq!(field.adjacent_mines((1, 1)), 2);
        assert_eq!(field.adjacent_mines((0, 2)), 0);
    }

    #[test]
    fn duplicate_positions_collapse() {
        let field = MineField::with_mines(2, 2, &[(0, 1), (0, 1)]).unwrap();
        assert_eq!(field.mine_count(), 1);
    }

    #[test]
    fn rejects_degenerate_layouts() {
        assert_eq!(
            MineField::with_mines(0, 3, &[]),
            Err(GameError::InvalidDimensions)
        );
        assert_eq!(
            MineField::with_mines(2, 2, &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
        assert_eq!(
            MineField::with_mines(1, 2, &[(0, 0), (0, 1)]),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn bounds_check() {
        let field = MineField::with_mines(2, 3, &[]).unwrap();
        assert_eq!(field.check_pos((1, 2)), Ok((1, 2)));
        assert_eq!(field.check_pos((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(field.check_pos((0, 3)), Err(GameError::OutOfBounds));
    }
}
