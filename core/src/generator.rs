use log::warn;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::field::MineField;
use crate::BoardConfig;

/// Mine placement strategy. Consumed by value, like the RNG it carries.
pub trait MineGenerator {
    fn generate(self, config: BoardConfig) -> MineField;
}

/// Uniform random placement by rejection sampling: draw a cell, keep it if
/// not yet mined, repeat until `config.mines` are placed. Validated configs
/// leave at least one safe cell, so the loop always terminates, and while
/// the mine count stays well below the cell count the expected number of
/// retries is small.
#[derive(Clone, Debug)]
pub struct RandomMines<R> {
    rng: R,
}

impl<R: Rng> RandomMines<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomMines<SmallRng> {
    /// Deterministic generator for reproducible games.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Generator seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> MineGenerator for RandomMines<R> {
    fn generate(mut self, config: BoardConfig) -> MineField {
        let total = config.total_cells();
        let requested = config.mines;
        // an unvalidated config must not hang the sampling loop
        let target = if requested >= total {
            warn!("{requested} mines do not fit {total} cells, leaving one safe cell");
            total.saturating_sub(1)
        } else {
            requested
        };

        let mut mask: Array2<bool> =
            Array2::default((config.rows as usize, config.cols as usize));
        let mut placed = 0;
        while placed < target {
            let row = self.rng.random_range(0..config.rows) as usize;
            let col = self.rng.random_range(0..config.cols) as usize;
            if !mask[(row, col)] {
                mask[(row, col)] = true;
                placed += 1;
            }
        }

        let field = MineField::from_mask(mask);
        if field.mine_count() != target {
            warn!(
                "mine count mismatch, placed {} of {}",
                field.mine_count(),
                target
            );
        }
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: u8, cols: u8, mines: u16) -> BoardConfig {
        BoardConfig::new(rows, cols, mines).unwrap()
    }

    #[test]
    fn places_the_exact_mine_count() {
        let field = RandomMines::from_seed(7).generate(config(9, 9, 10));
        assert_eq!(field.mine_count(), 10);
        assert_eq!(field.safe_cells(), 71);
    }

    #[test]
    fn same_seed_same_field() {
        let first = RandomMines::from_seed(42).generate(config(8, 8, 12));
        let second = RandomMines::from_seed(42).generate(config(8, 8, 12));
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let first = RandomMines::from_seed(1).generate(config(16, 16, 40));
        let second = RandomMines::from_seed(2).generate(config(16, 16, 40));
        assert_ne!(first, second);
    }

    #[test]
    fn dense_boards_still_terminate() {
        let field = RandomMines::from_seed(3).generate(config(4, 4, 15));
        assert_eq!(field.mine_count(), 15);
        assert_eq!(field.safe_cells(), 1);
    }

    #[test]
    fn zero_mines_is_a_valid_placement() {
        let field = RandomMines::from_seed(0).generate(config(3, 3, 0));
        assert_eq!(field.mine_count(), 0);
    }
}
