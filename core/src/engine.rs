use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::ops::BitOr;

use log::{debug, trace};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::Result;
use crate::field::MineField;
use crate::generator::MineGenerator;
use crate::types::{neighbors, Area, CellPos, Coord};
use crate::BoardConfig;

/// Overall game status. `Won` and `Lost` are terminal: the only way out is
/// constructing a new [`Board`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
        })
    }
}

/// Outcome of a reveal command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Opened,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether the snapshot should be re-read.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Merge for chorded reveals: a mine hit dominates, then a win, then any
/// plain open.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Won, _) | (_, Won) => Won,
            (Opened, _) | (_, Opened) => Opened,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Outcome of a flag command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Toggled)
    }
}

/// One Minesweeper game from construction to win or loss.
///
/// Owns the mine layout and the player-visible grid. The presentation layer
/// drives it through [`Board::reveal`], [`Board::chord_reveal`] and
/// [`Board::toggle_flag`], reads state back through the accessors, and never
/// mutates cells directly. Restarting means building a fresh `Board`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    field: MineField,
    grid: Array2<Cell>,
    revealed: Area,
    flagged: Area,
    status: GameStatus,
    exploded: Option<CellPos>,
}

impl Board {
    /// Starts a game on a prepared mine layout.
    pub fn new(field: MineField) -> Self {
        let (rows, cols) = field.size();
        Self {
            field,
            grid: Array2::default((rows as usize, cols as usize)),
            revealed: 0,
            flagged: 0,
            status: GameStatus::default(),
            exploded: None,
        }
    }

    /// Starts a game by running `generator` on `config`.
    pub fn generate(config: BoardConfig, generator: impl MineGenerator) -> Self {
        Self::new(generator.generate(config))
    }

    /// One-call construction: validates the requested configuration and
    /// generates a fresh board from it.
    pub fn new_game(
        rows: Coord,
        cols: Coord,
        mines: Area,
        generator: impl MineGenerator,
    ) -> Result<Self> {
        let config = BoardConfig::new(rows, cols, mines)?;
        Ok(Self::generate(config, generator))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn size(&self) -> CellPos {
        self.field.size()
    }

    pub fn config(&self) -> BoardConfig {
        self.field.config()
    }

    pub fn total_mines(&self) -> Area {
        self.field.mine_count()
    }

    /// Mines minus flags; negative once the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.field.mine_count()) - i32::from(self.flagged)
    }

    /// Cells currently shown as revealed, the exploded mine included.
    pub fn revealed_count(&self) -> Area {
        self.revealed
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn exploded(&self) -> Option<CellPos> {
        self.exploded
    }

    pub fn cell(&self, (row, col): CellPos) -> Cell {
        self.grid[(row as usize, col as usize)]
    }

    /// Row-major iteration over the whole snapshot.
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, Cell)> + '_ {
        self.grid
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    /// Reveals a hidden cell.
    ///
    /// Flagged and already-revealed cells are left alone, as is the whole
    /// board once the game is over; those calls report `NoChange`. Only a
    /// coordinate outside the grid is an error.
    pub fn reveal(&mut self, pos: CellPos) -> Result<RevealOutcome> {
        let pos = self.field.check_pos(pos)?;
        Ok(self.reveal_cell(pos))
    }

    /// Reveals every hidden neighbor of a revealed cell whose flag count
    /// matches its number; anywhere else behaves exactly like [`Board::reveal`].
    pub fn chord_reveal(&mut self, pos: CellPos) -> Result<RevealOutcome> {
        let pos = self.field.check_pos(pos)?;
        if self.status.is_over() {
            return Ok(RevealOutcome::NoChange);
        }
        Ok(match self.cell(pos) {
            Cell::Revealed(count) if count == self.flagged_neighbors(pos) => {
                let mut outcome = RevealOutcome::NoChange;
                for neighbor in neighbors(pos, self.field.size()) {
                    outcome = outcome | self.reveal_cell(neighbor);
                }
                outcome
            }
            _ => self.reveal_cell(pos),
        })
    }

    /// Flips a cell between hidden and flagged. Revealed cells and finished
    /// games report `NoChange`.
    pub fn toggle_flag(&mut self, pos: CellPos) -> Result<FlagOutcome> {
        let pos = self.field.check_pos(pos)?;
        if self.status.is_over() {
            return Ok(FlagOutcome::NoChange);
        }
        Ok(match self.cell(pos) {
            Cell::Hidden => {
                self.set_cell(pos, Cell::Flagged);
                self.flagged += 1;
                FlagOutcome::Toggled
            }
            Cell::Flagged => {
                self.set_cell(pos, Cell::Hidden);
                self.flagged -= 1;
                FlagOutcome::Toggled
            }
            _ => FlagOutcome::NoChange,
        })
    }

    fn set_cell(&mut self, (row, col): CellPos, cell: Cell) {
        self.grid[(row as usize, col as usize)] = cell;
    }

    /// Opens a single hidden cell, flooding outward from zero-count cells.
    /// The mine check always precedes the win check: a reveal that hits a
    /// mine is a loss even if it was the last closed cell.
    fn reveal_cell(&mut self, pos: CellPos) -> RevealOutcome {
        if self.status.is_over() || self.cell(pos) != Cell::Hidden {
            return RevealOutcome::NoChange;
        }

        if self.field.is_mine(pos) {
            self.revealed += 1;
            self.exploded = Some(pos);
            self.set_cell(pos, Cell::Exploded);
            self.finish(false);
            return RevealOutcome::HitMine;
        }

        let count = self.field.adjacent_mines(pos);
        self.set_cell(pos, Cell::Revealed(count));
        self.revealed += 1;
        debug!("revealed {pos:?}, {count} adjacent mines");

        if count == 0 {
            self.flood_from(pos);
        }

        if self.revealed == self.field.safe_cells() {
            self.finish(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Opened
        }
    }

    /// Iterative breadth-first flood: opens every hidden, unflagged,
    /// non-mine neighbor and keeps expanding through cells with no adjacent
    /// mines. An explicit queue keeps large empty boards off the call stack.
    fn flood_from(&mut self, start: CellPos) {
        let bounds = self.field.size();
        let mut visited: HashSet<CellPos> = HashSet::from([start]);
        let mut queue: VecDeque<CellPos> = neighbors(start, bounds).collect();

        while let Some(pos) = queue.pop_front() {
            if !visited.insert(pos) {
                continue;
            }
            // flags block the flood, and mines are never visited
            if self.cell(pos) != Cell::Hidden || self.field.is_mine(pos) {
                continue;
            }

            let count = self.field.adjacent_mines(pos);
            self.set_cell(pos, Cell::Revealed(count));
            self.revealed += 1;
            trace!("flood revealed {pos:?}, {count} adjacent mines");

            if count == 0 {
                queue.extend(neighbors(pos, bounds).filter(|next| !visited.contains(next)));
            }
        }
    }

    /// Terminal transition. A loss discloses every mine; a win flags the
    /// ones the player never marked.
    fn finish(&mut self, won: bool) {
        self.status = if won { GameStatus::Won } else { GameStatus::Lost };
        debug!("game {}", self.status);

        let (rows, cols) = self.field.size();
        for row in 0..rows {
            for col in 0..cols {
                let pos = (row, col);
                if !self.field.is_mine(pos) {
                    continue;
                }
                match (self.cell(pos), won) {
                    (Cell::Hidden, true) => {
                        self.set_cell(pos, Cell::Flagged);
                        self.flagged += 1;
                    }
                    (Cell::Hidden | Cell::Flagged, false) => {
                        self.set_cell(pos, Cell::Mine);
                    }
                    _ => {}
                }
            }
        }
    }

    fn flagged_neighbors(&self, pos: CellPos) -> u8 {
        neighbors(pos, self.field.size())
            .filter(|&next| self.cell(next) == Cell::Flagged)
            .count() as u8
    }
}
