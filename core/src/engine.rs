use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Play state of a single game on top of an immutable [`MineLayout`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    mine_layout: MineLayout,
    board: Array2<EngineCell>,
    revealed_count: CellCount,
    remaining_mines: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        let remaining_mines = mine_layout.mine_count();
        Self {
            mine_layout,
            board: Array2::default((size, size).to_nd_index()),
            revealed_count: 0,
            remaining_mines,
            status: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    /// Flag budget shown to the player. Not a count of unflagged mines.
    pub fn remaining_mines(&self) -> CellCount {
        self.remaining_mines
    }

    /// Number of safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<EngineCell> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.is_revealed())
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.is_flagged())
    }

    /// Value stored in the grid, whether or not the player has revealed it.
    pub fn cell_value(&self, coords: Coord2) -> Result<CellValue> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.mine_layout[coords])
    }

    /// True once every safe cell is revealed. Flags play no part.
    pub fn check_win(&self) -> bool {
        self.revealed_count == self.mine_layout.safe_cell_count()
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(FlagOutcome::Unchanged);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        Ok(match *cell {
            EngineCell::Flagged => {
                *cell = EngineCell::Hidden;
                self.remaining_mines = (self.remaining_mines + 1).min(self.mine_layout.mine_count());
                log::debug!("Unflagged {:?}, {} left", coords, self.remaining_mines);
                FlagOutcome::Unflagged
            }
            EngineCell::Hidden if self.remaining_mines > 0 => {
                *cell = EngineCell::Flagged;
                self.remaining_mines -= 1;
                log::debug!("Flagged {:?}, {} left", coords, self.remaining_mines);
                FlagOutcome::Flagged
            }
            EngineCell::Hidden => {
                log::debug!("No flags left for {:?}", coords);
                FlagOutcome::Unchanged
            }
            EngineCell::Revealed(_) => FlagOutcome::Unchanged,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;
        if self.status.is_finished() || self.board[coords.to_nd_index()] != EngineCell::Hidden {
            return Ok(RevealOutcome::Unchanged);
        }

        if self.mine_layout[coords].is_mine() {
            return Ok(self.detonate(coords));
        }

        let cells = self.flood_reveal(coords);
        log::debug!("Revealed {} cells from {:?}", cells.len(), coords);

        Ok(if self.check_win() {
            self.status = GameStatus::Won;
            log::debug!("Game won");
            RevealOutcome::Won { cells }
        } else {
            RevealOutcome::Revealed { cells }
        })
    }

    /// Reveals `start` and, through zero cells, everything connected to it.
    ///
    /// Only hidden cells are ever pushed or revealed, so flags stop the fill and each
    /// cell is revealed once. A zero cell has no mine around it, so the fill never
    /// reaches a mine.
    fn flood_reveal(&mut self, start: Coord2) -> Vec<Coord2> {
        let mut revealed = Vec::new();
        let mut pending = vec![start];

        while let Some(coords) = pending.pop() {
            if self.board[coords.to_nd_index()] != EngineCell::Hidden {
                continue;
            }

            let value = self.mine_layout[coords];
            self.board[coords.to_nd_index()] = EngineCell::Revealed(value);
            self.revealed_count += 1;
            revealed.push(coords);
            log::trace!("Revealed {:?}: {:?}", coords, value);

            if value.is_zero() {
                pending.extend(
                    self.mine_layout
                        .iter_neighbors(coords)
                        .filter(|&pos| self.board[pos.to_nd_index()] == EngineCell::Hidden),
                );
            }
        }

        revealed
    }

    /// Ends the game and reveals every mine, flagged ones included.
    fn detonate(&mut self, triggered: Coord2) -> RevealOutcome {
        let mines: Vec<Coord2> = self.mine_layout.mines().collect();
        for &coords in &mines {
            self.board[coords.to_nd_index()] = EngineCell::Revealed(CellValue::Mine);
        }

        self.triggered_mine = Some(triggered);
        self.status = GameStatus::Lost;
        log::debug!("Hit mine at {:?}, game lost", triggered);

        RevealOutcome::Lost { triggered, mines }
    }
}
