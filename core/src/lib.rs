#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod game;
mod generator;
mod tile;
mod types;

/// Board dimensions and mine count, fixed for the lifetime of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells per row and per column.
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord = 10;
    pub const DEFAULT_MINES: CellCount = 15;

    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Rejects boards that cannot be generated: an empty grid, or one with no safe cell left.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            Err(GameError::EmptyGrid)
        } else if self.mines >= self.total_cells() {
            Err(GameError::TooManyMines)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_MINES)
    }
}

/// A generated board: the mine set and the per-cell values derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    values: Array2<CellValue>,
    mines: BTreeSet<Coord2>,
}

impl MineLayout {
    /// Builds a layout from explicit mine positions. Repeated positions count once.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::EmptyGrid);
        }

        let mut mines = BTreeSet::new();
        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mines.insert(coords);
        }

        if mines.len() >= usize::from(square(size)) {
            return Err(GameError::TooManyMines);
        }

        Ok(Self::from_mine_set(size, mines))
    }

    /// Caller guarantees every coordinate is inside a `size` by `size` board.
    pub(crate) fn from_mine_set(size: Coord, mines: BTreeSet<Coord2>) -> Self {
        let mut values = Array2::from_elem((size, size).to_nd_index(), CellValue::Count(0));

        for &coords in &mines {
            values[coords.to_nd_index()] = CellValue::Mine;
        }

        for &coords in &mines {
            for pos in values.iter_neighbors(coords) {
                if let CellValue::Count(count) = &mut values[pos.to_nd_index()] {
                    *count += 1;
                }
            }
        }

        Self { values, mines }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Side length of the square board.
    pub fn size(&self) -> Coord {
        Coord::try_from(self.values.dim().0).unwrap_or(Coord::MAX)
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        CellCount::try_from(self.mines.len()).unwrap_or(CellCount::MAX)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mines.contains(&coords)
    }

    pub fn value_at(&self, coords: Coord2) -> CellValue {
        self[coords]
    }

    /// Mine positions ordered column by column (`x` first, then `y`).
    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mines.iter().copied()
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.values.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = CellValue;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.values[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Unchanged,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// What a reveal did, with every cell whose revealed state changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Unchanged,
    Revealed { cells: Vec<Coord2> },
    Won { cells: Vec<Coord2> },
    /// `mines` lists every mine cell, the triggering one included, in the order of
    /// [`MineLayout::mines`].
    Lost { triggered: Coord2, mines: Vec<Coord2> },
}

impl RevealOutcome {
    pub fn has_update(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    pub fn changed_cells(&self) -> &[Coord2] {
        match self {
            Self::Unchanged => &[],
            Self::Revealed { cells } | Self::Won { cells } => cells,
            Self::Lost { mines, .. } => mines,
        }
    }
}
