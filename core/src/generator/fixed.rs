use super::*;
use alloc::vec::Vec;

/// Replays a known set of mine positions, for reproducible boards.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayoutGenerator {
    mines: Vec<Coord2>,
}

impl FixedLayoutGenerator {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }
}

impl LayoutGenerator for FixedLayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;
        let layout = MineLayout::from_mine_coords(config.size, &self.mines)?;
        if layout.game_config() != config {
            log::warn!(
                "Fixed layout does not match config, actual: {:?}, requested: {:?}",
                layout.game_config(),
                config
            );
        }
        Ok(layout)
    }
}
