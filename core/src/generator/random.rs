use super::*;
use alloc::collections::BTreeSet;
use rand::prelude::*;

/// Uniform mine placement by rejection sampling.
///
/// Coordinates are drawn uniformly over the board and collected into a set until it
/// holds the requested number of mines; a coordinate drawn twice is simply drawn
/// again. The generator keeps its random state between calls, so consecutive layouts
/// differ.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        if let Err(err) = config.validate() {
            log::warn!("Refusing to generate {:?}: {}", config, err);
            return Err(err);
        }

        let target = usize::from(config.mines);
        let mut mines = BTreeSet::new();
        let mut draws: u32 = 0;

        while mines.len() < target {
            let coords = (
                self.rng.random_range(0..config.size),
                self.rng.random_range(0..config.size),
            );
            draws += 1;
            if !mines.insert(coords) {
                log::trace!("Mine already at {:?}, drawing again", coords);
            }
        }

        log::debug!(
            "Placed {} mines on a {}x{} board in {} draws",
            mines.len(),
            config.size,
            config.size,
            draws
        );
        Ok(MineLayout::from_mine_set(config.size, mines))
    }
}
