use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Board Generator: turns a configuration into a mine layout.
///
/// Implementations validate the configuration first and never loop on a board that
/// has no room left for a safe cell.
pub trait LayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout>;
}
