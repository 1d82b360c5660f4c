use crate::*;

/// Owns the configuration and the current [`PlayEngine`].
///
/// `reset` throws the whole engine away and starts over on a freshly generated
/// layout; nothing carries over between games.
#[derive(Clone, Debug)]
pub struct Game<G = RandomLayoutGenerator> {
    config: GameConfig,
    generator: G,
    engine: PlayEngine,
}

impl<G: LayoutGenerator> Game<G> {
    pub fn new(config: GameConfig, mut generator: G) -> Result<Self> {
        config.validate()?;
        let engine = PlayEngine::new(generator.generate(config)?);
        log::debug!("New game: {:?}", config);
        Ok(Self {
            config,
            generator,
            engine,
        })
    }

    pub fn reset(&mut self) -> Result<()> {
        let layout = self.generator.generate(self.config)?;
        self.engine = PlayEngine::new(layout);
        log::debug!("Game reset: {:?}", self.config);
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.engine.reveal(coords)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.engine.toggle_flag(coords)
    }

    pub fn check_win(&self) -> bool {
        self.engine.check_win()
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn size(&self) -> Coord {
        self.engine.size()
    }

    pub fn remaining_mines(&self) -> CellCount {
        self.engine.remaining_mines()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<EngineCell> {
        self.engine.cell_at(coords)
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        self.engine.is_revealed(coords)
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        self.engine.is_flagged(coords)
    }

    pub fn cell_value(&self, coords: Coord2) -> Result<CellValue> {
        self.engine.cell_value(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_full_board_before_generating() {
        let config = GameConfig::new_unchecked(3, 9);
        let outcome = Game::new(config, RandomLayoutGenerator::new(0));
        assert_eq!(outcome.err(), Some(GameError::TooManyMines));
    }

    #[test]
    fn rejects_empty_grid() {
        let config = GameConfig::new_unchecked(0, 0);
        let outcome = Game::new(config, FixedLayoutGenerator::new(&[]));
        assert_eq!(outcome.err(), Some(GameError::EmptyGrid));
    }

    #[test]
    fn new_game_starts_fresh() {
        let game = Game::new(GameConfig::default(), RandomLayoutGenerator::new(5)).unwrap();

        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.remaining_mines(), 15);
        assert_eq!(game.size(), 10);
        assert_eq!(game.engine().revealed_count(), 0);
    }

    #[test]
    fn reset_after_loss_starts_over() {
        let config = GameConfig::new(3, 1).unwrap();
        let mut game = Game::new(config, FixedLayoutGenerator::new(&[(2, 2)])).unwrap();

        game.toggle_flag((0, 0)).unwrap();
        game.reveal((1, 1)).unwrap();
        game.reveal((2, 2)).unwrap();
        assert_eq!(game.status(), GameStatus::Lost);

        game.reset().unwrap();

        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.remaining_mines(), 1);
        assert_eq!(game.is_flagged((0, 0)), Ok(false));
        assert_eq!(game.is_revealed((1, 1)), Ok(false));
        assert_eq!(game.is_revealed((2, 2)), Ok(false));
    }

    #[test]
    fn reset_draws_a_new_layout() {
        let mut game = Game::new(GameConfig::default(), RandomLayoutGenerator::new(11)).unwrap();
        let first = game.engine().mine_layout().clone();

        game.reset().unwrap();

        assert_ne!(game.engine().mine_layout(), &first);
        assert_eq!(game.engine().total_mines(), 15);
    }

    #[test]
    fn commands_delegate_to_engine() {
        let config = GameConfig::new(3, 1).unwrap();
        let mut game = Game::new(config, FixedLayoutGenerator::new(&[(1, 1)])).unwrap();

        assert_eq!(
            game.reveal((0, 0)),
            Ok(RevealOutcome::Revealed {
                cells: alloc::vec![(0, 0)]
            })
        );
        assert_eq!(game.cell_value((1, 1)), Ok(CellValue::Mine));
        assert_eq!(game.toggle_flag((0, 0)), Ok(FlagOutcome::Unchanged));
        assert_eq!(game.reveal((9, 0)), Err(GameError::InvalidCoords));
        assert!(!game.check_win());
    }
}
