use minegrid_core::*;
use rand::prelude::*;

const SIDE: Coord = 8;

fn snapshot(game: &Game) -> Vec<EngineCell> {
    let mut cells = Vec::new();
    for x in 0..game.size() {
        for y in 0..game.size() {
            cells.push(game.cell_at((x, y)).unwrap());
        }
    }
    cells
}

fn assert_invariants(game: &Game, before: &[EngineCell]) {
    let after = snapshot(game);
    let total = game.engine().total_mines();

    for (old, new) in before.iter().zip(&after) {
        if old.is_revealed() {
            assert_eq!(old, new, "revealed cells never change back");
        }
        assert!(!(new.is_revealed() && new.is_flagged()));
    }
    assert!(game.remaining_mines() <= total);
    assert_eq!(game.check_win(), game.status() == GameStatus::Won);
}

#[test]
fn random_play_keeps_invariants() {
    for seed in 0..200 {
        let config = GameConfig::new(SIDE, 10).unwrap();
        let mut game = Game::new(config, RandomLayoutGenerator::new(seed)).unwrap();
        let mut moves = SmallRng::seed_from_u64(seed ^ 0x5eed);

        while !game.status().is_finished() {
            let before = snapshot(&game);
            let coords = (moves.random_range(0..SIDE), moves.random_range(0..SIDE));
            if moves.random_range(0..4) == 0 {
                game.toggle_flag(coords).unwrap();
            } else {
                let outcome = game.reveal(coords).unwrap();
                for &cell in outcome.changed_cells() {
                    assert!(!before[usize::from(cell.0) * usize::from(SIDE) + usize::from(cell.1)].is_revealed());
                    assert!(game.is_revealed(cell).unwrap());
                }
            }
            assert_invariants(&game, &before);
        }

        if game.status() == GameStatus::Lost {
            for mine in game.engine().mine_layout().mines() {
                assert_eq!(game.cell_at(mine), Ok(EngineCell::Revealed(CellValue::Mine)));
            }
        }
    }
}

#[test]
fn flood_reveals_connected_zero_region_plus_border() {
    for seed in 0..100 {
        let config = GameConfig::new(SIDE, 6).unwrap();
        let mut game = Game::new(config, RandomLayoutGenerator::new(seed)).unwrap();
        let layout = game.engine().mine_layout().clone();

        let Some(start) = (0..SIDE)
            .flat_map(|x| (0..SIDE).map(move |y| (x, y)))
            .find(|&coords| layout[coords].is_zero())
        else {
            continue;
        };

        // Reference region computed with a plain breadth-first search.
        let mut expected = vec![start];
        let mut i = 0;
        while i < expected.len() {
            let coords = expected[i];
            i += 1;
            if !layout[coords].is_zero() {
                continue;
            }
            for dx in -1i16..=1 {
                for dy in -1i16..=1 {
                    let (nx, ny) = (i16::from(coords.0) + dx, i16::from(coords.1) + dy);
                    if nx < 0 || ny < 0 || nx >= i16::from(SIDE) || ny >= i16::from(SIDE) {
                        continue;
                    }
                    let next = (nx as Coord, ny as Coord);
                    if !expected.contains(&next) {
                        expected.push(next);
                    }
                }
            }
        }

        let outcome = game.reveal(start).unwrap();
        let mut cells = outcome.changed_cells().to_vec();
        let revealed = cells.len();
        cells.sort_unstable();
        cells.dedup();
        expected.sort_unstable();

        assert_eq!(cells.len(), revealed, "each cell is revealed once");
        assert_eq!(cells, expected);
        assert!(cells.iter().all(|&coords| !layout.contains_mine(coords)));
    }
}

#[test]
fn flags_on_safe_cells_exhaust_the_counter() {
    let config = GameConfig::new(4, 2).unwrap();
    let mut game = Game::new(config, FixedLayoutGenerator::new(&[(3, 3), (3, 2)])).unwrap();

    assert_eq!(game.toggle_flag((0, 0)), Ok(FlagOutcome::Flagged));
    assert_eq!(game.toggle_flag((0, 1)), Ok(FlagOutcome::Flagged));
    assert_eq!(game.remaining_mines(), 0);
    assert_eq!(game.toggle_flag((3, 3)), Ok(FlagOutcome::Unchanged));
    assert_eq!(game.status(), GameStatus::InProgress);
}
