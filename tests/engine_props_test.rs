//! Property tests for engine invariants over generated seeds and command
//! sequences.

use falling_blocks::core::{
    definition_for, Board, GameEngine, GameEvent, MoveOutcome, RandomizerKind, EngineConfig,
};
use falling_blocks::types::{ColorTag, GameCommand, PieceKind};
use proptest::prelude::*;

fn play_command() -> impl Strategy<Value = GameCommand> {
    prop::sample::select(vec![
        GameCommand::MoveLeft,
        GameCommand::MoveRight,
        GameCommand::SoftDrop,
        GameCommand::Rotate,
        GameCommand::HardDrop,
        GameCommand::TogglePause,
    ])
}

proptest! {
    #[test]
    fn rotation_is_periodic_mod_four(kind_idx in 0usize..7, r in 0u32..64) {
        let matrix = definition_for(PieceKind::ALL[kind_idx]).matrix;
        prop_assert_eq!(matrix.rotated(r), matrix.rotated(r + 4));
        prop_assert_eq!(matrix.rotated(r).filled_count(), 4);
    }

    #[test]
    fn score_level_and_interval_are_monotonic(
        seed in any::<u32>(),
        bag in any::<bool>(),
        commands in prop::collection::vec(play_command(), 1..300),
    ) {
        let kind = if bag { RandomizerKind::SevenBag } else { RandomizerKind::Uniform };
        let config = EngineConfig::default().with_randomizer(kind);
        let mut engine = GameEngine::with_config(config, seed).unwrap();
        engine.start();

        for command in commands {
            let (score, level, interval) =
                (engine.score(), engine.level(), engine.drop_interval_ms());
            engine.apply(command);
            engine.step(16);
            prop_assert!(engine.score() >= score);
            prop_assert!(engine.level() >= level);
            prop_assert!(engine.drop_interval_ms() <= interval);
            prop_assert!(engine.drop_interval_ms() >= config.min_drop_interval_ms);
        }
    }

    #[test]
    fn hard_drop_locks_exactly_once_at_ghost(
        seed in any::<u32>(),
        shifts in -5i8..5,
        turns in 0usize..4,
    ) {
        let mut engine = GameEngine::new(seed);
        engine.start();
        for _ in 0..turns {
            engine.rotate();
        }
        let dx = shifts.signum();
        for _ in 0..shifts.abs() {
            engine.try_move(dx, 0);
        }
        let ghost = engine.ghost().unwrap();
        engine.drain_events();

        let outcome = engine.hard_drop();

        prop_assert!(outcome.locked());
        let events = engine.drain_events();
        let locks = events.iter().filter(|e| matches!(e, GameEvent::Locked { .. })).count();
        prop_assert_eq!(locks, 1);
        for &(x, y) in ghost.occupied_cells().iter() {
            prop_assert_eq!(engine.board().get(x, y), Some(Some(ghost.color())));
        }
    }

    #[test]
    fn blocked_downward_move_always_locks(seed in any::<u32>(), drops in 0usize..40) {
        let mut engine = GameEngine::new(seed);
        engine.start();
        for _ in 0..drops {
            if engine.try_move(0, 1) != MoveOutcome::Moved {
                break;
            }
        }
        let resting = engine.ghost().unwrap();
        let current = engine.current().unwrap();
        if resting == current {
            prop_assert!(engine.try_move(0, 1).locked());
        } else {
            prop_assert_eq!(engine.try_move(0, 1), MoveOutcome::Moved);
        }
    }

    #[test]
    fn batch_clear_matches_row_by_row(rows in prop::collection::vec(prop::collection::vec(any::<bool>(), 10), 20)) {
        let mut batch = Board::default();
        for (y, row) in rows.iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if filled {
                    batch.set(x as i8, y as i8, Some(ColorTag::Cyan));
                }
            }
        }
        let mut stepwise = batch.clone();
        let full_rows = (0..20).filter(|&y| stepwise.is_row_full(y)).count();

        let cleared = batch.clear_full_rows();

        let mut y = stepwise.rows() as usize;
        while y > 0 {
            if stepwise.is_row_full(y - 1) {
                stepwise.clear_row(y - 1);
            } else {
                y -= 1;
            }
        }
        prop_assert_eq!(cleared.len(), full_rows);
        prop_assert!((0..20).all(|y| !batch.is_row_full(y)));
        prop_assert_eq!(batch, stepwise);
    }
}
