//! Property tests over random command streams.
//!
//! Invariants checked after every command:
//! - a command either leaves the snapshot untouched or bumps `revision` by one
//! - while playing, the active piece exists and fits the locked board
//! - the locked board never holds a full row
//! - level and tick interval always follow from the cleared line count
//! - the ghost layer only appears while playing
//! - the same seed and command stream replay the same game

use proptest::prelude::*;

use tetris_engine::core::{tick_interval_ms, GameSnapshot, Layer, TetrisEngine};
use tetris_engine::types::{GameState, BOARD_HEIGHT, INITIAL_TICK_MS, SPEED_DECAY};

#[derive(Debug, Clone, Copy)]
enum Command {
    Start,
    Pause,
    Reset,
    Left,
    Right,
    Down,
    Rotate,
    HardDrop,
    Tick,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        1 => Just(Command::Start),
        1 => Just(Command::Pause),
        1 => Just(Command::Reset),
        4 => Just(Command::Left),
        4 => Just(Command::Right),
        4 => Just(Command::Down),
        4 => Just(Command::Rotate),
        3 => Just(Command::HardDrop),
        6 => Just(Command::Tick),
    ]
}

fn apply(engine: &mut TetrisEngine, command: Command) -> Option<bool> {
    match command {
        Command::Start => engine.start(),
        Command::Pause => engine.pause(),
        Command::Reset => engine.reset(),
        Command::Left => return Some(engine.move_left()),
        Command::Right => return Some(engine.move_right()),
        Command::Down => return Some(engine.move_down()),
        Command::Rotate => return Some(engine.rotate()),
        Command::HardDrop => engine.hard_drop(),
        Command::Tick => engine.tick(),
    }
    None
}

fn check_invariants(engine: &TetrisEngine, snapshot: &GameSnapshot) {
    let board = engine.locked_board();
    for y in 0..BOARD_HEIGHT as usize {
        assert!(!board.is_row_full(y), "full row {} left on the board", y);
    }

    if snapshot.state == GameState::Playing {
        let active = snapshot.active.expect("playing without an active piece");
        assert!(active.is_valid(board));
        assert!(snapshot.next.is_some());
    } else {
        assert_eq!(snapshot.board.count(Layer::Ghost), 0);
    }
    assert!(snapshot.board.count(Layer::Active) <= 4);

    let score = snapshot.score;
    assert_eq!(score.level, 1 + score.lines / 10);
    assert_eq!(
        snapshot.tick_interval_ms,
        tick_interval_ms(INITIAL_TICK_MS, SPEED_DECAY, score.level)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_commands_keep_invariants(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..300),
    ) {
        let mut engine = TetrisEngine::with_seed(seed);
        let mut before = engine.snapshot();

        for command in commands {
            let accepted = apply(&mut engine, command);
            let after = engine.snapshot();

            if after == before {
                prop_assert_ne!(accepted, Some(true));
            } else {
                prop_assert_eq!(after.revision, before.revision + 1);
                prop_assert_ne!(accepted, Some(false));
            }
            if before.state == GameState::Playing && after.state == GameState::Playing
                && before.play_session == after.play_session
            {
                prop_assert!(after.score.score >= before.score.score);
                prop_assert!(after.score.lines >= before.score.lines);
            }

            check_invariants(&engine, &after);
            before = after;
        }
    }

    #[test]
    fn same_seed_replays_same_game(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..200),
    ) {
        let mut a = TetrisEngine::with_seed(seed);
        let mut b = TetrisEngine::with_seed(seed);
        a.start();
        b.start();
        for command in commands {
            prop_assert_eq!(apply(&mut a, command), apply(&mut b, command));
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }
}
