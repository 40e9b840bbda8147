//! Game state scenarios: kicks, scoring, levels, game over and restart.

use pico_tetris::core::{fall_interval_ms, ActivePiece, GameState, Phase, ScoreState};
use pico_tetris::types::{GameAction, PieceKind, Rotation};

fn started(seed: u64) -> GameState {
    let mut game = GameState::new(seed);
    assert!(game.start());
    game
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(12345);
    assert_eq!(game.phase(), Phase::Spawning);
    assert!(game.active().is_none());

    assert!(game.start());
    assert_eq!(game.phase(), Phase::Falling);
    let active = game.active().unwrap();
    assert_eq!((active.x, active.y, active.rotation), (3, 0, Rotation::North));
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.pieces_spawned(), 1);
}

#[test]
fn test_kick_prefers_one_right_when_only_option() {
    let mut game = started(1);
    // I east would occupy column x+2; block it, block (-1,0) and (0,-1).
    game.board_mut().set(5, 7, Some(PieceKind::Z));
    game.board_mut().set(4, 8, Some(PieceKind::Z));
    assert!(game.set_active(ActivePiece::at(PieceKind::I, Rotation::North, 3, 5)));

    assert!(game.try_rotate());
    let active = game.active().unwrap();
    assert_eq!(active.rotation, Rotation::East);
    assert_eq!((active.x, active.y), (4, 5));
}

#[test]
fn test_kick_right_beats_left_when_both_fit() {
    let mut game = started(1);
    game.board_mut().set(5, 7, Some(PieceKind::Z));
    assert!(game.set_active(ActivePiece::at(PieceKind::I, Rotation::North, 3, 5)));

    assert!(game.try_rotate());
    assert_eq!(game.active().unwrap().x, 4);
}

#[test]
fn test_blocked_rotation_changes_nothing() {
    let mut game = started(1);
    // Wall in the I piece so no offset works.
    for y in 0..20 {
        for x in 0..10 {
            if y != 6 {
                game.board_mut().set(x, y, Some(PieceKind::J));
            }
        }
    }
    let piece = ActivePiece::at(PieceKind::I, Rotation::North, 3, 5);
    assert!(game.set_active(piece));
    assert!(!game.try_rotate());
    assert_eq!(game.active(), Some(piece));
}

#[test]
fn test_moves_stop_at_walls() {
    let mut game = started(3);
    let mut moved = 0;
    while game.try_move(-1, 0) {
        moved += 1;
        assert!(moved <= 10);
    }
    for (x, y) in game.active_cells().unwrap() {
        assert!((0..10).contains(&x) && (0..20).contains(&y));
    }
    assert!(game.active_cells().unwrap().iter().any(|&(x, _)| x == 0));
}

#[test]
fn test_two_line_clear_at_level_one_scores_300() {
    let mut game = started(5);
    for y in [18, 19] {
        for x in 0..10 {
            if x != 4 && x != 5 {
                game.board_mut().set(x, y, Some(PieceKind::L));
            }
        }
    }
    assert!(game.set_active(ActivePiece::at(PieceKind::O, Rotation::North, 3, 0)));
    assert!(game.apply_action(GameAction::HardDrop));

    assert_eq!(game.score(), 300);
    assert_eq!(game.lines(), 2);
    assert_eq!(game.board().filled_count(), 0);

    let event = game.take_last_event().unwrap();
    assert_eq!(event.kind, PieceKind::O);
    assert_eq!(event.lines_cleared, 2);
    assert_eq!(event.score_delta, 300);
    assert!(!event.game_over);
    assert!(game.take_last_event().is_none());
}

#[test]
fn test_four_lines_at_level_three_scores_2400() {
    let mut score = ScoreState::new();
    for _ in 0..5 {
        score.on_lines_cleared(4);
    }
    assert_eq!(score.level(), 3);
    let before = score.score();
    let before_lines = score.lines();

    let result = score.on_lines_cleared(4);
    assert_eq!(result.points, 2400);
    assert_eq!(score.score() - before, 2400);
    assert_eq!(score.lines() - before_lines, 4);
}

#[test]
fn test_tenth_line_reaches_level_two() {
    let mut score = ScoreState::new();
    score.on_lines_cleared(4);
    score.on_lines_cleared(4);
    score.on_lines_cleared(1);
    assert_eq!((score.lines(), score.level()), (9, 1));

    let result = score.on_lines_cleared(1);
    assert!(result.leveled_up());
    // The clearing lock is paid at the old level.
    assert_eq!(result.points, 100);
    assert_eq!(score.level(), 2);
    assert_eq!(fall_interval_ms(2), 640);
}

#[test]
fn test_blocked_spawn_is_terminal() {
    let mut game = started(8);
    for y in 0..2 {
        for x in 3..=6 {
            game.board_mut().set(x, y, Some(PieceKind::S));
        }
    }
    assert!(!game.spawn(PieceKind::T));
    assert_eq!(game.phase(), Phase::Terminal);
    assert!(game.game_over());
    assert!(game.active().is_none());

    // Only restart is honoured now.
    assert!(!game.apply_action(GameAction::MoveLeft));
    assert!(!game.apply_action(GameAction::HardDrop));
    assert_eq!(game.gravity_step(), pico_tetris::core::GravityStep::Idle);

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!((game.score(), game.level(), game.lines()), (0, 1, 0));
    assert_eq!(game.round(), 1);
}

#[test]
fn test_gravity_locks_where_piece_stands() {
    let mut game = started(2);
    let mut steps = 0;
    loop {
        match game.gravity_step() {
            pico_tetris::core::GravityStep::Fell => steps += 1,
            pico_tetris::core::GravityStep::Locked => break,
            other => panic!("unexpected {:?}", other),
        }
        assert!(steps < 25);
    }
    assert_eq!(game.board().filled_count(), 4);
    assert_eq!(game.pieces_spawned(), 2);
}

#[test]
fn test_landing_y_matches_hard_drop() {
    let mut game = started(11);
    let landing = game.landing_y().unwrap();
    let kind = game.active().unwrap().kind;
    let expected: Vec<(i8, i8)> = {
        let active = game.active().unwrap();
        ActivePiece { y: landing, ..active }.cells().to_vec()
    };
    game.hard_drop();
    for (x, y) in expected {
        assert_eq!(game.board().get(x, y), Some(Some(kind)));
    }
}

#[test]
fn test_snapshot_reflects_state() {
    let game = started(4);
    let snap = game.snapshot();
    assert!(snap.playable());
    assert_eq!(snap.next, game.next_piece());
    assert_eq!(snap.active.unwrap().cells, game.active_cells().unwrap());
    assert_eq!(snap.landing_y, game.landing_y());
    assert_eq!(snap.ghost_cells().unwrap().len(), 4);
}
