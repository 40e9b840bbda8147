//! Core game logic - pure, deterministic and testable
//!
//! This crate contains the rules of the falling-block engine and nothing else:
//! no terminal, no clock, no I/O. Time only enters through the callers that
//! decide when to run a gravity step.
//!
//! # Module Structure
//!
//! - [`pieces`]: shape catalog (7 kinds x 4 rotations) and the kick rule
//! - [`board`]: 10x20 grid with wall-aware collision queries and row clearing
//! - [`supply`]: 7-bag shuffled piece supply
//! - [`scoring`]: line rewards, level progression and gravity intervals
//! - [`game_state`]: active-piece controller and the spawn/fall/lock state machine
//! - [`snapshot`]: copyable view of a game for renderers
//!
//! # Example
//!
//! ```
//! use pico_tetris_core::{GameState, Phase};
//! use pico_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! assert!(game.start());
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! assert!(game.apply_action(GameAction::HardDrop));
//!
//! // The dropped piece is now part of the board and a new one is falling.
//! assert_eq!(game.board().filled_count(), 4);
//! assert_eq!(game.phase(), Phase::Falling);
//! assert_eq!(game.pieces_spawned(), 2);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod scoring;
pub mod snapshot;
pub mod supply;

pub use pico_tetris_types as types;

pub use board::Board;
pub use game_state::{ActivePiece, GameState, GravityStep, LockEvent, Phase};
pub use pieces::{get_shape, try_rotate, KICK_OFFSETS};
pub use scoring::{
    fall_interval_ms, gravity_interval_ms, soft_drop_interval_ms, ScoreResult, ScoreState,
};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use supply::BagSupply;
