//! Single-threaded tick loop for one game.
//!
//! [`Session`] owns the game state, the input trackers and every deadline. The
//! caller supplies the clock and raw button state, sleeps until
//! [`Session::next_wake`], and draws when a [`TickReport`] asks for it.

pub mod session;

pub use pico_tetris_core as core;
pub use pico_tetris_input as input;
pub use pico_tetris_types as types;

pub use session::{Session, SessionConfig, TickReport, DEFAULT_FRAME_MS, IDLE_WAKE_MS};
