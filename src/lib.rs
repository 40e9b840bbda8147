//! Pico Tetris (workspace facade crate).
//!
//! The engine lives in dedicated crates under `crates/`; this package
//! re-exports them as `pico_tetris::{core,engine,input,term,types}` and adds
//! the run configuration and the event log used by the terminal binary.

pub mod config;
pub mod event_log;

pub use pico_tetris_core as core;
pub use pico_tetris_engine as engine;
pub use pico_tetris_input as input;
pub use pico_tetris_term as term;
pub use pico_tetris_types as types;

pub use config::RunConfig;
pub use event_log::{EventLog, LogRecord};
