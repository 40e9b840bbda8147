//! Input layer: held controls in, per-tick game intents out.
//!
//! Everything here is sampled, not event-driven. A [`ButtonSource`] reports
//! which controls are held at a given millisecond; [`InputTracker`] turns that
//! into moves (with delayed auto-repeat), rotate presses and the soft-drop +
//! rotate hard drop chord. [`KeyboardButtons`] adapts `crossterm` key events
//! into a source, including terminals that never send key releases.

pub mod intents;
pub mod keyboard;
pub mod map;
pub mod repeat;

pub use pico_tetris_types as types;

pub use intents::{
    poll_buttons, Button, ButtonSource, Capabilities, InputTracker, Intents, RawButtons,
};
pub use keyboard::{KeyboardButtons, DEFAULT_KEY_RELEASE_TIMEOUT_MS, MAX_KEY_RELEASE_TIMEOUT_MS};
pub use map::{button_for_key, is_restart, should_quit};
pub use repeat::{EdgeTracker, InputConfig, RepeatTracker};
