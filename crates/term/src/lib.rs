//! Terminal presentation: a framebuffer, a pure game view and a diffing renderer.
//!
//! Rendering goes snapshot → [`GameView`] → [`FrameBuffer`] → [`TerminalRenderer`].
//! Only the last step touches the terminal, so everything before it is
//! unit-testable without a tty.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use pico_tetris_core as core;
pub use pico_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{kind_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
