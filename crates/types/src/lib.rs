//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the rules engine, the input layer and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn origin**: (3, 0), the top-left corner of the piece's 4x4 frame
//!
//! # Timing Constants
//!
//! All timing values are in milliseconds on a wrapping `u32` clock:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_MS` | 700 | Gravity interval at level 1 |
//! | `FALL_STEP_MS` | 60 | Interval reduction per level |
//! | `FALL_FLOOR_MS` | 90 | Fastest gravity interval |
//! | `SOFT_DROP_DIVISOR` | 8 | Gravity divisor while soft drop is held |
//! | `REPEAT_DELAY_MS` | 180 | Hold time before a move starts repeating |
//! | `REPEAT_RATE_MS` | 45 | Interval between repeated moves |
//!
//! # Examples
//!
//! ```
//! use pico_tetris_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn origin x: the 4x4 frame is centered horizontally.
pub const SPAWN_X: i8 = (BOARD_WIDTH as i8) / 2 - 2;

/// Spawn origin y: the top row.
pub const SPAWN_Y: i8 = 0;

/// Gravity interval at level 1.
pub const BASE_FALL_MS: u32 = 700;

/// Gravity speed-up per level.
pub const FALL_STEP_MS: u32 = 60;

/// Gravity never gets faster than this (before the soft drop divisor).
pub const FALL_FLOOR_MS: u32 = 90;

/// Holding soft drop divides the gravity interval by this.
pub const SOFT_DROP_DIVISOR: u32 = 8;

/// Delay between the first move of a held direction and its first repeat.
pub const REPEAT_DELAY_MS: u32 = 180;

/// Interval between repeats once a held direction is repeating.
pub const REPEAT_RATE_MS: u32 = 45;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Reward per lock, indexed by the number of rows cleared (0-4).
///
/// Multiplied by the level in effect when the piece locked.
pub const LINE_REWARDS: [u32; 5] = [0, 100, 300, 500, 800];

/// Milliseconds on a monotonic clock that is allowed to wrap.
pub type Millis = u32;

/// Returns true once `now` has reached or passed `deadline`.
///
/// The comparison is done on the wrapping difference, so it stays correct
/// across a clock wrap as long as the two values are within ~24 days.
///
/// ```
/// use pico_tetris_types::deadline_reached;
///
/// assert!(deadline_reached(100, 100));
/// assert!(!deadline_reached(99, 100));
/// assert!(deadline_reached(5, u32::MAX - 5));
/// ```
#[inline]
pub fn deadline_reached(now: Millis, deadline: Millis) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

/// Milliseconds left until `deadline`, or 0 once it has been reached.
#[inline]
pub fn millis_until(now: Millis, deadline: Millis) -> u32 {
    if deadline_reached(now, deadline) {
        0
    } else {
        deadline.wrapping_sub(now)
    }
}

/// The seven tetromino piece kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind in catalog order. A fresh bag starts from this order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use pico_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter, as written to the event log.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// The four rotation states of a piece.
///
/// The cycle goes North → East → South → West → North; North is the spawn
/// orientation (rotation index 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Next state clockwise, i.e. `(index + 1) mod 4`.
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index in `[0, 4)`.
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any index; values wrap modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Discrete commands the game loop applies to the engine.
///
/// Produced by the input layer from raw button state; hard drop is a chord of
/// soft drop and rotate rather than a separate button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece clockwise, with wall kicks
    Rotate,
    /// Move piece one cell down without locking
    SoftDrop,
    /// Drop to the lowest legal position and lock
    HardDrop,
    /// Start a fresh round
    Restart,
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(kind)`: occupied by a locked block of that kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_timing_defaults() {
        assert_eq!(BASE_FALL_MS, 700);
        assert_eq!(FALL_STEP_MS, 60);
        assert_eq!(FALL_FLOOR_MS, 90);
        assert_eq!(SOFT_DROP_DIVISOR, 8);
        assert_eq!(REPEAT_DELAY_MS, 180);
        assert_eq!(REPEAT_RATE_MS, 45);
        assert_eq!(SPAWN_X, 3);
    }

    #[test]
    fn deadline_comparison_survives_wrap() {
        let deadline = u32::MAX - 10;
        assert!(!deadline_reached(u32::MAX - 11, deadline));
        assert!(deadline_reached(u32::MAX, deadline));
        assert!(deadline_reached(20, deadline));
        assert_eq!(millis_until(u32::MAX - 20, deadline), 10);
        assert_eq!(millis_until(3, deadline), 0);
    }

    #[test]
    fn piece_kind_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }

    #[test]
    fn rotation_index_cycles() {
        let mut r = Rotation::North;
        for i in 0..8 {
            assert_eq!(r.index(), i % 4);
            r = r.rotate_cw();
        }
    }
}
