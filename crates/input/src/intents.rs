//! Raw button state → per-tick game intents.
//!
//! The environment reports which controls are held through [`ButtonSource`].
//! [`InputTracker`] applies repeat/edge rules per control and derives the hard
//! drop chord (soft drop and rotate held together).

use arrayvec::ArrayVec;

use crate::repeat::{EdgeTracker, InputConfig, RepeatTracker};
use crate::types::{GameAction, Millis};

/// The four physical controls the game reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Rotate,
    SoftDrop,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Left, Button::Right, Button::Rotate, Button::SoftDrop];

    pub fn index(self) -> usize {
        match self {
            Button::Left => 0,
            Button::Right => 1,
            Button::Rotate => 2,
            Button::SoftDrop => 3,
        }
    }
}

/// Held state of every control for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawButtons {
    pub left: bool,
    pub right: bool,
    pub rotate: bool,
    pub soft_drop: bool,
}

impl RawButtons {
    pub fn get(&self, button: Button) -> bool {
        match button {
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Rotate => self.rotate,
            Button::SoftDrop => self.soft_drop,
        }
    }

    pub fn set(&mut self, button: Button, held: bool) {
        match button {
            Button::Left => self.left = held,
            Button::Right => self.right = held,
            Button::Rotate => self.rotate = held,
            Button::SoftDrop => self.soft_drop = held,
        }
    }

    /// Force controls the source cannot report to "released".
    pub fn masked(mut self, caps: Capabilities) -> Self {
        for button in Button::ALL {
            if !caps.supports(button) {
                self.set(button, false);
            }
        }
        self
    }
}

/// Which controls an input source is able to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    supported: [bool; 4],
}

impl Capabilities {
    pub const ALL: Capabilities = Capabilities {
        supported: [true; 4],
    };

    pub fn only(buttons: &[Button]) -> Self {
        let mut supported = [false; 4];
        for b in buttons {
            supported[b.index()] = true;
        }
        Self { supported }
    }

    pub fn supports(&self, button: Button) -> bool {
        self.supported[button.index()]
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::ALL
    }
}

/// Anything that can report held controls: a keyboard, a button pad, a test script.
pub trait ButtonSource {
    /// Controls this source can report. Unsupported controls always read as released.
    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    /// Held state at time `now`.
    fn held(&mut self, now: Millis) -> RawButtons;
}

/// Read a source and mask out what it cannot report.
pub fn poll_buttons<S: ButtonSource + ?Sized>(source: &mut S, now: Millis) -> RawButtons {
    let caps = source.capabilities();
    source.held(now).masked(caps)
}

/// What the player asked for on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub rotate: bool,
    /// Level-triggered: gravity runs faster while this is set.
    pub soft_drop_held: bool,
    pub hard_drop: bool,
}

impl Intents {
    /// Discrete actions in the order they are applied: moves, rotate, hard drop.
    pub fn actions(&self) -> ArrayVec<GameAction, 4> {
        let mut out = ArrayVec::new();
        if self.move_left {
            out.push(GameAction::MoveLeft);
        }
        if self.move_right {
            out.push(GameAction::MoveRight);
        }
        if self.rotate {
            out.push(GameAction::Rotate);
        }
        if self.hard_drop {
            out.push(GameAction::HardDrop);
        }
        out
    }
}

/// Per-control trackers. Lives for the whole process, across game restarts.
#[derive(Debug, Clone)]
pub struct InputTracker {
    left: RepeatTracker,
    right: RepeatTracker,
    rotate: EdgeTracker,
    chord: EdgeTracker,
}

impl InputTracker {
    pub fn new(config: InputConfig) -> Self {
        Self {
            left: RepeatTracker::new(config),
            right: RepeatTracker::new(config),
            rotate: EdgeTracker::new(),
            chord: EdgeTracker::new(),
        }
    }

    /// Evaluate one tick of raw input.
    ///
    /// Hard drop fires when the soft-drop + rotate chord becomes fully held.
    /// A rotate press completing the chord still rotates first, since actions
    /// apply rotate before hard drop.
    pub fn update(&mut self, raw: RawButtons, now: Millis) -> Intents {
        let move_left = self.left.update(raw.left, now);
        let move_right = self.right.update(raw.right, now);
        let rotate = self.rotate.update(raw.rotate);
        let hard_drop = self.chord.update(raw.soft_drop && raw.rotate);

        Intents {
            move_left,
            move_right,
            rotate,
            soft_drop_held: raw.soft_drop,
            hard_drop,
        }
    }

    /// Earliest pending auto-repeat, if a direction is held.
    pub fn next_repeat_deadline(&self, now: Millis) -> Option<Millis> {
        let l = self.left.next_repeat_deadline();
        let r = self.right.next_repeat_deadline();
        // Signed distance, so a deadline already passed sorts first.
        [l, r]
            .into_iter()
            .flatten()
            .min_by_key(|t| t.wrapping_sub(now) as i32)
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
