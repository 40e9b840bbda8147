//! Edge and auto-repeat detection for held buttons.
//!
//! Inputs are sampled once per tick as plain "held right now" booleans. A
//! [`RepeatTracker`] turns that into discrete events: one on the press, then
//! one after `repeat_delay_ms`, then one every `repeat_rate_ms` while the
//! button stays down. An [`EdgeTracker`] only reports presses.

use crate::types::{deadline_reached, Millis, REPEAT_DELAY_MS, REPEAT_RATE_MS};

/// Auto-repeat timing for held directional buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputConfig {
    /// Hold time after the first event before repeating starts.
    pub repeat_delay_ms: u32,
    /// Interval between repeated events.
    pub repeat_rate_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            repeat_delay_ms: REPEAT_DELAY_MS,
            repeat_rate_ms: REPEAT_RATE_MS,
        }
    }
}

/// Rising edge plus delayed auto-repeat for one button.
#[derive(Debug, Clone)]
pub struct RepeatTracker {
    previous_held: bool,
    next_repeat_deadline: Millis,
    config: InputConfig,
}

impl RepeatTracker {
    pub fn new(config: InputConfig) -> Self {
        Self {
            previous_held: false,
            next_repeat_deadline: 0,
            config,
        }
    }

    /// Feed the current button state; returns true when a move should happen.
    pub fn update(&mut self, held_now: bool, now: Millis) -> bool {
        let fire = match (held_now, self.previous_held) {
            (true, false) => {
                self.next_repeat_deadline = now.wrapping_add(self.config.repeat_delay_ms);
                true
            }
            (true, true) if deadline_reached(now, self.next_repeat_deadline) => {
                self.next_repeat_deadline = now.wrapping_add(self.config.repeat_rate_ms);
                true
            }
            _ => false,
        };

        self.previous_held = held_now;
        fire
    }

    pub fn is_held(&self) -> bool {
        self.previous_held
    }

    /// Deadline of the next repeat while held, for wake-up scheduling.
    pub fn next_repeat_deadline(&self) -> Option<Millis> {
        self.previous_held.then_some(self.next_repeat_deadline)
    }
}

impl Default for RepeatTracker {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

/// Rising-edge detection without repeat.
#[derive(Debug, Clone, Default)]
pub struct EdgeTracker {
    previous_held: bool,
}

impl EdgeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only on the tick the button goes from released to held.
    pub fn update(&mut self, held_now: bool) -> bool {
        let fire = held_now && !self.previous_held;
        self.previous_held = held_now;
        fire
    }

    pub fn is_held(&self) -> bool {
        self.previous_held
    }
}
