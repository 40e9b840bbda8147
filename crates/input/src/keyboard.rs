//! Held-key tracking for terminal keyboards.
//!
//! Most terminals only report presses (plus OS auto-repeat presses), not
//! releases. Until a release event is seen, a key counts as held for
//! `key_release_timeout_ms` after its last press or repeat. Terminals that do
//! report releases switch the tracker to exact held state.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::intents::{Button, ButtonSource, RawButtons};
use crate::map::button_for_key;
use crate::types::{deadline_reached, Millis};

// Short enough that a single tap does not turn into a DAS repeat.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Upper bound for the timeout; wrap-safe deadlines only order within half the clock.
pub const MAX_KEY_RELEASE_TIMEOUT_MS: u32 = 60_000;

#[derive(Debug, Clone, Copy, Default)]
struct KeySlot {
    down: bool,
    last_seen: Millis,
}

/// Keyboard-backed [`ButtonSource`].
#[derive(Debug, Clone)]
pub struct KeyboardButtons {
    slots: [KeySlot; 4],
    key_release_timeout_ms: u32,
    release_events_seen: bool,
}

impl KeyboardButtons {
    pub fn new() -> Self {
        Self {
            slots: [KeySlot::default(); 4],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events_seen: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms.min(MAX_KEY_RELEASE_TIMEOUT_MS);
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn reports_releases(&self) -> bool {
        self.release_events_seen
    }

    /// Record a key event. Returns the control it maps to, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Millis) -> Option<Button> {
        let button = button_for_key(key.code)?;
        let slot = &mut self.slots[button.index()];
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                slot.down = true;
                slot.last_seen = now;
            }
            KeyEventKind::Release => {
                self.release_events_seen = true;
                slot.down = false;
            }
        }
        Some(button)
    }

    /// Drop all held state, e.g. after the terminal loses focus.
    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.down = false;
        }
    }

    /// When the next timeout-based release happens, for wake-up scheduling.
    pub fn next_auto_release(&self, now: Millis) -> Option<Millis> {
        if self.release_events_seen {
            return None;
        }
        self.slots
            .iter()
            .filter(|s| s.down)
            .map(|s| {
                s.last_seen
                    .wrapping_add(self.key_release_timeout_ms)
                    .wrapping_add(1)
            })
            .min_by_key(|deadline| deadline.wrapping_sub(now) as i32)
    }

    fn expire(&mut self, now: Millis) {
        if self.release_events_seen {
            return;
        }
        for slot in &mut self.slots {
            let deadline = slot.last_seen.wrapping_add(self.key_release_timeout_ms);
            if slot.down && deadline_reached(now, deadline) && now != deadline {
                slot.down = false;
            }
        }
    }
}

impl Default for KeyboardButtons {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonSource for KeyboardButtons {
    fn held(&mut self, now: Millis) -> RawButtons {
        self.expire(now);
        let mut raw = RawButtons::default();
        for button in Button::ALL {
            raw.set(button, self.slots[button.index()].down);
        }
        raw
    }
}
