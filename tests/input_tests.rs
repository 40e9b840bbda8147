//! Input tracking: auto-repeat timing, the hard drop chord, custom sources.

use pico_tetris::input::{
    poll_buttons, Button, ButtonSource, Capabilities, InputConfig, InputTracker, RawButtons,
    RepeatTracker,
};
use pico_tetris::types::Millis;

#[test]
fn test_held_button_repeat_timeline() {
    let mut tracker = RepeatTracker::new(InputConfig::default());
    assert!(tracker.update(true, 0), "fires on press");
    assert!(!tracker.update(true, 100), "still inside the 180ms delay");
    assert!(tracker.update(true, 185), "delay elapsed");
    assert!(tracker.update(true, 230), "185 + 45");
}

#[test]
fn test_held_left_moves_at_repeat_rate() {
    let mut input = InputTracker::default();
    let held = RawButtons {
        left: true,
        ..RawButtons::default()
    };
    let fired: Vec<Millis> = (0..=400)
        .step_by(5)
        .filter(|&t| input.update(held, t).move_left)
        .collect();
    assert_eq!(fired, vec![0, 180, 225, 270, 315, 360]);
}

#[test]
fn test_held_chord_fires_hard_drop_once() {
    let mut input = InputTracker::default();
    let both = RawButtons {
        rotate: true,
        soft_drop: true,
        ..RawButtons::default()
    };
    let first = input.update(both, 0);
    assert!(first.hard_drop);
    assert!(first.rotate);
    for t in 1..50 {
        let i = input.update(both, t * 16);
        assert!(!i.hard_drop && !i.rotate);
        assert!(i.soft_drop_held);
    }
}

/// A two-button pad: no rotate, no soft drop.
struct Pad {
    script: Vec<(Millis, RawButtons)>,
}

impl ButtonSource for Pad {
    fn capabilities(&self) -> Capabilities {
        Capabilities::only(&[Button::Left, Button::Right])
    }

    fn held(&mut self, now: Millis) -> RawButtons {
        self.script
            .iter()
            .rev()
            .find(|(t, _)| *t <= now)
            .map(|(_, raw)| *raw)
            .unwrap_or_default()
    }
}

#[test]
fn test_unsupported_controls_read_released() {
    let all = RawButtons {
        left: true,
        right: false,
        rotate: true,
        soft_drop: true,
    };
    let mut pad = Pad {
        script: vec![(0, all)],
    };
    let raw = poll_buttons(&mut pad, 10);
    assert!(raw.left);
    assert!(!raw.rotate && !raw.soft_drop);

    let intents = InputTracker::default().update(raw, 10);
    assert!(intents.move_left);
    assert!(!intents.hard_drop);
}
