//! Session: one board, one input tracker, one clock.
//!
//! A tick runs in a fixed order: directional moves, rotate, hard drop, then at
//! most one gravity decision, then the render decision. Time is a wrapping
//! millisecond counter supplied by the caller; the session never sleeps.

use arrayvec::ArrayVec;

use crate::core::{fall_interval_ms, gravity_interval_ms, GameSnapshot, GameState, LockEvent, Phase};
use crate::input::{InputConfig, InputTracker, Intents, RawButtons};
use crate::types::{deadline_reached, GameAction, Millis};

pub const DEFAULT_FRAME_MS: u32 = 16;

/// Longest the loop sleeps when nothing is scheduled (Terminal, idle input).
pub const IDLE_WAKE_MS: u32 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Minimum spacing between rendered frames.
    pub frame_ms: u32,
    pub input: InputConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_ms: DEFAULT_FRAME_MS,
            input: InputConfig::default(),
        }
    }
}

/// What happened during one [`Session::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub intents: Intents,
    /// Locks in the order they happened (hard drop first, then gravity).
    pub events: ArrayVec<LockEvent, 2>,
    /// True when the round ended during this tick.
    pub game_over: bool,
    /// True when the caller should draw a frame now.
    pub render: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    input: InputTracker,
    config: SessionConfig,
    /// When the next gravity decision is due. Fixed once scheduled.
    next_fall: Millis,
    soft_drop_held: bool,
    next_frame: Millis,
    dirty: bool,
}

impl Session {
    /// Wrap a game and spawn its first piece at time `now`.
    pub fn new(mut game: GameState, config: SessionConfig, now: Millis) -> Self {
        game.start();
        let next_fall = now.wrapping_add(fall_interval_ms(game.level()));
        Self {
            game,
            input: InputTracker::new(config.input),
            config,
            next_fall,
            soft_drop_held: false,
            next_frame: now,
            dirty: true,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Mutable access for scenario setup.
    pub fn game_mut(&mut self) -> &mut GameState {
        self.dirty = true;
        &mut self.game
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    /// Interval the next gravity decision would be scheduled with, given the
    /// current soft-drop state.
    pub fn gravity_interval(&self) -> u32 {
        gravity_interval_ms(self.game.level(), self.soft_drop_held)
    }

    /// When the next gravity decision is due, or `None` if no piece is falling.
    pub fn gravity_deadline(&self) -> Option<Millis> {
        (self.game.phase() == Phase::Falling)
            .then_some(self.next_fall)
    }

    /// Run one tick with the controls held at `now`.
    pub fn tick(&mut self, now: Millis, raw: RawButtons) -> TickReport {
        let intents = self.input.update(raw, now);
        self.soft_drop_held = intents.soft_drop_held;

        let mut report = TickReport {
            intents,
            ..TickReport::default()
        };

        if self.game.game_over() {
            return self.finish(now, report);
        }

        for action in intents.actions() {
            let changed = self.game.apply_action(action);
            self.dirty |= changed;
            if action == GameAction::HardDrop {
                self.dirty = true;
                self.next_fall = now.wrapping_add(fall_interval_ms(self.game.level()));
                self.collect_event(&mut report);
            }
        }

        if let Some(deadline) = self.gravity_deadline() {
            if deadline_reached(now, deadline) {
                // Interval is taken at the level in effect before this step locks.
                let interval = self.gravity_interval();
                self.game.gravity_step();
                self.next_fall = now.wrapping_add(interval);
                self.dirty = true;
                self.collect_event(&mut report);
            }
        }

        self.finish(now, report)
    }

    /// Apply an action outside the per-tick intents (e.g. a restart key).
    pub fn apply(&mut self, action: GameAction, now: Millis) -> bool {
        if action == GameAction::Restart {
            return self.reset(now);
        }
        let changed = self.game.apply_action(action);
        self.dirty |= changed;
        changed
    }

    /// Start a fresh round. Input history is kept, so a key held across the
    /// restart does not fire again.
    pub fn reset(&mut self, now: Millis) -> bool {
        let ok = self.game.reset_game();
        self.next_fall = now.wrapping_add(fall_interval_ms(self.game.level()));
        self.dirty = true;
        ok
    }

    /// Force the next frame to render, e.g. after a terminal resize.
    pub fn request_render(&mut self) {
        self.dirty = true;
    }

    /// Earliest time the caller should tick again.
    pub fn next_wake(&self, now: Millis) -> Millis {
        let mut wake = now.wrapping_add(IDLE_WAKE_MS);
        let mut consider = |t: Millis| {
            if t.wrapping_sub(now) as i32 <= wake.wrapping_sub(now) as i32 {
                wake = t;
            }
        };

        if let Some(t) = self.gravity_deadline() {
            consider(t);
        }
        if self.dirty {
            consider(self.next_frame);
        }
        if let Some(t) = self.input.next_repeat_deadline(now) {
            consider(t);
        }
        wake
    }

    fn collect_event(&mut self, report: &mut TickReport) {
        if let Some(event) = self.game.take_last_event() {
            report.game_over |= event.game_over;
            // Two locks per tick at most: one hard drop, one gravity step.
            let _ = report.events.try_push(event);
        }
    }

    fn finish(&mut self, now: Millis, mut report: TickReport) -> TickReport {
        if self.dirty && deadline_reached(now, self.next_frame) {
            report.render = true;
            self.dirty = false;
            self.next_frame = now.wrapping_add(self.config.frame_ms);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActivePiece;
    use crate::types::{PieceKind, Rotation};

    fn idle() -> RawButtons {
        RawButtons::default()
    }

    fn session() -> Session {
        Session::new(GameState::new(7), SessionConfig::default(), 0)
    }

    #[test]
    fn test_first_tick_renders() {
        let mut s = session();
        assert!(s.tick(0, idle()).render);
        assert!(!s.tick(1, idle()).render);
    }

    #[test]
    fn test_gravity_waits_for_fall_interval() {
        let mut s = session();
        let y0 = s.game().active().map(|p| p.y);
        s.tick(699, idle());
        assert_eq!(s.game().active().map(|p| p.y), y0);
        s.tick(700, idle());
        assert_eq!(s.game().active().map(|p| p.y), y0.map(|y| y + 1));
        assert_eq!(s.gravity_deadline(), Some(1400));
    }

    #[test]
    fn test_soft_drop_interval_applies_from_next_decision() {
        let mut s = session();
        let soft = RawButtons {
            soft_drop: true,
            ..idle()
        };
        let y0 = s.game().active().map(|p| p.y);

        // Holding soft drop does not move a deadline that is already set.
        s.tick(10, soft);
        assert_eq!(s.gravity_interval(), 700 / 8);
        assert_eq!(s.gravity_deadline(), Some(700));
        s.tick(97, soft);
        assert_eq!(s.game().active().map(|p| p.y), y0);

        // The decision at 700 schedules the next one at the fast interval.
        s.tick(700, soft);
        assert_eq!(s.game().active().map(|p| p.y), y0.map(|y| y + 1));
        assert_eq!(s.gravity_deadline(), Some(700 + 700 / 8));
    }

    #[test]
    fn test_pressing_soft_drop_after_slow_decision_keeps_deadline() {
        let mut s = session();
        s.tick(700, idle());
        let y1 = s.game().active().map(|p| p.y);
        assert_eq!(s.gravity_deadline(), Some(1400));

        let soft = RawButtons {
            soft_drop: true,
            ..idle()
        };
        s.tick(710, soft);
        s.tick(790, soft);
        assert_eq!(s.game().active().map(|p| p.y), y1);
        assert_eq!(s.gravity_deadline(), Some(1400));
        assert_eq!(s.next_wake(790), 790 + IDLE_WAKE_MS);
    }

    #[test]
    fn test_hard_drop_reports_lock_and_reschedules_gravity() {
        let mut s = session();
        s.tick(0, RawButtons { soft_drop: true, ..idle() });
        let r = s.tick(
            30,
            RawButtons {
                soft_drop: true,
                rotate: true,
                ..idle()
            },
        );
        assert!(r.intents.hard_drop);
        assert_eq!(r.events.len(), 1);
        assert_eq!(s.game().board().filled_count(), 4);
        // Plain fall interval, even with soft drop still held.
        assert_eq!(s.gravity_deadline(), Some(30 + 700));
    }

    #[test]
    fn test_terminal_ignores_intents_until_reset() {
        let mut s = session();
        // Column 9 open only in the top four rows; column 0 open everywhere.
        for y in 0..20 {
            let last = if y < 4 { 8 } else { 9 };
            for x in 1..=last {
                s.game_mut().board_mut().set(x, y, Some(PieceKind::Z));
            }
        }
        assert!(s
            .game_mut()
            .set_active(ActivePiece::at(PieceKind::I, Rotation::East, 7, 0)));

        let r = s.tick(700, idle());
        assert!(r.game_over);
        assert_eq!(r.events.len(), 1);
        assert!(s.game().game_over());
        assert_eq!(s.gravity_deadline(), None);

        let before = s.game().board().filled_count();
        s.tick(800, RawButtons { left: true, ..idle() });
        assert_eq!(s.game().board().filled_count(), before);

        assert!(s.reset(900));
        assert!(!s.game().game_over());
        assert_eq!(s.game().board().filled_count(), 0);
        assert_eq!(s.gravity_deadline(), Some(1600));
    }

    #[test]
    fn test_next_wake_is_earliest_deadline() {
        let mut s = session();
        s.tick(0, idle());
        // Nothing dirty: gravity at 700 against the idle cap.
        assert_eq!(s.next_wake(0), 250);
        assert_eq!(s.next_wake(600), 700);

        assert!(s.tick(600, RawButtons { left: true, ..idle() }).render);
        let r = s.tick(
            605,
            RawButtons {
                left: true,
                rotate: true,
                ..idle()
            },
        );
        assert!(r.intents.rotate);
        assert!(!r.render, "frame cadence holds the redraw until 616");
        assert_eq!(s.next_wake(605), 616);
    }
}
