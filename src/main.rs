//! Terminal runner (default binary).
//!
//! Wires the session to crossterm: key events feed a held-key tracker, the
//! loop sleeps in `event::poll` until the session's next deadline, and frames
//! go through the diffing renderer.

use std::env;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use pico_tetris::core::{GameSnapshot, GameState};
use pico_tetris::engine::Session;
use pico_tetris::input::{is_restart, poll_buttons, should_quit, KeyboardButtons};
use pico_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use pico_tetris::types::{millis_until, Millis};
use pico_tetris::{EventLog, RunConfig};

type FileLog = EventLog<std::io::BufWriter<std::fs::File>>;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = RunConfig::from_env().apply_args(&args)?;
    let mut log = match &config.event_log_path {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut log_error = None;
    let result = run(&mut term, &config, log.as_mut(), &mut log_error);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(err) = log_error {
        eprintln!("warning: {:#}", err);
    }
    result
}

/// Keep the first log failure; the log has disabled itself after it.
fn note(res: Result<()>, slot: &mut Option<anyhow::Error>) {
    if let Err(err) = res {
        slot.get_or_insert(err);
    }
}

fn run(
    term: &mut TerminalRenderer,
    config: &RunConfig,
    mut log: Option<&mut FileLog>,
    log_error: &mut Option<anyhow::Error>,
) -> Result<()> {
    let clock = Instant::now();
    // Wrapping millisecond clock; every deadline comparison is wrap-safe.
    let now_ms = || clock.elapsed().as_millis() as Millis;

    let game = match config.seed {
        Some(seed) => GameState::new(seed),
        None => GameState::from_entropy(),
    };
    let mut session = Session::new(game, config.session(), now_ms());
    let mut keys =
        KeyboardButtons::new().with_key_release_timeout_ms(config.key_release_timeout_ms);

    if let Some(log) = log.as_deref_mut() {
        note(log.start(config.seed, now_ms()), log_error);
    }

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    loop {
        let now = now_ms();
        let mut wake = session.next_wake(now);
        if let Some(release) = keys.next_auto_release(now) {
            if millis_until(now, release) < millis_until(now, wake) {
                wake = release;
            }
        }

        if event::poll(Duration::from_millis(millis_until(now, wake) as u64))? {
            // Drain everything queued so one tick sees all held keys.
            loop {
                match event::read()? {
                    Event::Key(key) => {
                        let now = now_ms();
                        if key.kind != KeyEventKind::Release {
                            if should_quit(key) {
                                if let Some(log) = log.as_deref_mut() {
                                    note(log.flush(), log_error);
                                }
                                return Ok(());
                            }
                            if key.kind == KeyEventKind::Press && is_restart(key) {
                                session.reset(now);
                                if let Some(log) = log.as_deref_mut() {
                                    note(log.reset(now), log_error);
                                }
                            }
                        }
                        keys.handle_key_event(key, now);
                    }
                    Event::Resize(_, _) => {
                        term.invalidate();
                        session.request_render();
                    }
                    _ => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let now = now_ms();
        let raw = poll_buttons(&mut keys, now);
        let report = session.tick(now, raw);

        if let Some(log) = log.as_deref_mut() {
            for lock in &report.events {
                note(log.lock(lock, now), log_error);
            }
        }

        if report.render {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            session.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }
    }
}
