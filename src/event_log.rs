//! JSON-lines event log.
//!
//! One serde-tagged record per line. The log is append-only and buffered; a
//! failed write is returned once and then the log goes quiet.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::core::LockEvent;
use crate::types::Millis;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LogRecord {
    Start {
        /// `None` when the supply was seeded from entropy.
        seed: Option<u64>,
        ts: Millis,
    },
    #[serde(rename_all = "camelCase")]
    Lock {
        seq: u64,
        ts: Millis,
        piece: &'static str,
        lines_cleared: u32,
        score_delta: u32,
        score: u32,
        level: u32,
        lines: u32,
    },
    GameOver {
        seq: u64,
        ts: Millis,
        score: u32,
        level: u32,
        lines: u32,
    },
    Reset {
        seq: u64,
        ts: Millis,
    },
}

/// Event log over any writer; `EventLog<BufWriter<File>>` for real runs.
pub struct EventLog<W: Write> {
    out: Option<W>,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow!("event log: open {} failed: {}", path.display(), e))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub fn start(&mut self, seed: Option<u64>, ts: Millis) -> Result<()> {
        self.write(&LogRecord::Start { seed, ts })
    }

    /// Log a lock, plus a game-over record (and a flush) if it ended the round.
    pub fn lock(&mut self, event: &LockEvent, ts: Millis) -> Result<()> {
        let seq = self.next_seq();
        self.write(&LogRecord::Lock {
            seq,
            ts,
            piece: event.kind.as_str(),
            lines_cleared: event.lines_cleared,
            score_delta: event.score_delta,
            score: event.score,
            level: event.level,
            lines: event.lines,
        })?;

        if event.game_over {
            let seq = self.next_seq();
            self.write(&LogRecord::GameOver {
                seq,
                ts,
                score: event.score,
                level: event.level,
                lines: event.lines,
            })?;
            self.flush()?;
        }
        Ok(())
    }

    pub fn reset(&mut self, ts: Millis) -> Result<()> {
        let seq = self.next_seq();
        self.write(&LogRecord::Reset { seq, ts })
    }

    pub fn write(&mut self, record: &LogRecord) -> Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };

        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record)?;
        self.buf.push(b'\n');
        if let Err(e) = out.write_all(&self.buf) {
            self.out = None;
            return Err(anyhow!("event log: write failed: {}", e));
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        if let Err(e) = out.flush() {
            self.out = None;
            return Err(anyhow!("event log: flush failed: {}", e));
        }
        Ok(())
    }

    /// Give back the writer, e.g. to inspect a `Vec<u8>` in tests.
    pub fn into_inner(mut self) -> Option<W> {
        self.out.take()
    }
}

impl<W: Write> Drop for EventLog<W> {
    fn drop(&mut self) {
        if let Some(out) = self.out.as_mut() {
            let _ = out.flush();
        }
    }
}
