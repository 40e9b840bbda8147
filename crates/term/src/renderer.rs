//! TerminalRenderer: diffs framebuffers and writes the changes to a terminal.
//!
//! Escape sequences are encoded into a reusable byte buffer first and written
//! with one `write_all`, so a frame never reaches the terminal half-drawn.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
    enhanced_keys: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            prev: None,
            buf: Vec::with_capacity(16 * 1024),
            enhanced_keys: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    ///
    /// Also asks the terminal for key release events where the keyboard
    /// enhancement protocol is available.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            self.enhanced_keys = true;
        }
        self.flush_buf()
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call after a partial enter.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if std::mem::take(&mut self.enhanced_keys) {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the previous frame so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Draw `fb`, then hand back the previous frame's buffer in its place.
    ///
    /// Callers keep one framebuffer and re-render into it each frame; the two
    /// buffers ping-pong without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.prev.take() {
            Some(mut prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                std::mem::swap(&mut prev, fb);
                self.prev = Some(prev);
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                let fresh = FrameBuffer::new(fb.width(), fb.height());
                self.prev = Some(std::mem::replace(fb, fresh));
            }
        }
        self.flush_buf()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a clear-and-repaint of every cell.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        if let Some(row) = fb.row(y) {
            for cell in row {
                set_style(out, &mut style, cell.style)?;
                out.queue(Print(cell.ch))?;
            }
        }
    }
    finish(out)
}

/// Encode only the runs of cells that differ between two same-sized frames.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for y in 0..next.height() {
        let (Some(old), Some(new)) = (prev.row(y), next.row(y)) else {
            continue;
        };
        for (start, end) in changed_runs(old, new) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for cell in &new[start..end] {
                set_style(out, &mut style, cell.style)?;
                out.queue(Print(cell.ch))?;
            }
        }
    }
    finish(out)
}

/// Half-open column ranges where `a` and `b` differ.
fn changed_runs<'a, T: PartialEq>(
    a: &'a [T],
    b: &'a [T],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let len = a.len().min(b.len());
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < len && a[x] == b[x] {
            x += 1;
        }
        if x >= len {
            return None;
        }
        let start = x;
        while x < len && a[x] != b[x] {
            x += 1;
        }
        Some((start, x))
    })
}

fn set_style(out: &mut Vec<u8>, current: &mut Option<CellStyle>, style: CellStyle) -> Result<()> {
    if *current == Some(style) {
        return Ok(());
    }
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    *current = Some(style);
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = [0, 1, 1, 1, 0, 0, 2];
        let b = [0, 9, 9, 9, 0, 0, 3];
        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 4), (6, 7)]);
    }

    #[test]
    fn identical_frames_encode_no_cells() {
        let fb = FrameBuffer::new(6, 3);
        let mut out = Vec::new();
        encode_diff_into(&fb, &fb.clone(), &mut out).unwrap();

        let mut only_reset = Vec::new();
        finish(&mut only_reset).unwrap();
        assert_eq!(out, only_reset);
    }

    #[test]
    fn draw_swap_full_then_diff() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "ab", CellStyle::default());
        r.draw_swap(&mut fb).unwrap();
        let full_len = r.writer().len();
        assert!(full_len > 0);

        // Caller re-renders the same content: nothing but the trailing reset.
        fb.put_str(0, 0, "ab", CellStyle::default());
        r.draw_swap(&mut fb).unwrap();
        let diff_len = r.writer().len() - full_len;
        assert!(diff_len < full_len);

        let text = String::from_utf8_lossy(r.writer());
        assert!(text.contains('a'));
    }
}
