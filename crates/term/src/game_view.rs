//! GameView: draws a [`GameSnapshot`] into a [`FrameBuffer`].
//!
//! Pure, no I/O. Each board cell is `cell_w` columns by one row; the side
//! panel sits to the right of the well when the viewport is wide enough.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_MIN_WIDTH: u16 = 12;

const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
const EMPTY: CellStyle = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
const GHOST: CellStyle = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
const BANNER: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();

pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

/// Screen placement of the well for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Top-left corner of the border.
    x: u16,
    y: u16,
    frame_w: u16,
    frame_h: u16,
    panel_x: Option<u16>,
}

pub struct GameView {
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 + 2;
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = viewport.height.saturating_sub(frame_h) / 2;
        let panel_x = x.saturating_add(frame_w).saturating_add(2);
        let panel_fits = viewport.width.saturating_sub(panel_x) >= PANEL_MIN_WIDTH;
        Layout {
            x,
            y,
            frame_w,
            frame_h,
            panel_x: panel_fits.then_some(panel_x),
        }
    }

    /// Redraw the whole frame. Reuses `fb`, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(viewport);
        self.draw_border(fb, &layout);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_block(fb, &layout, x as i8, y as i8, *kind),
                    None => self.fill_cell(fb, &layout, x as i8, y as i8, '·', EMPTY),
                }
            }
        }

        if let Some(ghost) = snap.ghost_cells() {
            for (x, y) in ghost {
                self.fill_cell(fb, &layout, x, y, '░', GHOST);
            }
        }
        if let Some(active) = snap.active {
            for (x, y) in active.cells {
                self.draw_block(fb, &layout, x, y, active.kind);
            }
        }

        if let Some(panel_x) = layout.panel_x {
            draw_panel(fb, snap, panel_x, layout.y);
        }

        if snap.game_over {
            self.draw_game_over(fb, &layout, snap.score);
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, l: &Layout) {
        let (right, bottom) = (l.x + l.frame_w - 1, l.y + l.frame_h - 1);
        for x in l.x + 1..right {
            fb.put_char(x, l.y, '─', BORDER);
            fb.put_char(x, bottom, '─', BORDER);
        }
        for y in l.y + 1..bottom {
            fb.put_char(l.x, y, '│', BORDER);
            fb.put_char(right, y, '│', BORDER);
        }
        fb.put_char(l.x, l.y, '┌', BORDER);
        fb.put_char(right, l.y, '┐', BORDER);
        fb.put_char(l.x, bottom, '└', BORDER);
        fb.put_char(right, bottom, '┘', BORDER);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, l: &Layout, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle::new(kind_color(kind), WELL_BG).bold();
        self.fill_cell(fb, l, x, y, '█', style);
    }

    /// Paint one board cell; cells outside the well are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        l: &Layout,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if !(0..BOARD_WIDTH as i8).contains(&x) || !(0..BOARD_HEIGHT as i8).contains(&y) {
            return;
        }
        let px = l.x + 1 + x as u16 * self.cell_w;
        let py = l.y + 1 + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, l: &Layout, score: u32) {
        let mid = l.y + l.frame_h / 2;
        center_text(fb, l, mid.saturating_sub(1), "GAME OVER");

        let mut line = [0u8; 24];
        let text = score_line(score, &mut line);
        center_text(fb, l, mid, text);
        center_text(fb, l, mid + 1, "R restart");
    }
}

fn center_text(fb: &mut FrameBuffer, l: &Layout, y: u16, text: &str) {
    let w = text.chars().count() as u16;
    let x = l.x + l.frame_w.saturating_sub(w) / 2;
    fb.put_str(x, y, text, BANNER);
}

/// "SCORE <n>" formatted into a stack buffer.
fn score_line(score: u32, buf: &mut [u8; 24]) -> &str {
    const PREFIX: &[u8] = b"SCORE ";
    buf[..PREFIX.len()].copy_from_slice(PREFIX);
    let mut digits = [0u8; 10];
    let mut n = score;
    let mut len = 0;
    loop {
        digits[len] = b'0' + (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    for (i, d) in digits[..len].iter().rev().enumerate() {
        buf[PREFIX.len() + i] = *d;
    }
    std::str::from_utf8(&buf[..PREFIX.len() + len]).unwrap_or("SCORE")
}

fn draw_panel(fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, top: u16) {
    let mut y = top;
    for (label, value) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
        fb.put_str(x, y, label, LABEL);
        fb.put_u32(x, y + 1, value, VALUE);
        y += 3;
    }

    fb.put_str(x, y, "NEXT", LABEL);
    let style = CellStyle::new(kind_color(snap.next), SCREEN_BG).bold();
    for (dx, dy) in get_shape(snap.next, Rotation::North) {
        let px = x + dx as u16 * 2;
        let py = y + 1 + dy as u16;
        fb.fill_rect(px, py, 2, 1, '█', style);
    }
    y += 6;

    let hint = VALUE.dim();
    for line in [
        "←→ move",
        "↑ rotate",
        "↓ soft drop",
        "↓+↑ hard drop",
        "r restart",
        "q quit",
    ] {
        fb.put_str(x, y, line, hint);
        y += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_line_formats() {
        let mut buf = [0u8; 24];
        assert_eq!(score_line(0, &mut buf), "SCORE 0");
        assert_eq!(score_line(4_294_967_295, &mut buf), "SCORE 4294967295");
    }

    #[test]
    fn test_layout_drops_panel_when_narrow() {
        let view = GameView::default();
        assert!(view.layout(Viewport::new(80, 24)).panel_x.is_some());
        assert!(view.layout(Viewport::new(24, 24)).panel_x.is_none());
    }

    #[test]
    fn test_every_kind_has_distinct_color() {
        let mut colors: Vec<Rgb> = PieceKind::ALL.iter().map(|k| kind_color(*k)).collect();
        colors.sort_by_key(|c| (c.r, c.g, c.b));
        colors.dedup();
        assert_eq!(colors.len(), 7);
    }
}
