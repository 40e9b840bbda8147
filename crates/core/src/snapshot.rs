//! Render-boundary snapshot of a game.
//!
//! Plain `Copy` data: the terminal view and any other observer read this
//! instead of borrowing the live [`GameState`](crate::GameState).

use crate::game_state::ActivePiece;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute board coordinates of the four minos.
    pub cells: [(i8, i8); 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    /// Origin row the active piece would hard-drop to.
    pub landing_y: Option<i8>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
    pub round: u32,
    pub pieces_spawned: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }

    /// Cells of the active piece shifted down to its landing row.
    pub fn ghost_cells(&self) -> Option<[(i8, i8); 4]> {
        let active = self.active?;
        let drop = self.landing_y? - active.y;
        Some(active.cells.map(|(x, y)| (x, y + drop)))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            landing_y: None,
            next: PieceKind::I,
            score: 0,
            level: 1,
            lines: 0,
            game_over: false,
            round: 0,
            pieces_spawned: 0,
        }
    }
}
