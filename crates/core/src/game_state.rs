//! Game state module - the active-piece controller and round lifecycle
//!
//! This module ties together the board, the shape catalog, the bag supply and
//! scoring. A round moves through a small state machine:
//!
//! ```text
//! Spawning --spawn ok--> Falling --blocked fall / hard drop--> Locking
//!    ^                                                            |
//!    +---------------- rows cleared, score updated ---------------+
//! Spawning --spawn blocked--> Terminal (only reset_game leaves it)
//! ```
//!
//! Every operation reports failure as a plain `bool`; nothing here returns an
//! error. Once the round is Terminal all mutating calls are no-ops.

use crate::pieces::{absolute_cells, get_shape, try_rotate, PieceShape};
use crate::scoring::ScoreState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::{BagSupply, Board};
use crate::types::{GameAction, PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Where the round is in its spawn → fall → lock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the next piece (before `start`, and briefly after each lock).
    Spawning,
    /// A piece is under player and gravity control.
    Falling,
    /// The piece is being written into the board and rows are being cleared.
    Locking,
    /// A spawn was blocked; the round is over.
    Terminal,
}

/// Active falling piece
///
/// Only kind, rotation and origin are stored; the occupied cells are always
/// derived from the shape catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a new piece at the spawn origin in rotation 0
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn at(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos.
    pub fn cells(&self) -> [(i8, i8); 4] {
        absolute_cells(&self.shape(), self.x, self.y)
    }

    /// True when no mino overlaps a filled cell or leaves the board.
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().iter().all(|&(x, y)| board.is_free(x, y))
    }

    fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Summary of one lock, kept until an observer takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_delta: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// The follow-up spawn was blocked.
    pub game_over: bool,
}

/// Outcome of one gravity decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityStep {
    /// The piece moved down one row.
    Fell,
    /// The piece could not fall, locked, and the next piece spawned.
    Locked,
    /// The piece locked and the next spawn was blocked.
    ToppedOut,
    /// Nothing to do (not started, or already Terminal).
    Idle,
}

/// Complete state of one board and its round.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    supply: BagSupply,
    score: ScoreState,
    phase: Phase,
    /// Incremented by every `reset_game`.
    round: u32,
    /// Successful spawns in this round.
    pieces_spawned: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game whose supply is seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_supply(BagSupply::new(seed))
    }

    /// Create a new game with an OS-seeded supply.
    pub fn from_entropy() -> Self {
        Self::with_supply(BagSupply::from_entropy())
    }

    pub fn with_supply(supply: BagSupply) -> Self {
        Self {
            board: Board::new(),
            active: None,
            supply,
            score: ScoreState::new(),
            phase: Phase::Spawning,
            round: 0,
            pieces_spawned: 0,
            last_event: None,
        }
    }

    /// Spawn the first piece. Does nothing once a piece has been spawned.
    ///
    /// Returns false if the round is (or just became) Terminal.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Spawning if self.active.is_none() => self.spawn_next(),
            Phase::Terminal => false,
            _ => true,
        }
    }

    /// Empty the board, reshuffle the supply, zero the score and spawn a first piece.
    pub fn reset_game(&mut self) -> bool {
        self.board.clear();
        self.supply.reset();
        self.score = ScoreState::new();
        self.active = None;
        self.phase = Phase::Spawning;
        self.round = self.round.wrapping_add(1);
        self.pieces_spawned = 0;
        self.last_event = None;
        self.spawn_next()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::Terminal
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn level(&self) -> u32 {
        self.score.level()
    }

    pub fn lines(&self) -> u32 {
        self.score.lines()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Absolute cells of the falling piece, for rendering.
    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        self.active.map(|p| p.cells())
    }

    /// Kind of the piece that will spawn after the current one locks.
    pub fn next_piece(&self) -> PieceKind {
        self.supply.peek()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup in tests and benches.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the falling piece, e.g. to set up a scenario.
    ///
    /// Refused (returns false) when the round is Terminal or the piece does
    /// not fit on the board.
    pub fn set_active(&mut self, piece: ActivePiece) -> bool {
        if self.phase == Phase::Terminal || !piece.fits(&self.board) {
            return false;
        }
        self.active = Some(piece);
        self.phase = Phase::Falling;
        true
    }

    /// Put `kind` at the spawn origin in rotation 0.
    ///
    /// A blocked spawn ends the round: the phase becomes Terminal and the
    /// call returns false.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        if self.phase == Phase::Terminal {
            return false;
        }

        let piece = ActivePiece::new(kind);
        if !piece.fits(&self.board) {
            self.active = None;
            self.phase = Phase::Terminal;
            return false;
        }

        self.active = Some(piece);
        self.phase = Phase::Falling;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        true
    }

    fn spawn_next(&mut self) -> bool {
        let kind = self.supply.draw();
        self.spawn(kind)
    }

    fn falling(&self) -> Option<ActivePiece> {
        match self.phase {
            Phase::Falling => self.active,
            _ => None,
        }
    }

    /// Shift the piece by (dx, dy) if every mino lands on a free cell.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.falling() else {
            return false;
        };

        let candidate = active.shifted(dx, dy);
        if candidate.fits(&self.board) {
            self.active = Some(candidate);
            return true;
        }

        false
    }

    /// Rotate clockwise, trying the kick offsets in priority order.
    pub fn try_rotate(&mut self) -> bool {
        let Some(active) = self.falling() else {
            return false;
        };

        let board = &self.board;
        let result = try_rotate(active.kind, active.rotation, active.x, active.y, |x, y| {
            board.is_free(x, y)
        });

        if let Some((rotation, (dx, dy))) = result {
            self.active = Some(ActivePiece {
                rotation,
                x: active.x + dx,
                y: active.y + dy,
                ..active
            });
            return true;
        }

        false
    }

    /// Move down one row. Never locks.
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Drop to the lowest legal row, lock, and spawn the next piece.
    ///
    /// Returns the result of that spawn; false means the round is over.
    pub fn hard_drop(&mut self) -> bool {
        if self.falling().is_none() {
            return false;
        }

        while self.soft_drop() {}
        self.lock_piece()
    }

    /// One gravity decision: fall a row, or lock where the piece stands.
    pub fn gravity_step(&mut self) -> GravityStep {
        if self.falling().is_none() {
            return GravityStep::Idle;
        }

        if self.soft_drop() {
            return GravityStep::Fell;
        }

        if self.lock_piece() {
            GravityStep::Locked
        } else {
            GravityStep::ToppedOut
        }
    }

    /// Copy the piece into the board, clear rows, score, and spawn the next piece.
    fn lock_piece(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };

        self.phase = Phase::Locking;
        self.board.place(&active.cells(), active.kind);

        let cleared = self.board.clear_full_rows();
        let result = self.score.on_lines_cleared(cleared);

        self.phase = Phase::Spawning;
        let spawned = self.spawn_next();

        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared: cleared as u32,
            score_delta: result.points,
            score: self.score.score(),
            level: self.score.level(),
            lines: self.score.lines(),
            game_over: !spawned,
        });

        spawned
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Row the falling piece would come to rest on with a hard drop.
    pub fn landing_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut probe = active;
        loop {
            let below = probe.shifted(0, 1);
            if !below.fits(&self.board) {
                return Some(probe.y);
            }
            probe = below;
        }
    }

    /// Apply a game action. Only `Restart` is honoured once the round is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::Rotate => self.try_rotate(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Restart => self.reset_game(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board.to_grid();
        out.active = self.active.map(ActiveSnapshot::from);
        out.landing_y = self.landing_y();
        out.next = self.next_piece();
        out.score = self.score();
        out.level = self.level();
        out.lines = self.lines();
        out.game_over = self.game_over();
        out.round = self.round;
        out.pieces_spawned = self.pieces_spawned;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_entropy()
    }
}
