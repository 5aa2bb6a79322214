//! Read-only views handed to the presentation layer once per frame

use arrayvec::ArrayVec;

use crate::events::RoundOutcome;
use crate::grid::Cell;
use crate::piece::{Piece, Position};
use crate::round::RoundPhase;
use crate::session::Scene;
use crate::types::{GameMode, BLOCKS_PER_PIECE, MAX_UPCOMING_PIECES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub piece: Piece,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major, `width * height` entries
    pub cells: Vec<Cell>,
    pub current: Option<ActiveSnapshot>,
    /// Landing position of `current`; `None` when the preview is disabled
    pub ghost: Option<Position>,
    pub held: Option<Piece>,
    pub can_hold: bool,
    pub upcoming: ArrayVec<Piece, MAX_UPCOMING_PIECES>,
    pub clearing_rows: ArrayVec<usize, BLOCKS_PER_PIECE>,
    /// 0.0..=1.0 through the clear animation
    pub clear_progress: f32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub elapsed_s: f32,
    pub phase: RoundPhase,
    pub outcome: Option<RoundOutcome>,
    pub mode: GameMode,
}

impl RoundSnapshot {
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        self.cells
            .get(y as usize * usize::from(self.width) + x as usize)
            .copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width.max(1)))
    }

    pub fn playable(&self) -> bool {
        self.phase == RoundPhase::Playing
    }

    /// Lines still needed in sprint mode
    pub fn lines_remaining(&self) -> Option<u32> {
        self.mode
            .target_lines()
            .map(|target| target.saturating_sub(self.lines))
    }

    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.current = None;
        self.ghost = None;
        self.held = None;
        self.can_hold = true;
        self.upcoming.clear();
        self.clearing_rows.clear();
        self.clear_progress = 0.0;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.elapsed_s = 0.0;
        self.phase = RoundPhase::Playing;
        self.outcome = None;
        self.mode = GameMode::Endless;
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            current: None,
            ghost: None,
            held: None,
            can_hold: true,
            upcoming: ArrayVec::new(),
            clearing_rows: ArrayVec::new(),
            clear_progress: 0.0,
            score: 0,
            level: 0,
            lines: 0,
            elapsed_s: 0.0,
            phase: RoundPhase::Playing,
            outcome: None,
            mode: GameMode::Endless,
        }
    }
}

/// Everything a frame needs: the active scene and, outside the title menu,
/// the round it shows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub scene: Scene,
    /// Stale while `scene` is the title menu; read it through [`Self::round`]
    pub round: RoundSnapshot,
}

impl SessionSnapshot {
    pub fn round(&self) -> Option<&RoundSnapshot> {
        match self.scene {
            Scene::TitleMenu { .. } => None,
            Scene::InRound | Scene::GameOver { .. } => Some(&self.round),
        }
    }
}
