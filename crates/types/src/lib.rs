//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! The playfield size is chosen per round:
//!
//! - **Width**: 3..=30 columns (default 10)
//! - **Height**: 16..=60 rows (default 20)
//! - **Spawn position**: (width / 2, 0); blocks above row 0 are allowed
//!
//! # Timing
//!
//! All timers are accumulated `f32` seconds evaluated once per frame:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SOFT_DROP_INTERVAL_S` | 1/20 | Gravity interval while soft dropping |
//! | `MOVE_REPEAT_INTERVAL_S` | 0.05 | Auto-repeat step while a move key is held |
//! | `MOVE_REPEAT_DELAY_S` | 0.15 | Extra delay before the first auto-repeat |
//! | `MIN_LINE_CLEAR_S` | 0.1 | Floor of the clear animation duration |
//!
//! # Examples
//!
//! ```
//! use stacker_types::{GameAction, InputSnapshot, PieceKind};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! let input = InputSnapshot::press(GameAction::Hold);
//! assert!(input.is_pressed(GameAction::Hold));
//! assert!(input.is_held(GameAction::Hold));
//! assert!(!input.is_pressed(GameAction::Pause));
//! ```

/// Default playfield width in cells
pub const DEFAULT_GRID_WIDTH: u16 = 10;

/// Default playfield height in cells
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

pub const MIN_GRID_WIDTH: u16 = 3;
pub const MAX_GRID_WIDTH: u16 = 30;
pub const MIN_GRID_HEIGHT: u16 = 16;
pub const MAX_GRID_HEIGHT: u16 = 60;

/// Default number of upcoming pieces shown in the preview queue
pub const DEFAULT_UPCOMING_PIECES: usize = 3;

/// Upper bound for the preview queue (storage is fixed-size)
pub const MAX_UPCOMING_PIECES: usize = 6;

/// Default line goal for sprint rounds
pub const DEFAULT_SPRINT_LINES: u32 = 40;
pub const MAX_SPRINT_LINES: u32 = 999;

/// Number of blocks in every canonical piece
pub const BLOCKS_PER_PIECE: usize = 4;

/// Level a fresh round starts on
pub const START_LEVEL: u32 = 1;

/// Total lines needed per level-up
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity stops speeding up past this many levels above the start level
pub const GRAVITY_LEVEL_CAP: u32 = 14;

/// Gravity interval while the soft-drop key is held (seconds)
pub const SOFT_DROP_INTERVAL_S: f32 = 1.0 / 20.0;

/// Interval between auto-repeat steps while a move key is held (seconds)
pub const MOVE_REPEAT_INTERVAL_S: f32 = 0.05;

/// Additional delay before the first auto-repeat step (seconds)
pub const MOVE_REPEAT_DELAY_S: f32 = 0.15;

/// Clear animation length at level 0 before the per-level reduction (seconds)
pub const BASE_LINE_CLEAR_S: f32 = 1.0;

/// Clear animation shrinks by this much per level (seconds)
pub const LINE_CLEAR_STEP_S: f32 = 0.1;

/// Floor for the clear animation duration (seconds)
pub const MIN_LINE_CLEAR_S: f32 = 0.1;

/// Points per cell for a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Points per cell for a soft drop that beats natural gravity
pub const SOFT_DROP_POINTS_PER_CELL: u32 = 1;

/// Line clear scoring by simultaneous clear count, multiplied by level
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven canonical piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
        }
    }

    /// Fixed block color for this kind
    pub fn color(&self) -> BlockColor {
        match self {
            PieceKind::O => BlockColor::Yellow,
            PieceKind::I => BlockColor::SkyBlue,
            PieceKind::S => BlockColor::Red,
            PieceKind::Z => BlockColor::Green,
            PieceKind::L => BlockColor::Orange,
            PieceKind::J => BlockColor::Pink,
            PieceKind::T => BlockColor::Purple,
        }
    }
}

/// Block colors used by the canonical pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Yellow,
    SkyBlue,
    Red,
    Green,
    Orange,
    Pink,
    Purple,
}

impl BlockColor {
    /// 24-bit RGB value (r, g, b)
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            BlockColor::Yellow => (253, 249, 0),
            BlockColor::SkyBlue => (102, 191, 255),
            BlockColor::Red => (230, 41, 55),
            BlockColor::Green => (0, 228, 48),
            BlockColor::Orange => (255, 161, 0),
            BlockColor::Pink => (255, 109, 194),
            BlockColor::Purple => (200, 122, 255),
        }
    }
}

/// Occupancy state of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    /// Locked block
    Grid,
    /// Part of a completed row that is playing its clear animation
    Clearing,
}

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    Rotate180,
    /// Hard drop in play, confirm in menus
    HardDrop,
    Hold,
    Pause,
}

impl GameAction {
    pub const ALL: [GameAction; 9] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Rotate180,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::Pause,
    ];

    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "rotate180" => Some(GameAction::Rotate180),
            "harddrop" | "confirm" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    #[inline(always)]
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Compact set of actions (one bit per action)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionSet(u16);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    pub fn insert(&mut self, action: GameAction) {
        self.0 |= action.bit();
    }

    pub fn remove(&mut self, action: GameAction) {
        self.0 &= !action.bit();
    }

    pub fn contains(&self, action: GameAction) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = GameAction> + '_ {
        GameAction::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

impl FromIterator<GameAction> for ActionSet {
    fn from_iter<I: IntoIterator<Item = GameAction>>(iter: I) -> Self {
        let mut set = ActionSet::EMPTY;
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// Input sampled once per frame.
///
/// `pressed` holds actions whose key went down this frame (edges); `held`
/// holds every action whose key is currently down (levels). A pressed action
/// is always held as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub pressed: ActionSet,
    pub held: ActionSet,
}

impl InputSnapshot {
    pub const NONE: InputSnapshot = InputSnapshot {
        pressed: ActionSet::EMPTY,
        held: ActionSet::EMPTY,
    };

    /// A frame where `action` was just pressed
    pub fn press(action: GameAction) -> Self {
        Self::NONE.with_press(action)
    }

    /// A frame where `action` is held down without a new press
    pub fn hold(action: GameAction) -> Self {
        Self::NONE.with_held(action)
    }

    pub fn with_press(mut self, action: GameAction) -> Self {
        self.pressed.insert(action);
        self.held.insert(action);
        self
    }

    pub fn with_held(mut self, action: GameAction) -> Self {
        self.held.insert(action);
        self
    }

    pub fn is_pressed(&self, action: GameAction) -> bool {
        self.pressed.contains(action)
    }

    pub fn is_held(&self, action: GameAction) -> bool {
        self.held.contains(action)
    }
}

/// Audio cues requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Place,
    LineClear,
    LevelUp,
    GameOver,
}

/// Round rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Play until the stack tops out
    Endless,
    /// Finish once `target_lines` lines have been cleared
    Sprint { target_lines: u32 },
}

impl GameMode {
    pub fn target_lines(&self) -> Option<u32> {
        match self {
            GameMode::Endless => None,
            GameMode::Sprint { target_lines } => Some(*target_lines),
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Endless
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_colors_match_kind_table() {
        assert_eq!(PieceKind::O.color(), BlockColor::Yellow);
        assert_eq!(PieceKind::I.color(), BlockColor::SkyBlue);
        assert_eq!(PieceKind::S.color(), BlockColor::Red);
        assert_eq!(PieceKind::Z.color(), BlockColor::Green);
        assert_eq!(PieceKind::L.color(), BlockColor::Orange);
        assert_eq!(PieceKind::J.color(), BlockColor::Pink);
        assert_eq!(PieceKind::T.color(), BlockColor::Purple);
    }

    #[test]
    fn piece_kind_string_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("X"), None);
    }

    #[test]
    fn action_set_tracks_membership() {
        let mut set = ActionSet::EMPTY;
        assert!(set.is_empty());

        set.insert(GameAction::Hold);
        set.insert(GameAction::Rotate180);
        assert!(set.contains(GameAction::Hold));
        assert!(set.contains(GameAction::Rotate180));
        assert!(!set.contains(GameAction::Pause));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![GameAction::Rotate180, GameAction::Hold]
        );

        set.remove(GameAction::Hold);
        assert!(!set.contains(GameAction::Hold));
    }

    #[test]
    fn held_only_snapshot_has_no_edge() {
        let input = InputSnapshot::hold(GameAction::MoveLeft);
        assert!(input.is_held(GameAction::MoveLeft));
        assert!(!input.is_pressed(GameAction::MoveLeft));
    }

    #[test]
    fn confirm_parses_as_hard_drop() {
        assert_eq!(GameAction::from_str("confirm"), Some(GameAction::HardDrop));
        assert_eq!(GameAction::from_str("rotate180"), Some(GameAction::Rotate180));
    }

    #[test]
    fn line_score_table() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }
}
