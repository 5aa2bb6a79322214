//! Events reported by the simulation to the presentation layer.
//!
//! The core never plays audio or draws anything itself. Each tick returns the
//! events that happened during that frame; the runner maps them to sound cues
//! and reads a snapshot for drawing.

use arrayvec::ArrayVec;

use crate::types::SoundCue;

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// A new or resolved piece had no room at its position
    ToppedOut,
    /// Sprint line goal reached
    SprintComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Moved,
    Rotated,
    Held,
    HardDropped { cells: u32 },
    /// The current piece was written into the grid
    Locked { rows_marked: u8 },
    /// Completed rows entered their clear animation
    LinesMarked { count: u8 },
    /// Completed rows were removed from the grid
    LinesCleared { count: u8, points: u32 },
    LevelUp { level: u32 },
    Paused,
    Resumed,
    RoundEnded { outcome: RoundOutcome },
}

impl GameEvent {
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Locked { .. } => Some(SoundCue::Place),
            GameEvent::LinesCleared { .. } => Some(SoundCue::LineClear),
            GameEvent::LevelUp { .. } => Some(SoundCue::LevelUp),
            GameEvent::RoundEnded { .. } => Some(SoundCue::GameOver),
            _ => None,
        }
    }
}

/// Upper bound on events a single tick can produce
pub const MAX_TICK_EVENTS: usize = 16;

/// Events produced by one tick (allocation-free)
pub type TickEvents = ArrayVec<GameEvent, MAX_TICK_EVENTS>;
