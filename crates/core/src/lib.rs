//! Core simulation - pure, deterministic, and testable
//!
//! This crate holds every gameplay rule of the falling-block simulation. It
//! has no dependency on terminals, audio or wall-clock time: callers feed it
//! a frame delta and an [`InputSnapshot`](types::InputSnapshot), and read back
//! [`GameEvent`]s plus a snapshot for drawing.
//!
//! # Module Structure
//!
//! - [`piece`]: canonical piece shapes and pivot rotations
//! - [`rng`]: seeded LCG and the 7-kind bag randomizer
//! - [`grid`]: playfield cells, collision queries, locking and row shifting
//! - [`round`]: motion controller, line-clear sequencer and round statistics
//! - [`scoring`]: line/drop points, gravity curve, clear duration
//! - [`session`]: title / in-round / game-over scene state machine
//! - [`options`]: validated round configuration
//! - [`events`], [`snapshot`]: what the presentation layer consumes
//!
//! # Example
//!
//! ```
//! use stacker_core::{GameOptions, Round};
//! use stacker_core::types::{GameAction, InputSnapshot};
//!
//! let mut round = Round::new(GameOptions::default());
//!
//! // One 16ms frame with a hard drop pressed
//! let events = round.tick(0.016, &InputSnapshot::press(GameAction::HardDrop));
//!
//! assert!(round.score() > 0); // Hard drop awards points
//! assert!(!events.is_empty());
//! ```
//!
//! # Timing
//!
//! All timers are accumulated seconds advanced by `tick`:
//! - **Gravity**: 1 s per row at level 1, faster every level up to level 15
//! - **Soft Drop**: fixed 1/20 s per row while held
//! - **Auto-repeat**: 0.15 s delay, then one cell every 0.05 s
//! - **Line clear**: `max(1.0 - 0.1 * level, 0.1)` s animation before rows vacate

pub mod events;
pub mod grid;
pub mod options;
pub mod piece;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use stacker_types as types;

// Re-export commonly used types for convenience
pub use events::{GameEvent, RoundOutcome, TickEvents};
pub use grid::{Cell, Grid};
pub use options::{GameOptions, OptionsError};
pub use piece::{Piece, PieceBounds, Position, Turn};
pub use rng::{Bag, SimpleRng};
pub use round::{Round, RoundPhase};
pub use scoring::{calculate_drop_score, calculate_line_score, gravity_interval_s};
pub use session::{GameOverItem, Scene, Session, SessionTick, TitleItem};
pub use snapshot::{ActiveSnapshot, RoundSnapshot, SessionSnapshot};
