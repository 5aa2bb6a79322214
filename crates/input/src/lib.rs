//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and folds them into one
//! [`InputSnapshot`](crate::types::InputSnapshot) per frame (including for
//! terminals without key-release events).

pub mod handler;
pub mod map;

pub use stacker_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, map_key_code, should_quit};
