//! TUI Stacker (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `tui_stacker::{core, input, term, types}`, plus the runner's argument
//! parser.

pub mod cli;

pub use stacker_core as core;
pub use stacker_input as input;
pub use stacker_term as term;
pub use stacker_types as types;
