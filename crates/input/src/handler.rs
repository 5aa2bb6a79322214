//! Frame input handler for terminal environments.
//!
//! Folds key press/repeat/release events into one [`InputSnapshot`] per frame.
//! Auto-repeat timing lives in the simulation, so this only has to answer two
//! questions per action: did it go down this frame, and is it down now.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::{ActionSet, GameAction, InputSnapshot};

const ACTION_COUNT: usize = GameAction::ALL.len();

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state. OS key repeat refreshes it.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Tracks which actions are down between frames.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Press edges since the last frame
    pressed: ActionSet,
    held: ActionSet,
    /// Last press or repeat event per action, indexed by `GameAction as usize`
    last_seen: [Option<Instant>; ACTION_COUNT],
    key_release_timeout: Duration,
    /// The terminal sends release events, so held keys never time out
    release_events: bool,
}

/// Actions whose held state drives the simulation (auto-repeat, soft drop).
///
/// Every other action only reacts to press edges.
fn is_continuous(action: GameAction) -> bool {
    matches!(
        action,
        GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop
    )
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pressed: ActionSet::EMPTY,
            held: ActionSet::EMPTY,
            last_seen: [None; ACTION_COUNT],
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            release_events: false,
        }
    }

    /// Trust key-release events instead of the release timeout
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout(&self) -> Duration {
        self.key_release_timeout
    }

    /// Feed one terminal key event; returns the action it maps to, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GameAction> {
        let action = handle_key_event(key)?;
        match key.kind {
            KeyEventKind::Press => self.press(action),
            KeyEventKind::Repeat => self.repeat(action),
            KeyEventKind::Release => self.release(action),
        }
        Some(action)
    }

    /// Key went down.
    ///
    /// Move and soft-drop keys only produce an edge when they were not already
    /// held. Every other press is an edge of its own, so quick double taps
    /// survive terminals that never report releases.
    pub fn press(&mut self, action: GameAction) {
        if !is_continuous(action) || !self.held.contains(action) {
            self.pressed.insert(action);
        }
        self.held.insert(action);
        self.last_seen[action as usize] = Some(Instant::now());
    }

    /// Key is still down (terminal auto-repeat)
    pub fn repeat(&mut self, action: GameAction) {
        if !self.held.contains(action) {
            self.press(action);
            return;
        }
        self.last_seen[action as usize] = Some(Instant::now());
    }

    pub fn release(&mut self, action: GameAction) {
        self.held.remove(action);
        self.last_seen[action as usize] = None;
    }

    /// Produce this frame's snapshot and start collecting the next one.
    pub fn frame(&mut self) -> InputSnapshot {
        self.expire_stale();

        let mut held = self.held;
        for action in self.pressed.iter() {
            held.insert(action);
        }
        let snapshot = InputSnapshot {
            pressed: self.pressed,
            held,
        };
        self.pressed.clear();
        snapshot
    }

    // Auto-release when terminal does not emit release events.
    fn expire_stale(&mut self) {
        if self.release_events {
            return;
        }
        for action in GameAction::ALL {
            let Some(seen) = self.last_seen[action as usize] else {
                continue;
            };
            if seen.elapsed() > self.key_release_timeout {
                self.held.remove(action);
                self.last_seen[action as usize] = None;
            }
        }
    }

    pub fn reset(&mut self) {
        self.pressed.clear();
        self.held.clear();
        self.last_seen = [None; ACTION_COUNT];
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
