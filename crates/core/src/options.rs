//! Round configuration

use std::fmt;

use crate::types::{
    GameMode, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_UPCOMING_PIECES, MAX_GRID_HEIGHT,
    MAX_GRID_WIDTH, MAX_SPRINT_LINES, MAX_UPCOMING_PIECES, MIN_GRID_HEIGHT, MIN_GRID_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    pub grid_width: u16,
    pub grid_height: u16,
    /// Length of the upcoming-piece queue
    pub upcoming_pieces: usize,
    /// Include the landing preview in snapshots
    pub show_ghost: bool,
    pub mode: GameMode,
    pub seed: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            upcoming_pieces: DEFAULT_UPCOMING_PIECES,
            show_ghost: true,
            mode: GameMode::Endless,
            seed: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsError {
    WidthOutOfRange,
    HeightOutOfRange,
    QueueOutOfRange,
    SprintTargetOutOfRange,
}

impl OptionsError {
    pub fn code(self) -> &'static str {
        match self {
            OptionsError::WidthOutOfRange => "width_out_of_range",
            OptionsError::HeightOutOfRange => "height_out_of_range",
            OptionsError::QueueOutOfRange => "queue_out_of_range",
            OptionsError::SprintTargetOutOfRange => "sprint_target_out_of_range",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            OptionsError::WidthOutOfRange => "grid width must be between 3 and 30",
            OptionsError::HeightOutOfRange => "grid height must be between 16 and 60",
            OptionsError::QueueOutOfRange => "upcoming queue length must be between 1 and 6",
            OptionsError::SprintTargetOutOfRange => "sprint line goal must be between 1 and 999",
        }
    }
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for OptionsError {}

impl GameOptions {
    /// Report the first out-of-range field
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(MIN_GRID_WIDTH..=MAX_GRID_WIDTH).contains(&self.grid_width) {
            return Err(OptionsError::WidthOutOfRange);
        }
        if !(MIN_GRID_HEIGHT..=MAX_GRID_HEIGHT).contains(&self.grid_height) {
            return Err(OptionsError::HeightOutOfRange);
        }
        if !(1..=MAX_UPCOMING_PIECES).contains(&self.upcoming_pieces) {
            return Err(OptionsError::QueueOutOfRange);
        }
        if let GameMode::Sprint { target_lines } = self.mode {
            if !(1..=MAX_SPRINT_LINES).contains(&target_lines) {
                return Err(OptionsError::SprintTargetOutOfRange);
            }
        }
        Ok(())
    }

    /// Copy with every field clamped into its allowed range
    pub fn normalized(&self) -> Self {
        let mode = match self.mode {
            GameMode::Sprint { target_lines } => GameMode::Sprint {
                target_lines: target_lines.clamp(1, MAX_SPRINT_LINES),
            },
            GameMode::Endless => GameMode::Endless,
        };
        Self {
            grid_width: self.grid_width.clamp(MIN_GRID_WIDTH, MAX_GRID_WIDTH),
            grid_height: self.grid_height.clamp(MIN_GRID_HEIGHT, MAX_GRID_HEIGHT),
            upcoming_pieces: self.upcoming_pieces.clamp(1, MAX_UPCOMING_PIECES),
            mode,
            ..*self
        }
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = GameOptions::default();
        assert_eq!(options.validate(), Ok(()));
        assert_eq!(options.grid_width, 10);
        assert_eq!(options.grid_height, 20);
        assert_eq!(options.upcoming_pieces, 3);
        assert!(options.show_ghost);
    }

    #[test]
    fn validate_reports_first_violation() {
        let options = GameOptions {
            grid_width: 2,
            grid_height: 100,
            ..GameOptions::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::WidthOutOfRange));

        let options = GameOptions {
            upcoming_pieces: 0,
            ..GameOptions::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::QueueOutOfRange));
        assert_eq!(OptionsError::QueueOutOfRange.code(), "queue_out_of_range");
    }

    #[test]
    fn normalized_clamps_into_range() {
        let options = GameOptions {
            grid_width: 99,
            grid_height: 1,
            upcoming_pieces: 12,
            mode: GameMode::Sprint { target_lines: 0 },
            ..GameOptions::default()
        }
        .normalized();

        assert_eq!(options.grid_width, 30);
        assert_eq!(options.grid_height, 16);
        assert_eq!(options.upcoming_pieces, 6);
        assert_eq!(options.mode, GameMode::Sprint { target_lines: 1 });
        assert_eq!(options.validate(), Ok(()));
    }
}
