//! Session module - scene state machine around rounds
//!
//! ```text
//! TitleMenu --Endless/Sprint--> InRound --round ends--> GameOver
//!     ^                                                  |   |
//!     +--------------------- Menu -----------------------+   |
//!                            InRound <------- Retry ---------+
//! ```
//!
//! Each scene has one update function; [`Session::tick`] dispatches on the
//! scene. Menus are driven by the same logical actions as gameplay.

use crate::events::TickEvents;
use crate::options::GameOptions;
use crate::round::Round;
use crate::snapshot::SessionSnapshot;
use crate::types::{GameAction, GameMode, InputSnapshot, DEFAULT_SPRINT_LINES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleItem {
    Endless,
    Sprint,
    Quit,
}

impl TitleItem {
    pub const ALL: [TitleItem; 3] = [TitleItem::Endless, TitleItem::Sprint, TitleItem::Quit];

    pub fn label(self) -> &'static str {
        match self {
            TitleItem::Endless => "Endless",
            TitleItem::Sprint => "Sprint",
            TitleItem::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverItem {
    Retry,
    Menu,
}

impl GameOverItem {
    pub const ALL: [GameOverItem; 2] = [GameOverItem::Retry, GameOverItem::Menu];

    pub fn label(self) -> &'static str {
        match self {
            GameOverItem::Retry => "Retry",
            GameOverItem::Menu => "Menu",
        }
    }
}

/// Step a menu selection by one entry, wrapping at both ends
fn step<T: Copy + PartialEq>(items: &[T], current: T, down: bool) -> T {
    let idx = items.iter().position(|&i| i == current).unwrap_or(0);
    let len = items.len();
    let next = if down {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    items[next]
}

/// Menu direction requested this frame, if any
fn navigation(input: &InputSnapshot) -> Option<bool> {
    if input.is_pressed(GameAction::RotateCw) {
        Some(false)
    } else if input.is_pressed(GameAction::SoftDrop) {
        Some(true)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    TitleMenu { selected: TitleItem },
    InRound,
    GameOver { selected: GameOverItem },
}

impl Default for Scene {
    fn default() -> Self {
        Scene::TitleMenu {
            selected: TitleItem::Endless,
        }
    }
}

/// Result of one session tick
#[derive(Debug, Clone, Default)]
pub struct SessionTick {
    /// Round events from this frame (empty outside a round)
    pub events: TickEvents,
    /// The player chose Quit
    pub quit: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    options: GameOptions,
    round: Round,
    scene: Scene,
}

impl Session {
    /// Start at the title menu. A sprint mode in `options` preselects Sprint
    /// and sets its line goal.
    pub fn new(options: GameOptions) -> Self {
        let options = options.normalized();
        let selected = match options.mode {
            GameMode::Sprint { .. } => TitleItem::Sprint,
            GameMode::Endless => TitleItem::Endless,
        };
        Self {
            options,
            round: Round::new(options),
            scene: Scene::TitleMenu { selected },
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    /// The round on screen; `None` at the title menu
    pub fn round(&self) -> Option<&Round> {
        match self.scene {
            Scene::TitleMenu { .. } => None,
            Scene::InRound | Scene::GameOver { .. } => Some(&self.round),
        }
    }

    /// Replace the options used by the next round that starts
    pub fn set_options(&mut self, options: GameOptions) {
        self.options = options.normalized();
    }

    /// Begin a fresh round in `mode` with the current options
    pub fn start_round(&mut self, mode: GameMode) {
        self.options = self.options.with_mode(mode);
        self.round.restart_with(self.options);
        self.scene = Scene::InRound;
    }

    fn sprint_mode(&self) -> GameMode {
        GameMode::Sprint {
            target_lines: self
                .options
                .mode
                .target_lines()
                .unwrap_or(DEFAULT_SPRINT_LINES),
        }
    }

    pub fn tick(&mut self, dt: f32, input: &InputSnapshot) -> SessionTick {
        match self.scene {
            Scene::TitleMenu { selected } => self.update_title(selected, input),
            Scene::InRound => self.update_round(dt, input),
            Scene::GameOver { selected } => self.update_game_over(selected, input),
        }
    }

    fn update_title(&mut self, selected: TitleItem, input: &InputSnapshot) -> SessionTick {
        let mut out = SessionTick::default();

        if input.is_pressed(GameAction::HardDrop) {
            match selected {
                TitleItem::Endless => self.start_round(GameMode::Endless),
                TitleItem::Sprint => self.start_round(self.sprint_mode()),
                TitleItem::Quit => out.quit = true,
            }
            return out;
        }

        if let Some(down) = navigation(input) {
            self.scene = Scene::TitleMenu {
                selected: step(&TitleItem::ALL, selected, down),
            };
        }
        out
    }

    fn update_round(&mut self, dt: f32, input: &InputSnapshot) -> SessionTick {
        let events = self.round.tick(dt, input);
        if self.round.game_over() {
            self.scene = Scene::GameOver {
                selected: GameOverItem::Retry,
            };
        }
        SessionTick {
            events,
            quit: false,
        }
    }

    fn update_game_over(&mut self, selected: GameOverItem, input: &InputSnapshot) -> SessionTick {
        if input.is_pressed(GameAction::HardDrop) {
            match selected {
                GameOverItem::Retry => {
                    self.round.start();
                    self.scene = Scene::InRound;
                }
                GameOverItem::Menu => {
                    self.scene = Scene::TitleMenu {
                        selected: TitleItem::Endless,
                    };
                }
            }
        } else if let Some(down) = navigation(input) {
            self.scene = Scene::GameOver {
                selected: step(&GameOverItem::ALL, selected, down),
            };
        }
        SessionTick::default()
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.scene = self.scene;
        if self.round().is_some() {
            self.round.snapshot_into(&mut out.round);
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RoundOutcome;

    fn confirm() -> InputSnapshot {
        InputSnapshot::press(GameAction::HardDrop)
    }

    fn up() -> InputSnapshot {
        InputSnapshot::press(GameAction::RotateCw)
    }

    fn down() -> InputSnapshot {
        InputSnapshot::press(GameAction::SoftDrop)
    }

    /// Hard drop until the round ends
    fn play_to_game_over(session: &mut Session) {
        for _ in 0..200 {
            if session.scene() != Scene::InRound {
                return;
            }
            session.tick(1.0, &confirm());
        }
        panic!("round never ended");
    }

    #[test]
    fn title_menu_wraps_both_ways() {
        let mut session = Session::default();
        assert_eq!(
            session.scene(),
            Scene::TitleMenu {
                selected: TitleItem::Endless
            }
        );

        session.tick(0.0, &up());
        assert_eq!(
            session.scene(),
            Scene::TitleMenu {
                selected: TitleItem::Quit
            }
        );

        session.tick(0.0, &down());
        session.tick(0.0, &down());
        assert_eq!(
            session.scene(),
            Scene::TitleMenu {
                selected: TitleItem::Sprint
            }
        );
        assert!(session.round().is_none());
    }

    #[test]
    fn quit_is_reported_to_runner() {
        let mut session = Session::default();
        session.tick(0.0, &up());
        let tick = session.tick(0.0, &confirm());
        assert!(tick.quit);
    }

    #[test]
    fn confirm_starts_round_in_selected_mode() {
        let mut session = Session::default();
        session.tick(0.0, &down());
        session.tick(0.0, &confirm());

        assert_eq!(session.scene(), Scene::InRound);
        let round = session.round().unwrap();
        assert_eq!(
            round.options().mode,
            GameMode::Sprint {
                target_lines: DEFAULT_SPRINT_LINES
            }
        );
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn sprint_option_preselects_and_keeps_goal() {
        let mut session = Session::new(GameOptions {
            mode: GameMode::Sprint { target_lines: 12 },
            ..GameOptions::default()
        });
        assert_eq!(
            session.scene(),
            Scene::TitleMenu {
                selected: TitleItem::Sprint
            }
        );
        session.tick(0.0, &confirm());
        assert_eq!(
            session.round().unwrap().options().mode,
            GameMode::Sprint { target_lines: 12 }
        );
    }

    #[test]
    fn topping_out_opens_game_over_menu() {
        let mut session = Session::default();
        session.tick(0.0, &confirm());
        play_to_game_over(&mut session);

        assert_eq!(
            session.scene(),
            Scene::GameOver {
                selected: GameOverItem::Retry
            }
        );
        let round = session.round().unwrap();
        assert_eq!(round.outcome(), Some(RoundOutcome::ToppedOut));
    }

    #[test]
    fn retry_restarts_with_same_options() {
        let mut session = Session::new(GameOptions {
            grid_width: 8,
            ..GameOptions::default()
        });
        session.tick(0.0, &confirm());
        play_to_game_over(&mut session);

        session.tick(0.0, &confirm());
        assert_eq!(session.scene(), Scene::InRound);
        let round = session.round().unwrap();
        assert!(!round.game_over());
        assert_eq!(round.score(), 0);
        assert_eq!(round.grid().width(), 8);
    }

    #[test]
    fn menu_returns_to_title() {
        let mut session = Session::default();
        session.tick(0.0, &confirm());
        play_to_game_over(&mut session);

        session.tick(0.0, &down());
        assert_eq!(
            session.scene(),
            Scene::GameOver {
                selected: GameOverItem::Menu
            }
        );
        session.tick(0.0, &confirm());
        assert_eq!(
            session.scene(),
            Scene::TitleMenu {
                selected: TitleItem::Endless
            }
        );
        assert!(session.round().is_none());
        assert!(session.snapshot().round().is_none());
    }

    #[test]
    fn new_dimensions_apply_to_next_round() {
        let mut session = Session::default();
        session.set_options(GameOptions {
            grid_width: 12,
            grid_height: 24,
            ..GameOptions::default()
        });
        session.tick(0.0, &confirm());

        let snap = session.snapshot();
        let round = snap.round().unwrap();
        assert_eq!((round.width, round.height), (12, 24));
        assert_eq!(round.cells.len(), 12 * 24);
    }
}
