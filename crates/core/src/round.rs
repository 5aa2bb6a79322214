//! Round module - one playthrough of the simulation
//!
//! A [`Round`] owns the grid, the bag, the current/held/upcoming pieces and the
//! statistics. It is advanced once per frame with [`Round::tick`], which
//! resolves input in a fixed order:
//!
//! 1. pause toggle
//! 2. line-clear animation (suspends everything below)
//! 3. rotation, with a single-axis kick
//! 4. horizontal movement (tap + auto-repeat)
//! 5. hard drop, else hold, else gravity (soft drop included)
//! 6. top-out check
//!
//! Illegal moves are rejected silently; the only terminal condition is the end
//! of the round (top-out or sprint goal).

use std::mem;

use arrayvec::ArrayVec;

use crate::events::{GameEvent, RoundOutcome, TickEvents};
use crate::grid::Grid;
use crate::options::GameOptions;
use crate::piece::{Piece, Position, Turn};
use crate::rng::Bag;
use crate::scoring::{
    calculate_drop_score, calculate_line_score, gravity_interval_s, levels_gained,
    line_clear_duration_s,
};
use crate::snapshot::{ActiveSnapshot, RoundSnapshot};
use crate::types::*;

/// Coarse state of a round, derived from its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    Playing,
    Paused,
    Clearing,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Round {
    options: GameOptions,
    grid: Grid,
    bag: Bag,
    current: Piece,
    position: Position,
    /// `Piece::EMPTY` until the first hold
    held: Piece,
    /// Set by a hold, cleared by the next lock
    hold_used: bool,
    upcoming: ArrayVec<Piece, MAX_UPCOMING_PIECES>,
    gravity_timer: f32,
    movement_timer: f32,
    clear_timer: f32,
    /// Rows in their clear animation, top to bottom, as indexed at detection time
    clearing_rows: ArrayVec<usize, BLOCKS_PER_PIECE>,
    score: u32,
    level: u32,
    lines: u32,
    elapsed_s: f32,
    paused: bool,
    game_over: bool,
    outcome: Option<RoundOutcome>,
    events: TickEvents,
}

impl Round {
    /// Create a round and start it. Options are clamped into range first.
    pub fn new(options: GameOptions) -> Self {
        let options = options.normalized();
        let mut round = Self {
            options,
            grid: Grid::new(options.grid_width, options.grid_height),
            bag: Bag::new(options.seed),
            current: Piece::EMPTY,
            position: Position::default(),
            held: Piece::EMPTY,
            hold_used: false,
            upcoming: ArrayVec::new(),
            gravity_timer: 0.0,
            movement_timer: 0.0,
            clear_timer: 0.0,
            clearing_rows: ArrayVec::new(),
            score: 0,
            level: START_LEVEL,
            lines: 0,
            elapsed_s: 0.0,
            paused: false,
            game_over: false,
            outcome: None,
            events: TickEvents::new(),
        };
        round.start();
        round
    }

    /// Reset statistics, grid, hold and queue, then draw the first piece.
    ///
    /// The bag keeps its state, so a retry continues the piece sequence.
    pub fn start(&mut self) {
        self.grid
            .resize(self.options.grid_width, self.options.grid_height);

        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.elapsed_s = 0.0;
        self.paused = false;
        self.game_over = false;
        self.outcome = None;

        self.gravity_timer = 0.0;
        self.movement_timer = 0.0;
        self.clear_timer = 0.0;
        self.clearing_rows.clear();

        self.held = Piece::EMPTY;
        self.hold_used = false;

        self.upcoming.clear();
        for _ in 0..self.options.upcoming_pieces {
            self.upcoming.push(self.bag.draw());
        }
        self.next_piece();
        self.events.clear();
    }

    /// Install new options and start over (grid is resized in place)
    pub fn restart_with(&mut self, options: GameOptions) {
        self.options = options.normalized();
        self.start();
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_piece(&self) -> Piece {
        self.current
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn held_piece(&self) -> Option<Piece> {
        (!self.held.is_empty()).then_some(self.held)
    }

    pub fn can_hold(&self) -> bool {
        !self.hold_used
    }

    pub fn upcoming(&self) -> &[Piece] {
        &self.upcoming
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn elapsed_s(&self) -> f32 {
        self.elapsed_s
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn is_clearing(&self) -> bool {
        !self.clearing_rows.is_empty()
    }

    pub fn clearing_rows(&self) -> &[usize] {
        &self.clearing_rows
    }

    /// Fraction of the current clear animation that has elapsed (0 when idle)
    pub fn clear_progress(&self) -> f32 {
        if !self.is_clearing() {
            return 0.0;
        }
        (self.clear_timer / line_clear_duration_s(self.level)).min(1.0)
    }

    pub fn phase(&self) -> RoundPhase {
        if self.game_over {
            RoundPhase::GameOver
        } else if self.paused {
            RoundPhase::Paused
        } else if self.is_clearing() {
            RoundPhase::Clearing
        } else {
            RoundPhase::Playing
        }
    }

    /// Origin cell for freshly spawned pieces
    pub fn spawn_position(&self) -> Position {
        Position::new(i32::from(self.grid.width() / 2), 0)
    }

    /// Where the current piece would land if dropped straight down
    pub fn ghost_position(&self) -> Option<Position> {
        if self.current.is_empty() || self.game_over {
            return None;
        }
        Some(self.landing_position())
    }

    fn landing_position(&self) -> Position {
        let mut at = self.position;
        while self.fits(&self.current, at.offset(0, 1)) {
            at = at.offset(0, 1);
        }
        at
    }

    /// Whether the motion controller accepts input right now
    fn is_active(&self) -> bool {
        !self.paused && !self.game_over && !self.is_clearing()
    }

    #[inline(always)]
    fn fits(&self, piece: &Piece, at: Position) -> bool {
        self.grid.can_piece_exist_at(piece, at)
    }

    // Each tick emits at most one event per kind of step, which stays well
    // under MAX_TICK_EVENTS.
    fn emit(&mut self, event: GameEvent) {
        let pushed = self.events.try_push(event);
        debug_assert!(pushed.is_ok(), "tick event buffer overflow");
    }

    /// Advance the round by `dt` seconds using this frame's input
    pub fn tick(&mut self, dt: f32, input: &InputSnapshot) -> TickEvents {
        if self.game_over {
            return mem::take(&mut self.events);
        }

        if input.is_pressed(GameAction::Pause) {
            self.toggle_pause();
        }
        if self.paused {
            return mem::take(&mut self.events);
        }

        self.elapsed_s += dt;

        if self.is_clearing() {
            self.update_line_clear(dt);
        } else {
            self.update_rotation(input);
            self.update_movement(dt, input);

            if input.is_pressed(GameAction::HardDrop) {
                self.hard_drop();
            } else if input.is_pressed(GameAction::Hold) {
                self.hold();
            } else {
                self.update_gravity(dt, input);
            }
        }

        self.check_top_out();
        mem::take(&mut self.events)
    }

    pub fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
        self.emit(if self.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        });
    }

    fn update_rotation(&mut self, input: &InputSnapshot) {
        let turn = if input.is_pressed(GameAction::RotateCcw) {
            Turn::Left
        } else if input.is_pressed(GameAction::RotateCw) {
            Turn::Right
        } else if input.is_pressed(GameAction::Rotate180) {
            Turn::Half
        } else {
            return;
        };
        self.rotate(turn);
    }

    /// Rotate the current piece, kicking sideways if the turn collides.
    ///
    /// The kick distance is the width of the column span of the rotated
    /// piece's blocked cells; left is tried before right. Returns false (and
    /// changes nothing) when neither side fits.
    pub fn rotate(&mut self, turn: Turn) -> bool {
        if !self.is_active() {
            return false;
        }

        let candidate = self.current.rotated(turn);
        if self.fits(&candidate, self.position) {
            self.current = candidate;
            self.emit(GameEvent::Rotated);
            return true;
        }

        let d = self.kick_distance(&candidate);
        if d == 0 {
            return false;
        }
        for dx in [-d, d] {
            let kicked = self.position.offset(dx, 0);
            if self.fits(&candidate, kicked) {
                self.current = candidate;
                self.position = kicked;
                self.emit(GameEvent::Rotated);
                return true;
            }
        }

        false
    }

    fn kick_distance(&self, candidate: &Piece) -> i32 {
        let mut left = i32::MAX;
        let mut right = i32::MIN;
        for (pos, _) in candidate.cells_at(self.position) {
            if !self.grid.is_cell_empty(pos.x, pos.y) {
                left = left.min(pos.x);
                right = right.max(pos.x);
            }
        }
        if left > right {
            0
        } else {
            right - left + 1
        }
    }

    fn update_movement(&mut self, dt: f32, input: &InputSnapshot) {
        let tapped = if input.is_pressed(GameAction::MoveRight) {
            Some(1)
        } else if input.is_pressed(GameAction::MoveLeft) {
            Some(-1)
        } else {
            None
        };

        if let Some(dx) = tapped {
            self.shift(dx);
            // The first repeat waits an extra delay on top of the interval.
            self.movement_timer = -MOVE_REPEAT_DELAY_S;
            return;
        }

        let held = if input.is_held(GameAction::MoveRight) {
            1
        } else if input.is_held(GameAction::MoveLeft) {
            -1
        } else {
            self.movement_timer = 0.0;
            return;
        };

        self.movement_timer += dt;
        let mut moved = false;
        while self.movement_timer >= MOVE_REPEAT_INTERVAL_S {
            self.movement_timer -= MOVE_REPEAT_INTERVAL_S;
            if !self.step_sideways(held) {
                self.movement_timer = 0.0;
                break;
            }
            moved = true;
        }
        // One event however many repeat steps the frame covered.
        if moved {
            self.emit(GameEvent::Moved);
        }
    }

    /// Move the current piece `dx` columns if the target is free
    pub fn shift(&mut self, dx: i32) -> bool {
        if !self.is_active() || !self.step_sideways(dx) {
            return false;
        }
        self.emit(GameEvent::Moved);
        true
    }

    fn step_sideways(&mut self, dx: i32) -> bool {
        let target = self.position.offset(dx, 0);
        if !self.fits(&self.current, target) {
            return false;
        }
        self.position = target;
        true
    }

    /// Drop the current piece to its landing row and lock it.
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_active() {
            return 0;
        }

        let landing = self.landing_position();
        let cells = (landing.y - self.position.y) as u32;
        self.position = landing;
        self.score += calculate_drop_score(cells, true);
        self.emit(GameEvent::HardDropped { cells });

        self.lock_piece();
        cells
    }

    /// Swap the current piece with the held one (once per lock).
    ///
    /// With an empty hold slot the current piece is stashed and the next
    /// piece comes from the queue.
    pub fn hold(&mut self) -> bool {
        if !self.is_active() || self.hold_used {
            return false;
        }

        let previous = mem::replace(&mut self.held, self.current);
        if previous.is_empty() {
            self.next_piece();
        } else {
            self.current = previous;
        }

        self.position = self.spawn_position();
        self.gravity_timer = 0.0;
        self.hold_used = true;
        self.emit(GameEvent::Held);
        true
    }

    fn update_gravity(&mut self, dt: f32, input: &InputSnapshot) {
        self.gravity_timer += dt;
        if input.is_pressed(GameAction::SoftDrop) {
            // Step right away on the press frame.
            self.gravity_timer = self.gravity_timer.max(SOFT_DROP_INTERVAL_S);
        }

        let natural = gravity_interval_s(self.level);
        let soft_drop = input.is_held(GameAction::SoftDrop);
        let interval = if soft_drop {
            SOFT_DROP_INTERVAL_S
        } else {
            natural
        };
        let award = soft_drop && SOFT_DROP_INTERVAL_S < natural;

        while self.gravity_timer >= interval {
            self.gravity_timer -= interval;

            let below = self.position.offset(0, 1);
            if self.fits(&self.current, below) {
                self.position = below;
                if award {
                    self.score += calculate_drop_score(1, false);
                }
            } else {
                self.lock_piece();
                break;
            }
        }
    }

    /// Write the current piece into the grid, mark completed rows among the
    /// rows it touched, then bring in the next piece.
    fn lock_piece(&mut self) {
        self.grid.place_cells(&self.current, self.position);
        self.hold_used = false;

        let rows_marked = self.mark_completed_rows();
        self.emit(GameEvent::Locked { rows_marked });

        self.next_piece();

        if rows_marked > 0 {
            self.clear_timer = 0.0;
            self.emit(GameEvent::LinesMarked { count: rows_marked });
        }
    }

    fn mark_completed_rows(&mut self) -> u8 {
        let Some(bounds) = self.current.bounds() else {
            return 0;
        };

        let top = (self.position.y + i32::from(bounds.top)).max(0);
        let bottom =
            (self.position.y + i32::from(bounds.bottom)).min(i32::from(self.grid.height()) - 1);

        for y in top..=bottom {
            let y = y as usize;
            if self.grid.is_row_full(y) {
                self.grid.mark_row_clearing(y);
                self.clearing_rows.push(y);
            }
        }
        self.clearing_rows.len() as u8
    }

    fn next_piece(&mut self) {
        if !self.upcoming.is_empty() {
            self.current = self.upcoming.remove(0);
        } else {
            self.current = self.bag.draw();
        }
        if self.upcoming.len() < self.options.upcoming_pieces {
            self.upcoming.push(self.bag.draw());
        }

        self.position = self.spawn_position();
        self.gravity_timer = 0.0;
    }

    fn update_line_clear(&mut self, dt: f32) {
        self.clear_timer += dt;
        if self.clear_timer < line_clear_duration_s(self.level) {
            return;
        }

        // Top to bottom: clearing a row never moves the rows below it, so the
        // remaining detected indices stay valid.
        for &row in &self.clearing_rows {
            self.grid.clear_line(row);
        }

        let count = self.clearing_rows.len();
        let lines_before = self.lines;
        let points = calculate_line_score(count, self.level);
        self.lines += count as u32;
        self.score += points;
        self.emit(GameEvent::LinesCleared {
            count: count as u8,
            points,
        });

        let gained = levels_gained(lines_before, self.lines);
        if gained > 0 {
            self.level += gained;
            self.emit(GameEvent::LevelUp { level: self.level });
        }

        self.clearing_rows.clear();
        self.clear_timer = 0.0;
        self.gravity_timer = 0.0;
        self.movement_timer = 0.0;

        if let Some(target) = self.options.mode.target_lines() {
            if self.lines >= target {
                self.end_round(RoundOutcome::SprintComplete);
            }
        }
    }

    /// End the round if the current piece has no room where it is.
    ///
    /// Skipped while rows are clearing: those rows are about to vacate.
    fn check_top_out(&mut self) {
        if self.game_over || self.is_clearing() {
            return;
        }
        if !self.fits(&self.current, self.position) {
            self.end_round(RoundOutcome::ToppedOut);
        }
    }

    fn end_round(&mut self, outcome: RoundOutcome) {
        self.game_over = true;
        self.outcome = Some(outcome);
        self.emit(GameEvent::RoundEnded { outcome });
    }

    /// Fill `out` with the current state, reusing its buffers
    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());

        out.current = (!self.current.is_empty()).then_some(ActiveSnapshot {
            piece: self.current,
            position: self.position,
        });
        out.ghost = if self.options.show_ghost && !self.is_clearing() {
            self.ghost_position()
        } else {
            None
        };
        out.held = self.held_piece();
        out.can_hold = self.can_hold();
        out.upcoming.clear();
        out.upcoming.extend(self.upcoming.iter().copied());
        out.clearing_rows.clear();
        out.clearing_rows.extend(self.clearing_rows.iter().copied());
        out.clear_progress = self.clear_progress();

        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.elapsed_s = self.elapsed_s;
        out.phase = self.phase();
        out.outcome = self.outcome;
        out.mode = self.options.mode;
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new(GameOptions::default())
    }
}
