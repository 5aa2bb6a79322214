//! GameView: maps a `core::SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{
    GameOverItem, Piece, RoundOutcome, RoundPhase, RoundSnapshot, Scene, SessionSnapshot,
    TitleItem,
};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockColor, CellState};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Preview slot width in board cells (fits every piece orientation)
const PREVIEW_CELLS: u16 = 4;

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const TEXT: Rgb = Rgb::new(200, 200, 200);
const LABEL: Rgb = Rgb::new(220, 220, 220);
const HIGHLIGHT: Rgb = Rgb::new(255, 255, 255);

/// Screen placement of the board frame
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the stacker game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the session into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        match snap.scene {
            Scene::TitleMenu { selected } => self.draw_title(fb, viewport, selected),
            Scene::InRound => {
                self.draw_round(fb, viewport, &snap.round);
            }
            Scene::GameOver { selected } => {
                let frame = self.draw_round(fb, viewport, &snap.round);
                self.draw_game_over(fb, frame, snap.round.outcome, selected);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_title(&self, fb: &mut FrameBuffer, viewport: Viewport, selected: TitleItem) {
        let title = CellStyle::fg(Rgb::from(BlockColor::SkyBlue)).bold();
        let item = CellStyle::fg(TEXT);
        let active = CellStyle::fg(HIGHLIGHT).bold();
        let hint = CellStyle::fg(TEXT).dim();

        let block_h = 4 + TitleItem::ALL.len() as u16 + 2;
        let mut y = viewport.height.saturating_sub(block_h) / 2;

        fb.put_str_centered(0, y, viewport.width, "T U I   S T A C K E R", title);
        y = y.saturating_add(3);

        for entry in TitleItem::ALL {
            let (marker, style) = if entry == selected {
                ("> ", active)
            } else {
                ("  ", item)
            };
            let x = viewport.width.saturating_sub(12) / 2;
            fb.put_str(x, y, marker, style);
            fb.put_str(x.saturating_add(2), y, entry.label(), style);
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        fb.put_str_centered(0, y, viewport.width, "up/down select  enter confirm  q quit", hint);
    }

    /// Draw board, pieces, side panel and pause overlay; returns the frame
    fn draw_round(&self, fb: &mut FrameBuffer, viewport: Viewport, round: &RoundSnapshot) -> Frame {
        let board_px_w = round.width * self.cell_w;
        let board_px_h = round.height * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::fg(Rgb::new(80, 80, 90)).on(PLAYFIELD_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, CellStyle::fg(LABEL));

        // Grid cells.
        let flash = ((round.clear_progress * 6.0) as u32) % 2 == 0;
        for (y, row) in round.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match (cell.state, cell.color) {
                    (CellState::Grid, Some(color)) => {
                        self.draw_block(fb, frame, x, y, Rgb::from(color), false);
                    }
                    (CellState::Clearing, color) => {
                        let fg = if flash {
                            HIGHLIGHT
                        } else {
                            color.map(Rgb::from).unwrap_or(HIGHLIGHT)
                        };
                        self.draw_block(fb, frame, x, y, fg, true);
                    }
                    _ => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        // Ghost piece.
        if let (Some(active), Some(ghost)) = (round.current, round.ghost) {
            for (pos, color) in active.piece.cells_at(ghost) {
                if let Some((x, y)) = visible(round, pos.x, pos.y) {
                    let style = CellStyle::fg(Rgb::from(color).scaled(60))
                        .on(PLAYFIELD_BG)
                        .dim();
                    self.fill_cell_rect(fb, frame, x, y, '░', style);
                }
            }
        }

        // Current piece.
        if let Some(active) = round.current {
            if round.phase != RoundPhase::Clearing {
                for (pos, color) in active.piece.cells_at(active.position) {
                    if let Some((x, y)) = visible(round, pos.x, pos.y) {
                        self.draw_block(fb, frame, x, y, Rgb::from(color), true);
                    }
                }
            }
        }

        self.draw_side_panel(fb, viewport, frame, round);

        if round.phase == RoundPhase::Paused {
            self.draw_overlay_text(fb, frame, frame.h / 2, "PAUSED");
        }
        frame
    }

    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        outcome: Option<RoundOutcome>,
        selected: GameOverItem,
    ) {
        let heading = match outcome {
            Some(RoundOutcome::SprintComplete) => "SPRINT CLEAR",
            Some(RoundOutcome::ToppedOut) | None => "GAME OVER",
        };
        let mid = frame.h / 2;
        self.draw_overlay_text(fb, frame, mid.saturating_sub(2), heading);

        for (i, entry) in GameOverItem::ALL.into_iter().enumerate() {
            let y = frame.y + mid + i as u16;
            let style = if entry == selected {
                CellStyle::fg(HIGHLIGHT).bold()
            } else {
                CellStyle::fg(TEXT)
            };
            let x = frame.x + frame.w.saturating_sub(8) / 2;
            fb.put_str(x, y, if entry == selected { "> " } else { "  " }, style);
            fb.put_str(x + 2, y, entry.label(), style);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::fg(Rgb::new(90, 90, 100)).on(PLAYFIELD_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, fg: Rgb, bold: bool) {
        let style = CellStyle {
            fg,
            bg: PLAYFIELD_BG,
            bold,
            dim: false,
        };
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        frame: Frame,
        round: &RoundSnapshot,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::fg(LABEL).bold();
        let value = CellStyle::fg(TEXT);

        let mut y = frame.y;
        let stat = |fb: &mut FrameBuffer, y: &mut u16, name: &str| {
            fb.put_str(panel_x, *y, name, label);
            *y = y.saturating_add(1);
        };

        stat(fb, &mut y, "SCORE");
        fb.put_u32(panel_x, y, round.score, value);
        y = y.saturating_add(2);

        stat(fb, &mut y, "LEVEL");
        fb.put_u32(panel_x, y, round.level, value);
        y = y.saturating_add(2);

        stat(fb, &mut y, "LINES");
        fb.put_u32(panel_x, y, round.lines, value);
        if let Some(remaining) = round.lines_remaining() {
            let dim = CellStyle { dim: true, ..value };
            let digits = round.lines.checked_ilog10().unwrap_or(0) as u16 + 1;
            let x = panel_x + digits + 1;
            fb.put_u32(x, y, remaining, dim);
            fb.put_str(x + remaining.checked_ilog10().unwrap_or(0) as u16 + 2, y, "left", dim);
        }
        y = y.saturating_add(2);

        stat(fb, &mut y, "TIME");
        fb.put_time(panel_x, y, round.elapsed_s, value);
        y = y.saturating_add(2);

        stat(fb, &mut y, "HOLD");
        match round.held {
            // Dimmed until the next lock re-enables hold.
            Some(piece) => {
                y = self.draw_preview(fb, panel_x, y, &piece, !round.can_hold);
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
                y = y.saturating_add(1);
            }
        }
        y = y.saturating_add(1);

        stat(fb, &mut y, "NEXT");
        for piece in &round.upcoming {
            if y >= viewport.height {
                break;
            }
            y = self.draw_preview(fb, panel_x, y, piece, false);
            y = y.saturating_add(1);
        }
    }

    /// Draw `piece` centered horizontally in a preview slot; returns the row
    /// below it.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece, dim: bool) -> u16 {
        let Some(bounds) = piece.bounds() else {
            return y;
        };
        let pad = i32::from(PREVIEW_CELLS.saturating_sub(u16::from(bounds.width())) / 2);

        for (&(dx, dy), &color) in piece.offsets().iter().zip(piece.colors()) {
            let col = pad + i32::from(dx - bounds.left);
            let row = i32::from(dy - bounds.top);
            let style = CellStyle {
                fg: Rgb::from(color),
                bg: Rgb::new(0, 0, 0),
                bold: !dim,
                dim,
            };
            let px = x + col as u16 * self.cell_w;
            let py = y + row as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
        y + u16::from(bounds.height()) * self.cell_h
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, row: u16, text: &str) {
        let style = CellStyle::fg(HIGHLIGHT).bold();
        fb.put_str_centered(frame.x, frame.y.saturating_add(row), frame.w, text, style);
    }
}

/// Board coordinates of a cell that lies inside the visible field
fn visible(round: &RoundSnapshot, x: i32, y: i32) -> Option<(u16, u16)> {
    if x >= 0 && y >= 0 && x < i32::from(round.width) && y < i32::from(round.height) {
        Some((x as u16, y as u16))
    } else {
        None
    }
}
