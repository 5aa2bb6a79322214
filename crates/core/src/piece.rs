//! Piece module - canonical piece shapes and pivot rotations
//!
//! A [`Piece`] is a small value type: a pivot, up to four block offsets and a
//! parallel list of block colors. Rotations return a new piece and leave the
//! source piece alone, so the current, held and upcoming pieces can be copied
//! freely.
//!
//! Coordinates follow the grid: x grows to the right, y grows downward. Offsets
//! are relative to the piece origin (not the pivot).

use crate::types::{BlockColor, PieceKind, BLOCKS_PER_PIECE};

/// Offset of a single block relative to the piece origin
pub type BlockOffset = (i8, i8);

/// Absolute cell position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Rotation center stored in half-cell units.
///
/// Both components are either whole or half cells, which keeps every rotated
/// offset an exact integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pivot {
    x2: i8,
    y2: i8,
}

impl Pivot {
    pub const ORIGIN: Pivot = Pivot { x2: 0, y2: 0 };
    pub const HALF: Pivot = Pivot { x2: 1, y2: 1 };

    pub fn x(&self) -> f32 {
        f32::from(self.x2) / 2.0
    }

    pub fn y(&self) -> f32 {
        f32::from(self.y2) / 2.0
    }

    #[inline(always)]
    fn sum(&self) -> i8 {
        (self.x2 + self.y2) / 2
    }

    #[inline(always)]
    fn diff(&self) -> i8 {
        (self.y2 - self.x2) / 2
    }
}

/// Rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
    Half,
}

/// Axis-aligned bounding box of a piece's offsets (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceBounds {
    pub left: i8,
    pub right: i8,
    pub top: i8,
    pub bottom: i8,
}

impl PieceBounds {
    /// Width in cells
    pub fn width(&self) -> u8 {
        (self.right - self.left + 1) as u8
    }

    /// Height in cells
    pub fn height(&self) -> u8 {
        (self.bottom - self.top + 1) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: Option<PieceKind>,
    pivot: Pivot,
    offsets: [BlockOffset; BLOCKS_PER_PIECE],
    colors: [BlockColor; BLOCKS_PER_PIECE],
    len: u8,
}

impl Piece {
    /// The "no piece" sentinel (zero blocks), used for an empty hold slot
    pub const EMPTY: Piece = Piece {
        kind: None,
        pivot: Pivot::ORIGIN,
        offsets: [(0, 0); BLOCKS_PER_PIECE],
        colors: [BlockColor::Yellow; BLOCKS_PER_PIECE],
        len: 0,
    };

    /// Canonical piece for `kind` in its spawn orientation
    pub fn main(kind: PieceKind) -> Self {
        let (pivot, offsets) = match kind {
            PieceKind::O => (Pivot::HALF, [(0, 0), (1, 0), (0, 1), (1, 1)]),
            PieceKind::I => (Pivot::HALF, [(1, -1), (1, 0), (1, 1), (1, 2)]),
            PieceKind::S => (Pivot::ORIGIN, [(0, 0), (1, 0), (0, -1), (-1, -1)]),
            PieceKind::Z => (Pivot::ORIGIN, [(0, 0), (-1, 0), (0, -1), (1, -1)]),
            PieceKind::L => (Pivot::ORIGIN, [(0, -1), (0, 0), (0, 1), (1, -1)]),
            PieceKind::J => (Pivot::ORIGIN, [(0, -1), (0, 0), (0, 1), (-1, -1)]),
            PieceKind::T => (Pivot::ORIGIN, [(-1, 0), (0, 0), (1, 0), (0, 1)]),
        };

        Self {
            kind: Some(kind),
            pivot,
            offsets,
            colors: [kind.color(); BLOCKS_PER_PIECE],
            len: BLOCKS_PER_PIECE as u8,
        }
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.kind
    }

    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    pub fn block_count(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn offsets(&self) -> &[BlockOffset] {
        &self.offsets[..self.len as usize]
    }

    pub fn colors(&self) -> &[BlockColor] {
        &self.colors[..self.len as usize]
    }

    /// Absolute cells covered by this piece when its origin is at `at`
    pub fn cells_at(&self, at: Position) -> impl Iterator<Item = (Position, BlockColor)> + '_ {
        self.offsets()
            .iter()
            .zip(self.colors())
            .map(move |(&(dx, dy), &color)| (at.offset(i32::from(dx), i32::from(dy)), color))
    }

    /// 90 degrees counter-clockwise around the pivot
    pub fn rotated_left(&self) -> Self {
        let (s, d) = (self.pivot.sum(), self.pivot.diff());
        self.map_offsets(|(x, y)| (-y + s, x + d))
    }

    /// 90 degrees clockwise around the pivot
    pub fn rotated_right(&self) -> Self {
        let (s, d) = (self.pivot.sum(), self.pivot.diff());
        self.map_offsets(|(x, y)| (y - d, -x + s))
    }

    /// 180 degrees around the pivot
    pub fn rotated_half(&self) -> Self {
        let (x2, y2) = (self.pivot.x2, self.pivot.y2);
        self.map_offsets(|(x, y)| (-x + x2, -y + y2))
    }

    pub fn rotated(&self, turn: Turn) -> Self {
        match turn {
            Turn::Left => self.rotated_left(),
            Turn::Right => self.rotated_right(),
            Turn::Half => self.rotated_half(),
        }
    }

    fn map_offsets(&self, f: impl Fn(BlockOffset) -> BlockOffset) -> Self {
        let mut out = *self;
        for offset in &mut out.offsets[..self.len as usize] {
            *offset = f(*offset);
        }
        out
    }

    /// Bounding box of the offsets, `None` for the empty sentinel
    pub fn bounds(&self) -> Option<PieceBounds> {
        let offsets = self.offsets();
        let &(x0, y0) = offsets.first()?;
        let mut bounds = PieceBounds {
            left: x0,
            right: x0,
            top: y0,
            bottom: y0,
        };
        for &(x, y) in &offsets[1..] {
            bounds.left = bounds.left.min(x);
            bounds.right = bounds.right.max(x);
            bounds.top = bounds.top.min(y);
            bounds.bottom = bounds.bottom.max(y);
        }
        Some(bounds)
    }

    /// Span of the bounding box (right - left, bottom - top); (0, 0) when
    /// empty. One less than the cell counts of [`PieceBounds::width`] and
    /// [`PieceBounds::height`].
    pub fn measure(&self) -> (u8, u8) {
        self.bounds()
            .map(|b| ((b.right - b.left) as u8, (b.bottom - b.top) as u8))
            .unwrap_or((0, 0))
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::EMPTY
    }
}
