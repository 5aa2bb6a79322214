//! Grid module - manages the playfield cells
//!
//! The grid is a `width` x `height` field where each cell carries an occupancy
//! state and a color. Storage is a single flat buffer in row-major order
//! (`y * width + x`); resizing between rounds reuses the buffer in place.
//!
//! Coordinates: (x, y) where x grows to the right and y grows downward, row 0 is
//! the top row. Cells above row 0 do not exist but count as empty for collision
//! so pieces can spawn and rotate partially above the visible field.

use crate::piece::{Piece, Position};
use crate::types::{BlockColor, CellState, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

/// A single playfield cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub state: CellState,
    pub color: Option<BlockColor>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        state: CellState::Empty,
        color: None,
    };

    pub const fn locked(color: BlockColor) -> Self {
        Self {
            state: CellState::Grid,
            color: Some(color),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state == CellState::Empty
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.is_cell_in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * usize::from(self.width) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Strict rectangle containment (no allowance above the top row)
    pub fn is_cell_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < i32::from(self.width) && y >= 0 && y < i32::from(self.height)
    }

    /// Collision query.
    ///
    /// Cells left/right of the field or at/below the bottom are blocked. Cells
    /// above the top row are open as long as x is within the field.
    pub fn is_cell_empty(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return false;
        }
        if y < 0 {
            return true;
        }
        self.get(x, y).map_or(false, |cell| cell.is_empty())
    }

    /// Get cell at position (x, y); None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether every block of `piece` at `at` lands on an empty cell
    pub fn can_piece_exist_at(&self, piece: &Piece, at: Position) -> bool {
        piece
            .cells_at(at)
            .all(|(pos, _)| self.is_cell_empty(pos.x, pos.y))
    }

    /// Write the piece's blocks into the grid as locked cells.
    ///
    /// Blocks outside the field are dropped.
    pub fn place_cells(&mut self, piece: &Piece, at: Position) {
        for (pos, color) in piece.cells_at(at) {
            self.set(pos.x, pos.y, Cell::locked(color));
        }
    }

    /// Whether every cell in row `y` is occupied (locked or clearing)
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map_or(false, |row| row.iter().all(|cell| !cell.is_empty()))
    }

    /// Switch every cell in row `y` to the clearing state (colors kept)
    pub fn mark_row_clearing(&mut self, y: usize) {
        if let Some(row) = self.row_mut(y) {
            for cell in row {
                cell.state = CellState::Clearing;
            }
        }
    }

    /// Remove row `line`: rows above shift down by one, row 0 becomes empty
    pub fn clear_line(&mut self, line: usize) {
        if line >= usize::from(self.height) {
            return;
        }

        let width = usize::from(self.width);
        for row in (1..=line).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        self.cells[..width].fill(Cell::EMPTY);
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= usize::from(self.height) {
            return None;
        }
        let width = usize::from(self.width);
        Some(&self.cells[y * width..(y + 1) * width])
    }

    fn row_mut(&mut self, y: usize) -> Option<&mut [Cell]> {
        if y >= usize::from(self.height) {
            return None;
        }
        let width = usize::from(self.width);
        Some(&mut self.cells[y * width..(y + 1) * width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Change dimensions and empty the grid, reusing the buffer
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::EMPTY);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
        assert_eq!(grid.index(0, -1), None);
    }

    #[test]
    fn test_clearing_cells_block_collision() {
        let mut grid = Grid::new(4, 16);
        for x in 0..4 {
            grid.set(x, 15, Cell::locked(BlockColor::Red));
        }
        grid.mark_row_clearing(15);

        assert!(grid.is_row_full(15));
        assert!(!grid.is_cell_empty(2, 15));
        assert_eq!(grid.get(2, 15).unwrap().state, CellState::Clearing);
        assert_eq!(grid.get(2, 15).unwrap().color, Some(BlockColor::Red));
    }

    #[test]
    fn test_place_cells_clips_out_of_bounds_blocks() {
        let mut grid = Grid::new(10, 20);
        // S piece at row 0 has two blocks at y = -1
        let s = Piece::main(PieceKind::S);
        grid.place_cells(&s, Position::new(5, 0));

        let filled = grid.cells().iter().filter(|c| !c.is_empty()).count();
        assert_eq!(filled, 2);
        assert_eq!(grid.get(5, 0), Some(Cell::locked(BlockColor::Red)));
        assert_eq!(grid.get(6, 0), Some(Cell::locked(BlockColor::Red)));
    }

    #[test]
    fn test_resize_reuses_buffer_and_empties() {
        let mut grid = Grid::new(10, 20);
        grid.set(3, 3, Cell::locked(BlockColor::Green));

        grid.resize(12, 30);
        assert_eq!(grid.width(), 12);
        assert_eq!(grid.height(), 30);
        assert_eq!(grid.cells().len(), 360);
        assert!(grid.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn test_rows_iterates_top_to_bottom() {
        let mut grid = Grid::new(3, 16);
        grid.set(1, 15, Cell::locked(BlockColor::Pink));

        let rows: Vec<&[Cell]> = grid.rows().collect();
        assert_eq!(rows.len(), 16);
        assert!(rows[0].iter().all(Cell::is_empty));
        assert_eq!(rows[15][1], Cell::locked(BlockColor::Pink));
    }
}
