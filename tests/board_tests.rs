//! Grid tests - collision allowance and row shifting

use tui_stacker::core::{Cell, Grid, Piece, Position};
use tui_stacker::types::{BlockColor, CellState, PieceKind};

const COLORS: [BlockColor; 7] = [
    BlockColor::Yellow,
    BlockColor::SkyBlue,
    BlockColor::Red,
    BlockColor::Green,
    BlockColor::Orange,
    BlockColor::Pink,
    BlockColor::Purple,
];

/// Every row fully locked, colored by row index
fn striped(width: u16, height: u16) -> Grid {
    let mut grid = Grid::new(width, height);
    for y in 0..i32::from(height) {
        for x in 0..i32::from(width) {
            grid.set(x, y, Cell::locked(COLORS[y as usize % COLORS.len()]));
        }
    }
    grid
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(10, 20);
    assert_eq!(grid.width(), 10);
    assert_eq!(grid.height(), 20);
    assert!(grid.cells().iter().all(Cell::is_empty));
}

#[test]
fn test_cells_above_field_are_open() {
    let grid = striped(10, 20);
    for x in 0..10 {
        assert!(grid.is_cell_empty(x, -1));
        assert!(grid.is_cell_empty(x, -5));
        assert!(!grid.is_cell_in_bounds(x, -1));
    }
}

#[test]
fn test_walls_and_floor_block() {
    let grid = Grid::new(10, 20);
    for x in 0..10 {
        assert!(!grid.is_cell_empty(x, 20));
    }
    for y in -2..20 {
        assert!(!grid.is_cell_empty(-1, y));
        assert!(!grid.is_cell_empty(10, y));
    }
    assert!(grid.is_cell_empty(0, 0));
    assert!(grid.is_cell_empty(9, 19));
}

#[test]
fn test_get_out_of_bounds() {
    let grid = Grid::new(10, 20);
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(10, 0), None);
    assert_eq!(grid.get(0, 20), None);
    assert!(!grid.clone().set(0, 20, Cell::locked(BlockColor::Red)));
}

#[test]
fn test_clear_line_shifts_rows_above() {
    for r in [0usize, 1, 7, 19] {
        let before = striped(6, 20);
        let mut after = before.clone();
        after.clear_line(r);

        assert!(after.row(0).unwrap().iter().all(Cell::is_empty), "row {r}");
        for y in 1..=r {
            assert_eq!(after.row(y), before.row(y - 1), "row {r}, y {y}");
        }
        for y in r + 1..20 {
            assert_eq!(after.row(y), before.row(y), "row {r}, y {y}");
        }
    }
}

#[test]
fn test_clear_line_out_of_range_is_noop() {
    let before = striped(4, 16);
    let mut after = before.clone();
    after.clear_line(16);
    assert_eq!(after, before);
}

#[test]
fn test_clearing_rows_top_down_keeps_detected_indices_valid() {
    // Rows 10 and 15 full, everything else has a hole.
    let mut grid = Grid::new(5, 20);
    for y in 5..20 {
        for x in 0..5 {
            if y == 10 || y == 15 || x != y % 5 {
                grid.set(x, y, Cell::locked(COLORS[y as usize % 7]));
            }
        }
    }
    let survivors: Vec<Vec<Cell>> = (0..20)
        .filter(|&y| y != 10 && y != 15)
        .map(|y| grid.row(y).unwrap().to_vec())
        .collect();

    for row in [10, 15] {
        assert!(grid.is_row_full(row));
        grid.clear_line(row);
    }

    // Two empty rows on top, then the survivors in order.
    assert!(grid.row(0).unwrap().iter().all(Cell::is_empty));
    assert!(grid.row(1).unwrap().iter().all(Cell::is_empty));
    for (i, expected) in survivors.iter().enumerate() {
        assert_eq!(grid.row(i + 2).unwrap(), expected.as_slice());
    }
}

#[test]
fn test_place_cells_and_collision() {
    let mut grid = Grid::new(10, 20);
    let t = Piece::main(PieceKind::T);
    let at = Position::new(4, 18);

    assert!(grid.can_piece_exist_at(&t, at));
    grid.place_cells(&t, at);
    assert!(!grid.can_piece_exist_at(&t, at));
    assert_eq!(grid.get(4, 19), Some(Cell::locked(BlockColor::Purple)));
    assert_eq!(grid.get(3, 18).unwrap().state, CellState::Grid);

    // Off the right wall.
    assert!(!grid.can_piece_exist_at(&t, Position::new(9, 5)));
}

#[test]
fn test_mark_row_clearing_keeps_colors() {
    let mut grid = striped(4, 16);
    grid.mark_row_clearing(3);
    for cell in grid.row(3).unwrap() {
        assert_eq!(cell.state, CellState::Clearing);
        assert_eq!(cell.color, Some(COLORS[3]));
    }
    assert_eq!(grid.row(2).unwrap()[0].state, CellState::Grid);
}
