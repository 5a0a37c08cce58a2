use std::fmt;

use super::{
    GRID_CELLS, GRID_SIZE,
    piece::{BlockColor, Piece},
    shape::Shape,
};

const ROW_MASK: u64 = 0xff;
const COLUMN_MASK: u64 = 0x0101_0101_0101_0101;

const fn bit(row: usize, col: usize) -> u64 {
    1 << (row * GRID_SIZE + col)
}

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(BlockColor),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Rows and columns removed by a single [`Grid::clear_lines`] call.
///
/// `rows` and `cols` are bitmasks (bit `i` = row/column `i`). A cell at the
/// intersection of a cleared row and a cleared column counts toward both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearedLines {
    rows: u8,
    cols: u8,
}

impl ClearedLines {
    pub const NONE: Self = Self { rows: 0, cols: 0 };

    #[must_use]
    pub const fn rows(self) -> u8 {
        self.rows
    }

    #[must_use]
    pub const fn cols(self) -> u8 {
        self.cols
    }

    /// Number of cleared rows plus number of cleared columns.
    #[must_use]
    pub const fn count(self) -> usize {
        (self.rows.count_ones() + self.cols.count_ones()) as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.rows == 0 && self.cols == 0
    }
}

/// The 8×8 board.
///
/// Two views of the same state are kept in sync:
///
/// - `occupied`: a 64-bit mask (bit `row * 8 + col`) used for placement
///   checks, line detection and counting
/// - `cells`: per-cell colors for display
///
/// Every mutation goes through [`Grid::place`] or [`Grid::clear_lines`], which
/// update both.
///
/// # Example
///
/// ```
/// use blockblast_engine::{BlockColor, Grid, ORDINARY_SHAPES};
///
/// let mut grid = Grid::EMPTY;
/// let line = &ORDINARY_SHAPES[2]; // 5-wide horizontal line
/// assert!(grid.can_place(line, 0, 0));
/// grid.place(line, 0, 0, BlockColor::Red);
/// assert!(!grid.can_place(line, 0, 3));
/// assert_eq!(grid.filled_count(), 5);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    occupied: u64,
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const SIZE: usize = GRID_SIZE;

    pub const EMPTY: Self = Self {
        occupied: 0,
        cells: [[Cell::Empty; GRID_SIZE]; GRID_SIZE],
    };

    /// Content of the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below [`GRID_SIZE`]. Use
    /// [`Self::is_occupied`] for a bounds-checked query.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < GRID_SIZE && col < GRID_SIZE && self.occupied & bit(row, col) != 0
    }

    /// Occupancy bitmask, bit `row * 8 + col`.
    #[must_use]
    pub fn occupancy(&self) -> u64 {
        self.occupied
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; GRID_SIZE]> {
        self.cells.iter()
    }

    /// Checks whether `shape` anchored at `(row, col)` fits entirely on the
    /// board and covers only empty cells.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, row: usize, col: usize) -> bool {
        shape
            .board_mask_at(row, col)
            .is_some_and(|mask| self.occupied & mask == 0)
    }

    /// Writes `color` into every cell covered by `shape` anchored at
    /// `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics when [`Self::can_place`] is false for the same arguments.
    /// Callers must check placement first; overlapping or off-board writes are
    /// a programming error.
    pub fn place(&mut self, shape: &Shape, row: usize, col: usize, color: BlockColor) {
        assert!(
            self.can_place(shape, row, col),
            "invalid placement of {} at ({row}, {col})",
            shape.name()
        );
        for (dr, dc) in shape.cells() {
            self.cells[row + dr][col + dc] = Cell::Filled(color);
        }
        self.occupied |= shape.board_mask() << (row * GRID_SIZE + col);
    }

    /// Like [`Self::place`], using the piece's shape and color.
    pub fn place_piece(&mut self, piece: Piece, row: usize, col: usize) {
        self.place(piece.shape(), row, col, piece.color());
    }

    /// Clears every full row and full column and returns which lines were
    /// cleared.
    ///
    /// All full lines are detected before any cell is emptied, so clearing a
    /// row never prevents a column found in the same scan from clearing.
    pub fn clear_lines(&mut self) -> ClearedLines {
        let mut cleared = ClearedLines::NONE;
        let mut clear_mask = 0;
        for i in 0..GRID_SIZE {
            let row_mask = ROW_MASK << (i * GRID_SIZE);
            if self.occupied & row_mask == row_mask {
                cleared.rows |= 1 << i;
                clear_mask |= row_mask;
            }
            let col_mask = COLUMN_MASK << i;
            if self.occupied & col_mask == col_mask {
                cleared.cols |= 1 << i;
                clear_mask |= col_mask;
            }
        }
        if clear_mask == 0 {
            return cleared;
        }

        self.occupied &= !clear_mask;
        for (r, row) in self.cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                if clear_mask & bit(r, c) != 0 {
                    *cell = Cell::Empty;
                }
            }
        }
        cleared
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.occupied.count_ones() as usize
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        GRID_CELLS - self.filled_count()
    }

    /// Returns `true` when no cell is filled.
    #[must_use]
    pub fn is_all_clear(&self) -> bool {
        self.occupied == 0
    }

    #[must_use]
    pub fn row_filled_count(&self, row: usize) -> usize {
        (self.occupied & (ROW_MASK << (row * GRID_SIZE))).count_ones() as usize
    }

    #[must_use]
    pub fn col_filled_count(&self, col: usize) -> usize {
        (self.occupied & (COLUMN_MASK << col)).count_ones() as usize
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row_filled_count(row) == GRID_SIZE
    }

    #[must_use]
    pub fn is_col_full(&self, col: usize) -> bool {
        self.col_filled_count(col) == GRID_SIZE
    }

    /// All anchors where `shape` can be placed, in row-major order.
    pub fn valid_positions<'a>(
        &'a self,
        shape: &'a Shape,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        (0..GRID_SIZE)
            .flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.can_place(shape, row, col))
    }

    #[must_use]
    pub fn count_valid_positions(&self, shape: &Shape) -> usize {
        self.valid_positions(shape).count()
    }

    #[must_use]
    pub fn has_valid_position(&self, shape: &Shape) -> bool {
        self.valid_positions(shape).next().is_some()
    }

    /// Creates a grid from ASCII art, for tests and fixtures.
    ///
    /// `.` is empty, `#` is a red block, and `R`/`B`/`G`/`Y` are blocks of the
    /// given color. Blank lines and whitespace are ignored; up to 8 rows are
    /// read from the top and missing rows are empty.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly 8 cells or there are more than 8
    /// rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut grid = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= GRID_SIZE,
            "At most {GRID_SIZE} rows allowed, got {}",
            lines.len()
        );

        for (row, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            assert_eq!(
                cells.len(),
                GRID_SIZE,
                "Each row must have exactly {GRID_SIZE} cells, got {} at row {row}",
                cells.len()
            );
            for (col, &ch) in cells.iter().enumerate() {
                let color = match ch {
                    '.' => continue,
                    '#' => BlockColor::Red,
                    c => BlockColor::from_char(c)
                        .unwrap_or_else(|| panic!("invalid cell {c:?} at ({row}, {col})")),
                };
                grid.cells[row][col] = Cell::Filled(color);
                grid.occupied |= bit(row, col);
            }
        }
        grid
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Filled(color) => color.as_char(),
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {{")?;
        for line in self.to_string().lines() {
            writeln!(f, "    {line}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use crate::core::shape::{ORDINARY_SHAPES, SPECIAL_SHAPES};

    use super::*;

    fn shape(name: &str) -> &'static Shape {
        ORDINARY_SHAPES
            .iter()
            .chain(&SPECIAL_SHAPES)
            .find(|s| s.name() == name)
            .unwrap()
    }

    fn assert_consistent(grid: &Grid) {
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                assert_eq!(
                    grid.is_occupied(r, c),
                    !grid.cell(r, c).is_empty(),
                    "mask and cells disagree at ({r}, {c})"
                );
            }
        }
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::EMPTY;
        assert!(grid.is_all_clear());
        assert_eq!(grid.filled_count(), 0);
        assert_eq!(grid.empty_count(), 64);
        assert_consistent(&grid);
    }

    #[test]
    fn test_can_place_rejects_out_of_bounds() {
        let grid = Grid::EMPTY;
        let line = shape("line5_h");
        assert!(grid.can_place(line, 0, 3));
        assert!(!grid.can_place(line, 0, 4));
        assert!(!grid.can_place(line, 8, 0));
        assert!(!grid.can_place(line, usize::MAX, 0));

        let vertical = shape("line4_v");
        assert!(grid.can_place(vertical, 4, 7));
        assert!(!grid.can_place(vertical, 5, 7));
    }

    #[test]
    fn test_can_place_ignores_empty_offsets() {
        let grid = Grid::from_ascii(
            "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            #.......
            ",
        );
        // `.#` / `##` would cover the filled corner.
        assert!(!grid.can_place(shape("corner2_d"), 6, 0));
        // `###` / `..#` leaves the filled corner under an empty offset.
        assert!(grid.can_place(shape("l_h_c"), 6, 0));
    }

    #[test]
    fn test_can_place_matches_cellwise_definition() {
        let grid = Grid::from_ascii(
            "
            ##....#.
            .#..##..
            ........
            ...#....
            #......#
            ..##....
            ........
            .#....##
            ",
        );
        for shape in ORDINARY_SHAPES.iter().chain(&SPECIAL_SHAPES) {
            for row in 0..GRID_SIZE + 1 {
                for col in 0..GRID_SIZE + 1 {
                    let expected = shape.cells().all(|(dr, dc)| {
                        let (r, c) = (row + dr, col + dc);
                        r < GRID_SIZE && c < GRID_SIZE && grid.cell(r, c).is_empty()
                    });
                    assert_eq!(
                        grid.can_place(shape, row, col),
                        expected,
                        "{} at ({row}, {col})",
                        shape.name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_place_writes_color() {
        let mut grid = Grid::EMPTY;
        grid.place(shape("t_c"), 2, 3, BlockColor::Blue);
        assert_eq!(grid.filled_count(), 4);
        assert_eq!(grid.cell(2, 4), Cell::Filled(BlockColor::Blue));
        assert_eq!(grid.cell(3, 3), Cell::Filled(BlockColor::Blue));
        assert!(grid.cell(2, 3).is_empty());
        assert_consistent(&grid);
    }

    #[test]
    #[should_panic(expected = "invalid placement")]
    fn test_place_on_filled_cell_panics() {
        let mut grid = Grid::EMPTY;
        grid.place(shape("square2"), 0, 0, BlockColor::Red);
        grid.place(shape("square2"), 1, 1, BlockColor::Red);
    }

    #[test]
    #[should_panic(expected = "invalid placement")]
    fn test_place_out_of_bounds_panics() {
        let mut grid = Grid::EMPTY;
        grid.place(shape("line3_v"), 6, 0, BlockColor::Red);
    }

    #[test]
    fn test_clear_lines_without_full_lines_is_noop() {
        let mut grid = Grid::from_ascii(
            "
            #######.
            ........
            ..#.....
            ..#.....
            ..#.....
            ..#.....
            ..#.....
            ..#.....
            ",
        );
        let before = grid.clone();
        let cleared = grid.clear_lines();
        assert_eq!(cleared.count(), 0);
        assert!(cleared.is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_single_row() {
        let mut grid = Grid::from_ascii(
            "
            ########
            ........
            ...#....
            ",
        );
        let cleared = grid.clear_lines();
        assert_eq!(cleared.count(), 1);
        assert_eq!(cleared.rows(), 0b1);
        assert_eq!(cleared.cols(), 0);
        assert_eq!(grid.row_filled_count(0), 0);
        assert!(grid.is_occupied(2, 3));
        assert_eq!(grid.filled_count(), 1);
        assert_consistent(&grid);
    }

    #[test]
    fn test_clear_row_and_column_sharing_a_cell() {
        let mut grid = Grid::from_ascii(
            "
            ########
            #.......
            #.......
            #.......
            #.......
            #.......
            #.......
            #.......
            ",
        );
        let cleared = grid.clear_lines();
        assert_eq!(cleared.count(), 2);
        assert_eq!(cleared.rows(), 0b1);
        assert_eq!(cleared.cols(), 0b1);
        assert!(grid.is_all_clear());
        assert_consistent(&grid);
    }

    #[test]
    fn test_clear_does_not_block_crossing_lines() {
        // Two full rows and three full columns, found in the same pre-scan.
        let mut grid = Grid::from_ascii(
            "
            #..##...
            ########
            #..##...
            #..##...
            ########
            #..##...
            #..##...
            #..##..#
            ",
        );
        let cleared = grid.clear_lines();
        assert_eq!(cleared.rows(), 0b1_0010);
        assert_eq!(cleared.cols(), 0b1_1001);
        assert_eq!(cleared.count(), 5);
        assert_eq!(grid.filled_count(), 1);
        assert!(grid.is_occupied(7, 7));
        assert_consistent(&grid);
    }

    #[test]
    fn test_clear_full_board_counts_every_line() {
        let mut grid = Grid::from_ascii(&"########\n".repeat(8));
        let cleared = grid.clear_lines();
        assert_eq!(cleared.count(), 16);
        assert!(grid.is_all_clear());
    }

    #[test]
    fn test_line_fill_counts() {
        let grid = Grid::from_ascii(
            "
            ###.....
            #.......
            #.......
            ",
        );
        assert_eq!(grid.row_filled_count(0), 3);
        assert_eq!(grid.row_filled_count(1), 1);
        assert_eq!(grid.col_filled_count(0), 3);
        assert_eq!(grid.col_filled_count(2), 1);
        assert_eq!(grid.col_filled_count(7), 0);
        assert!(!grid.is_row_full(0));
    }

    #[test]
    fn test_full_line_queries() {
        let grid = Grid::from_ascii(
            "
            ########
            #.......
            #.......
            #.......
            #.......
            #.......
            #.......
            #.......
            ",
        );
        assert!(grid.is_row_full(0));
        assert!(!grid.is_row_full(1));
        assert!(grid.is_col_full(0));
        assert!(!grid.is_col_full(1));
    }

    #[test]
    fn test_valid_positions_on_empty_grid() {
        let grid = Grid::EMPTY;
        assert_eq!(grid.count_valid_positions(shape("square3")), 36);
        assert_eq!(grid.count_valid_positions(shape("line5_h")), 32);
        assert_eq!(grid.count_valid_positions(shape("diag2_a")), 49);
    }

    #[test]
    fn test_no_shape_fits_on_checkerboard() {
        let grid = Grid::from_ascii(
            "
            #.#.#.#.
            .#.#.#.#
            #.#.#.#.
            .#.#.#.#
            #.#.#.#.
            .#.#.#.#
            #.#.#.#.
            .#.#.#.#
            ",
        );
        for shape in &ORDINARY_SHAPES {
            if shape.name().starts_with("diag") {
                continue;
            }
            assert!(!grid.has_valid_position(shape), "{}", shape.name());
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let art = "R.......\n.B......\n..G.....\n...Y....\n........\n........\n........\n........\n";
        let grid = Grid::from_ascii(art);
        assert_eq!(grid.to_string(), art);
        assert_eq!(Grid::from_ascii(&grid.to_string()), grid);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_cell_out_of_range_panics() {
        let _ = Grid::EMPTY.cell(0, GRID_SIZE);
    }

    #[test]
    fn test_is_occupied_out_of_range_is_false() {
        let grid = Grid::from_ascii(&"########\n".repeat(8));
        assert!(grid.is_occupied(7, 7));
        assert!(!grid.is_occupied(GRID_SIZE, 0));
        assert!(!grid.is_occupied(0, GRID_SIZE));
    }
}
