//! Lazy-evaluated metrics of a board snapshot.
//!
//! [`BoardAnalysis`] wraps a grid together with the combo counters it was
//! reached with. Every metric is computed on first access and cached, so
//! features that share a metric (or evaluators that skip a feature) pay for it
//! at most once.

use std::cell::OnceCell;

use blockblast_engine::{GRID_SIZE, Grid, ORDINARY_SHAPES, ScoreState};

/// Minimum filled cells for a line to count as near-complete.
pub const NEAR_COMPLETE_LINE_CELLS: usize = 5;

#[derive(Debug, Clone)]
pub struct BoardAnalysis {
    grid: Grid,
    combo: u32,
    since_clear: u32,
    row_filled: OnceCell<[u8; GRID_SIZE]>,
    col_filled: OnceCell<[u8; GRID_SIZE]>,
    largest_filled_rectangle: OnceCell<u32>,
    total_valid_placements: OnceCell<u32>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn new(grid: &Grid, combo: u32, since_clear: u32) -> Self {
        Self {
            grid: grid.clone(),
            combo,
            since_clear,
            row_filled: OnceCell::new(),
            col_filled: OnceCell::new(),
            largest_filled_rectangle: OnceCell::new(),
            total_valid_placements: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn from_state(grid: &Grid, score: &ScoreState) -> Self {
        Self::new(grid, score.combo(), score.since_clear())
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    #[must_use]
    pub fn since_clear(&self) -> u32 {
        self.since_clear
    }

    /// Whether the combo is still alive (fewer than 3 placements since the
    /// last clear).
    #[must_use]
    pub fn is_combo_alive(&self) -> bool {
        ScoreState::new(0, self.combo, self.since_clear).is_combo_alive()
    }

    #[must_use]
    pub fn filled_cells(&self) -> u32 {
        self.grid.occupancy().count_ones()
    }

    #[must_use]
    pub fn is_all_clear(&self) -> bool {
        self.grid.is_all_clear()
    }

    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn row_filled(&self) -> &[u8; GRID_SIZE] {
        self.row_filled
            .get_or_init(|| std::array::from_fn(|row| self.grid.row_filled_count(row) as u8))
    }

    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn col_filled(&self) -> &[u8; GRID_SIZE] {
        self.col_filled
            .get_or_init(|| std::array::from_fn(|col| self.grid.col_filled_count(col) as u8))
    }

    /// Sum of filled cells over rows and columns with at least
    /// [`NEAR_COMPLETE_LINE_CELLS`] filled cells.
    #[must_use]
    pub fn near_complete_line_cells(&self) -> u32 {
        self.row_filled()
            .iter()
            .chain(self.col_filled())
            .filter(|&&n| usize::from(n) >= NEAR_COMPLETE_LINE_CELLS)
            .map(|&n| u32::from(n))
            .sum()
    }

    /// Filled cells on the four border lines, each line counted separately.
    ///
    /// A filled corner belongs to a border row and a border column, so it is
    /// counted twice.
    #[must_use]
    pub fn border_line_cells(&self) -> u32 {
        let rows = self.row_filled();
        let cols = self.col_filled();
        [rows[0], rows[GRID_SIZE - 1], cols[0], cols[GRID_SIZE - 1]]
            .into_iter()
            .map(u32::from)
            .sum()
    }

    /// Number of valid `(shape, row, col)` placements over the ordinary catalog.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn total_valid_placements(&self) -> u32 {
        *self.total_valid_placements.get_or_init(|| {
            ORDINARY_SHAPES
                .iter()
                .map(|shape| self.grid.count_valid_positions(shape))
                .sum::<usize>() as u32
        })
    }

    /// Area of the largest axis-aligned rectangle of filled cells.
    #[must_use]
    pub fn largest_filled_rectangle(&self) -> u32 {
        *self
            .largest_filled_rectangle
            .get_or_init(|| largest_filled_rectangle(&self.grid))
    }
}

/// Sweeps rows top to bottom keeping, per column, the run of filled cells
/// ending at the current row, and takes the largest rectangle of each
/// histogram.
fn largest_filled_rectangle(grid: &Grid) -> u32 {
    let mut heights = [0; GRID_SIZE];
    let mut best = 0;
    for row in 0..GRID_SIZE {
        for (col, height) in heights.iter_mut().enumerate() {
            if grid.is_occupied(row, col) {
                *height += 1;
            } else {
                *height = 0;
            }
        }
        best = u32::max(best, largest_rectangle_in_histogram(&heights));
    }
    best
}

/// Largest rectangle under a histogram in one pass.
///
/// The stack holds `(width, height)` bars with strictly increasing heights.
/// A lower bar pops every taller bar, merging their widths into itself.
fn largest_rectangle_in_histogram(heights: &[u32; GRID_SIZE]) -> u32 {
    let mut stack: Vec<(u32, u32)> = Vec::with_capacity(GRID_SIZE + 1);
    let mut best = 0;
    for height in heights.iter().copied().chain([0]) {
        let mut width = 0;
        while let Some(&(w, h)) = stack.last() {
            if h < height {
                break;
            }
            stack.pop();
            width += w;
            best = u32::max(best, width * h);
        }
        stack.push((width + 1, height));
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(art: &str) -> BoardAnalysis {
        BoardAnalysis::new(&Grid::from_ascii(art), 0, 0)
    }

    #[test]
    fn test_histogram_rectangle() {
        assert_eq!(largest_rectangle_in_histogram(&[0; 8]), 0);
        assert_eq!(largest_rectangle_in_histogram(&[2, 1, 5, 6, 2, 3, 0, 0]), 10);
        assert_eq!(largest_rectangle_in_histogram(&[3; 8]), 24);
        assert_eq!(largest_rectangle_in_histogram(&[1, 2, 3, 4, 5, 6, 7, 8]), 20);
        assert_eq!(largest_rectangle_in_histogram(&[8, 0, 0, 0, 0, 0, 0, 0]), 8);
    }

    #[test]
    fn test_largest_rectangle_empty_grid() {
        assert_eq!(analyze("").largest_filled_rectangle(), 0);
    }

    #[test]
    fn test_largest_rectangle_three_full_rows() {
        let analysis = analyze(
            "
            ########
            ########
            ########
            ",
        );
        assert_eq!(analysis.largest_filled_rectangle(), 24);
    }

    #[test]
    fn test_largest_rectangle_ignores_gaps() {
        let analysis = analyze(
            "
            ###.....
            ###.##..
            .##.##..
            ....##..
            ....##..
            ",
        );
        assert_eq!(analysis.largest_filled_rectangle(), 8);
    }

    #[test]
    fn test_near_complete_lines() {
        let analysis = analyze(
            "
            #####...
            ####....
            #.......
            #.......
            #.......
            ........
            ........
            ........
            ",
        );
        // row 0 has 5 cells, column 0 has 5 cells; row 1 has only 4
        assert_eq!(analysis.near_complete_line_cells(), 10);
    }

    #[test]
    fn test_border_line_cells_counts_corners_twice() {
        let analysis = analyze(
            "
            #.......
            ........
            ........
            ...##...
            ........
            ........
            ........
            .......#
            ",
        );
        assert_eq!(analysis.border_line_cells(), 4);
    }

    #[test]
    fn test_total_valid_placements() {
        let empty = analyze("");
        let expected: usize = ORDINARY_SHAPES
            .iter()
            .map(|s| (9 - s.height()) * (9 - s.width()))
            .sum();
        assert_eq!(empty.total_valid_placements() as usize, expected);

        let full = BoardAnalysis::new(&Grid::from_ascii(&"########\n".repeat(8)), 0, 0);
        assert_eq!(full.total_valid_placements(), 0);
    }

    #[test]
    fn test_combo_alive() {
        assert!(BoardAnalysis::new(&Grid::EMPTY, 3, 2).is_combo_alive());
        assert!(!BoardAnalysis::new(&Grid::EMPTY, 0, 3).is_combo_alive());
    }
}
