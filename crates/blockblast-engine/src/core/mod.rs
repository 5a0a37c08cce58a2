pub use self::{grid::*, piece::*, shape::*};

pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod shape;

/// Number of rows and columns of the square board.
pub const GRID_SIZE: usize = 8;

/// Total number of cells on the board.
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;
