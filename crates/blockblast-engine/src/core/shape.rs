use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::GRID_SIZE;

/// Largest height or width of any shape in the catalog.
pub const MAX_SHAPE_SIZE: usize = 5;

/// An immutable occupancy pattern.
///
/// Shapes are defined from ASCII art at compile time (`#` occupied, `.` empty)
/// and are only ever referenced from the read-only catalogs [`ORDINARY_SHAPES`]
/// and [`SPECIAL_SHAPES`]. Every row and every column of a catalog shape holds
/// at least one occupied cell, so anchors are always non-negative.
///
/// Besides the per-row bitmasks, each shape carries a precomputed board mask:
/// the shape anchored at `(0, 0)` on the 8×8 board, bit `row * 8 + col`.
/// Shifting that mask by the anchor index gives the placement footprint, which
/// is what [`Grid`](super::Grid) uses for collision checks.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    name: &'static str,
    height: u8,
    width: u8,
    rows: [u8; MAX_SHAPE_SIZE],
    cell_count: u8,
    board_mask: u64,
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("name", &self.name)
            .field("height", &self.height)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl Shape {
    /// Builds a shape from rows of ASCII art.
    ///
    /// Panics (at compile time when used in a `const`) when the rows are empty,
    /// ragged, larger than [`MAX_SHAPE_SIZE`], or contain no occupied cell.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn from_ascii(name: &'static str, art: &[&str]) -> Self {
        assert!(!art.is_empty() && art.len() <= MAX_SHAPE_SIZE);
        let width = art[0].len();
        assert!(width > 0 && width <= MAX_SHAPE_SIZE);

        let mut rows = [0; MAX_SHAPE_SIZE];
        let mut board_mask = 0;
        let mut cell_count = 0;
        let mut r = 0;
        while r < art.len() {
            let line = art[r].as_bytes();
            assert!(line.len() == width, "ragged shape row");
            let mut c = 0;
            while c < width {
                match line[c] {
                    b'#' => {
                        rows[r] |= 1 << c;
                        board_mask |= 1 << (r * GRID_SIZE + c);
                        cell_count += 1;
                    }
                    b'.' => {}
                    _ => panic!("shape cells must be '#' or '.'"),
                }
                c += 1;
            }
            r += 1;
        }
        assert!(cell_count > 0);

        Self {
            name,
            height: art.len() as u8,
            width: width as u8,
            rows,
            cell_count,
            board_mask,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Number of occupied cells; this is also the placement score of the shape.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.cell_count as usize
    }

    #[must_use]
    pub const fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && (self.rows[row] >> col) & 1 != 0
    }

    /// Occupied `(row, col)` offsets relative to the top-left anchor.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |r| {
            (0..self.width())
                .filter(move |&c| self.is_occupied(r, c))
                .map(move |c| (r, c))
        })
    }

    /// Occupancy mask of the shape anchored at `(0, 0)`.
    #[must_use]
    pub(crate) const fn board_mask(&self) -> u64 {
        self.board_mask
    }

    /// Occupancy mask of the shape anchored at `(row, col)`, or `None` if any
    /// occupied offset would fall outside the board.
    #[must_use]
    pub(crate) const fn board_mask_at(&self, row: usize, col: usize) -> Option<u64> {
        if row >= GRID_SIZE
            || col >= GRID_SIZE
            || row + self.height() > GRID_SIZE
            || col + self.width() > GRID_SIZE
        {
            return None;
        }
        Some(self.board_mask << (row * GRID_SIZE + col))
    }
}

/// Index of a shape in [`ALL_SHAPES`].
///
/// Serialized as the shape name (e.g. `"l_corner_3x3_a"`), so recorded
/// sessions stay readable and independent of catalog ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(u8);

impl ShapeId {
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        assert!(index < ALL_SHAPES.len());
        Self(index as u8)
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_SHAPES
            .iter()
            .position(|s| s.name() == name)
            .map(Self::new)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn shape(self) -> &'static Shape {
        &ALL_SHAPES[self.index()]
    }

    /// Returns `true` for shapes that are only dealt by anti-deadlock re-rolls.
    #[must_use]
    pub const fn is_special(self) -> bool {
        self.index() >= ORDINARY_SHAPES.len()
    }

    /// Ids of the ordinary catalog.
    pub fn ordinary() -> impl Iterator<Item = Self> {
        (0..ORDINARY_SHAPES.len()).map(Self::new)
    }

    /// Ids of both catalogs, ordinary first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ALL_SHAPES.len()).map(Self::new)
    }
}

impl Serialize for ShapeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.shape().name())
    }
}

impl<'de> Deserialize<'de> for ShapeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown shape: {name}")))
    }
}

const fn s(name: &'static str, art: &[&str]) -> Shape {
    Shape::from_ascii(name, art)
}

/// Shapes dealt on every regular refill.
pub const ORDINARY_SHAPES: [Shape; 36] = [
    // straight lines
    s("line3_h", &["###"]),
    s("line4_h", &["####"]),
    s("line5_h", &["#####"]),
    s("line3_v", &["#", "#", "#"]),
    s("line4_v", &["#", "#", "#", "#"]),
    s("line5_v", &["#", "#", "#", "#", "#"]),
    // rectangles
    s("square2", &["##", "##"]),
    s("square3", &["###", "###", "###"]),
    s("rect3x2", &["##", "##", "##"]),
    s("rect2x3", &["###", "###"]),
    // small L shapes, lying
    s("l_h_a", &["#..", "###"]),
    s("l_h_b", &["..#", "###"]),
    s("l_h_c", &["###", "..#"]),
    s("l_h_d", &["###", "#.."]),
    // small L shapes, standing
    s("l_v_a", &["#.", "#.", "##"]),
    s("l_v_b", &[".#", ".#", "##"]),
    s("l_v_c", &["##", ".#", ".#"]),
    s("l_v_d", &["##", "#.", "#."]),
    // large corners
    s("l_corner_3x3_a", &["#..", "#..", "###"]),
    s("l_corner_3x3_b", &["..#", "..#", "###"]),
    s("l_corner_3x3_c", &["###", "..#", "..#"]),
    s("l_corner_3x3_d", &["###", "#..", "#.."]),
    // 3-cell corners
    s("corner2_a", &["##", "#."]),
    s("corner2_b", &["##", ".#"]),
    s("corner2_c", &["#.", "##"]),
    s("corner2_d", &[".#", "##"]),
    // T shapes
    s("t_a", &[".#", "##", ".#"]),
    s("t_b", &["#.", "##", "#."]),
    s("t_c", &[".#.", "###"]),
    s("t_d", &["###", ".#."]),
    // S/Z shapes
    s("z_h_a", &["##.", ".##"]),
    s("z_h_b", &[".##", "##."]),
    s("z_v_a", &[".#", "##", "#."]),
    s("z_v_b", &["#.", "##", ".#"]),
    // diagonals
    s("diag3_a", &["#..", ".#.", "..#"]),
    s("diag3_b", &["..#", ".#.", "#.."]),
];

/// Shapes added to the draw pool only when a refill would otherwise deadlock.
pub const SPECIAL_SHAPES: [Shape; 8] = [
    s("line2_v", &["#", "#"]),
    s("line2_h", &["##"]),
    s("u_a", &["#.#", "###"]),
    s("u_b", &["###", "#.#"]),
    s("u_c", &["##", "#.", "##"]),
    s("u_d", &["##", ".#", "##"]),
    s("diag2_a", &["#.", ".#"]),
    s("diag2_b", &[".#", "#."]),
];

/// Ordinary shapes followed by special shapes; indexed by [`ShapeId`].
pub const ALL_SHAPES: [Shape; ORDINARY_SHAPES.len() + SPECIAL_SHAPES.len()] = {
    let mut all = [ORDINARY_SHAPES[0]; ORDINARY_SHAPES.len() + SPECIAL_SHAPES.len()];
    let mut i = 0;
    while i < ORDINARY_SHAPES.len() {
        all[i] = ORDINARY_SHAPES[i];
        i += 1;
    }
    let mut j = 0;
    while j < SPECIAL_SHAPES.len() {
        all[i + j] = SPECIAL_SHAPES[j];
        j += 1;
    }
    all
};
