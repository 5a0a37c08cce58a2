use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::shape::{Shape, ShapeId};

/// Color of a placed block.
///
/// Colors are cosmetic: any non-empty cell counts as filled regardless of color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockColor {
    #[display("red")]
    Red = 0,
    #[display("blue")]
    Blue = 1,
    #[display("green")]
    Green = 2,
    #[display("yellow")]
    Yellow = 3,
}

impl Distribution<BlockColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockColor {
        match rng.random_range(0..BlockColor::LEN) {
            0 => BlockColor::Red,
            1 => BlockColor::Blue,
            2 => BlockColor::Green,
            _ => BlockColor::Yellow,
        }
    }
}

impl BlockColor {
    /// Number of colors (4).
    pub const LEN: usize = 4;

    /// Single-character representation used by ASCII grid output.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            BlockColor::Red => 'R',
            BlockColor::Blue => 'B',
            BlockColor::Green => 'G',
            BlockColor::Yellow => 'Y',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'R' => Some(BlockColor::Red),
            'B' => Some(BlockColor::Blue),
            'G' => Some(BlockColor::Green),
            'Y' => Some(BlockColor::Yellow),
            _ => None,
        }
    }
}

/// A pending piece: a catalog shape dealt with a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Piece {
    shape: ShapeId,
    color: BlockColor,
}

impl Piece {
    #[must_use]
    pub const fn new(shape: ShapeId, color: BlockColor) -> Self {
        Self { shape, color }
    }

    #[must_use]
    pub const fn shape_id(&self) -> ShapeId {
        self.shape
    }

    #[must_use]
    pub const fn shape(&self) -> &'static Shape {
        self.shape.shape()
    }

    #[must_use]
    pub const fn color(&self) -> BlockColor {
        self.color
    }

    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.shape().cell_count()
    }
}
