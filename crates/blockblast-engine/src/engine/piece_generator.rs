use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{ALL_SHAPES, Grid, ORDINARY_SHAPES, Piece, ShapeId};

use super::pending_pieces::PENDING_SLOTS;

/// Seed for deterministic piece dealing.
///
/// A 128-bit seed for the [`Pcg32`] generator used by [`PieceGenerator`].
/// The same seed always deals the same pieces for the same sequence of
/// boards, which makes sessions reproducible for debugging and testing.
///
/// The text form (used by [`Display`](fmt::Display), [`FromStr`] and serde) is
/// exactly 32 hex digits, big-endian.
///
/// # Example
///
/// ```
/// use blockblast_engine::PieceSeed;
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    input: String,
}

impl PieceSeed {
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    #[must_use]
    pub const fn as_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.as_u128())
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }
        u128::from_str_radix(s, 16)
            .map(Self::from_u128)
            .map_err(|_| error())
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Deals pending pieces from the shape catalogs.
///
/// # Dealing rules
///
/// - A regular deal draws three shapes uniformly from [`ORDINARY_SHAPES`],
///   each with a uniformly random color.
/// - When none of the dealt pieces fits on the current grid, the deal is
///   re-rolled from the combined ordinary and special catalogs until at least
///   one piece fits. Special shapes are small, so this keeps the game going
///   whenever the board has room for anything at all.
///
/// The randomness source is a type parameter so tests and replays can inject
/// any [`Rng`]; the default is a [`Pcg32`] seeded from a [`PieceSeed`].
#[derive(Debug, Clone)]
pub struct PieceGenerator<R = Pcg32> {
    rng: R,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic dealing, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_rng(Pcg32::from_seed(seed.0))
    }
}

impl<R> PieceGenerator<R>
where
    R: Rng,
{
    #[must_use]
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    fn draw_from(&mut self, catalog_len: usize) -> Piece {
        let shape = ShapeId::new(self.rng.random_range(0..catalog_len));
        Piece::new(shape, self.rng.random())
    }

    /// Draws one piece from the ordinary catalog.
    pub fn draw_ordinary(&mut self) -> Piece {
        self.draw_from(ORDINARY_SHAPES.len())
    }

    /// Draws one piece from the combined ordinary and special catalogs.
    pub fn draw_any(&mut self) -> Piece {
        self.draw_from(ALL_SHAPES.len())
    }

    /// Deals three ordinary pieces, ignoring the board.
    pub fn deal(&mut self) -> [Piece; PENDING_SLOTS] {
        std::array::from_fn(|_| self.draw_ordinary())
    }

    /// Deals three pieces such that at least one fits on `grid`.
    ///
    /// Starts with a regular deal and re-rolls from both catalogs while no
    /// dealt piece has a valid position. If no catalog shape fits anywhere,
    /// the regular deal is returned as is and the caller observes game over.
    pub fn deal_for(&mut self, grid: &Grid) -> [Piece; PENDING_SLOTS] {
        let fits = |pieces: &[Piece]| pieces.iter().any(|p| grid.has_valid_position(p.shape()));

        let mut pieces = self.deal();
        if fits(&pieces) || !ALL_SHAPES.iter().any(|s| grid.has_valid_position(s)) {
            return pieces;
        }
        while !fits(&pieces) {
            pieces = std::array::from_fn(|_| self.draw_any());
        }
        pieces
    }
}
