//! Board evaluation features.
//!
//! Each feature measures one property of the board left by a placement. The
//! evaluator multiplies every feature value by its weight and sums the
//! results.
//!
//! # Features
//!
//! **Score features** - Reward states that lead to points:
//! - [`source::Combo`] - Current combo, penalized once it has decayed
//! - [`source::ClearPotential`] - Cells in rows/columns with 5+ filled cells
//! - [`source::CompleteClear`] - Entirely empty grid
//!
//! **Structure features** - Keep the board placeable:
//! - [`source::Density`] - Fraction of filled cells (weighted negatively)
//! - [`source::EdgeUtilization`] - Filled cells along the border
//! - [`source::FutureViability`] - Valid anchors over the ordinary catalog
//! - [`source::Clumping`] - Largest solid rectangle of filled cells
//!
//! # Processing
//!
//! 1. **Extract Raw** - [`BoardFeatureSource::extract_raw()`] measures an integer quantity
//! 2. **Normalize** - [`BoardFeatureSource::normalize()`] scales it, mostly to \[0.0, 1.0\]
//!
//! The combo and complete-clear features are left unscaled.

pub use self::source::{BoardFeatureSource, BoxedBoardFeatureSource, all_board_feature_sources};

pub mod source;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardFeatureValue {
    pub raw: u32,
    pub normalized: f32,
}
