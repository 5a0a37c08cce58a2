//! Feature sources: the heuristic terms measured on a board snapshot.
//!
//! Each source extracts a raw integer measurement from a [`BoardAnalysis`]
//! and maps it to the value that gets multiplied by the feature weight.

use std::fmt;

use blockblast_engine::{GRID_CELLS, ORDINARY_SHAPES};

use crate::{board_analysis::BoardAnalysis, board_feature::BoardFeatureValue};

/// Penalty, in combo units, for a board whose combo has decayed.
pub const COMBO_LOSS_PENALTY: f32 = 2.0;

#[expect(clippy::cast_precision_loss)]
const CELLS: f32 = GRID_CELLS as f32;

#[must_use]
pub fn all_board_feature_sources() -> Vec<BoxedBoardFeatureSource> {
    vec![
        Box::new(Combo),
        Box::new(ClearPotential),
        Box::new(Density),
        Box::new(EdgeUtilization),
        Box::new(FutureViability),
        Box::new(CompleteClear),
        Box::new(Clumping),
    ]
}

pub trait BoardFeatureSource: fmt::Debug + Send + Sync {
    #[must_use]
    fn id(&self) -> &str;
    #[must_use]
    fn name(&self) -> &str;
    #[must_use]
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
    #[must_use]
    fn clone_boxed(&self) -> BoxedBoardFeatureSource;
    #[must_use]
    fn extract_raw(&self, analysis: &BoardAnalysis) -> u32;
    /// Maps the raw measurement to the value scaled by the feature weight.
    #[must_use]
    fn normalize(&self, analysis: &BoardAnalysis, raw: u32) -> f32;

    #[must_use]
    fn compute_feature_value(&self, analysis: &BoardAnalysis) -> BoardFeatureValue {
        let raw = self.extract_raw(analysis);
        BoardFeatureValue {
            raw,
            normalized: self.normalize(analysis, raw),
        }
    }
}

pub type BoxedBoardFeatureSource = Box<dyn BoardFeatureSource>;

impl Clone for BoxedBoardFeatureSource {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl BoardFeatureSource for BoxedBoardFeatureSource {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn clone_boxed(&self) -> BoxedBoardFeatureSource {
        self.as_ref().clone_boxed()
    }

    fn extract_raw(&self, analysis: &BoardAnalysis) -> u32 {
        self.as_ref().extract_raw(analysis)
    }

    fn normalize(&self, analysis: &BoardAnalysis, raw: u32) -> f32 {
        self.as_ref().normalize(analysis, raw)
    }
}

#[expect(clippy::cast_precision_loss)]
fn ratio(raw: u32, max: f32) -> f32 {
    raw as f32 / max
}

/// Current combo, or a fixed penalty once it has decayed.
///
/// # Raw measurement
///
/// - `raw = combo`
/// - value is `raw` while fewer than 3 placements passed since the last clear,
///   `-COMBO_LOSS_PENALTY` otherwise
#[derive(Debug, Clone)]
pub struct Combo;

impl BoardFeatureSource for Combo {
    fn id(&self) -> &'static str {
        "combo"
    }
    fn name(&self) -> &'static str {
        "Combo"
    }
    fn clone_boxed(&self) -> BoxedBoardFeatureSource {
        Box::new(self.clone())
    }
    fn extract_raw(&self, analysis: &BoardAnalysis) -> u32 {
        analysis.combo()
    }
    #[expect(clippy::cast_precision_loss)]
    fn normalize(&self, analysis: &BoardAnalysis, raw: u32) -> f32 {
        if analysis.is_combo_alive() {
            raw as f32
        } else {
            -COMBO_LOSS_PENALTY
        }
    }
}

/// Cells in near-complete lines.
///
/// # Raw measurement
///
/// - For every row and column with at least 5 filled cells, add its filled
///   cell count
/// - value is `raw / 64`
#[derive(Debug, Clone)]
pub struct ClearPotential;

impl BoardFeatureSource for ClearPotential {
    fn id(&self) -> &'static str {
        "clear_potential"
    }
    fn name(&self) -> &'static str {
        "Clear Potential"
    }
    fn clone_boxed(&self) -> BoxedBoardFeatureSource {
        Box::new(self.clone())
    }
    fn extract_raw(&self, analysis: &BoardAnalysis) -> u32 {
        analysis.near_complete_line_cells()
    }
    fn normalize(&self, _analysis: &BoardAnalysis, raw: u32) -> f32 {
        ratio(raw, CELLS)
    }
}

/// Fraction of filled cells. Meant to be weighted negatively.
#[derive(Debug, Clone)]
pub struct Density;

impl BoardFeatureSource for Density {
    fn id(&self) -> &'static str {
        "density"
    }
    fn name(&self) -> &'static str {
        "Density"
    }
    fn clone_boxed(&self) -> BoxedBoardFeatureSource {
        Box::new(self.clone())
    }
    fn extract_raw(&self, analysis: &BoardAnalysis) -> u32 {
        analysis.filled_cells()
    }
    fn normalize(&self, _analysis: &BoardAnalysis, raw: u32) -> f32 {
        ratio(raw, CELLS)
    }
}

/// Use of the board border.
///
/// # Raw measurement
///
/// - 2 points per filled cell on each of the four border lines, so a filled
///   corner scores 4
/// - value is `raw / (4 * 8 * 2)`
#[derive(Debug, Clone)]
pub struct EdgeUtilization;

impl EdgeUtilization {
    const POINTS_PER_CELL: u32 = 2;
    const MAX_POINTS: f32 = 64.0;
}

impl BoardFeatureSource for EdgeUtilization {
    fn id(&self) -> &'static str {
        "edge_utilization"
    }
    fn name(&self) -> &'static str {
        "Edge Utilization"
    }
    fn clone_boxed(&self) -> BoxedBoardFeatureSource {
        Box::new(self.clone())
    }
    fn extract_raw(&self, analysis: &BoardAnalysis) -> u32 {
        analysis.border_line_cells() * Self::POINTS_PER_CELL
    }
    fn normalize(&self, _analysis: &BoardAnalysis, raw: u32) -> f32 {
        ratio(raw, Self::MAX_POINTS)
    }
}

/// Room left for future pieces.
///
/// # Raw measurement
///
/// - Number of valid anchors summed over every ordinary catalog shape
/// - value is `raw / (36 * 64)`
#[derive(Debug, Clone)]
pub struct FutureViability;

impl BoardFeatureSource for FutureViability {
    fn id(&self) -> &'static str {
        "future_viability"
    }
    fn name(&self) -> &'static str {
        "Future Viability"
    }
    fn clone_boxed(&self) -> BoxedBoardFeatureSource {
        Box::new(self.clone())
    }
    fn extract_raw(&self, analysis: &BoardAnalysis) -> u32 {
        analysis.total_valid_placements()
    }
    #[expect(clippy::cast_precision_loss)]
    fn normalize(&self, _analysis: &BoardAnalysis, raw: u32) -> f32 {
        ratio(raw, ORDINARY_SHAPES.len() as f32 * CELLS)
    }
}

/// `1` when the grid is entirely empty, `0` otherwise.
#[derive(Debug, Clone)]
pub struct CompleteClear;

impl BoardFeatureSource for CompleteClear {
    fn id(&self) -> &'static str {
        "complete_clear"
    }
    fn name(&self) -> &'static str {
        "Complete Clear"
    }
    fn clone_boxed(&self) -> BoxedBoardFeatureSource {
        Box::new(self.clone())
    }
    fn extract_raw(&self, analysis: &BoardAnalysis) -> u32 {
        analysis.is_all_clear().into()
    }
    #[expect(clippy::cast_precision_loss)]
    fn normalize(&self, _analysis: &BoardAnalysis, raw: u32) -> f32 {
        raw as f32
    }
}

/// Largest solid rectangle of filled cells.
///
/// # Raw measurement
///
/// - Area of the largest all-filled axis-aligned rectangle; an area of 1 (a
///   lone cell) counts as 0
/// - value is `raw / 64`
#[derive(Debug, Clone)]
pub struct Clumping;

impl BoardFeatureSource for Clumping {
    fn id(&self) -> &'static str {
        "clumping"
    }
    fn name(&self) -> &'static str {
        "Clumping"
    }
    fn clone_boxed(&self) -> BoxedBoardFeatureSource {
        Box::new(self.clone())
    }
    fn extract_raw(&self, analysis: &BoardAnalysis) -> u32 {
        match analysis.largest_filled_rectangle() {
            0 | 1 => 0,
            area => area,
        }
    }
    fn normalize(&self, _analysis: &BoardAnalysis, raw: u32) -> f32 {
        ratio(raw, CELLS)
    }
}
