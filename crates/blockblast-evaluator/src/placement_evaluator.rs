//! Placement evaluation: scoring a single simulated placement.
//!
//! A placement is worth the points it scores immediately plus an estimate of
//! how good the board it leaves behind is:
//!
//! ```text
//! score = immediate + w₁·f₁ + w₂·f₂ + ... + w₇·f₇
//! ```
//!
//! Where `immediate` is the placement's score delta (cells, clear bonus and
//! complete-clear bonus), `fᵢ` are the feature values of the resulting board
//! and `wᵢ` the [`HeuristicWeights`].
//!
//! # Usage
//!
//! ```
//! use blockblast_engine::Grid;
//! use blockblast_evaluator::{
//!     placement_evaluator::{HeuristicEvaluator, PlacementEvaluator as _},
//!     weights::HeuristicWeights,
//! };
//!
//! let evaluator = HeuristicEvaluator::new(&HeuristicWeights::default());
//!
//! // An empty board earns the complete-clear bonus.
//! assert!(evaluator.evaluate(&Grid::EMPTY, 0, 0) > 5000.0);
//! ```

use std::{fmt, iter};

use blockblast_engine::Grid;

use crate::{
    board_analysis::BoardAnalysis,
    board_feature::{BoardFeatureSource, BoxedBoardFeatureSource},
    placement_analysis::PlacementAnalysis,
    weights::HeuristicWeights,
};

/// Scores simulated placements (higher is better).
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Scores a board snapshot.
    fn evaluate_board(&self, analysis: &BoardAnalysis) -> f32;

    /// Scores a placement: its immediate points plus the value of the board
    /// it leaves.
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f32 {
        analysis.score_delta() as f32 + self.evaluate_board(analysis.board_analysis())
    }
}

/// Weighted sum of the board features.
#[derive(Debug, Clone)]
pub struct HeuristicEvaluator {
    features: Vec<BoxedBoardFeatureSource>,
    weights: Vec<f32>,
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new(&HeuristicWeights::DEFAULT)
    }
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new(weights: &HeuristicWeights) -> Self {
        let (features, weights) = weights.weighted_features().into_iter().unzip();
        Self { features, weights }
    }

    /// Scores `grid` reached with the given combo counters.
    #[must_use]
    pub fn evaluate(&self, grid: &Grid, combo: u32, since_clear: u32) -> f32 {
        self.evaluate_board(&BoardAnalysis::new(grid, combo, since_clear))
    }

    /// Weighted contribution of every feature, in evaluation order.
    pub fn breakdown<'a>(
        &'a self,
        analysis: &'a BoardAnalysis,
    ) -> impl Iterator<Item = (&'a str, f32)> + 'a {
        iter::zip(&self.features, &self.weights)
            .map(|(f, w)| (f.name(), f.compute_feature_value(analysis).normalized * w))
    }
}

impl PlacementEvaluator for HeuristicEvaluator {
    #[inline]
    fn evaluate_board(&self, analysis: &BoardAnalysis) -> f32 {
        iter::zip(&self.features, &self.weights)
            .map(|(f, w)| f.compute_feature_value(analysis).normalized * w)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use blockblast_engine::{BlockColor, GameField, Move, PendingPieces, Piece, ScoreState, ShapeId};

    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-4 * f32::max(1.0, a.abs())
    }

    fn only(weights: impl FnOnce(&mut HeuristicWeights)) -> HeuristicEvaluator {
        let mut w = HeuristicWeights {
            combo: 0.0,
            clear_potential: 0.0,
            density: 0.0,
            edge_utilization: 0.0,
            future_viability: 0.0,
            complete_clear: 0.0,
            clumping: 0.0,
        };
        weights(&mut w);
        HeuristicEvaluator::new(&w)
    }

    #[test]
    fn test_combo_term() {
        let evaluator = only(|w| w.combo = 5.0);
        assert!(approx_eq(evaluator.evaluate(&Grid::EMPTY, 3, 2), 15.0));
        assert!(approx_eq(evaluator.evaluate(&Grid::EMPTY, 0, 3), -10.0));
    }

    #[test]
    fn test_density_term() {
        let evaluator = only(|w| w.density = -5.0);
        let grid = Grid::from_ascii("########\n########");
        assert!(approx_eq(evaluator.evaluate(&grid, 0, 0), -5.0 * 16.0 / 64.0));
    }

    #[test]
    fn test_complete_clear_term() {
        let evaluator = only(|w| w.complete_clear = 5000.0);
        assert!(approx_eq(evaluator.evaluate(&Grid::EMPTY, 0, 0), 5000.0));
        assert!(approx_eq(evaluator.evaluate(&Grid::from_ascii("#......."), 0, 0), 0.0));
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_default_weights_empty_board() {
        let evaluator = HeuristicEvaluator::default();
        let analysis = BoardAnalysis::new(&Grid::EMPTY, 0, 0);
        let viability = 10.0 * analysis.total_valid_placements() as f32 / (36.0 * 64.0);
        assert!(approx_eq(evaluator.evaluate_board(&analysis), 5000.0 + viability));
    }

    #[test]
    fn test_default_clumping_contribution_is_unscaled() {
        let evaluator = HeuristicEvaluator::default();
        let analysis = BoardAnalysis::new(&Grid::from_ascii(&"########\n".repeat(3)), 0, 0);
        let clumping = evaluator
            .breakdown(&analysis)
            .find_map(|(name, value)| (name == "Clumping").then_some(value))
            .unwrap();
        assert!(approx_eq(clumping, 24.0 / 64.0));
    }

    #[test]
    fn test_breakdown_sums_to_evaluation() {
        let evaluator = HeuristicEvaluator::default();
        let analysis = BoardAnalysis::new(
            &Grid::from_ascii(
                "
                #####...
                ###.....
                ##......
                ",
            ),
            2,
            1,
        );
        let total: f32 = evaluator.breakdown(&analysis).map(|(_, v)| v).sum();
        assert!(approx_eq(total, evaluator.evaluate_board(&analysis)));
        assert_eq!(evaluator.breakdown(&analysis).count(), 7);
    }

    #[test]
    fn test_placement_includes_immediate_score() {
        let piece = Piece::new(ShapeId::from_name("line3_h").unwrap(), BlockColor::Red);
        let field = GameField::new(
            Grid::EMPTY,
            PendingPieces::new([piece; 3]),
            ScoreState::INITIAL,
        );
        let analysis = PlacementAnalysis::from_field(&field, Move::new(0, 4, 2)).unwrap();
        let evaluator = HeuristicEvaluator::default();
        assert!(approx_eq(
            evaluator.evaluate_placement(&analysis),
            3.0 + evaluator.evaluate_board(analysis.board_analysis())
        ));
    }
}
