//! Heuristic weights.
//!
//! Weights are plain serde data so they can be tuned without recompiling:
//! `blockblast weights` prints the defaults, and `--weights <file>` loads an
//! edited copy.

use serde::{Deserialize, Serialize};

use crate::board_feature::{BoxedBoardFeatureSource, source};

/// Weight of every heuristic term.
///
/// Clumping defaults to `1.0`: the largest solid rectangle enters the score
/// at its normalized value.
///
/// Missing fields take their default value; unknown fields are rejected so a
/// misspelled weight does not go unnoticed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeuristicWeights {
    pub combo: f32,
    pub clear_potential: f32,
    pub density: f32,
    pub edge_utilization: f32,
    pub future_viability: f32,
    pub complete_clear: f32,
    pub clumping: f32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl HeuristicWeights {
    pub const DEFAULT: Self = Self {
        combo: 5.0,
        clear_potential: 30.0,
        density: -5.0,
        edge_utilization: 10.0,
        future_viability: 10.0,
        complete_clear: 5000.0,
        clumping: 1.0,
    };

    /// Pairs every feature source with its weight.
    #[must_use]
    pub fn weighted_features(&self) -> Vec<(BoxedBoardFeatureSource, f32)> {
        vec![
            (Box::new(source::Combo), self.combo),
            (Box::new(source::ClearPotential), self.clear_potential),
            (Box::new(source::Density), self.density),
            (Box::new(source::EdgeUtilization), self.edge_utilization),
            (Box::new(source::FutureViability), self.future_viability),
            (Box::new(source::CompleteClear), self.complete_clear),
            (Box::new(source::Clumping), self.clumping),
        ]
    }
}

#[cfg(test)]
mod tests {
    use crate::board_feature::{BoardFeatureSource as _, all_board_feature_sources};

    use super::*;

    #[test]
    fn test_weighted_features_cover_every_source() {
        let weighted: Vec<String> = HeuristicWeights::DEFAULT
            .weighted_features()
            .iter()
            .map(|(f, _)| f.id().to_owned())
            .collect();
        let all: Vec<String> = all_board_feature_sources()
            .iter()
            .map(|f| f.id().to_owned())
            .collect();
        assert_eq!(weighted, all);
    }

    #[test]
    fn test_field_names_match_feature_ids() {
        let json = serde_json::to_value(HeuristicWeights::DEFAULT).unwrap();
        let object = json.as_object().unwrap();
        for (feature, weight) in HeuristicWeights::DEFAULT.weighted_features() {
            let value = object[feature.id()].as_f64().unwrap();
            assert!((value - f64::from(weight)).abs() < 1e-6, "{}", feature.id());
        }
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let weights: HeuristicWeights = serde_json::from_str(r#"{"density": -8.0}"#).unwrap();
        assert!((weights.density + 8.0).abs() < f32::EPSILON);
        assert!((weights.combo - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<HeuristicWeights, _> = serde_json::from_str(r#"{"densty": -8.0}"#);
        assert!(result.is_err());
    }
}
