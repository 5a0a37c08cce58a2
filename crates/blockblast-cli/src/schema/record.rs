use blockblast_engine::{GameStats, Move, PieceSeed, PlacementOutcome, ShapeId};
use blockblast_evaluator::weights::HeuristicWeights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one automatically played session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Timestamp when the session finished (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Random seed used for piece dealing
    pub seed: PieceSeed,
    /// Heuristic weights the player used
    pub weights: HeuristicWeights,
    /// Score at the end of the session
    pub final_score: u64,
    /// Whether the session ended by game over (rather than the move limit)
    pub game_over: bool,
    /// Final game statistics
    pub final_stats: GameStats,
    /// Every placement in order, when move recording is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<Vec<MoveRecord>>,
}

/// A single placement of a recorded session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Move number (0-indexed)
    pub turn: usize,
    /// Shape of the placed piece
    pub shape: ShapeId,
    /// Pending slot and anchor of the placement
    pub placement: Move,
    /// Rows plus columns cleared by the placement
    pub cleared_lines: usize,
    /// Points scored by the placement
    pub score_delta: u64,
}

impl MoveRecord {
    pub fn new(turn: usize, outcome: &PlacementOutcome) -> Self {
        Self {
            turn,
            shape: outcome.piece.shape_id(),
            placement: outcome.placement,
            cleared_lines: outcome.cleared.count(),
            score_delta: outcome.score_delta,
        }
    }
}
