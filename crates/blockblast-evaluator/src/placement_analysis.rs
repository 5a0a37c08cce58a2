//! Analysis of the state after a simulated placement.
//!
//! [`PlacementAnalysis`] places a pending piece on a copy of a [`GameField`]
//! and keeps everything the search needs from the result:
//!
//! 1. **Outcome** - Lines cleared and the immediate score delta
//! 2. **Field** - The resulting field, to continue simulating from
//! 3. **Board state** - Lazy metrics of the resulting board via [`BoardAnalysis`]
//!
//! The field passed in is never modified.

use blockblast_engine::{GameField, Move, PlacementOutcome};

use crate::board_analysis::BoardAnalysis;

#[derive(Debug, Clone)]
pub struct PlacementAnalysis {
    mv: Move,
    outcome: PlacementOutcome,
    field: GameField,
    board_analysis: BoardAnalysis,
}

impl PlacementAnalysis {
    /// Simulates `mv` on a copy of `before_placement`.
    ///
    /// Returns `None` if the move is not valid on that field.
    #[must_use]
    pub fn from_field(before_placement: &GameField, mv: Move) -> Option<Self> {
        let mut field = before_placement.clone();
        let outcome = field.apply_move(mv).ok()?;
        let board_analysis = BoardAnalysis::from_state(field.grid(), field.score());
        Some(Self {
            mv,
            outcome,
            field,
            board_analysis,
        })
    }

    #[must_use]
    pub fn placement(&self) -> Move {
        self.mv
    }

    #[must_use]
    pub fn outcome(&self) -> &PlacementOutcome {
        &self.outcome
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.outcome.cleared.count()
    }

    /// Points scored by the placement itself: cells, clear bonus and
    /// complete-clear bonus.
    #[must_use]
    pub fn score_delta(&self) -> u64 {
        self.outcome.score_delta
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn into_field(self) -> GameField {
        self.field
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }
}

#[cfg(test)]
mod tests {
    use blockblast_engine::{BlockColor, Grid, PendingPieces, Piece, ScoreState, ShapeId};

    use super::*;

    fn field() -> GameField {
        let piece = |name| Piece::new(ShapeId::from_name(name).unwrap(), BlockColor::Yellow);
        GameField::new(
            Grid::from_ascii("######.."),
            PendingPieces::new([piece("line2_h"), piece("square2"), piece("line3_h")]),
            ScoreState::new(50, 1, 0),
        )
    }

    #[test]
    fn test_simulation_does_not_touch_input() {
        let before = field();
        let analysis = PlacementAnalysis::from_field(&before, Move::new(0, 0, 6)).unwrap();
        assert_eq!(before, field());
        assert_eq!(analysis.cleared_lines(), 1);
        // combo 2, one line, grid left empty
        assert_eq!(analysis.score_delta(), 2 + 2 * 10 + 300);
        assert!(analysis.board_analysis().is_all_clear());
        assert_eq!(analysis.board_analysis().combo(), 2);
        assert!(analysis.field().pending().is_placed(0));
    }

    #[test]
    fn test_invalid_move() {
        assert!(PlacementAnalysis::from_field(&field(), Move::new(1, 0, 5)).is_none());
        assert!(PlacementAnalysis::from_field(&field(), Move::new(4, 0, 0)).is_none());
    }
}
