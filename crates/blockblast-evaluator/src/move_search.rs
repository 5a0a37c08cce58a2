//! Move-sequence search: choosing placements for all pending pieces.
//!
//! Earlier placements change the board for later ones, so the order in which
//! the pending pieces are placed matters. The search handles this in two
//! nested steps:
//!
//! 1. **Enumerate Orderings** - Every permutation of the unplaced slots
//! 2. **Greedy Per Ordering** - Place each piece of the ordering at the anchor
//!    with the highest placement score, then continue from the resulting field
//!
//! The ordering with the best total wins and its moves become the [`MovePlan`].
//!
//! # Infeasible Orderings
//!
//! When a piece has no valid anchor at its turn, it is skipped and the
//! ordering is marked with one more skipped piece. Orderings are compared by
//! skipped pieces first and total score second, so an ordering that places
//! every piece is always preferred, and a plan is still produced for the
//! pieces that do fit.
//!
//! # Design: Per-Ordering Greedy
//!
//! Within an ordering each piece is placed optimally given the pieces before
//! it, but positions are never revisited. With at most 3 pieces this costs at
//! most `6 × 3 × 64` placement evaluations per plan.
//!
//! # Usage
//!
//! ```
//! use blockblast_engine::{GameSession, PieceSeed};
//! use blockblast_evaluator::{move_search::MoveSearch, placement_evaluator::HeuristicEvaluator};
//!
//! let mut session = GameSession::with_seed(PieceSeed::from_u128(1));
//! let search = MoveSearch::new(Box::new(HeuristicEvaluator::default()));
//!
//! let plan = search.compute_best_move_plan(session.field());
//! assert_eq!(plan.len(), 3);
//! for mv in plan {
//!     session.apply_move(mv).unwrap();
//! }
//! ```

use std::cmp::Ordering;

use arrayvec::ArrayVec;
use blockblast_engine::{GRID_SIZE, GameField, Move, MovePlan, PENDING_SLOTS};

use crate::{placement_analysis::PlacementAnalysis, placement_evaluator::PlacementEvaluator};

type SlotOrder = ArrayVec<usize, PENDING_SLOTS>;

/// Result of simulating one ordering of the pending pieces.
#[derive(Debug, Clone)]
pub struct SequenceEvaluation {
    plan: MovePlan,
    total_score: f32,
    skipped: usize,
}

impl SequenceEvaluation {
    #[must_use]
    pub fn plan(&self) -> &MovePlan {
        &self.plan
    }

    #[must_use]
    pub fn into_plan(self) -> MovePlan {
        self.plan
    }

    /// Sum of the placement scores of the placed pieces.
    #[must_use]
    pub fn total_score(&self) -> f32 {
        self.total_score
    }

    /// Pieces of the ordering that had no valid anchor.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.skipped == 0
    }

    fn is_better_than(&self, other: &Self) -> bool {
        match self.skipped.cmp(&other.skipped) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.total_score > other.total_score,
        }
    }
}

/// Searches move plans with a placement evaluator.
#[derive(Debug)]
pub struct MoveSearch<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl<'a> MoveSearch<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    #[must_use]
    pub fn placement_evaluator(&self) -> &dyn PlacementEvaluator {
        self.placement_evaluator.as_ref()
    }

    /// Finds the best anchor for the piece of `slot`.
    ///
    /// Anchors are scanned in row-major order and the first one with the
    /// highest score wins. Returns `None` if the piece fits nowhere (or the
    /// slot is not pending).
    #[must_use]
    pub fn select_best_placement(
        &self,
        field: &GameField,
        slot: usize,
    ) -> Option<(PlacementAnalysis, f32)> {
        let mut best: Option<(PlacementAnalysis, f32)> = None;
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let Some(analysis) = PlacementAnalysis::from_field(field, Move::new(slot, row, col))
                else {
                    continue;
                };
                let score = self.placement_evaluator.evaluate_placement(&analysis);
                if best.as_ref().is_none_or(|(_, best_score)| score > *best_score) {
                    best = Some((analysis, score));
                }
            }
        }
        best
    }

    /// Greedily places the pieces of `order` one after another.
    #[must_use]
    pub fn evaluate_sequence(&self, field: &GameField, order: &[usize]) -> SequenceEvaluation {
        let mut current = field.clone();
        let mut plan = MovePlan::new();
        let mut total_score = 0.0;
        let mut skipped = 0;

        for &slot in order {
            let Some((analysis, score)) = self.select_best_placement(&current, slot) else {
                skipped += 1;
                continue;
            };
            plan.push(analysis.placement());
            total_score += score;
            current = analysis.into_field();
        }

        SequenceEvaluation {
            plan,
            total_score,
            skipped,
        }
    }

    /// Evaluates every ordering of the unplaced pieces and returns the best.
    ///
    /// Returns `None` only when no piece is pending.
    #[must_use]
    pub fn select_best_sequence(&self, field: &GameField) -> Option<SequenceEvaluation> {
        let slots: SlotOrder = field.pending().unplaced().map(|(slot, _)| slot).collect();
        let mut best: Option<SequenceEvaluation> = None;
        for order in permutations(&slots) {
            let evaluation = self.evaluate_sequence(field, &order);
            if best.as_ref().is_none_or(|b| evaluation.is_better_than(b)) {
                best = Some(evaluation);
            }
        }
        best
    }

    /// Computes the plan for the unplaced pieces of `field`.
    ///
    /// The plan is empty if nothing can be placed.
    #[must_use]
    pub fn compute_best_move_plan(&self, field: &GameField) -> MovePlan {
        self.select_best_sequence(field)
            .map(SequenceEvaluation::into_plan)
            .unwrap_or_default()
    }
}

/// All orderings of `items`, in lexicographic order of positions.
fn permutations(items: &[usize]) -> Vec<SlotOrder> {
    fn extend(prefix: &mut SlotOrder, rest: &mut SlotOrder, out: &mut Vec<SlotOrder>) {
        if rest.is_empty() {
            out.push(prefix.clone());
            return;
        }
        for i in 0..rest.len() {
            let item = rest.remove(i);
            prefix.push(item);
            extend(prefix, rest, out);
            prefix.pop();
            rest.insert(i, item);
        }
    }

    let mut out = Vec::new();
    extend(
        &mut SlotOrder::new(),
        &mut items.iter().copied().collect(),
        &mut out,
    );
    out
}

#[cfg(test)]
mod tests {
    use blockblast_engine::{BlockColor, Grid, PendingPieces, Piece, ScoreState, ShapeId};

    use crate::placement_evaluator::HeuristicEvaluator;

    use super::*;

    fn piece(name: &str) -> Piece {
        Piece::new(ShapeId::from_name(name).unwrap(), BlockColor::Red)
    }

    fn field(grid: &str, names: [&str; 3]) -> GameField {
        GameField::new(
            Grid::from_ascii(grid),
            PendingPieces::new(names.map(piece)),
            ScoreState::INITIAL,
        )
    }

    fn search() -> MoveSearch<'static> {
        MoveSearch::new(Box::new(HeuristicEvaluator::default()))
    }

    #[test]
    fn test_permutations() {
        let orders: Vec<Vec<usize>> = permutations(&[0, 1, 2])
            .into_iter()
            .map(|o| o.to_vec())
            .collect();
        assert_eq!(
            orders,
            [
                [0, 1, 2],
                [0, 2, 1],
                [1, 0, 2],
                [1, 2, 0],
                [2, 0, 1],
                [2, 1, 0]
            ]
        );
        assert_eq!(permutations(&[4]).len(), 1);
        assert_eq!(permutations(&[]).len(), 1);
    }

    #[test]
    fn test_empty_grid_places_every_piece() {
        let field = field("", ["square3", "line5_h", "t_a"]);
        let plan = search().compute_best_move_plan(&field);
        assert_eq!(plan.len(), 3);

        let mut replay = field.clone();
        for mv in plan {
            replay.apply_move(mv).unwrap();
        }
        assert!(replay.pending().all_placed());
    }

    #[test]
    fn test_only_placeable_piece_is_planned() {
        let field = field(
            "
            .#######
            ##.#####
            ####.###
            ...####.
            ######.#
            #.######
            ###.####
            #####.##
            ",
            ["line5_h", "square3", "line3_h"],
        );
        assert!(!field.is_game_over());
        let plan = search().compute_best_move_plan(&field);
        assert_eq!(plan.as_slice(), [Move::new(2, 3, 0)]);
    }

    #[test]
    fn test_ordering_that_makes_room_wins() {
        // line5_h only fits after line3_h completes the top row.
        let field = field(
            "
            #####...
            ########
            ########
            ########
            ########
            ########
            ########
            ########
            ",
            ["line5_h", "line3_h", "line5_h"],
        );
        let best = search().select_best_sequence(&field).unwrap();
        assert!(best.is_feasible());
        assert_eq!(best.plan().len(), 3);
        assert_eq!(best.plan().first(), Some(&Move::new(1, 0, 5)));

        let blocked = search().evaluate_sequence(&field, &[0, 1, 2]);
        assert_eq!(blocked.skipped(), 1);
        assert_eq!(blocked.plan().len(), 2);
    }

    #[test]
    fn test_nothing_placeable_gives_empty_plan() {
        let field = field(&"########\n".repeat(8), ["line3_h", "square2", "t_a"]);
        assert!(field.is_game_over());
        assert!(search().compute_best_move_plan(&field).is_empty());
    }

    #[test]
    fn test_partially_placed_pending() {
        let mut field = field("", ["square2", "line3_h", "line3_v"]);
        field.apply_move(Move::new(1, 7, 0)).unwrap();
        let plan = search().compute_best_move_plan(&field);
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|mv| mv.slot != 1));
    }

    #[test]
    fn test_prefers_clearing_a_line() {
        let field = field(
            "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            #####...
            ",
            ["line3_h", "line3_h", "line3_h"],
        );
        let (analysis, _) = search().select_best_placement(&field, 0).unwrap();
        assert_eq!(analysis.placement(), Move::new(0, 7, 5));
        assert_eq!(analysis.cleared_lines(), 1);
    }
}
