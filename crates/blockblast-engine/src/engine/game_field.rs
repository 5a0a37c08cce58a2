use crate::{
    PlacementError,
    core::{ClearedLines, Grid, Piece},
};

use super::{move_plan::Move, pending_pieces::PendingPieces, score_state::ScoreState};

/// Result of a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub placement: Move,
    pub piece: Piece,
    pub cleared: ClearedLines,
    pub score_delta: u64,
    /// Whether the grid was left entirely empty by the clear.
    pub all_clear: bool,
    /// Whether a fresh set of pending pieces was dealt afterwards.
    pub refilled: bool,
}

/// Everything needed to decide and apply the next placement.
///
/// A field is a plain value: simulating a move means cloning the field and
/// calling [`GameField::place`] on the clone. Dealing new pieces is left to
/// the owner (see [`GameSession`](super::GameSession)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameField {
    grid: Grid,
    pending: PendingPieces,
    score: ScoreState,
}

impl GameField {
    #[must_use]
    pub const fn new(grid: Grid, pending: PendingPieces, score: ScoreState) -> Self {
        Self {
            grid,
            pending,
            score,
        }
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn pending(&self) -> &PendingPieces {
        &self.pending
    }

    #[must_use]
    pub const fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Replaces the pending pieces wholesale.
    pub const fn set_pending(&mut self, pending: PendingPieces) {
        self.pending = pending;
    }

    /// Returns `true` when no unplaced pending piece fits anywhere.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.pending.is_deadlocked(&self.grid)
    }

    /// Checks that the piece of `slot` can be placed at `(row, col)` and
    /// returns it.
    pub fn check_placement(
        &self,
        slot: usize,
        row: usize,
        col: usize,
    ) -> Result<Piece, PlacementError> {
        let piece = match self.pending.get_unplaced(slot) {
            Some(piece) => piece,
            None if slot < super::PENDING_SLOTS => {
                return Err(PlacementError::AlreadyPlaced { slot });
            }
            None => return Err(PlacementError::SlotOutOfRange { slot }),
        };
        if !self.grid.can_place(piece.shape(), row, col) {
            return Err(PlacementError::Blocked {
                shape: piece.shape().name(),
                row,
                col,
            });
        }
        Ok(piece)
    }

    /// Places the piece of `slot`, clears full lines and updates the score.
    ///
    /// The slot is marked placed; the field never refills by itself, so the
    /// returned outcome always has `refilled == false`.
    pub fn place(
        &mut self,
        slot: usize,
        row: usize,
        col: usize,
    ) -> Result<PlacementOutcome, PlacementError> {
        let piece = self.check_placement(slot, row, col)?;

        self.grid.place_piece(piece, row, col);
        let cleared = self.grid.clear_lines();
        let all_clear = self.grid.is_all_clear();
        let score_delta = self
            .score
            .apply_placement(piece.cell_count(), cleared.count(), all_clear);
        self.pending.mark_placed(slot);

        Ok(PlacementOutcome {
            placement: Move::new(slot, row, col),
            piece,
            cleared,
            score_delta,
            all_clear,
            refilled: false,
        })
    }

    pub fn apply_move(&mut self, mv: Move) -> Result<PlacementOutcome, PlacementError> {
        self.place(mv.slot, mv.row, mv.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ALL_SHAPES, BlockColor, ShapeId};

    fn piece(name: &str) -> Piece {
        Piece::new(ShapeId::from_name(name).unwrap(), BlockColor::Green)
    }

    fn field(grid: &str, names: [&str; 3]) -> GameField {
        GameField::new(
            Grid::from_ascii(grid),
            PendingPieces::new(names.map(piece)),
            ScoreState::INITIAL,
        )
    }

    #[test]
    fn test_place_clears_and_scores() {
        let mut field = field(
            "
            #####...
            ",
            ["line3_h", "square2", "line3_v"],
        );
        let outcome = field.place(0, 0, 5).unwrap();
        assert_eq!(outcome.placement, Move::new(0, 0, 5));
        assert_eq!(outcome.cleared.count(), 1);
        assert!(outcome.all_clear);
        assert_eq!(outcome.score_delta, 3 + 10 + 300);
        assert!(field.grid().is_all_clear());
        assert!(field.pending().is_placed(0));
        assert_eq!(field.score().combo(), 1);
    }

    #[test]
    fn test_place_errors() {
        let mut field = field(
            "
            ##......
            ",
            ["line3_h", "square2", "line3_v"],
        );
        assert_eq!(
            field.place(3, 0, 0),
            Err(PlacementError::SlotOutOfRange { slot: 3 })
        );
        assert_eq!(
            field.place(0, 0, 1),
            Err(PlacementError::Blocked {
                shape: "line3_h",
                row: 0,
                col: 1
            })
        );
        assert_eq!(
            field.place(0, 0, 6),
            Err(PlacementError::Blocked {
                shape: "line3_h",
                row: 0,
                col: 6
            })
        );
        field.place(0, 1, 0).unwrap();
        assert_eq!(
            field.place(0, 2, 0),
            Err(PlacementError::AlreadyPlaced { slot: 0 })
        );
    }

    #[test]
    fn test_failed_place_leaves_field_untouched() {
        let mut field = field("#.......", ["line3_h", "square2", "line3_v"]);
        let before = field.clone();
        assert!(field.place(1, 0, 0).is_err());
        assert_eq!(field, before);
    }

    #[test]
    fn test_game_over_when_nothing_fits() {
        let field = field(
            "
            ########
            ########
            ########
            ########
            ####..##
            ########
            ########
            ########
            ",
            ["line3_h", "square2", "line3_v"],
        );
        assert!(field.is_game_over());
    }

    #[test]
    fn test_game_over_when_no_catalog_shape_fits() {
        let field = field(
            "
            #.#.#.#.
            ########
            .#.#.#.#
            ########
            #.#.#.#.
            ########
            .#.#.#.#
            ########
            ",
            ["line3_h", "square2", "line3_v"],
        );
        assert!(
            ALL_SHAPES
                .iter()
                .all(|shape| !field.grid().has_valid_position(shape))
        );
        assert!(field.is_game_over());
    }
}
