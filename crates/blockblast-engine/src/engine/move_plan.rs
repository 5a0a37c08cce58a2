use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::pending_pieces::PENDING_SLOTS;

/// A single placement decision: put the piece of pending slot `slot` with its
/// top-left anchor at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub slot: usize,
    pub row: usize,
    pub col: usize,
}

impl Move {
    #[must_use]
    pub const fn new(slot: usize, row: usize, col: usize) -> Self {
        Self { slot, row, col }
    }
}

/// Placements for the unplaced pending pieces, to be applied in order.
///
/// Holds at most one move per pending slot. Earlier moves change the board for
/// later ones, so a plan is only valid when replayed front to back on the
/// state it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovePlan {
    moves: ArrayVec<Move, PENDING_SLOTS>,
}

impl MovePlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move.
    ///
    /// # Panics
    ///
    /// Panics if the plan already holds a move for every pending slot.
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Removes and returns the next move to apply.
    pub fn pop_front(&mut self) -> Option<Move> {
        self.moves.pop_at(0)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Move> {
        self.moves.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }
}

impl FromIterator<Move> for MovePlan {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Self {
            moves: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MovePlan {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, PENDING_SLOTS>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_front_drains_in_order() {
        let mut plan: MovePlan = [Move::new(2, 0, 0), Move::new(0, 3, 4), Move::new(1, 7, 7)]
            .into_iter()
            .collect();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.pop_front(), Some(Move::new(2, 0, 0)));
        assert_eq!(plan.first(), Some(&Move::new(0, 3, 4)));
        assert_eq!(plan.pop_front(), Some(Move::new(0, 3, 4)));
        assert_eq!(plan.pop_front(), Some(Move::new(1, 7, 7)));
        assert_eq!(plan.pop_front(), None);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::new(1, 2, 3);
        let json = serde_json::to_string(&mv).unwrap();
        assert_eq!(json, r#"{"slot":1,"row":2,"col":3}"#);
    }
}
