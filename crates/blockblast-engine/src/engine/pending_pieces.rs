use serde::{Deserialize, Serialize};

use crate::core::{Grid, Piece};

/// Number of pieces dealt per refill.
pub const PENDING_SLOTS: usize = 3;

/// The dealt pieces awaiting placement.
///
/// Slots keep their index for the whole deal: placing the piece of slot 1
/// leaves slots 0 and 2 where they are, so a [`Move`](super::Move) can refer
/// to a slot by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPieces {
    slots: [Piece; PENDING_SLOTS],
    placed: [bool; PENDING_SLOTS],
}

impl PendingPieces {
    #[must_use]
    pub const fn new(slots: [Piece; PENDING_SLOTS]) -> Self {
        Self {
            slots,
            placed: [false; PENDING_SLOTS],
        }
    }

    /// Returns the piece of `slot`, placed or not.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= PENDING_SLOTS`.
    #[must_use]
    pub const fn get(&self, slot: usize) -> Piece {
        self.slots[slot]
    }

    /// Returns the piece of `slot` if it is still waiting to be placed.
    #[must_use]
    pub fn get_unplaced(&self, slot: usize) -> Option<Piece> {
        (slot < PENDING_SLOTS && !self.placed[slot]).then(|| self.slots[slot])
    }

    #[must_use]
    pub const fn is_placed(&self, slot: usize) -> bool {
        self.placed[slot]
    }

    pub(crate) const fn mark_placed(&mut self, slot: usize) {
        self.placed[slot] = true;
    }

    #[must_use]
    pub fn all_placed(&self) -> bool {
        self.placed.iter().all(|&p| p)
    }

    #[must_use]
    pub fn unplaced_count(&self) -> usize {
        self.placed.iter().filter(|&&p| !p).count()
    }

    /// Iterates `(slot, piece)` over pieces not yet placed, in slot order.
    pub fn unplaced(&self) -> impl Iterator<Item = (usize, Piece)> + '_ {
        self.slots
            .iter()
            .zip(self.placed)
            .enumerate()
            .filter(|(_, (_, placed))| !placed)
            .map(|(slot, (piece, _))| (slot, *piece))
    }

    /// Returns `true` when pieces remain but none of them fits on `grid`.
    #[must_use]
    pub fn is_deadlocked(&self, grid: &Grid) -> bool {
        !self.all_placed()
            && self
                .unplaced()
                .all(|(_, piece)| !grid.has_valid_position(piece.shape()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BlockColor, ShapeId};

    fn piece(name: &str) -> Piece {
        Piece::new(ShapeId::from_name(name).unwrap(), BlockColor::Blue)
    }

    #[test]
    fn test_unplaced_keeps_slot_indices() {
        let mut pending = PendingPieces::new([piece("line3_h"), piece("square2"), piece("t_a")]);
        pending.mark_placed(1);

        let slots: Vec<usize> = pending.unplaced().map(|(slot, _)| slot).collect();
        assert_eq!(slots, [0, 2]);
        assert_eq!(pending.unplaced_count(), 2);
        assert_eq!(pending.get_unplaced(1), None);
        assert_eq!(pending.get_unplaced(2), Some(piece("t_a")));
        assert_eq!(pending.get_unplaced(3), None);
        assert_eq!(pending.get(1), piece("square2"));
        assert!(!pending.all_placed());

        pending.mark_placed(0);
        pending.mark_placed(2);
        assert!(pending.all_placed());
        assert_eq!(pending.unplaced().count(), 0);
    }

    #[test]
    fn test_deadlock_only_when_nothing_fits() {
        let grid = Grid::from_ascii(
            "
            ########
            ########
            ########
            ###...##
            ########
            ########
            ########
            ########
            ",
        );
        let mut pending = PendingPieces::new([piece("square2"), piece("line3_h"), piece("line3_v")]);
        assert!(!pending.is_deadlocked(&grid));

        pending.mark_placed(1);
        assert!(pending.is_deadlocked(&grid));

        pending.mark_placed(0);
        pending.mark_placed(2);
        assert!(!pending.is_deadlocked(&grid));
    }
}
