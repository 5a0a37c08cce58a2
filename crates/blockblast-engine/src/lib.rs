//! Board model and game rules of an 8x8 block placement puzzle.
//!
//! - [`core`] - Grid, shape catalog and pieces
//! - [`engine`] - Scoring, pending pieces, dealing and sessions

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejected placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("slot {slot} does not exist")]
    SlotOutOfRange { slot: usize },
    #[display("piece in slot {slot} is already placed")]
    AlreadyPlaced { slot: usize },
    #[display("{shape} does not fit at ({row}, {col})")]
    Blocked {
        shape: &'static str,
        row: usize,
        col: usize,
    },
    #[display("game is over")]
    GameOver,
}
