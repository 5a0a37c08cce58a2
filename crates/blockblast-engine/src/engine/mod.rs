//! Game engine logic and state management.
//!
//! This module builds the session-level rules on top of the core board model:
//!
//! - [`ScoreState`] - Score, combo and since-clear counters with their transition rule
//! - [`GameStats`] - Per-session statistics (placements, clears, perfect clears)
//! - [`PendingPieces`] - The three dealt pieces and their placed flags
//! - [`PieceGenerator`] - Seeded piece dealing with anti-deadlock re-rolls
//! - [`GameField`] - Grid, pending pieces and score state of one game
//! - [`GameSession`] - A field plus generator, statistics and game-over tracking
//! - [`MovePlan`] - An ordered list of placements chosen for the pending pieces
//!
//! # Game Flow
//!
//! 1. Three pieces are dealt
//! 2. The player (or a strategy) places each of them somewhere on the grid
//! 3. After each placement, full rows and columns are cleared and scored
//! 4. Once all three are placed, three new pieces are dealt
//! 5. The game ends when no unplaced piece fits anywhere
//!
//! # Example
//!
//! ```
//! use blockblast_engine::{GameSession, PieceSeed};
//!
//! let mut session = GameSession::with_seed(PieceSeed::from_u128(42));
//! let piece = session.field().pending().get(0);
//! let (row, col) = session
//!     .field()
//!     .grid()
//!     .valid_positions(piece.shape())
//!     .next()
//!     .unwrap();
//!
//! let outcome = session.place(0, row, col).unwrap();
//! assert_eq!(outcome.score_delta as usize, piece.cell_count());
//! ```

pub use self::{
    game_field::*, game_session::*, game_stats::*, move_plan::*, pending_pieces::*,
    piece_generator::*, score_state::*,
};

mod game_field;
mod game_session;
mod game_stats;
mod move_plan;
mod pending_pieces;
mod piece_generator;
mod score_state;
