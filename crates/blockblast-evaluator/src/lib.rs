//! Heuristic decision engine choosing where to place the pending pieces.
//!
//! This crate implements a three-level decision architecture:
//!
//! 1. **Placement Evaluation** ([`placement_evaluator`]) - Scores a single simulated placement
//!    as its immediate points plus a weighted sum of board features.
//!
//! 2. **Move Search** ([`move_search`]) - Tries every ordering of the pending pieces, places
//!    each piece greedily at its best anchor and keeps the best ordering as a move plan.
//!
//! 3. **Strategy** ([`strategy`]) - Drives a game session by draining move plans and asking
//!    for a new one when the pieces are refilled.
//!
//! # Architecture
//!
//! ```text
//! AutoPlayer (play a session)
//!     ↓ uses
//! MoveSearch (plan all pending pieces)
//!     ↓ uses
//! PlacementEvaluator (score single placement)
//! ```
//!
//! The placement evaluator reads board features ([`board_feature`], 7 features covering
//! score and structure aspects) weighted by [`weights::HeuristicWeights`].
//!
//! # Supporting Modules
//!
//! - [`board_analysis`] - Lazy-evaluated board metrics (line fill counts, largest filled
//!   rectangle, valid placements) used by features
//! - [`placement_analysis`] - Simulates a placement on a copy of the field and keeps the
//!   outcome together with the resulting board analysis
//!
//! # Example
//!
//! ```
//! use blockblast_engine::{GameSession, PieceSeed};
//! use blockblast_evaluator::{
//!     move_search::MoveSearch, placement_evaluator::HeuristicEvaluator, strategy::AutoPlayer,
//! };
//!
//! let mut session = GameSession::with_seed(PieceSeed::from_u128(42));
//! let search = MoveSearch::new(Box::new(HeuristicEvaluator::default()));
//! let mut player = AutoPlayer::new(search);
//!
//! let moves = player.play_session(&mut session, 30);
//! assert!(moves > 0);
//! assert!(session.score() > 0);
//! ```

pub mod board_analysis;
pub mod board_feature;
pub mod move_search;
pub mod placement_analysis;
pub mod placement_evaluator;
pub mod strategy;
pub mod weights;
