//! Decision strategies and the automatic player that drives a session with one.
//!
//! A [`MoveStrategy`] only decides: given a field, it returns a [`MovePlan`]
//! for the unplaced pieces. [`AutoPlayer`] owns the plan and feeds it to a
//! [`GameSession`] one move at a time, asking the strategy for a fresh plan
//! whenever the current one is used up or no longer applies.

use std::fmt;

use blockblast_engine::{GameField, GameSession, MovePlan, PlacementOutcome};
use rand::Rng;

use crate::move_search::MoveSearch;

/// Chooses the placements of the pending pieces.
pub trait MoveStrategy: fmt::Debug {
    fn plan_moves(&self, field: &GameField) -> MovePlan;
}

impl MoveStrategy for MoveSearch<'_> {
    fn plan_moves(&self, field: &GameField) -> MovePlan {
        self.compute_best_move_plan(field)
    }
}

impl<S> MoveStrategy for &S
where
    S: MoveStrategy + ?Sized,
{
    fn plan_moves(&self, field: &GameField) -> MovePlan {
        (**self).plan_moves(field)
    }
}

/// Plays a session with a strategy.
///
/// The plan is discarded after every refill (new pieces need a new plan) and
/// after a move the session rejects.
#[derive(Debug)]
pub struct AutoPlayer<S> {
    strategy: S,
    plan: MovePlan,
}

impl<S> AutoPlayer<S>
where
    S: MoveStrategy,
{
    #[must_use]
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            plan: MovePlan::new(),
        }
    }

    #[must_use]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Moves left in the current plan.
    #[must_use]
    pub fn pending_plan(&self) -> &MovePlan {
        &self.plan
    }

    /// Applies the next planned move, planning first if needed.
    ///
    /// Returns `None` when the session is over or the strategy has nothing to
    /// place.
    pub fn play_next_move<R>(&mut self, session: &mut GameSession<R>) -> Option<PlacementOutcome>
    where
        R: Rng,
    {
        if session.session_state().is_game_over() {
            return None;
        }

        for _ in 0..2 {
            if self.plan.is_empty() {
                self.plan = self.strategy.plan_moves(session.field());
            }
            let mv = self.plan.pop_front()?;
            match session.apply_move(mv) {
                Ok(outcome) => {
                    if outcome.refilled {
                        self.plan = MovePlan::new();
                    }
                    return Some(outcome);
                }
                // The plan was computed for another state; replan once.
                Err(_) => self.plan = MovePlan::new(),
            }
        }
        None
    }

    /// Plays until game over, or until `move_limit` moves were made.
    ///
    /// Returns the number of moves made.
    pub fn play_session<R>(&mut self, session: &mut GameSession<R>, move_limit: usize) -> usize
    where
        R: Rng,
    {
        let mut moves = 0;
        while moves < move_limit && self.play_next_move(session).is_some() {
            moves += 1;
        }
        moves
    }
}
