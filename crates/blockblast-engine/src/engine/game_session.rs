use rand::Rng;
use rand_pcg::Pcg32;

use crate::{PlacementError, core::Grid};

use super::{
    GameStats,
    game_field::{GameField, PlacementOutcome},
    move_plan::Move,
    pending_pieces::PendingPieces,
    piece_generator::{PieceGenerator, PieceSeed},
    score_state::ScoreState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// One game from the first deal to game over.
///
/// Owns the [`GameField`] together with the piece generator that refills it,
/// so every placement goes through the full rule set: scoring, statistics,
/// refill once all three pieces are placed, and the game-over check.
///
/// Refills draw from `R`. Seeded sessions use [`Pcg32`]; any other [`Rng`]
/// can be injected with [`Self::with_generator`].
#[derive(Debug, Clone)]
pub struct GameSession<R = Pcg32> {
    seed: Option<PieceSeed>,
    field: GameField,
    generator: PieceGenerator<R>,
    stats: GameStats,
    session_state: SessionState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Starts a session on an empty grid with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Starts a session on an empty grid with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_grid(seed, Grid::EMPTY)
    }

    /// Starts a session from an arbitrary grid. The first deal is made for
    /// that grid, so it may already be game over.
    #[must_use]
    pub fn with_grid(seed: PieceSeed, grid: Grid) -> Self {
        let mut session = Self::with_generator(PieceGenerator::with_seed(seed), grid);
        session.seed = Some(seed);
        session
    }
}

impl<R> GameSession<R>
where
    R: Rng,
{
    /// Starts a session on `grid` dealing from an arbitrary generator.
    #[must_use]
    pub fn with_generator(mut generator: PieceGenerator<R>, grid: Grid) -> Self {
        let pending = PendingPieces::new(generator.deal_for(&grid));
        Self::from_parts(
            None,
            GameField::new(grid, pending, ScoreState::INITIAL),
            generator,
        )
    }

    /// Resumes a session from an existing field and generator.
    #[must_use]
    pub fn from_parts(
        seed: Option<PieceSeed>,
        field: GameField,
        generator: PieceGenerator<R>,
    ) -> Self {
        let session_state = if field.is_game_over() {
            SessionState::GameOver
        } else {
            SessionState::Playing
        };
        Self {
            seed,
            field,
            generator,
            stats: GameStats::new(),
            session_state,
        }
    }

    /// Seed the session was started with, if it deals from a seeded
    /// [`Pcg32`].
    #[must_use]
    pub const fn seed(&self) -> Option<PieceSeed> {
        self.seed
    }

    #[must_use]
    pub const fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub const fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub const fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.field.score().score()
    }

    /// Places the piece of `slot` with its anchor at `(row, col)`.
    ///
    /// On success the placement is scored and recorded; when it was the last
    /// pending piece, three new pieces are dealt. The session switches to
    /// [`SessionState::GameOver`] when the remaining pieces no longer fit.
    ///
    /// Invalid input leaves the session unchanged.
    pub fn place(
        &mut self,
        slot: usize,
        row: usize,
        col: usize,
    ) -> Result<PlacementOutcome, PlacementError> {
        if self.session_state.is_game_over() {
            return Err(PlacementError::GameOver);
        }

        let mut outcome = self.field.place(slot, row, col)?;
        self.stats.complete_placement(
            outcome.cleared.count(),
            self.field.score().combo(),
            outcome.all_clear,
        );

        if self.field.pending().all_placed() {
            let pieces = self.generator.deal_for(self.field.grid());
            self.field.set_pending(PendingPieces::new(pieces));
            self.stats.complete_refill();
            outcome.refilled = true;
        }

        if self.field.is_game_over() {
            self.session_state = SessionState::GameOver;
        }
        Ok(outcome)
    }

    pub fn apply_move(&mut self, mv: Move) -> Result<PlacementOutcome, PlacementError> {
        self.place(mv.slot, mv.row, mv.col)
    }
}
