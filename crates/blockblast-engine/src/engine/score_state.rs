use serde::{Deserialize, Serialize};

/// Clear multipliers indexed by `min(cleared_lines, 6) - 1`.
///
/// More than six simultaneous clears (possible with crossing rows and columns)
/// score like six.
pub const CLEAR_MULTIPLIER: [u64; 6] = [1, 2, 6, 12, 24, 48];

/// Base points of a clear, multiplied by the combo and the clear multiplier.
pub const CLEAR_BONUS_UNIT: u64 = 10;

/// Extra points when a clear leaves the grid entirely empty.
pub const ALL_CLEAR_BONUS: u64 = 300;

/// Number of consecutive clear-less placements that breaks a combo.
pub const COMBO_DECAY_PLACEMENTS: u32 = 3;

/// Score bookkeeping of a session.
///
/// The state only changes through [`ScoreState::apply_placement`] (or its pure
/// counterpart [`ScoreState::after_placement`]):
///
/// 1. Every placement scores its cell count.
/// 2. A placement that clears `c > 0` lines increments the combo, scores
///    `combo * 10 * CLEAR_MULTIPLIER[min(c, 6) - 1]`, adds [`ALL_CLEAR_BONUS`]
///    when the grid ends up empty, and resets `since_clear`.
/// 3. Otherwise `since_clear` increments.
/// 4. Once `since_clear` reaches [`COMBO_DECAY_PLACEMENTS`], the combo drops to 0.
///
/// # Example
///
/// ```
/// use blockblast_engine::ScoreState;
///
/// let mut state = ScoreState::INITIAL;
/// assert_eq!(state.apply_placement(3, 0, false), 3);
/// assert_eq!(state.apply_placement(4, 1, false), 4 + 10);
/// assert_eq!(state.apply_placement(2, 2, false), 2 + 2 * 10 * 2);
/// assert_eq!(state.score(), 59);
/// assert_eq!(state.combo(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    score: u64,
    combo: u32,
    since_clear: u32,
}

impl ScoreState {
    pub const INITIAL: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(score: u64, combo: u32, since_clear: u32) -> Self {
        Self {
            score,
            combo,
            since_clear,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn combo(&self) -> u32 {
        self.combo
    }

    /// Number of consecutive placements since the last clear.
    #[must_use]
    pub const fn since_clear(&self) -> u32 {
        self.since_clear
    }

    /// Returns `true` while the combo has not decayed.
    #[must_use]
    pub const fn is_combo_alive(&self) -> bool {
        self.since_clear < COMBO_DECAY_PLACEMENTS
    }

    /// Bonus of a clear of `cleared_lines` lines at combo level `combo`
    /// (the combo after incrementing).
    #[must_use]
    pub fn clear_bonus(combo: u32, cleared_lines: usize) -> u64 {
        if cleared_lines == 0 {
            return 0;
        }
        let index = usize::min(cleared_lines, CLEAR_MULTIPLIER.len()) - 1;
        u64::from(combo) * CLEAR_BONUS_UNIT * CLEAR_MULTIPLIER[index]
    }

    /// Computes the state after a placement without modifying `self`.
    ///
    /// Returns the next state and the score delta of the placement.
    ///
    /// # Arguments
    ///
    /// * `cell_count` - Number of cells of the placed piece
    /// * `cleared_lines` - Rows plus columns cleared by the placement
    /// * `all_clear` - Whether the grid is empty after the clear
    #[must_use]
    pub fn after_placement(
        &self,
        cell_count: usize,
        cleared_lines: usize,
        all_clear: bool,
    ) -> (Self, u64) {
        let mut next = *self;
        let mut delta = cell_count as u64;

        if cleared_lines > 0 {
            next.combo = self.combo + 1;
            delta += Self::clear_bonus(next.combo, cleared_lines);
            if all_clear {
                delta += ALL_CLEAR_BONUS;
            }
            next.since_clear = 0;
        } else {
            next.since_clear = self.since_clear.saturating_add(1);
        }

        if next.since_clear >= COMBO_DECAY_PLACEMENTS {
            next.combo = 0;
        }

        next.score += delta;
        (next, delta)
    }

    /// Applies a placement and returns its score delta.
    pub fn apply_placement(
        &mut self,
        cell_count: usize,
        cleared_lines: usize,
        all_clear: bool,
    ) -> u64 {
        let (next, delta) = self.after_placement(cell_count, cleared_lines, all_clear);
        *self = next;
        delta
    }
}
