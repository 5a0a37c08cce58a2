use serde::{Deserialize, Serialize};

/// Number of buckets in [`GameStats::clear_counter`]: 0 to 5 lines, and 6 or more.
pub const CLEAR_COUNTER_LEN: usize = 7;

/// Game statistics tracking placements, clears and combos.
///
/// Score itself lives in [`ScoreState`](super::ScoreState); these counters
/// describe how the score was earned:
///
/// - **Placed pieces**: Total number of pieces placed
/// - **Refills**: Number of times three new pieces were dealt
/// - **Cleared lines**: Rows plus columns cleared over the session
/// - **Clear distribution**: Count of placements by number of lines cleared
/// - **Perfect clears**: Placements that left the grid empty
/// - **Max combo**: Highest combo reached
///
/// # Example
///
/// ```
/// use blockblast_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_placement(0, 0, false);
/// stats.complete_placement(2, 1, false);
///
/// assert_eq!(stats.placed_pieces(), 2);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.clear_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    placed_pieces: usize,
    refills: usize,
    total_cleared_lines: usize,
    clear_counter: [usize; CLEAR_COUNTER_LEN],
    perfect_clears: usize,
    max_combo: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            placed_pieces: 0,
            refills: 0,
            total_cleared_lines: 0,
            clear_counter: [0; CLEAR_COUNTER_LEN],
            perfect_clears: 0,
            max_combo: 0,
        }
    }

    #[must_use]
    pub const fn placed_pieces(&self) -> usize {
        self.placed_pieces
    }

    #[must_use]
    pub const fn refills(&self) -> usize {
        self.refills
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of placements by lines cleared.
    ///
    /// Index `i` counts placements that cleared `i` lines; the last bucket
    /// collects every placement that cleared 6 lines or more.
    #[must_use]
    pub const fn clear_counter(&self) -> &[usize; CLEAR_COUNTER_LEN] {
        &self.clear_counter
    }

    #[must_use]
    pub const fn perfect_clears(&self) -> usize {
        self.perfect_clears
    }

    #[must_use]
    pub const fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Updates statistics after a placement.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Lines cleared by the placement
    /// * `combo` - Combo after the placement was scored
    /// * `all_clear` - Whether the grid is empty after the clear
    pub fn complete_placement(&mut self, cleared_lines: usize, combo: u32, all_clear: bool) {
        self.placed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.clear_counter[usize::min(cleared_lines, CLEAR_COUNTER_LEN - 1)] += 1;
        if all_clear && cleared_lines > 0 {
            self.perfect_clears += 1;
        }
        self.max_combo = u32::max(self.max_combo, combo);
    }

    /// Records that a fresh set of pending pieces was dealt.
    pub const fn complete_refill(&mut self) {
        self.refills += 1;
    }
}
