use std::path::PathBuf;

use blockblast_engine::{GameSession, PieceSeed};
use blockblast_evaluator::{
    move_search::MoveSearch, placement_evaluator::HeuristicEvaluator, strategy::AutoPlayer,
    weights::HeuristicWeights,
};
use chrono::Utc;
use rand::Rng as _;

use crate::{
    schema::record::{MoveRecord, SessionRecord},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Number of sessions to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Seed of the first session (32 hex digits); later sessions use the
    /// following seeds. Random if omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Maximum number of placements per session
    #[arg(long, default_value_t = 10_000)]
    move_limit: usize,
    /// Heuristic weights file (JSON format); defaults are used if omitted
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Output file path for the session records
    #[arg(long)]
    output: Option<PathBuf>,
    /// Include every placement in the session records
    #[arg(long, default_value_t = false)]
    record_moves: bool,
    /// Do not print per-session progress
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        games,
        seed,
        move_limit,
        weights,
        output,
        record_moves,
        quiet,
    } = arg;

    let weights = util::load_weights(weights.as_deref())?;
    let search = MoveSearch::new(Box::new(HeuristicEvaluator::new(&weights)));
    let first_seed = seed.unwrap_or_else(|| rand::rng().random());

    eprintln!("Playing {games} session(s) starting from seed {first_seed}...");
    let mut records = Vec::with_capacity(*games);
    for i in 0..*games {
        let seed = PieceSeed::from_u128(first_seed.as_u128().wrapping_add(i as u128));
        let record = play_one(&search, &weights, seed, *move_limit, *record_moves);
        if !quiet {
            eprintln!(
                "  [{}/{games}] seed {}: score {}, {} pieces, {} lines{}",
                i + 1,
                record.seed,
                record.final_score,
                record.final_stats.placed_pieces(),
                record.final_stats.total_cleared_lines(),
                if record.game_over {
                    ""
                } else {
                    " (move limit)"
                }
            );
        }
        records.push(record);
    }

    print_summary(&records);
    Output::save_json(&records, output.clone())
}

fn play_one(
    search: &MoveSearch<'_>,
    weights: &HeuristicWeights,
    seed: PieceSeed,
    move_limit: usize,
    record_moves: bool,
) -> SessionRecord {
    let mut session = GameSession::with_seed(seed);
    let mut player = AutoPlayer::new(search);
    let mut moves = record_moves.then(Vec::new);

    for turn in 0..move_limit {
        let Some(outcome) = player.play_next_move(&mut session) else {
            break;
        };
        if let Some(moves) = &mut moves {
            moves.push(MoveRecord::new(turn, &outcome));
        }
    }

    SessionRecord {
        recorded_at: Utc::now(),
        seed,
        weights: *weights,
        final_score: session.score(),
        game_over: session.session_state().is_game_over(),
        final_stats: session.stats().clone(),
        moves,
    }
}

#[expect(clippy::cast_precision_loss)]
fn print_summary(records: &[SessionRecord]) {
    let Some(best) = records.iter().max_by_key(|r| r.final_score) else {
        return;
    };
    let n = records.len() as f64;
    let mean_score = records.iter().map(|r| r.final_score as f64).sum::<f64>() / n;
    let mean_pieces = records
        .iter()
        .map(|r| r.final_stats.placed_pieces() as f64)
        .sum::<f64>()
        / n;
    let perfect_clears: usize = records.iter().map(|r| r.final_stats.perfect_clears()).sum();
    let max_combo = records
        .iter()
        .map(|r| r.final_stats.max_combo())
        .max()
        .unwrap_or(0);

    eprintln!();
    eprintln!("Sessions:       {}", records.len());
    eprintln!("Mean score:     {mean_score:.1}");
    eprintln!("Best score:     {} (seed {})", best.final_score, best.seed);
    eprintln!("Mean pieces:    {mean_pieces:.1}");
    eprintln!("Perfect clears: {perfect_clears}");
    eprintln!("Max combo:      {max_combo}");
}
