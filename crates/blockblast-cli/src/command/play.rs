use std::{
    io::{self, BufRead as _, Write as _},
    path::PathBuf,
};

use anyhow::{Context, bail};
use blockblast_engine::{GRID_SIZE, GameSession, Grid, PendingPieces, PieceSeed, Shape};
use blockblast_evaluator::{
    board_analysis::BoardAnalysis, move_search::MoveSearch,
    placement_evaluator::HeuristicEvaluator,
};

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for piece dealing (32 hex digits); random if omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Heuristic weights file used by `hint` (JSON format)
    #[arg(long)]
    weights: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayCommand {
    Place { slot: usize, row: usize, col: usize },
    Hint,
    Quit,
}

fn parse_command(line: &str) -> anyhow::Result<PlayCommand> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["hint" | "h"] => Ok(PlayCommand::Hint),
        ["quit" | "q" | "exit"] => Ok(PlayCommand::Quit),
        [slot, row, col] => {
            let parse = |name: &str, value: &str| {
                value
                    .parse::<usize>()
                    .with_context(|| format!("invalid {name}: {value:?}"))
            };
            Ok(PlayCommand::Place {
                slot: parse("slot", slot)?,
                row: parse("row", row)?,
                col: parse("column", col)?,
            })
        }
        _ => bail!("expected `<slot> <row> <col>`, `hint` or `quit`"),
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, weights } = arg;

    let weights = util::load_weights(weights.as_deref())?;
    let evaluator = HeuristicEvaluator::new(&weights);
    let search = MoveSearch::new(Box::new(evaluator.clone()));
    let mut session = seed.map_or_else(GameSession::new, GameSession::with_seed);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout().lock();

    if let Some(seed) = session.seed() {
        writeln!(stdout, "seed {seed}")?;
    }
    loop {
        write!(stdout, "{}", render_session(&session))?;
        if session.session_state().is_game_over() {
            writeln!(stdout, "game over")?;
            break;
        }
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(PlayCommand::Place { slot, row, col }) => match session.place(slot, row, col) {
                Ok(outcome) => {
                    writeln!(
                        stdout,
                        "+{} ({} lines, combo {})",
                        outcome.score_delta,
                        outcome.cleared.count(),
                        session.field().score().combo()
                    )?;
                    if outcome.refilled {
                        writeln!(stdout, "new pieces dealt")?;
                    }
                }
                Err(e) => writeln!(stdout, "rejected: {e}")?,
            },
            Ok(PlayCommand::Hint) => {
                let plan = search.compute_best_move_plan(session.field());
                match plan.first() {
                    Some(mv) => writeln!(stdout, "hint: {} {} {}", mv.slot, mv.row, mv.col)?,
                    None => writeln!(stdout, "hint: nothing fits")?,
                }
                let field = session.field();
                let analysis = BoardAnalysis::from_state(field.grid(), field.score());
                for (name, value) in evaluator.breakdown(&analysis) {
                    writeln!(stdout, "  {name:<18} {value:>9.3}")?;
                }
            }
            Ok(PlayCommand::Quit) => break,
            Err(e) => writeln!(stdout, "{e:#}")?,
        }
    }

    let stats = session.stats();
    writeln!(
        stdout,
        "final score {}: {} pieces, {} lines, {} perfect clears, max combo {}",
        session.score(),
        stats.placed_pieces(),
        stats.total_cleared_lines(),
        stats.perfect_clears(),
        stats.max_combo()
    )?;
    Ok(())
}

fn render_session(session: &GameSession) -> String {
    let field = session.field();
    let mut out = format!(
        "score {}  combo {}  since clear {}\n",
        field.score().score(),
        field.score().combo(),
        field.score().since_clear()
    );
    out.push_str(&render_grid(field.grid()));
    out.push_str(&render_pending(field.pending()));
    out
}

fn render_grid(grid: &Grid) -> String {
    let header: String = (0..GRID_SIZE).map(|col| col.to_string()).collect();
    let mut out = format!("  {header}\n");
    for (row, line) in grid.to_string().lines().enumerate() {
        out.push_str(&format!("{row} {line}\n"));
    }
    out
}

fn render_shape(shape: &Shape) -> Vec<String> {
    (0..shape.height())
        .map(|row| {
            (0..shape.width())
                .map(|col| if shape.is_occupied(row, col) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

fn render_pending(pending: &PendingPieces) -> String {
    let mut out = String::new();
    for (slot, piece) in pending.unplaced() {
        out.push_str(&format!("[{slot}] {} ({})\n", piece.shape().name(), piece.color()));
        for line in render_shape(piece.shape()) {
            out.push_str(&format!("    {line}\n"));
        }
    }
    out
}
