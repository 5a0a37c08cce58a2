use clap::{Parser, Subcommand};

use self::{auto_play::AutoPlayArg, play::PlayArg, weights::WeightsArg};

mod auto_play;
mod play;
mod weights;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play on the terminal, one placement per input line
    Play(#[clap(flatten)] PlayArg),
    /// Play sessions with the heuristic player and report the results
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Print the default heuristic weights as JSON
    Weights(#[clap(flatten)] WeightsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::Weights(arg) => weights::run(&arg)?,
    }
    Ok(())
}
