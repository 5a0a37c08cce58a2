use std::path::PathBuf;

use blockblast_evaluator::weights::HeuristicWeights;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct WeightsArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &WeightsArg) -> anyhow::Result<()> {
    Output::save_json(&HeuristicWeights::default(), arg.output.clone())
}
