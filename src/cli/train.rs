//! CLI entry-point for classifier training.

use std::io;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    cli::CorpusArgs,
    config::Settings,
    data::{Dataset, RiskFactor},
    model,
    nlp::LemmaTokenizer,
    viz::{CsvReport, Fanout, TerminalChart},
};

/// Args for the `train` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub corpus: CorpusArgs,
    /// Risk-factor tag, e.g. HYPERTENSION.
    #[arg(long)]
    pub condition: RiskFactor,
    /// Indicator value matched exactly, e.g. "mention".
    #[arg(long)]
    pub indicator: String,
    /// Override the number of features ranked on each side.
    #[arg(long)]
    pub top_n: Option<usize>,
    /// Override the split seed.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let mut config = settings.train_config();
    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let folder = args.corpus.resolve(&settings);
    let dataset =
        Dataset::from_dir(&folder).with_context(|| format!("loading corpus {folder:?}"))?;

    let report = settings.join_output(format!(
        "top_features_{}_{}.csv",
        args.condition.tag().to_lowercase(),
        args.indicator.replace(char::is_whitespace, "_"),
    ));
    let mut renderer = Fanout::new()
        .with(TerminalChart::new(io::stdout()))
        .with(CsvReport::new(report));

    let trained = model::train(
        &dataset,
        args.condition,
        &args.indicator,
        &config,
        &LemmaTokenizer,
        &mut renderer,
    )?;
    info!(
        features = trained.feature_names().len(),
        accuracy = ?trained.held_out_accuracy,
        "training finished"
    );
    Ok(())
}
