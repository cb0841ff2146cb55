//! CLI entry-point for listing derived labels.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    cli::CorpusArgs,
    config::Settings,
    data::{Dataset, RiskFactor},
};

/// Args for the `labels` command.
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
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let folder = args.corpus.resolve(&settings);
    let dataset =
        Dataset::from_dir(&folder).with_context(|| format!("loading corpus {folder:?}"))?;
    let labels = dataset.labels(args.condition, &args.indicator);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (patient, label) in dataset.patients().zip(&labels) {
        writeln!(out, "{},{label}", patient.id())?;
    }
    out.flush()?;
    info!(
        positives = labels.iter().sum::<usize>(),
        patients = labels.len(),
        "listed labels"
    );
    Ok(())
}
