//! CLI entry-point for dumping parsed records.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{cli::CorpusArgs, config::Settings, data::Dataset};

/// Args for the `inspect` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub corpus: CorpusArgs,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let folder = args.corpus.resolve(&settings);
    let dataset =
        Dataset::from_dir(&folder).with_context(|| format!("loading corpus {folder:?}"))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dataset.describe(&mut out)?;
    out.flush()?;
    Ok(())
}
