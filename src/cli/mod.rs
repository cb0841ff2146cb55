//! Command-line interface wiring for n2c2-risk.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::Settings;

pub mod inspect;
pub mod labels;
pub mod train;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Clinical risk-factor record classifier", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Inspect(args) => inspect::run(args, settings),
            Commands::Labels(args) => labels::run(args, settings),
            Commands::Train(args) => train::run(args, settings),
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print every patient's parsed records.
    Inspect(inspect::Args),
    /// Print the per-patient label for one condition and indicator.
    Labels(labels::Args),
    /// Train a classifier and rank its most predictive terms.
    Train(train::Args),
}

/// Corpus location shared by every sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct CorpusArgs {
    /// Folder of record files; defaults to `DATA_DIR`.
    #[arg(long)]
    pub folder: Option<PathBuf>,
}

impl CorpusArgs {
    pub fn resolve(&self, settings: &Settings) -> PathBuf {
        self.folder
            .clone()
            .unwrap_or_else(|| settings.data_dir.clone())
    }
}
