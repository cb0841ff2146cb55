//! Entry point wiring CLI dispatch to the ingestion and training pipeline.

use anyhow::Result;
use n2c2_risk::{cli::Cli, config::Settings, logging};
use tracing::info;

fn main() -> Result<()> {
    logging::init_tracing()?;
    let cli = Cli::parse();
    let settings = Settings::load()?;

    info!(?cli, "starting command");
    cli.dispatch(settings)
}
