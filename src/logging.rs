//! Structured logging bootstrap using `tracing`.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset: this crate at `info`, dependencies at `warn`.
pub const DEFAULT_DIRECTIVES: &str = concat!(env!("CARGO_CRATE_NAME"), "=info,warn");

/// Install the global subscriber. Logs go to stderr; stdout carries command output.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = filter_from_env()?;
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).try_init()?;

    tracing::debug!(default = DEFAULT_DIRECTIVES, "tracing initialised");
    Ok(())
}

/// `RUST_LOG` when set and valid, otherwise [`DEFAULT_DIRECTIVES`].
fn filter_from_env() -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(DEFAULT_DIRECTIVES)?),
    }
}

