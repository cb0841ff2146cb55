//! Runtime configuration utilities for n2c2-risk.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::model::TrainConfig;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory holding the record corpus, one file per visit.
    pub data_dir: PathBuf,
    /// Root folder for feature rankings and other outputs.
    pub outputs_dir: PathBuf,
    /// Features shown on each side of the ranking.
    pub top_n: usize,
    /// Seed for the train/held-out split.
    pub split_seed: u64,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));
        let top_n = env::var("TOP_N")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);
        let split_seed = env::var("SPLIT_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(42);

        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            data_dir,
            outputs_dir,
            top_n,
            split_seed,
        })
    }

    /// Pipeline parameters with the configured ranking size and seed.
    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            top_n: self.top_n,
            seed: self.split_seed,
            ..TrainConfig::default()
        }
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
