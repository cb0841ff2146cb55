//! Clinical risk-factor record ingestion and narrative text classification.

pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod model;
pub mod nlp;
pub mod viz;
