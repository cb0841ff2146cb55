//! Record ingestion and per-patient aggregation layer.

pub mod annotation;
pub mod dataset;
pub mod error;
pub mod patient;
pub mod record;

pub use annotation::{Condition, Medication, RiskFactor};
pub use dataset::Dataset;
pub use error::{DatasetError, RecordError};
pub use patient::Patient;
pub use record::Record;
