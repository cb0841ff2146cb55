//! Per-patient aggregation of visit records.

use super::{annotation::RiskFactor, record::Record};

/// All records filed under one patient identifier, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    id: String,
    records: Vec<Record>,
}

impl Patient {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            records: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add_record(&mut self, record: Record) {
        self.records.push(record);
    }

    /// True when any record annotates `condition` with exactly `indicator`.
    pub fn factor_indicator(&self, condition: RiskFactor, indicator: &str) -> bool {
        self.records
            .iter()
            .flat_map(|record| record.factors.iter())
            .any(|factor| factor.matches(condition, indicator))
    }

    /// Narratives of every record joined without a separator.
    pub fn text(&self) -> String {
        self.records.iter().map(|record| record.text.as_str()).collect()
    }
}
