use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::enums::Concept;
use crate::error::FormulaError;

/// The named inputs for a single evaluation.
///
/// The caller owns this value and builds a fresh one per evaluation; the
/// evaluator only ever reads from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormulaInput {
    #[serde(default)]
    pub values: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub series: BTreeMap<String, Vec<Decimal>>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl FormulaInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: &str, value: Decimal) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn with_series(mut self, name: &str, values: Vec<Decimal>) -> Self {
        self.series.insert(name.to_string(), values);
        self
    }

    pub fn with_label(mut self, name: &str, value: &str) -> Self {
        self.labels.insert(name.to_string(), value.to_string());
        self
    }

    pub fn require(&self, concept: Concept, name: &str) -> Result<Decimal, FormulaError> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| missing(concept, name))
    }

    pub fn optional(&self, name: &str) -> Option<Decimal> {
        self.values.get(name).copied()
    }

    pub fn require_series(&self, concept: Concept, name: &str) -> Result<&[Decimal], FormulaError> {
        self.series
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| missing(concept, name))
    }

    pub fn require_label(&self, concept: Concept, name: &str) -> Result<&str, FormulaError> {
        self.labels
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| missing(concept, name))
    }

    /// Fills in scalar values the caller did not supply. Values already
    /// present always win.
    pub fn merge_defaults(mut self, defaults: &HashMap<String, Decimal>) -> Self {
        for (name, value) in defaults {
            self.values.entry(name.clone()).or_insert(*value);
        }
        self
    }
}

fn missing(concept: Concept, name: &str) -> FormulaError {
    FormulaError::MissingInput {
        concept: concept.to_string(),
        name: name.to_string(),
    }
}
