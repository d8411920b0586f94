use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::{Classification, Concept};

/// The outputs of one evaluation.
///
/// Every output is a pure function of the `FormulaInput` it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaResult {
    pub concept: Concept,
    pub outputs: BTreeMap<String, Decimal>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub series: BTreeMap<String, Vec<Decimal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl FormulaResult {
    pub fn new(concept: Concept) -> Self {
        Self {
            concept,
            outputs: BTreeMap::new(),
            series: BTreeMap::new(),
            classification: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_output(mut self, name: &str, value: Decimal) -> Self {
        self.outputs.insert(name.to_string(), value);
        self
    }

    pub fn with_series(mut self, name: &str, values: Vec<Decimal>) -> Self {
        self.series.insert(name.to_string(), values);
        self
    }

    pub fn with_classification(mut self, label: impl Into<Classification>) -> Self {
        self.classification = Some(label.into());
        self
    }

    pub fn with_warning(mut self, warning: String) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.outputs.get(name).copied()
    }

    pub fn series(&self, name: &str) -> Option<&[Decimal]> {
        self.series.get(name).map(Vec::as_slice)
    }
}
