use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An ordinary least squares fit of `y = intercept + slope x x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: Decimal,
    pub intercept: Decimal,
    /// Share of the variance of `y` explained by the line. A constant `y` is
    /// fitted exactly and reports 1.
    pub r_squared: Decimal,
    /// The fitted value at each input `x`.
    pub fitted: Vec<Decimal>,
}

/// The linear trend of a series against its period index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub periods: usize,
    pub regression: Regression,
    /// Compound average growth per period between the first and last values,
    /// in percent. `None` when either endpoint is not positive.
    pub average_growth: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

/// Pearson correlation between two series with a plain-language reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub coefficient: Decimal,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
}

/// Correlation of every column against every other, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `coefficients[i][j]` pairs `columns[i]` with `columns[j]`; `None` where
    /// the pair has too few rows or no variance.
    pub coefficients: Vec<Vec<Option<Decimal>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, x: &str, y: &str) -> Option<Decimal> {
        let i = self.columns.iter().position(|c| c == x)?;
        let j = self.columns.iter().position(|c| c == y)?;
        self.coefficients[i][j]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: Decimal,
    /// Sample standard deviation; `None` for a single observation.
    pub std_dev: Option<Decimal>,
    pub min: Decimal,
    pub max: Decimal,
}

/// Okun's law estimated from data: the yearly change in unemployment regressed
/// on growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OkunEstimate {
    pub coefficient: Decimal,
    pub r_squared: Decimal,
    /// The growth rate at which the fitted line predicts no change in
    /// unemployment.
    pub natural_growth: Option<Decimal>,
    pub observations: usize,
}

impl CorrelationStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Weak => "weak",
        }
    }
}

impl CorrelationDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationDirection::Positive => "positive",
            CorrelationDirection::Negative => "negative",
        }
    }
}
