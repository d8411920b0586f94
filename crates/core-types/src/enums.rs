use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormulaError;

/// The closed set of economic formulas and identities the evaluator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Concept {
    GdpProduction,
    GdpExpenditure,
    GdpIncome,
    NominalRealGdp,
    GrowthRate,
    Deflator,
    InflationFromDeflator,
    Cpi,
    InflationRate,
    PurchasingPower,
    UnemploymentRate,
    ParticipationRate,
    EmploymentRate,
    #[serde(rename = "rule-of-70")]
    RuleOf70,
    OkunsLaw,
    OkunTargetGrowth,
    PhillipsCurve,
    PolicyEffect,
    EconomicInteractions,
    FiscalStimulus,
    MonetaryEasing,
    HouseholdOutlook,
}

impl Concept {
    pub const ALL: [Concept; 22] = [
        Concept::GdpProduction,
        Concept::GdpExpenditure,
        Concept::GdpIncome,
        Concept::NominalRealGdp,
        Concept::GrowthRate,
        Concept::Deflator,
        Concept::InflationFromDeflator,
        Concept::Cpi,
        Concept::InflationRate,
        Concept::PurchasingPower,
        Concept::UnemploymentRate,
        Concept::ParticipationRate,
        Concept::EmploymentRate,
        Concept::RuleOf70,
        Concept::OkunsLaw,
        Concept::OkunTargetGrowth,
        Concept::PhillipsCurve,
        Concept::PolicyEffect,
        Concept::EconomicInteractions,
        Concept::FiscalStimulus,
        Concept::MonetaryEasing,
        Concept::HouseholdOutlook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Concept::GdpProduction => "gdp-production",
            Concept::GdpExpenditure => "gdp-expenditure",
            Concept::GdpIncome => "gdp-income",
            Concept::NominalRealGdp => "nominal-real-gdp",
            Concept::GrowthRate => "growth-rate",
            Concept::Deflator => "deflator",
            Concept::InflationFromDeflator => "inflation-from-deflator",
            Concept::Cpi => "cpi",
            Concept::InflationRate => "inflation-rate",
            Concept::PurchasingPower => "purchasing-power",
            Concept::UnemploymentRate => "unemployment-rate",
            Concept::ParticipationRate => "participation-rate",
            Concept::EmploymentRate => "employment-rate",
            Concept::RuleOf70 => "rule-of-70",
            Concept::OkunsLaw => "okuns-law",
            Concept::OkunTargetGrowth => "okun-target-growth",
            Concept::PhillipsCurve => "phillips-curve",
            Concept::PolicyEffect => "policy-effect",
            Concept::EconomicInteractions => "economic-interactions",
            Concept::FiscalStimulus => "fiscal-stimulus",
            Concept::MonetaryEasing => "monetary-easing",
            Concept::HouseholdOutlook => "household-outlook",
        }
    }

    /// A one-line, human readable statement of the formula.
    pub fn description(&self) -> &'static str {
        match self {
            Concept::GdpProduction => "GDP = sum of value added (production - intermediate consumption)",
            Concept::GdpExpenditure => "GDP = C + I + G + (X - M)",
            Concept::GdpIncome => "GDP = wages + profits + interest + taxes (+ rents)",
            Concept::NominalRealGdp => "nominal = Q x P_t, real = Q x P_base",
            Concept::GrowthRate => "g = (Y_t - Y_t-1) / Y_t-1 x 100",
            Concept::Deflator => "deflator = nominal GDP / real GDP",
            Concept::InflationFromDeflator => "inflation ~ nominal growth - real growth",
            Concept::Cpi => "CPI = cost of base basket at current prices / at base prices x 100",
            Concept::InflationRate => "inflation = (CPI_t - CPI_t-1) / CPI_t-1 x 100",
            Concept::PurchasingPower => "PA_n = amount / (1 + inflation)^n",
            Concept::UnemploymentRate => "u = unemployed / labor force x 100",
            Concept::ParticipationRate => "participation = labor force / working-age population x 100",
            Concept::EmploymentRate => "employment = employed / working-age population x 100",
            Concept::RuleOf70 => "years to double = 70 / g",
            Concept::OkunsLaw => "change in u = -beta x (g - g*)",
            Concept::OkunTargetGrowth => "required g = g* - (annual change in u / beta)",
            Concept::PhillipsCurve => "inflation = expected - beta x (u - u_n)",
            Concept::PolicyEffect => "fixed effects of a policy on growth, inflation, unemployment, deficit, rates",
            Concept::EconomicInteractions => "one-year step of the growth/inflation/unemployment/rate feedback loop",
            Concept::FiscalStimulus => "growth boost of spending x multiplier, passed through Okun and prices",
            Concept::MonetaryEasing => "growth boost of a rate cut, passed through Okun and prices",
            Concept::HouseholdOutlook => "GDP effect = consumption x (outlook multiplier - 1) x 1.5; jobs = GDP effect x 0.001",
        }
    }

    /// Scalar inputs that must be present.
    pub fn required_values(&self) -> &'static [&'static str] {
        match self {
            Concept::GdpProduction | Concept::NominalRealGdp | Concept::Cpi | Concept::PolicyEffect => &[],
            Concept::GdpExpenditure => &["consumption", "investment", "government_spending", "exports", "imports"],
            Concept::GdpIncome => &["wages", "profits", "interest", "taxes"],
            Concept::GrowthRate => &["previous", "current"],
            Concept::Deflator => &["nominal", "real"],
            Concept::InflationFromDeflator => &["nominal_growth", "real_growth"],
            Concept::InflationRate => &["previous_cpi", "current_cpi"],
            Concept::PurchasingPower => &["amount", "inflation_rate", "periods"],
            Concept::UnemploymentRate => &["employed", "unemployed"],
            Concept::ParticipationRate => &["employed", "unemployed", "working_age_population"],
            Concept::EmploymentRate => &["employed", "working_age_population"],
            Concept::RuleOf70 => &["growth_rate"],
            Concept::OkunsLaw => &["initial_unemployment", "natural_growth", "beta", "growth"],
            Concept::OkunTargetGrowth => &["current_unemployment", "target_unemployment", "natural_growth", "beta"],
            Concept::PhillipsCurve => &["expected_inflation", "beta", "unemployment", "natural_unemployment"],
            Concept::EconomicInteractions => &["growth", "inflation", "unemployment", "interest_rate"],
            Concept::FiscalStimulus => &[
                "growth",
                "unemployment",
                "inflation",
                "spending",
                "multiplier",
                "beta",
                "natural_growth",
            ],
            Concept::MonetaryEasing => &["growth", "unemployment", "inflation", "rate_cut", "beta", "natural_growth"],
            Concept::HouseholdOutlook => &["consumption"],
        }
    }

    /// Scalar inputs with a documented fallback when absent.
    pub fn optional_values(&self) -> &'static [&'static str] {
        match self {
            Concept::GdpIncome => &["rents"],
            Concept::NominalRealGdp => &["base_period"],
            Concept::OkunTargetGrowth => &["years"],
            _ => &[],
        }
    }

    pub fn required_series(&self) -> &'static [&'static str] {
        match self {
            Concept::GdpProduction => &["production", "intermediate_consumption"],
            Concept::NominalRealGdp => &["quantities", "prices"],
            Concept::Cpi => &["base_quantities", "base_prices", "current_prices"],
            _ => &[],
        }
    }

    pub fn required_labels(&self) -> &'static [&'static str] {
        match self {
            Concept::PolicyEffect => &["policy"],
            Concept::HouseholdOutlook => &["outlook"],
            _ => &[],
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Concept {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Concept::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FormulaError::UnknownLabel {
                name: "concept".to_string(),
                value: s.to_string(),
            })
    }
}

/// Phase of the business cycle implied by a growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessCycle {
    Expansion,
    Recession,
    Stagnation,
}

/// Severity band of an inflation rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InflationBand {
    Mild,
    Moderate,
    Galloping,
    Hyperinflation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Rising,
    Falling,
    Stable,
}

/// The qualitative label some concepts attach to their numeric outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Classification {
    Cycle(BusinessCycle),
    Inflation(InflationBand),
    Direction(Direction),
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Cycle(BusinessCycle::Expansion) => "expansion",
            Classification::Cycle(BusinessCycle::Recession) => "recession",
            Classification::Cycle(BusinessCycle::Stagnation) => "stagnation",
            Classification::Inflation(InflationBand::Mild) => "mild",
            Classification::Inflation(InflationBand::Moderate) => "moderate",
            Classification::Inflation(InflationBand::Galloping) => "galloping",
            Classification::Inflation(InflationBand::Hyperinflation) => "hyperinflation",
            Classification::Direction(Direction::Rising) => "rising",
            Classification::Direction(Direction::Falling) => "falling",
            Classification::Direction(Direction::Stable) => "stable",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BusinessCycle> for Classification {
    fn from(value: BusinessCycle) -> Self {
        Classification::Cycle(value)
    }
}

impl From<InflationBand> for Classification {
    fn from(value: InflationBand) -> Self {
        Classification::Inflation(value)
    }
}

impl From<Direction> for Classification {
    fn from(value: Direction) -> Self {
        Classification::Direction(value)
    }
}

/// The economic policies covered by the constant policy-effect table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    ExpansionaryFiscal,
    ContractionaryFiscal,
    ExpansionaryMonetary,
    ContractionaryMonetary,
    ExpansionaryTrade,
    LaborMarketReform,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::ExpansionaryFiscal,
        PolicyKind::ContractionaryFiscal,
        PolicyKind::ExpansionaryMonetary,
        PolicyKind::ContractionaryMonetary,
        PolicyKind::ExpansionaryTrade,
        PolicyKind::LaborMarketReform,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::ExpansionaryFiscal => "expansionary-fiscal",
            PolicyKind::ContractionaryFiscal => "contractionary-fiscal",
            PolicyKind::ExpansionaryMonetary => "expansionary-monetary",
            PolicyKind::ContractionaryMonetary => "contractionary-monetary",
            PolicyKind::ExpansionaryTrade => "expansionary-trade",
            PolicyKind::LaborMarketReform => "labor-market-reform",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| FormulaError::UnknownLabel {
                name: "policy".to_string(),
                value: s.to_string(),
            })
    }
}

/// What households expect of the economy, from most to least confident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outlook {
    VeryOptimistic,
    Optimistic,
    Neutral,
    Pessimistic,
    VeryPessimistic,
}

impl Outlook {
    pub const ALL: [Outlook; 5] = [
        Outlook::VeryOptimistic,
        Outlook::Optimistic,
        Outlook::Neutral,
        Outlook::Pessimistic,
        Outlook::VeryPessimistic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Outlook::VeryOptimistic => "very-optimistic",
            Outlook::Optimistic => "optimistic",
            Outlook::Neutral => "neutral",
            Outlook::Pessimistic => "pessimistic",
            Outlook::VeryPessimistic => "very-pessimistic",
        }
    }

    /// Factor applied to current consumption.
    pub fn consumption_multiplier(&self) -> Decimal {
        match self {
            Outlook::VeryOptimistic => dec!(1.2),
            Outlook::Optimistic => dec!(1.1),
            Outlook::Neutral => dec!(1.0),
            Outlook::Pessimistic => dec!(0.9),
            Outlook::VeryPessimistic => dec!(0.8),
        }
    }

    pub fn is_pessimistic(&self) -> bool {
        matches!(self, Outlook::Pessimistic | Outlook::VeryPessimistic)
    }
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outlook {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Outlook::ALL
            .iter()
            .copied()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| FormulaError::UnknownLabel {
                name: "outlook".to_string(),
                value: s.to_string(),
            })
    }
}
