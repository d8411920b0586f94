use core_types::{Direction, FormulaError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::math::{add, compounding_levels, horizon, mul, ratio, sub};

const RULE_OF_70: Decimal = dec!(70);

/// Approximate years for a quantity to double at `growth_rate` percent a year.
pub fn rule_of_70(growth_rate: Decimal) -> Result<Decimal, FormulaError> {
    if growth_rate <= Decimal::ZERO {
        return Err(FormulaError::InvalidArgument(format!(
            "the rule of 70 needs a positive growth rate, got {growth_rate}%"
        )));
    }
    ratio(RULE_OF_70, growth_rate, "growth rate in rule of 70")
}

/// `(growth_rate, years_to_double)` for each rate.
pub fn doubling_table(growth_rates: &[Decimal]) -> Result<Vec<(Decimal, Decimal)>, FormulaError> {
    growth_rates.iter().map(|g| Ok((*g, rule_of_70(*g)?))).collect()
}

/// Value of `initial` after each of `years` years of constant percentage growth.
///
/// `years` is capped at `MAX_PERIODS`.
pub fn compound_path(initial: Decimal, growth_rate: Decimal, years: u32) -> Result<Vec<Decimal>, FormulaError> {
    let years = horizon(years, "years")?;
    let factor = Decimal::ONE + growth_rate / Decimal::ONE_HUNDRED;
    if factor <= Decimal::ZERO {
        return Err(FormulaError::InvalidArgument(format!(
            "growth rate must be above -100%, got {growth_rate}%"
        )));
    }
    compounding_levels(factor, years, "growth path")?
        .into_iter()
        .map(|level| mul(initial, level, "growth path"))
        .collect()
}

/// Okun's coefficient and the growth rate that keeps unemployment flat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OkunParams {
    pub beta: Decimal,
    pub natural_growth: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OkunOutcome {
    pub unemployment_change: Decimal,
    pub new_unemployment: Decimal,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OkunTarget {
    pub annual_unemployment_change: Decimal,
    pub required_growth: Decimal,
    pub gap_to_natural: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OkunScenario {
    pub name: String,
    pub growth: Decimal,
    pub gap_to_natural: Decimal,
    pub outcome: OkunOutcome,
}

impl OkunParams {
    /// `change in u = -beta x (g - g*)`
    pub fn unemployment_change(&self, growth: Decimal) -> Result<Decimal, FormulaError> {
        let gap = sub(growth, self.natural_growth, "output growth gap")?;
        Ok(-mul(self.beta, gap, "Okun unemployment change")?)
    }

    pub fn apply(&self, initial_unemployment: Decimal, growth: Decimal) -> Result<OkunOutcome, FormulaError> {
        let unemployment_change = self.unemployment_change(growth)?;
        Ok(OkunOutcome {
            unemployment_change,
            new_unemployment: add(initial_unemployment, unemployment_change, "new unemployment")?,
            direction: direction_of(unemployment_change),
        })
    }

    /// Growth needed each year to move unemployment from `current` to `target`
    /// over `years` years.
    pub fn required_growth(
        &self,
        current: Decimal,
        target: Decimal,
        years: u32,
    ) -> Result<OkunTarget, FormulaError> {
        if years == 0 {
            return Err(FormulaError::InvalidArgument("years must be at least 1".to_string()));
        }
        let annual_unemployment_change = sub(target, current, "unemployment target gap")? / Decimal::from(years);
        let required_growth = sub(
            self.natural_growth,
            ratio(annual_unemployment_change, self.beta, "Okun coefficient")?,
            "required growth",
        )?;
        Ok(OkunTarget {
            annual_unemployment_change,
            required_growth,
            gap_to_natural: sub(required_growth, self.natural_growth, "gap to natural growth")?,
        })
    }
}

/// Runs Okun's law for each named growth scenario from the same starting point.
pub fn okun_scenarios(
    params: &OkunParams,
    initial_unemployment: Decimal,
    scenarios: &[(&str, Decimal)],
) -> Result<Vec<OkunScenario>, FormulaError> {
    scenarios
        .iter()
        .map(|(name, growth)| {
            Ok(OkunScenario {
                name: name.to_string(),
                growth: *growth,
                gap_to_natural: sub(*growth, params.natural_growth, "gap to natural growth")?,
                outcome: params.apply(initial_unemployment, *growth)?,
            })
        })
        .collect()
}

pub fn direction_of(change: Decimal) -> Direction {
    if change.is_zero() {
        Direction::Stable
    } else if change.is_sign_positive() {
        Direction::Rising
    } else {
        Direction::Falling
    }
}

/// The short-run Phillips curve `inflation = expected - beta x (u - u_n)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhillipsParams {
    pub expected_inflation: Decimal,
    pub beta: Decimal,
    pub natural_unemployment: Decimal,
}

impl PhillipsParams {
    pub fn inflation(&self, unemployment: Decimal) -> Result<Decimal, FormulaError> {
        let gap = sub(unemployment, self.natural_unemployment, "unemployment gap")?;
        sub(
            self.expected_inflation,
            mul(self.beta, gap, "Phillips inflation")?,
            "Phillips inflation",
        )
    }
}

/// Most points a single curve may be sampled at.
pub const MAX_CURVE_POINTS: usize = 1000;

/// `steps` evenly spaced `(unemployment, inflation)` points from `from` to `to`.
pub fn phillips_points(
    params: &PhillipsParams,
    from: Decimal,
    to: Decimal,
    steps: usize,
) -> Result<Vec<(Decimal, Decimal)>, FormulaError> {
    if !(2..=MAX_CURVE_POINTS).contains(&steps) {
        return Err(FormulaError::InvalidArgument(format!(
            "a curve needs between 2 and {MAX_CURVE_POINTS} points, got {steps}"
        )));
    }
    let step = sub(to, from, "curve range")? / Decimal::from(steps - 1);
    (0..steps)
        .map(|i| {
            let u = add(from, mul(step, Decimal::from(i), "curve point")?, "curve point")?;
            Ok((u, params.inflation(u)?))
        })
        .collect()
}
