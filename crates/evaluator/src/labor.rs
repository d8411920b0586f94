use core_types::FormulaError;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::math::{add, non_negative, percent, sub};

/// A snapshot of the working-age population by activity status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaborMarket {
    pub employed: Decimal,
    pub unemployed: Decimal,
    pub working_age_population: Decimal,
}

/// The headline labor-market ratios, all in percent.
///
/// Unemployment is measured against the labor force; participation and
/// employment are measured against the working-age population. The two
/// denominators are different, so the rates do not sum to anything meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaborIndicators {
    pub labor_force: Decimal,
    pub inactive: Decimal,
    pub unemployment_rate: Decimal,
    pub participation_rate: Decimal,
    pub employment_rate: Decimal,
}

/// `labor_force = employed + unemployed`
pub fn labor_force(employed: Decimal, unemployed: Decimal) -> Result<Decimal, FormulaError> {
    add(
        non_negative(employed, "employed")?,
        non_negative(unemployed, "unemployed")?,
        "labor force",
    )
}

pub fn unemployment_rate(employed: Decimal, unemployed: Decimal) -> Result<Decimal, FormulaError> {
    let labor_force = labor_force(employed, unemployed)?;
    percent(unemployed, labor_force, "labor force in unemployment rate")
}

pub fn participation_rate(
    labor_force: Decimal,
    working_age_population: Decimal,
) -> Result<Decimal, FormulaError> {
    let population = population_covering(labor_force, working_age_population)?;
    percent(labor_force, population, "working-age population in participation rate")
}

pub fn employment_rate(employed: Decimal, working_age_population: Decimal) -> Result<Decimal, FormulaError> {
    let employed = non_negative(employed, "employed")?;
    let population = population_covering(employed, working_age_population)?;
    percent(employed, population, "working-age population in employment rate")
}

impl LaborMarket {
    pub fn indicators(&self) -> Result<LaborIndicators, FormulaError> {
        let labor_force = labor_force(self.employed, self.unemployed)?;
        Ok(LaborIndicators {
            labor_force,
            inactive: sub(self.working_age_population, labor_force, "inactive population")?,
            unemployment_rate: unemployment_rate(self.employed, self.unemployed)?,
            participation_rate: participation_rate(labor_force, self.working_age_population)?,
            employment_rate: employment_rate(self.employed, self.working_age_population)?,
        })
    }
}

/// The working-age population must be non-negative and contain the group being
/// measured against it.
fn population_covering(group: Decimal, working_age_population: Decimal) -> Result<Decimal, FormulaError> {
    let population = non_negative(working_age_population, "working_age_population")?;
    if group > population {
        return Err(FormulaError::InvalidArgument(format!(
            "{group} people cannot be drawn from a working-age population of {population}"
        )));
    }
    Ok(population)
}
