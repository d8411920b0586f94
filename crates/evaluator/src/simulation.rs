use core_types::{Direction, FormulaError, Outlook};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::math::{add, mul, non_negative, ratio, sub};
use crate::relations::{OkunParams, direction_of};

/// Spending is expressed against an economy of this size when turned into a
/// growth rate.
const FISCAL_GDP_SCALE: Decimal = dec!(1000);
/// Share of a fiscal growth boost that passes through to inflation.
const FISCAL_INFLATION_PASS_THROUGH: Decimal = dec!(0.3);
/// Growth points gained per point of rate cut.
const MONETARY_GROWTH_PER_POINT: Decimal = dec!(0.5);
/// Inflation points gained per point of rate cut.
const MONETARY_INFLATION_PER_POINT: Decimal = dec!(0.2);
/// Multiplier applied to a change in household consumption.
pub const HOUSEHOLD_SPENDING_MULTIPLIER: Decimal = dec!(1.5);
/// Thousand jobs per unit of GDP effect (one billion creates about a thousand jobs).
pub const JOBS_PER_GDP_UNIT: Decimal = dec!(0.001);

/// The four headline aggregates, all in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroState {
    pub growth: Decimal,
    pub inflation: Decimal,
    pub unemployment: Decimal,
    pub interest_rate: Decimal,
}

/// `base + weight * (value - anchor)`, checked.
fn lean(base: Decimal, weight: Decimal, value: Decimal, anchor: Decimal) -> Result<Decimal, FormulaError> {
    let gap = sub(value, anchor, "interaction gap")?;
    add(base, mul(weight, gap, "interaction term")?, "interaction term")
}

/// Advances the stylized feedback loop by one year.
///
/// Growth reacts to inflation and rates, inflation to growth and slack,
/// unemployment to growth through Okun's law, and the policy rate follows a
/// Taylor-style rule on the new inflation and growth.
pub fn interaction_step(state: &MacroState) -> Result<MacroState, FormulaError> {
    let growth = lean(
        lean(dec!(2.0), dec!(0.3), state.inflation, dec!(2))?,
        dec!(-0.2),
        state.interest_rate,
        dec!(3),
    )?;
    let inflation = lean(
        lean(dec!(2.0), dec!(0.5), state.growth, dec!(2))?,
        dec!(-0.3),
        state.unemployment,
        dec!(6),
    )?;
    let unemployment = lean(state.unemployment, dec!(-0.5), growth, dec!(2))?;
    let interest_rate = lean(lean(dec!(2.0), dec!(0.5), inflation, dec!(2))?, dec!(0.5), growth, dec!(2))?;

    Ok(MacroState {
        growth,
        inflation,
        unemployment,
        interest_rate,
    })
}

/// Where the economy stands before a policy shock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Economy {
    pub growth: Decimal,
    pub unemployment: Decimal,
    pub inflation: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolicyScenario {
    pub growth_effect: Decimal,
    pub new_growth: Decimal,
    pub unemployment_change: Decimal,
    pub new_unemployment: Decimal,
    pub inflation_effect: Decimal,
    pub new_inflation: Decimal,
}

fn scenario(
    economy: &Economy,
    okun: &OkunParams,
    growth_effect: Decimal,
    inflation_effect: Decimal,
) -> Result<PolicyScenario, FormulaError> {
    let new_growth = add(economy.growth, growth_effect, "new growth")?;
    let unemployment_change = okun.unemployment_change(new_growth)?;
    Ok(PolicyScenario {
        growth_effect,
        new_growth,
        unemployment_change,
        new_unemployment: add(economy.unemployment, unemployment_change, "new unemployment")?,
        inflation_effect,
        new_inflation: add(economy.inflation, inflation_effect, "new inflation")?,
    })
}

/// Extra government spending, scaled by the spending multiplier.
pub fn fiscal_stimulus(
    economy: &Economy,
    spending: Decimal,
    multiplier: Decimal,
    okun: &OkunParams,
) -> Result<PolicyScenario, FormulaError> {
    let boost = mul(spending, multiplier, "fiscal boost")?;
    let growth_effect = ratio(boost, FISCAL_GDP_SCALE, "economy size")?;
    let inflation_effect = mul(FISCAL_INFLATION_PASS_THROUGH, growth_effect, "fiscal inflation effect")?;
    scenario(economy, okun, growth_effect, inflation_effect)
}

/// A cut of `rate_cut` points in the policy rate.
pub fn monetary_easing(economy: &Economy, rate_cut: Decimal, okun: &OkunParams) -> Result<PolicyScenario, FormulaError> {
    scenario(
        economy,
        okun,
        mul(MONETARY_GROWTH_PER_POINT, rate_cut, "monetary growth effect")?,
        mul(MONETARY_INFLATION_PER_POINT, rate_cut, "monetary inflation effect")?,
    )
}

/// How household expectations move consumption and, through the spending
/// multiplier, GDP and employment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseholdResponse {
    pub outlook: Outlook,
    pub new_consumption: Decimal,
    pub consumption_change: Decimal,
    pub gdp_effect: Decimal,
    /// Thousands of jobs.
    pub employment_effect: Decimal,
    pub direction: Direction,
    /// Pessimistic households cut spending and GDP falls with it.
    pub paradox_of_thrift: bool,
}

/// Households rescale consumption by their outlook; the change feeds GDP through
/// `HOUSEHOLD_SPENDING_MULTIPLIER`.
pub fn household_outlook(consumption: Decimal, outlook: Outlook) -> Result<HouseholdResponse, FormulaError> {
    let consumption = non_negative(consumption, "consumption")?;
    let new_consumption = mul(consumption, outlook.consumption_multiplier(), "new consumption")?;
    let consumption_change = sub(new_consumption, consumption, "consumption change")?;
    let gdp_effect = mul(consumption_change, HOUSEHOLD_SPENDING_MULTIPLIER, "household GDP effect")?;
    Ok(HouseholdResponse {
        outlook,
        new_consumption,
        consumption_change,
        gdp_effect,
        employment_effect: mul(gdp_effect, JOBS_PER_GDP_UNIT, "employment effect")?,
        direction: direction_of(gdp_effect),
        paradox_of_thrift: outlook.is_pessimistic() && gdp_effect < Decimal::ZERO,
    })
}
