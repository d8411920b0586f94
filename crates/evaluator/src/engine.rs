use core_types::{Concept, FormulaError, FormulaInput, FormulaResult, Outlook, PolicyKind};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::gdp::{self, ExpenditureComponents, IncomeComponents};
use crate::labor::{self, LaborMarket};
use crate::math::{mul, sub, whole_number};
use crate::policy;
use crate::prices;
use crate::relations::{self, OkunParams, PhillipsParams};
use crate::simulation::{self, Economy, MacroState, PolicyScenario};

/// A stateless evaluator that maps a concept and its named inputs to named outputs.
#[derive(Debug, Default)]
pub struct FormulaEvaluator {}

impl FormulaEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for evaluating a formula.
    ///
    /// # Arguments
    ///
    /// * `concept` - Which formula or identity to evaluate.
    /// * `input` - The caller-owned named inputs. Only the names the concept
    ///   needs are read; anything else is ignored.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `FormulaResult` or the first `FormulaError`
    /// encountered. No partial result is ever returned.
    pub fn evaluate(&self, concept: Concept, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let result = match concept {
            Concept::GdpProduction => self.eval_gdp_production(input),
            Concept::GdpExpenditure => self.eval_gdp_expenditure(input),
            Concept::GdpIncome => self.eval_gdp_income(input),
            Concept::NominalRealGdp => self.eval_nominal_real(input),
            Concept::GrowthRate => self.eval_growth_rate(input),
            Concept::Deflator => self.eval_deflator(input),
            Concept::InflationFromDeflator => self.eval_inflation_from_deflator(input),
            Concept::Cpi => self.eval_cpi(input),
            Concept::InflationRate => self.eval_inflation_rate(input),
            Concept::PurchasingPower => self.eval_purchasing_power(input),
            Concept::UnemploymentRate => self.eval_unemployment_rate(input),
            Concept::ParticipationRate => self.eval_participation_rate(input),
            Concept::EmploymentRate => self.eval_employment_rate(input),
            Concept::RuleOf70 => self.eval_rule_of_70(input),
            Concept::OkunsLaw => self.eval_okuns_law(input),
            Concept::OkunTargetGrowth => self.eval_okun_target(input),
            Concept::PhillipsCurve => self.eval_phillips(input),
            Concept::PolicyEffect => self.eval_policy_effect(input),
            Concept::EconomicInteractions => self.eval_interactions(input),
            Concept::FiscalStimulus => self.eval_fiscal_stimulus(input),
            Concept::MonetaryEasing => self.eval_monetary_easing(input),
            Concept::HouseholdOutlook => self.eval_household_outlook(input),
        };

        match &result {
            Ok(r) => tracing::debug!(%concept, outputs = r.outputs.len(), "Evaluated formula"),
            Err(e) => tracing::debug!(%concept, error = %e, "Formula evaluation failed"),
        }
        result
    }

    // --- GDP ---

    fn eval_gdp_production(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::GdpProduction;
        let production = input.require_series(concept, "production")?;
        let intermediate = input.require_series(concept, "intermediate_consumption")?;
        let outcome = gdp::production_approach(production, intermediate)?;

        let mut result = FormulaResult::new(concept)
            .with_output("gdp", outcome.gdp)
            .with_output("total_production", outcome.total_production)
            .with_output("total_intermediate_consumption", outcome.total_intermediate_consumption);

        for &index in &outcome.negative_value_added {
            tracing::warn!(industry = index, value_added = %outcome.value_added[index], "Negative value added");
            result = result.with_warning(format!(
                "industry {index} has negative value added ({})",
                outcome.value_added[index]
            ));
        }
        Ok(result.with_series("value_added", outcome.value_added))
    }

    fn eval_gdp_expenditure(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::GdpExpenditure;
        let components = ExpenditureComponents {
            consumption: input.require(concept, "consumption")?,
            investment: input.require(concept, "investment")?,
            government_spending: input.require(concept, "government_spending")?,
            exports: input.require(concept, "exports")?,
            imports: input.require(concept, "imports")?,
        };
        Ok(FormulaResult::new(concept)
            .with_output("net_exports", components.net_exports()?)
            .with_output("gdp", components.gdp()?))
    }

    fn eval_gdp_income(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::GdpIncome;
        let components = IncomeComponents {
            wages: input.require(concept, "wages")?,
            profits: input.require(concept, "profits")?,
            interest: input.require(concept, "interest")?,
            taxes: input.require(concept, "taxes")?,
            rents: input.optional("rents"),
        };
        Ok(FormulaResult::new(concept).with_output("gdp", components.gdp()?))
    }

    fn eval_nominal_real(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::NominalRealGdp;
        let quantities = input.require_series(concept, "quantities")?;
        let prices = input.require_series(concept, "prices")?;
        let base_period = match input.optional("base_period") {
            Some(value) => whole_number(value, "base_period")? as usize,
            None => 0,
        };
        let series = gdp::nominal_real(quantities, prices, base_period)?;

        let mut result = FormulaResult::new(concept).with_output("base_price", series.base_price);
        if let (Some(nominal), Some(real)) = (series.nominal.last(), series.real.last()) {
            result = result
                .with_output("latest_nominal", *nominal)
                .with_output("latest_real", *real);
        }
        if let Some(latest) = series.real_growth.last() {
            result = result.with_classification(gdp::classify_growth(*latest));
        }
        Ok(result
            .with_series("nominal", series.nominal)
            .with_series("real", series.real)
            .with_series("deflator", series.deflator)
            .with_series("nominal_growth", series.nominal_growth)
            .with_series("real_growth", series.real_growth))
    }

    fn eval_growth_rate(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::GrowthRate;
        let growth = gdp::growth_rate(input.require(concept, "previous")?, input.require(concept, "current")?)?;
        Ok(FormulaResult::new(concept)
            .with_output("growth_rate", growth)
            .with_classification(gdp::classify_growth(growth)))
    }

    // --- Prices ---

    fn eval_deflator(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::Deflator;
        let deflator = prices::deflator(input.require(concept, "nominal")?, input.require(concept, "real")?)?;
        Ok(FormulaResult::new(concept)
            .with_output("deflator", deflator)
            .with_output("deflator_index", mul(deflator, Decimal::ONE_HUNDRED, "deflator index")?))
    }

    fn eval_inflation_from_deflator(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::InflationFromDeflator;
        let inflation = prices::inflation_from_deflator(
            input.require(concept, "nominal_growth")?,
            input.require(concept, "real_growth")?,
        )?;
        Ok(FormulaResult::new(concept)
            .with_output("inflation", inflation.approximate)
            .with_output("inflation_exact", inflation.exact))
    }

    fn eval_cpi(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::Cpi;
        let outcome = prices::cpi(
            input.require_series(concept, "base_quantities")?,
            input.require_series(concept, "base_prices")?,
            input.require_series(concept, "current_prices")?,
        )?;
        Ok(FormulaResult::new(concept)
            .with_output("base_cost", outcome.base_cost)
            .with_output("current_cost", outcome.current_cost)
            .with_output("cpi", outcome.cpi)
            .with_output("inflation", outcome.inflation))
    }

    fn eval_inflation_rate(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::InflationRate;
        let rate = prices::inflation_rate(
            input.require(concept, "previous_cpi")?,
            input.require(concept, "current_cpi")?,
        )?;
        Ok(FormulaResult::new(concept)
            .with_output("inflation_rate", rate)
            .with_classification(prices::classify_inflation(rate)))
    }

    fn eval_purchasing_power(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::PurchasingPower;
        let periods = whole_number(input.require(concept, "periods")?, "periods")?;
        let outcome = prices::purchasing_power(
            input.require(concept, "amount")?,
            input.require(concept, "inflation_rate")?,
            periods,
        )?;
        Ok(FormulaResult::new(concept)
            .with_output("purchasing_power", outcome.value)
            .with_output("loss_pct", outcome.loss_pct)
            .with_series("path", outcome.path))
    }

    // --- Labor ---

    fn eval_unemployment_rate(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::UnemploymentRate;
        let employed = input.require(concept, "employed")?;
        let unemployed = input.require(concept, "unemployed")?;
        Ok(FormulaResult::new(concept)
            .with_output("labor_force", labor::labor_force(employed, unemployed)?)
            .with_output("unemployment_rate", labor::unemployment_rate(employed, unemployed)?))
    }

    fn eval_participation_rate(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::ParticipationRate;
        let market = LaborMarket {
            employed: input.require(concept, "employed")?,
            unemployed: input.require(concept, "unemployed")?,
            working_age_population: input.require(concept, "working_age_population")?,
        };
        let labor_force = labor::labor_force(market.employed, market.unemployed)?;
        let participation = labor::participation_rate(labor_force, market.working_age_population)?;
        Ok(FormulaResult::new(concept)
            .with_output("labor_force", labor_force)
            .with_output("participation_rate", participation)
            .with_output(
                "inactive",
                sub(market.working_age_population, labor_force, "inactive population")?,
            ))
    }

    fn eval_employment_rate(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::EmploymentRate;
        let rate = labor::employment_rate(
            input.require(concept, "employed")?,
            input.require(concept, "working_age_population")?,
        )?;
        Ok(FormulaResult::new(concept).with_output("employment_rate", rate))
    }

    // --- Growth relations ---

    fn eval_rule_of_70(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::RuleOf70;
        let years = relations::rule_of_70(input.require(concept, "growth_rate")?)?;
        Ok(FormulaResult::new(concept).with_output("years_to_double", years))
    }

    fn eval_okuns_law(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::OkunsLaw;
        let params = okun_params(concept, input)?;
        let outcome = params.apply(
            input.require(concept, "initial_unemployment")?,
            input.require(concept, "growth")?,
        )?;
        Ok(FormulaResult::new(concept)
            .with_output("unemployment_change", outcome.unemployment_change)
            .with_output("new_unemployment", outcome.new_unemployment)
            .with_classification(outcome.direction))
    }

    fn eval_okun_target(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::OkunTargetGrowth;
        let params = okun_params(concept, input)?;
        let years = match input.optional("years") {
            Some(value) => whole_number(value, "years")?,
            None => 1,
        };
        let target = params.required_growth(
            input.require(concept, "current_unemployment")?,
            input.require(concept, "target_unemployment")?,
            years,
        )?;
        Ok(FormulaResult::new(concept)
            .with_output("annual_unemployment_change", target.annual_unemployment_change)
            .with_output("required_growth", target.required_growth)
            .with_output("gap_to_natural", target.gap_to_natural))
    }

    fn eval_phillips(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::PhillipsCurve;
        let curve = PhillipsParams {
            expected_inflation: input.require(concept, "expected_inflation")?,
            beta: input.require(concept, "beta")?,
            natural_unemployment: input.require(concept, "natural_unemployment")?,
        };
        let unemployment = input.require(concept, "unemployment")?;
        Ok(FormulaResult::new(concept)
            .with_output("inflation", curve.inflation(unemployment)?)
            .with_output(
                "unemployment_gap",
                sub(unemployment, curve.natural_unemployment, "unemployment gap")?,
            ))
    }

    // --- Policy ---

    fn eval_policy_effect(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::PolicyEffect;
        let kind = PolicyKind::from_str(input.require_label(concept, "policy")?)?;
        let effect = policy::lookup(kind);
        Ok(FormulaResult::new(concept)
            .with_output("growth", effect.growth)
            .with_output("inflation", effect.inflation)
            .with_output("unemployment", effect.unemployment)
            .with_output("deficit", effect.deficit)
            .with_output("interest_rate", effect.interest_rate))
    }

    fn eval_interactions(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::EconomicInteractions;
        let state = MacroState {
            growth: input.require(concept, "growth")?,
            inflation: input.require(concept, "inflation")?,
            unemployment: input.require(concept, "unemployment")?,
            interest_rate: input.require(concept, "interest_rate")?,
        };
        let next = simulation::interaction_step(&state)?;
        Ok(FormulaResult::new(concept)
            .with_output("next_growth", next.growth)
            .with_output("next_inflation", next.inflation)
            .with_output("next_unemployment", next.unemployment)
            .with_output("next_interest_rate", next.interest_rate)
            .with_output("growth_change", sub(next.growth, state.growth, "growth change")?)
            .with_output("inflation_change", sub(next.inflation, state.inflation, "inflation change")?)
            .with_output("unemployment_change", sub(next.unemployment, state.unemployment, "unemployment change")?)
            .with_output("interest_rate_change", sub(next.interest_rate, state.interest_rate, "interest rate change")?))
    }

    fn eval_fiscal_stimulus(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::FiscalStimulus;
        let scenario = simulation::fiscal_stimulus(
            &economy(concept, input)?,
            input.require(concept, "spending")?,
            input.require(concept, "multiplier")?,
            &okun_params(concept, input)?,
        )?;
        Ok(scenario_result(concept, &scenario))
    }

    fn eval_monetary_easing(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::MonetaryEasing;
        let scenario = simulation::monetary_easing(
            &economy(concept, input)?,
            input.require(concept, "rate_cut")?,
            &okun_params(concept, input)?,
        )?;
        Ok(scenario_result(concept, &scenario))
    }

    fn eval_household_outlook(&self, input: &FormulaInput) -> Result<FormulaResult, FormulaError> {
        let concept = Concept::HouseholdOutlook;
        let outlook = Outlook::from_str(input.require_label(concept, "outlook")?)?;
        let response = simulation::household_outlook(input.require(concept, "consumption")?, outlook)?;
        Ok(FormulaResult::new(concept)
            .with_output("new_consumption", response.new_consumption)
            .with_output("consumption_change", response.consumption_change)
            .with_output("gdp_effect", response.gdp_effect)
            .with_output("employment_effect", response.employment_effect)
            .with_classification(response.direction))
    }
}

fn okun_params(concept: Concept, input: &FormulaInput) -> Result<OkunParams, FormulaError> {
    Ok(OkunParams {
        beta: input.require(concept, "beta")?,
        natural_growth: input.require(concept, "natural_growth")?,
    })
}

fn economy(concept: Concept, input: &FormulaInput) -> Result<Economy, FormulaError> {
    Ok(Economy {
        growth: input.require(concept, "growth")?,
        unemployment: input.require(concept, "unemployment")?,
        inflation: input.require(concept, "inflation")?,
    })
}

fn scenario_result(concept: Concept, scenario: &PolicyScenario) -> FormulaResult {
    FormulaResult::new(concept)
        .with_output("growth_effect", scenario.growth_effect)
        .with_output("new_growth", scenario.new_growth)
        .with_output("unemployment_change", scenario.unemployment_change)
        .with_output("new_unemployment", scenario.new_unemployment)
        .with_output("inflation_effect", scenario.inflation_effect)
        .with_output("new_inflation", scenario.new_inflation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{BusinessCycle, Classification, Direction, InflationBand};
    use rust_decimal_macros::dec;

    fn evaluate(concept: Concept, input: FormulaInput) -> Result<FormulaResult, FormulaError> {
        FormulaEvaluator::new().evaluate(concept, &input)
    }

    #[test]
    fn missing_input_names_the_concept_and_field() {
        let err = evaluate(Concept::Deflator, FormulaInput::new().with_value("nominal", dec!(1))).unwrap_err();
        assert_eq!(
            err,
            FormulaError::MissingInput {
                concept: "deflator".to_string(),
                name: "real".to_string()
            }
        );
    }

    #[test]
    fn growth_rate_carries_a_cycle_label() {
        let result = evaluate(
            Concept::GrowthRate,
            FormulaInput::new()
                .with_value("previous", dec!(200))
                .with_value("current", dec!(190)),
        )
        .unwrap();
        assert_eq!(result.get("growth_rate"), Some(dec!(-5)));
        assert_eq!(result.classification, Some(Classification::Cycle(BusinessCycle::Recession)));
    }

    #[test]
    fn inflation_rate_carries_a_band() {
        let result = evaluate(
            Concept::InflationRate,
            FormulaInput::new()
                .with_value("previous_cpi", dec!(100))
                .with_value("current_cpi", dec!(160)),
        )
        .unwrap();
        assert_eq!(result.get("inflation_rate"), Some(dec!(60)));
        assert_eq!(
            result.classification,
            Some(Classification::Inflation(InflationBand::Hyperinflation))
        );
    }

    #[test]
    fn negative_value_added_becomes_a_warning() {
        let result = evaluate(
            Concept::GdpProduction,
            FormulaInput::new()
                .with_series("production", vec![dec!(100), dec!(50)])
                .with_series("intermediate_consumption", vec![dec!(40), dec!(80)]),
        )
        .unwrap();
        assert_eq!(result.get("gdp"), Some(dec!(30)));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("industry 1"));
    }

    #[test]
    fn fractional_periods_are_rejected() {
        let err = evaluate(
            Concept::PurchasingPower,
            FormulaInput::new()
                .with_value("amount", dec!(1000))
                .with_value("inflation_rate", dec!(3))
                .with_value("periods", dec!(2.5)),
        )
        .unwrap_err();
        assert!(matches!(err, FormulaError::InvalidArgument(_)));
    }

    #[test]
    fn okun_target_defaults_to_one_year() {
        let base = FormulaInput::new()
            .with_value("current_unemployment", dec!(9.5))
            .with_value("target_unemployment", dec!(8.0))
            .with_value("natural_growth", dec!(2.2))
            .with_value("beta", dec!(0.5));
        let one_year = evaluate(Concept::OkunTargetGrowth, base.clone()).unwrap();
        assert_eq!(one_year.get("required_growth"), Some(dec!(5.2)));

        let three_years = evaluate(Concept::OkunTargetGrowth, base.with_value("years", dec!(3))).unwrap();
        assert_eq!(three_years.get("annual_unemployment_change"), Some(dec!(-0.5)));
        assert_eq!(three_years.get("required_growth"), Some(dec!(3.2)));
    }

    #[test]
    fn okuns_law_labels_the_direction() {
        let result = evaluate(
            Concept::OkunsLaw,
            FormulaInput::new()
                .with_value("initial_unemployment", dec!(9.1))
                .with_value("natural_growth", dec!(2.2))
                .with_value("beta", dec!(0.5))
                .with_value("growth", dec!(1.0)),
        )
        .unwrap();
        assert_eq!(result.get("unemployment_change"), Some(dec!(0.6)));
        assert_eq!(result.classification, Some(Classification::Direction(Direction::Rising)));
    }

    #[test]
    fn unknown_policy_label_is_rejected() {
        let err = evaluate(
            Concept::PolicyEffect,
            FormulaInput::new().with_label("policy", "helicopter-money"),
        )
        .unwrap_err();
        assert!(matches!(err, FormulaError::UnknownLabel { .. }));
    }

    #[test]
    fn interactions_report_deltas() {
        let result = evaluate(
            Concept::EconomicInteractions,
            FormulaInput::new()
                .with_value("growth", dec!(2))
                .with_value("inflation", dec!(2))
                .with_value("unemployment", dec!(8))
                .with_value("interest_rate", dec!(3)),
        )
        .unwrap();
        assert_eq!(result.get("next_inflation"), Some(dec!(1.4)));
        assert_eq!(result.get("inflation_change"), Some(dec!(-0.6)));
        assert_eq!(result.get("interest_rate_change"), Some(dec!(-1.3)));
        assert_eq!(result.get("growth_change"), Some(dec!(0)));
    }

    #[test]
    fn household_outlook_reads_the_outlook_label() {
        let result = evaluate(
            Concept::HouseholdOutlook,
            FormulaInput::new()
                .with_value("consumption", dec!(1500))
                .with_label("outlook", "pessimistic"),
        )
        .unwrap();
        assert_eq!(result.get("consumption_change"), Some(dec!(-150)));
        assert_eq!(result.get("gdp_effect"), Some(dec!(-225)));
        assert_eq!(result.get("employment_effect"), Some(dec!(-0.225)));
        assert_eq!(result.classification, Some(Classification::Direction(Direction::Falling)));

        let err = evaluate(
            Concept::HouseholdOutlook,
            FormulaInput::new()
                .with_value("consumption", dec!(1500))
                .with_label("outlook", "gloomy"),
        )
        .unwrap_err();
        assert!(matches!(err, FormulaError::UnknownLabel { name, .. } if name == "outlook"));
    }
}
