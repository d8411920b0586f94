use core_types::{BusinessCycle, FormulaError};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::math::{add, mul, non_empty, percent_change, ratio, same_length, sub, sum};

/// GDP measured as the sum of value added across producers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionGdp {
    pub value_added: Vec<Decimal>,
    pub total_production: Decimal,
    pub total_intermediate_consumption: Decimal,
    pub gdp: Decimal,
    /// Indices of producers whose intermediate consumption exceeds production.
    pub negative_value_added: Vec<usize>,
}

pub fn value_added(production: Decimal, intermediate_consumption: Decimal) -> Result<Decimal, FormulaError> {
    sub(production, intermediate_consumption, "value added")
}

/// Production approach: `GDP = sum(production_i - intermediate_consumption_i)`.
///
/// A negative value added is allowed (a producer can run at a loss); its index
/// is recorded in `negative_value_added` so the caller can surface it.
pub fn production_approach(
    production: &[Decimal],
    intermediate_consumption: &[Decimal],
) -> Result<ProductionGdp, FormulaError> {
    non_empty(production, "production")?;
    same_length(
        "production vs intermediate_consumption",
        production.len(),
        intermediate_consumption.len(),
    )?;

    let value_added = production
        .iter()
        .zip(intermediate_consumption)
        .map(|(p, ci)| value_added(*p, *ci))
        .collect::<Result<Vec<_>, _>>()?;

    let negative_value_added = value_added
        .iter()
        .enumerate()
        .filter(|(_, va)| va.is_sign_negative() && !va.is_zero())
        .map(|(i, _)| i)
        .collect();

    Ok(ProductionGdp {
        gdp: sum(&value_added, "GDP")?,
        total_production: sum(production, "total production")?,
        total_intermediate_consumption: sum(intermediate_consumption, "total intermediate consumption")?,
        value_added,
        negative_value_added,
    })
}

/// The demand-side components of GDP. No sign constraints apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpenditureComponents {
    pub consumption: Decimal,
    pub investment: Decimal,
    pub government_spending: Decimal,
    pub exports: Decimal,
    pub imports: Decimal,
}

impl ExpenditureComponents {
    pub fn net_exports(&self) -> Result<Decimal, FormulaError> {
        sub(self.exports, self.imports, "net exports")
    }

    /// `GDP = C + I + G + (X - M)`
    pub fn gdp(&self) -> Result<Decimal, FormulaError> {
        let domestic = [self.consumption, self.investment, self.government_spending];
        add(sum(&domestic, "domestic demand")?, self.net_exports()?, "GDP")
    }
}

/// The income distributed by producers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IncomeComponents {
    pub wages: Decimal,
    pub profits: Decimal,
    pub interest: Decimal,
    pub taxes: Decimal,
    pub rents: Option<Decimal>,
}

impl IncomeComponents {
    pub fn gdp(&self) -> Result<Decimal, FormulaError> {
        let incomes = [self.wages, self.profits, self.interest, self.taxes, self.rents.unwrap_or_default()];
        sum(&incomes, "GDP")
    }
}

/// Nominal and real output for a single-good economy over several periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NominalRealSeries {
    pub base_price: Decimal,
    pub nominal: Vec<Decimal>,
    pub real: Vec<Decimal>,
    pub deflator: Vec<Decimal>,
    /// Period-over-period growth, one entry per period after the first.
    pub nominal_growth: Vec<Decimal>,
    pub real_growth: Vec<Decimal>,
}

/// `nominal_t = q_t x p_t`, `real_t = q_t x p_base`.
pub fn nominal_real(
    quantities: &[Decimal],
    prices: &[Decimal],
    base_period: usize,
) -> Result<NominalRealSeries, FormulaError> {
    non_empty(quantities, "quantities")?;
    same_length("quantities vs prices", quantities.len(), prices.len())?;
    if base_period >= prices.len() {
        return Err(FormulaError::InvalidArgument(format!(
            "base_period {base_period} is outside the {} available periods",
            prices.len()
        )));
    }

    let base_price = prices[base_period];
    let nominal = quantities
        .iter()
        .zip(prices)
        .map(|(q, p)| mul(*q, *p, "nominal GDP"))
        .collect::<Result<Vec<_>, _>>()?;
    let real = quantities
        .iter()
        .map(|q| mul(*q, base_price, "real GDP"))
        .collect::<Result<Vec<_>, _>>()?;
    let deflator = nominal
        .iter()
        .zip(&real)
        .map(|(n, r)| deflator_of(*n, *r))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NominalRealSeries {
        base_price,
        nominal_growth: growth_series(&nominal)?,
        real_growth: growth_series(&real)?,
        nominal,
        real,
        deflator,
    })
}

fn deflator_of(nominal: Decimal, real: Decimal) -> Result<Decimal, FormulaError> {
    ratio(nominal, real, "real GDP in deflator")
}

/// `g = (Y_t - Y_t-1) / Y_t-1 x 100`
pub fn growth_rate(previous: Decimal, current: Decimal) -> Result<Decimal, FormulaError> {
    percent_change(previous, current, "previous-period value in growth rate")
}

/// Growth between each pair of consecutive values.
pub fn growth_series(values: &[Decimal]) -> Result<Vec<Decimal>, FormulaError> {
    values.windows(2).map(|w| growth_rate(w[0], w[1])).collect()
}

pub fn classify_growth(growth: Decimal) -> BusinessCycle {
    if growth.is_zero() {
        BusinessCycle::Stagnation
    } else if growth.is_sign_positive() {
        BusinessCycle::Expansion
    } else {
        BusinessCycle::Recession
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn two_industry_example_production_approach() {
        // Steel sells 1000 to the car industry, which sells 2000 of cars.
        let result = production_approach(&[dec!(1000), dec!(2000)], &[dec!(0), dec!(1000)]).unwrap();
        assert_eq!(result.value_added, vec![dec!(1000), dec!(1000)]);
        assert_eq!(result.gdp, dec!(2000));
        assert_eq!(result.total_production, dec!(3000));
        assert!(result.negative_value_added.is_empty());
    }

    #[test]
    fn negative_value_added_is_flagged_not_rejected() {
        let result = production_approach(&[dec!(500), dec!(100)], &[dec!(200), dec!(150)]).unwrap();
        assert_eq!(result.gdp, dec!(250));
        assert_eq!(result.negative_value_added, vec![1]);
    }

    #[test]
    fn production_approach_requires_paired_vectors() {
        let err = production_approach(&[dec!(1), dec!(2)], &[dec!(1)]).unwrap_err();
        assert_eq!(
            err,
            FormulaError::DimensionMismatch {
                context: "production vs intermediate_consumption".to_string(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn expenditure_and_income_sums() {
        let spending = ExpenditureComponents {
            consumption: dec!(1345.2),
            investment: dec!(652.3),
            government_spending: dec!(615.8),
            exports: dec!(745.6),
            imports: dec!(822.4),
        };
        assert_eq!(spending.net_exports().unwrap(), dec!(-76.8));
        assert_eq!(spending.gdp().unwrap(), dec!(2536.5));

        let income = IncomeComponents {
            wages: dec!(500),
            profits: dec!(1460),
            interest: dec!(40),
            taxes: dec!(0),
            rents: None,
        };
        assert_eq!(income.gdp().unwrap(), dec!(2000));
    }

    #[test]
    fn computers_example_nominal_and_real() {
        let series = nominal_real(
            &[dec!(50000), dec!(55000), dec!(58000)],
            &[dec!(100), dec!(120), dec!(150)],
            0,
        )
        .unwrap();

        assert_eq!(series.nominal, vec![dec!(5000000), dec!(6600000), dec!(8700000)]);
        assert_eq!(series.real, vec![dec!(5000000), dec!(5500000), dec!(5800000)]);
        assert_eq!(series.deflator, vec![dec!(1), dec!(1.2), dec!(1.5)]);
        assert_eq!(series.nominal_growth[0], dec!(32));
        assert_eq!(series.real_growth[0], dec!(10));
        assert_eq!(series.real_growth[1].round_dp(1), dec!(5.5));
    }

    #[test]
    fn raw_currency_magnitudes_overflow_cleanly() {
        let big = Decimal::from(10u64.pow(15));
        let err = nominal_real(&[big, big], &[big, big], 0).unwrap_err();
        assert!(matches!(err, FormulaError::InvalidArgument(msg) if msg.contains("nominal GDP")));

        let spending = ExpenditureComponents {
            consumption: Decimal::MAX,
            investment: dec!(1),
            government_spending: dec!(0),
            exports: dec!(0),
            imports: dec!(0),
        };
        assert!(spending.gdp().is_err());
    }

    #[test]
    fn base_period_must_exist() {
        let err = nominal_real(&[dec!(1)], &[dec!(1)], 3).unwrap_err();
        assert!(matches!(err, FormulaError::InvalidArgument(_)));
    }

    #[test]
    fn growth_classification() {
        assert_eq!(classify_growth(dec!(1.72)), BusinessCycle::Expansion);
        assert_eq!(classify_growth(dec!(-7.9)), BusinessCycle::Recession);
        assert_eq!(classify_growth(dec!(0)), BusinessCycle::Stagnation);
    }

    #[test]
    fn growth_from_zero_base_is_an_error() {
        assert!(matches!(
            growth_rate(dec!(0), dec!(10)),
            Err(FormulaError::DivisionByZero(_))
        ));
    }
}
