use core_types::{FormulaError, InflationBand};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::math::{compounding_levels, horizon, mul, non_empty, percent, percent_change, ratio, same_length, sub, sum};

/// `deflator = nominal / real`
pub fn deflator(nominal: Decimal, real: Decimal) -> Result<Decimal, FormulaError> {
    ratio(nominal, real, "real GDP in deflator")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeflatorInflation {
    /// `g_nominal - g_real`, the textbook approximation.
    pub approximate: Decimal,
    /// Solved from `1 + g_nominal = (1 + g_real)(1 + inflation)`.
    pub exact: Decimal,
}

/// Inflation implied by the gap between nominal and real growth, both in percent.
pub fn inflation_from_deflator(
    nominal_growth: Decimal,
    real_growth: Decimal,
) -> Result<DeflatorInflation, FormulaError> {
    let real_factor = Decimal::ONE + real_growth / Decimal::ONE_HUNDRED;
    if real_factor <= Decimal::ZERO {
        return Err(FormulaError::InvalidArgument(format!(
            "real growth must be above -100%, got {real_growth}%"
        )));
    }
    let nominal_factor = Decimal::ONE + nominal_growth / Decimal::ONE_HUNDRED;

    let relative = ratio(nominal_factor, real_factor, "real growth factor")?;
    Ok(DeflatorInflation {
        approximate: sub(nominal_growth, real_growth, "growth gap")?,
        exact: mul(relative - Decimal::ONE, Decimal::ONE_HUNDRED, "exact deflator inflation")?,
    })
}

/// Sum of `quantity_i x price_i`.
pub fn basket_cost(quantities: &[Decimal], prices: &[Decimal]) -> Result<Decimal, FormulaError> {
    same_length("basket quantities vs prices", quantities.len(), prices.len())?;
    let spending = quantities
        .iter()
        .zip(prices)
        .map(|(q, p)| mul(*q, *p, "basket item cost"))
        .collect::<Result<Vec<_>, _>>()?;
    sum(&spending, "basket cost")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpiOutcome {
    pub base_cost: Decimal,
    pub current_cost: Decimal,
    pub cpi: Decimal,
    /// Inflation against the base year, whose index is 100 by construction.
    pub inflation: Decimal,
}

/// Laspeyres price index of a fixed base-year basket, base year = 100.
pub fn cpi(
    base_quantities: &[Decimal],
    base_prices: &[Decimal],
    current_prices: &[Decimal],
) -> Result<CpiOutcome, FormulaError> {
    non_empty(base_quantities, "base_quantities")?;
    same_length("base_prices vs base_quantities", base_quantities.len(), base_prices.len())?;
    same_length("current_prices vs base_quantities", base_quantities.len(), current_prices.len())?;

    let base_cost = basket_cost(base_quantities, base_prices)?;
    let current_cost = basket_cost(base_quantities, current_prices)?;
    let cpi = percent(current_cost, base_cost, "base-year basket cost")?;

    Ok(CpiOutcome {
        base_cost,
        current_cost,
        cpi,
        inflation: cpi - Decimal::ONE_HUNDRED,
    })
}

/// `inflation = (CPI_t - CPI_t-1) / CPI_t-1 x 100`
pub fn inflation_rate(previous_cpi: Decimal, current_cpi: Decimal) -> Result<Decimal, FormulaError> {
    percent_change(previous_cpi, current_cpi, "previous CPI in inflation rate")
}

pub fn classify_inflation(rate: Decimal) -> InflationBand {
    if rate < dec!(3) {
        InflationBand::Mild
    } else if rate < dec!(10) {
        InflationBand::Moderate
    } else if rate < dec!(50) {
        InflationBand::Galloping
    } else {
        InflationBand::Hyperinflation
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchasingPower {
    pub value: Decimal,
    pub loss_pct: Decimal,
    /// Real value at the end of each period, starting with period 0.
    pub path: Vec<Decimal>,
}

/// `PA_n = amount / (1 + inflation)^n`, with `inflation_rate` in percent.
///
/// `periods` is capped at `MAX_PERIODS`. The loss is
/// `(1 - 1 / (1 + inflation)^n) x 100`, so it is defined for a zero amount.
pub fn purchasing_power(
    amount: Decimal,
    inflation_rate: Decimal,
    periods: u32,
) -> Result<PurchasingPower, FormulaError> {
    let periods = horizon(periods, "periods")?;
    let factor = Decimal::ONE + inflation_rate / Decimal::ONE_HUNDRED;
    if factor <= Decimal::ZERO {
        return Err(FormulaError::InvalidArgument(format!(
            "inflation rate must be above -100%, got {inflation_rate}%"
        )));
    }

    let levels = compounding_levels(factor, periods, "compounded price level")?;
    let path = levels
        .iter()
        .map(|level| ratio(amount, *level, "compounded price level"))
        .collect::<Result<Vec<_>, _>>()?;

    // Both vectors hold `periods + 1` entries.
    let final_level = levels[levels.len() - 1];
    let remaining = ratio(Decimal::ONE, final_level, "compounded price level")?;
    Ok(PurchasingPower {
        value: path[path.len() - 1],
        loss_pct: mul(Decimal::ONE - remaining, Decimal::ONE_HUNDRED, "purchasing power loss")?,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deflator_round_trips_to_nominal() {
        for (nominal, real) in [(dec!(2353.1), dec!(2285.9)), (dec!(6600000), dec!(5500000)), (dec!(-50), dec!(3))] {
            let d = deflator(nominal, real).unwrap();
            assert!((d * real - nominal).abs() < dec!(0.0000001), "{nominal}/{real}");
        }
    }

    #[test]
    fn deflator_needs_nonzero_real_gdp() {
        assert!(matches!(deflator(dec!(10), dec!(0)), Err(FormulaError::DivisionByZero(_))));
    }

    #[test]
    fn textbook_deflator_inflation() {
        let inflation = inflation_from_deflator(dec!(2.5), dec!(1.7)).unwrap();
        assert_eq!(inflation.approximate, dec!(0.8));
        // (1.025 / 1.017 - 1) x 100 = 0.7866...
        assert_eq!(inflation.exact.round_dp(4), dec!(0.7866));
    }

    #[test]
    fn cpi_example_basket() {
        // bread 10 @ 1.00 -> 1.20, milk 5 @ 0.80 -> 1.00, meat 2 @ 15 -> 18
        let outcome = cpi(
            &[dec!(10), dec!(5), dec!(2)],
            &[dec!(1.00), dec!(0.80), dec!(15)],
            &[dec!(1.20), dec!(1.00), dec!(18)],
        )
        .unwrap();

        assert_eq!(outcome.base_cost, dec!(44));
        assert_eq!(outcome.current_cost, dec!(53));
        assert_eq!(outcome.cpi.round_dp(2), dec!(120.45));
        assert_eq!(outcome.inflation.round_dp(2), dec!(20.45));
    }

    #[test]
    fn cpi_at_base_prices_is_exactly_100() {
        let prices = [dec!(0.5), dec!(1.0), dec!(1.1)];
        let outcome = cpi(&[dec!(2), dec!(3), dec!(2)], &prices, &prices).unwrap();
        assert_eq!(outcome.cpi, dec!(100));
        assert_eq!(outcome.inflation, dec!(0));
    }

    #[test]
    fn cpi_rejects_mismatched_vectors() {
        let err = cpi(&[dec!(1), dec!(2)], &[dec!(1), dec!(2)], &[dec!(1)]).unwrap_err();
        assert!(matches!(err, FormulaError::DimensionMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn cpi_with_free_basket_is_division_by_zero() {
        let err = cpi(&[dec!(1)], &[dec!(0)], &[dec!(1)]).unwrap_err();
        assert!(matches!(err, FormulaError::DivisionByZero(_)));
    }

    #[test]
    fn inflation_bands() {
        assert_eq!(classify_inflation(dec!(-1)), InflationBand::Mild);
        assert_eq!(classify_inflation(dec!(2.99)), InflationBand::Mild);
        assert_eq!(classify_inflation(dec!(3)), InflationBand::Moderate);
        assert_eq!(classify_inflation(dec!(10)), InflationBand::Galloping);
        assert_eq!(classify_inflation(dec!(49.9)), InflationBand::Galloping);
        assert_eq!(classify_inflation(dec!(50)), InflationBand::Hyperinflation);
    }

    #[test]
    fn purchasing_power_after_ten_years_at_three_percent() {
        let pp = purchasing_power(dec!(1000), dec!(3), 10).unwrap();
        assert_eq!(pp.value.round_dp(2), dec!(744.09));
        assert_eq!(pp.loss_pct.round_dp(2), dec!(25.59));
        assert_eq!(pp.path.len(), 11);
        assert_eq!(pp.path[0], dec!(1000));
    }

    #[test]
    fn purchasing_power_rejects_total_collapse() {
        assert!(matches!(
            purchasing_power(dec!(1000), dec!(-100), 1),
            Err(FormulaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn zero_amount_keeps_a_defined_loss() {
        let pp = purchasing_power(dec!(0), dec!(3), 10).unwrap();
        assert_eq!(pp.value, dec!(0));
        assert_eq!(pp.loss_pct.round_dp(2), dec!(25.59));
        assert!(pp.path.iter().all(|v| v.is_zero()));
    }

    #[test]
    fn horizon_beyond_the_cap_is_rejected_up_front() {
        let err = purchasing_power(dec!(1000), dec!(0), 20_000_000).unwrap_err();
        assert!(matches!(err, FormulaError::InvalidArgument(msg) if msg.contains("limited to 1000")));

        let longest = purchasing_power(dec!(1000), dec!(0), crate::math::MAX_PERIODS).unwrap();
        assert_eq!(longest.path.len(), 1001);
        assert_eq!(longest.value, dec!(1000));
    }

    #[test]
    fn deep_deflation_is_an_invalid_argument() {
        // 0.5^100 is below the smallest representable decimal.
        let err = purchasing_power(dec!(1000), dec!(-50), 100).unwrap_err();
        assert!(matches!(err, FormulaError::InvalidArgument(_)), "{err:?}");
    }

    #[test]
    fn huge_baskets_overflow_without_panicking() {
        let big = Decimal::from(10u64.pow(15));
        let err = cpi(&[big], &[dec!(1)], &[big]).unwrap_err();
        assert!(matches!(err, FormulaError::InvalidArgument(msg) if msg.contains("overflows")));
    }

    #[test]
    fn zero_periods_keeps_the_amount() {
        let pp = purchasing_power(dec!(250), dec!(12), 0).unwrap();
        assert_eq!(pp.value, dec!(250));
        assert_eq!(pp.loss_pct, dec!(0));
    }
}
