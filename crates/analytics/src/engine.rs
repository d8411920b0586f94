use crate::error::AnalyticsError;
use crate::report::{
    Correlation, CorrelationDirection, CorrelationMatrix, CorrelationStrength, OkunEstimate, Regression, Summary,
    TrendReport,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

const STRONG_CORRELATION: Decimal = dec!(0.7);
const MODERATE_CORRELATION: Decimal = dec!(0.3);

/// A stateless calculator for descriptive statistics over economic time series.
///
/// All arithmetic is checked: a series whose sums or squared deviations leave
/// the decimal range yields `AnalyticsError::Calculation` instead of panicking.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits `y = intercept + slope x x` by ordinary least squares.
    ///
    /// # Arguments
    ///
    /// * `x` - The explanatory series.
    /// * `y` - The explained series, paired with `x` by position.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Regression` or an `AnalyticsError` when the
    /// series differ in length, have fewer than two points or `x` is constant.
    pub fn regression(&self, x: &[Decimal], y: &[Decimal]) -> Result<Regression, AnalyticsError> {
        same_length(x.len(), y.len())?;
        at_least(x.len(), 2, "a regression")?;

        let x_mean = mean(x)?;
        let y_mean = mean(y)?;

        let sxx = co_deviation(x, x_mean, x, x_mean)?;
        if sxx.is_zero() {
            return Err(AnalyticsError::DivisionByZero("variance of x in regression".to_string()));
        }
        let sxy = co_deviation(x, x_mean, y, y_mean)?;

        let slope = div(sxy, sxx, "regression slope")?;
        let intercept = sub(y_mean, mul(slope, x_mean, "regression intercept")?, "regression intercept")?;
        let fitted = x
            .iter()
            .map(|xi| add(intercept, mul(slope, *xi, "fitted value")?, "fitted value"))
            .collect::<Result<Vec<_>, _>>()?;

        // --- Goodness of fit ---
        let ss_tot = co_deviation(y, y_mean, y, y_mean)?;
        let ss_res = y.iter().zip(&fitted).try_fold(Decimal::ZERO, |acc, (yi, fi)| {
            let residual = sub(*yi, *fi, "residual")?;
            add(acc, mul(residual, residual, "squared residual")?, "residual sum of squares")
        })?;
        let r_squared = if ss_tot.is_zero() {
            Decimal::ONE
        } else {
            sub(Decimal::ONE, div(ss_res, ss_tot, "r squared")?, "r squared")?
        };

        tracing::debug!(points = x.len(), %slope, %intercept, %r_squared, "Fitted regression");
        Ok(Regression {
            slope,
            intercept,
            r_squared,
            fitted,
        })
    }

    /// Regresses a series on its period index and measures its average growth.
    pub fn trend(&self, values: &[Decimal]) -> Result<TrendReport, AnalyticsError> {
        at_least(values.len(), 2, "a trend")?;
        let index: Vec<Decimal> = (0..values.len()).map(Decimal::from).collect();
        let regression = self.regression(&index, values)?;

        Ok(TrendReport {
            periods: values.len(),
            regression,
            average_growth: average_growth(values)?,
        })
    }

    /// Pearson correlation coefficient with a strength and direction reading.
    pub fn correlation(&self, x: &[Decimal], y: &[Decimal]) -> Result<Correlation, AnalyticsError> {
        same_length(x.len(), y.len())?;
        at_least(x.len(), 2, "a correlation")?;

        let x_mean = mean(x)?;
        let y_mean = mean(y)?;
        let sxx = co_deviation(x, x_mean, x, x_mean)?;
        let syy = co_deviation(y, y_mean, y, y_mean)?;
        let sxy = co_deviation(x, x_mean, y, y_mean)?;

        if sxx.is_zero() {
            return Err(AnalyticsError::DivisionByZero("variance of x in correlation".to_string()));
        }
        if syy.is_zero() {
            return Err(AnalyticsError::DivisionByZero("variance of y in correlation".to_string()));
        }

        // Root each sum before multiplying so the scale stays within range.
        let scale = mul(sqrt(sxx, "variance of x")?, sqrt(syy, "variance of y")?, "covariance scale")?;
        // Rounding in the square root can push |r| a hair past 1.
        let coefficient = div(sxy, scale, "correlation")?.clamp(Decimal::NEGATIVE_ONE, Decimal::ONE);

        Ok(Correlation {
            coefficient,
            strength: strength_of(coefficient),
            direction: if coefficient > Decimal::ZERO {
                CorrelationDirection::Positive
            } else {
                CorrelationDirection::Negative
            },
        })
    }

    /// Pairwise correlations between every pair of columns.
    ///
    /// Each pair uses only the rows where both columns have a value. A pair
    /// with fewer than two such rows, or with a constant column, gets `None`.
    /// The diagonal is 1 for every column that correlates with anything at all.
    pub fn correlation_matrix(
        &self,
        columns: &[(&str, &[Option<Decimal>])],
    ) -> Result<CorrelationMatrix, AnalyticsError> {
        if let Some((_, first)) = columns.first() {
            for (_, values) in columns {
                same_length(first.len(), values.len())?;
            }
        }

        let n = columns.len();
        let mut coefficients = vec![vec![None; n]; n];
        for i in 0..n {
            for j in i..n {
                let (xs, ys): (Vec<Decimal>, Vec<Decimal>) = columns[i]
                    .1
                    .iter()
                    .zip(columns[j].1)
                    .filter_map(|(x, y)| (*x).zip(*y))
                    .unzip();
                let coefficient = match self.correlation(&xs, &ys) {
                    Ok(_) if i == j => Some(Decimal::ONE),
                    Ok(correlation) => Some(correlation.coefficient),
                    Err(AnalyticsError::NotEnoughData(_)) | Err(AnalyticsError::DivisionByZero(_)) => None,
                    Err(err) => return Err(err),
                };
                coefficients[i][j] = coefficient;
                coefficients[j][i] = coefficient;
            }
        }

        tracing::debug!(columns = n, "Computed correlation matrix");
        Ok(CorrelationMatrix {
            columns: columns.iter().map(|(name, _)| name.to_string()).collect(),
            coefficients,
        })
    }

    pub fn describe(&self, values: &[Decimal]) -> Result<Summary, AnalyticsError> {
        at_least(values.len(), 1, "a summary")?;
        let mean = mean(values)?;

        let std_dev = if values.len() > 1 {
            let squares = co_deviation(values, mean, values, mean)?;
            let variance = div(squares, Decimal::from(values.len() - 1), "variance")?;
            Some(sqrt(variance, "variance")?)
        } else {
            None
        };

        // `at_least` guarantees a first element.
        let first = values[0];
        Ok(Summary {
            count: values.len(),
            mean,
            std_dev,
            min: values.iter().copied().fold(first, Decimal::min),
            max: values.iter().copied().fold(first, Decimal::max),
        })
    }

    /// Estimates Okun's coefficient from paired growth and unemployment series.
    ///
    /// The change in unemployment between consecutive periods is regressed on
    /// the growth of the later period, so `n` periods yield `n - 1` observations.
    pub fn okun_estimate(&self, growth: &[Decimal], unemployment: &[Decimal]) -> Result<OkunEstimate, AnalyticsError> {
        same_length(growth.len(), unemployment.len())?;
        at_least(growth.len(), 3, "an Okun estimate")?;

        let changes = unemployment
            .windows(2)
            .map(|w| sub(w[1], w[0], "unemployment change"))
            .collect::<Result<Vec<_>, _>>()?;
        let fit = self.regression(&growth[1..], &changes)?;

        let natural_growth = if fit.slope.is_zero() {
            None
        } else {
            Some(-div(fit.intercept, fit.slope, "natural growth")?)
        };

        Ok(OkunEstimate {
            coefficient: fit.slope.abs(),
            r_squared: fit.r_squared,
            natural_growth,
            observations: changes.len(),
        })
    }
}

fn out_of_range(what: &str) -> AnalyticsError {
    AnalyticsError::Calculation(format!("{what} leaves the decimal range"))
}

fn add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, AnalyticsError> {
    a.checked_add(b).ok_or_else(|| out_of_range(what))
}

fn sub(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, AnalyticsError> {
    a.checked_sub(b).ok_or_else(|| out_of_range(what))
}

fn mul(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, AnalyticsError> {
    a.checked_mul(b).ok_or_else(|| out_of_range(what))
}

/// Callers rule out a zero divisor beforehand.
fn div(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, AnalyticsError> {
    a.checked_div(b).ok_or_else(|| out_of_range(what))
}

fn sqrt(value: Decimal, what: &str) -> Result<Decimal, AnalyticsError> {
    value
        .sqrt()
        .ok_or_else(|| AnalyticsError::Calculation(format!("square root of the {what}")))
}

fn mean(values: &[Decimal]) -> Result<Decimal, AnalyticsError> {
    let total = values.iter().try_fold(Decimal::ZERO, |acc, v| add(acc, *v, "series total"))?;
    div(total, Decimal::from(values.len()), "series mean")
}

/// `sum((x - x_mean) * (y - y_mean))`
fn co_deviation(x: &[Decimal], x_mean: Decimal, y: &[Decimal], y_mean: Decimal) -> Result<Decimal, AnalyticsError> {
    x.iter().zip(y).try_fold(Decimal::ZERO, |acc, (xi, yi)| {
        let dx = sub(*xi, x_mean, "deviation")?;
        let dy = sub(*yi, y_mean, "deviation")?;
        add(acc, mul(dx, dy, "squared deviation")?, "sum of squared deviations")
    })
}

fn same_length(expected: usize, found: usize) -> Result<(), AnalyticsError> {
    if expected != found {
        return Err(AnalyticsError::DimensionMismatch { expected, found });
    }
    Ok(())
}

fn at_least(len: usize, needed: usize, what: &str) -> Result<(), AnalyticsError> {
    if len < needed {
        return Err(AnalyticsError::NotEnoughData(format!(
            "{what} needs at least {needed} values, got {len}"
        )));
    }
    Ok(())
}

/// `((last / first)^(1 / (n - 1)) - 1) x 100`
fn average_growth(values: &[Decimal]) -> Result<Option<Decimal>, AnalyticsError> {
    let (Some(first), Some(last)) = (values.first(), values.last()) else {
        return Ok(None);
    };
    if *first <= Decimal::ZERO || *last <= Decimal::ZERO || values.len() < 2 {
        return Ok(None);
    }

    let exponent = Decimal::ONE / Decimal::from(values.len() - 1);
    let factor = div(*last, *first, "growth ratio")?
        .checked_powd(exponent)
        .ok_or_else(|| AnalyticsError::Calculation("compound growth factor".to_string()))?;
    Ok(Some(mul(factor - Decimal::ONE, Decimal::ONE_HUNDRED, "average growth")?))
}

fn strength_of(coefficient: Decimal) -> CorrelationStrength {
    let magnitude = coefficient.abs();
    if magnitude > STRONG_CORRELATION {
        CorrelationStrength::Strong
    } else if magnitude > MODERATE_CORRELATION {
        CorrelationStrength::Moderate
    } else {
        CorrelationStrength::Weak
    }
}
