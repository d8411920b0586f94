use core_types::FormulaError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

/// Longest horizon, in periods or years, that a compounding path may cover.
pub const MAX_PERIODS: u32 = 1000;
/// Smallest compounded level kept; below it too few significant digits remain.
const MIN_LEVEL: Decimal = dec!(0.00000000000000000001);

fn overflow(what: &str) -> FormulaError {
    FormulaError::InvalidArgument(format!("{what} overflows the decimal range"))
}

pub(crate) fn add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, FormulaError> {
    a.checked_add(b).ok_or_else(|| overflow(what))
}

pub(crate) fn sub(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, FormulaError> {
    a.checked_sub(b).ok_or_else(|| overflow(what))
}

pub(crate) fn mul(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, FormulaError> {
    a.checked_mul(b).ok_or_else(|| overflow(what))
}

pub(crate) fn sum<'a>(values: impl IntoIterator<Item = &'a Decimal>, what: &str) -> Result<Decimal, FormulaError> {
    values.into_iter().try_fold(Decimal::ZERO, |total, v| add(total, *v, what))
}

/// `numerator / denominator`, refusing a zero denominator instead of panicking.
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal, what: &str) -> Result<Decimal, FormulaError> {
    if denominator.is_zero() {
        return Err(FormulaError::DivisionByZero(what.to_string()));
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| FormulaError::InvalidArgument(format!("{what} overflows")))
}

/// `part / whole x 100`.
pub(crate) fn percent(part: Decimal, whole: Decimal, what: &str) -> Result<Decimal, FormulaError> {
    mul(ratio(part, whole, what)?, Decimal::ONE_HUNDRED, what)
}

/// Relative change from `previous` to `current`, in percent.
pub(crate) fn percent_change(previous: Decimal, current: Decimal, what: &str) -> Result<Decimal, FormulaError> {
    percent(sub(current, previous, what)?, previous, what)
}

/// Converts a decimal that must be a non-negative whole number.
pub(crate) fn whole_number(value: Decimal, name: &str) -> Result<u32, FormulaError> {
    if value.is_sign_negative() || !value.fract().is_zero() {
        return Err(FormulaError::InvalidArgument(format!(
            "{name} must be a non-negative whole number, got {value}"
        )));
    }
    value
        .to_u32()
        .ok_or_else(|| FormulaError::InvalidArgument(format!("{name} is too large: {value}")))
}

/// A whole number of periods no longer than `MAX_PERIODS`.
pub(crate) fn period_count(value: Decimal, name: &str) -> Result<u32, FormulaError> {
    let periods = whole_number(value, name)?;
    horizon(periods, name)
}

pub(crate) fn horizon(periods: u32, name: &str) -> Result<u32, FormulaError> {
    if periods > MAX_PERIODS {
        return Err(FormulaError::InvalidArgument(format!(
            "{name} is limited to {MAX_PERIODS}, got {periods}"
        )));
    }
    Ok(periods)
}

/// `1, f, f^2, ..., f^periods` by repeated multiplication.
///
/// A level that shrinks below `MIN_LEVEL` is reported instead of being
/// divided by later.
pub(crate) fn compounding_levels(factor: Decimal, periods: u32, what: &str) -> Result<Vec<Decimal>, FormulaError> {
    let mut levels = Vec::with_capacity(periods as usize + 1);
    let mut level = Decimal::ONE;
    levels.push(level);
    for n in 1..=periods {
        level = mul(level, factor, what)?;
        if level.abs() < MIN_LEVEL {
            return Err(FormulaError::InvalidArgument(format!(
                "{what} underflows the decimal precision after {n} periods"
            )));
        }
        levels.push(level);
    }
    Ok(levels)
}

pub(crate) fn non_negative(value: Decimal, name: &str) -> Result<Decimal, FormulaError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FormulaError::InvalidArgument(format!(
            "{name} cannot be negative, got {value}"
        )));
    }
    Ok(value)
}

pub(crate) fn same_length(context: &str, expected: usize, found: usize) -> Result<(), FormulaError> {
    if expected != found {
        return Err(FormulaError::DimensionMismatch {
            context: context.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

pub(crate) fn non_empty(values: &[Decimal], name: &str) -> Result<(), FormulaError> {
    if values.is_empty() {
        return Err(FormulaError::InvalidArgument(format!("{name} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ratio_refuses_zero_denominator() {
        assert_eq!(
            ratio(dec!(1), dec!(0), "test"),
            Err(FormulaError::DivisionByZero("test".to_string()))
        );
    }

    #[test]
    fn whole_number_accepts_integral_decimals() {
        assert_eq!(whole_number(dec!(10.0), "periods").unwrap(), 10);
        assert!(whole_number(dec!(2.5), "periods").is_err());
        assert!(whole_number(dec!(-1), "periods").is_err());
    }

    #[test]
    fn products_beyond_the_decimal_range_are_errors() {
        let big = Decimal::from(10u64.pow(15));
        let err = mul(big, big, "basket cost").unwrap_err();
        assert_eq!(err, FormulaError::InvalidArgument("basket cost overflows the decimal range".to_string()));
        assert!(sum(&[Decimal::MAX, dec!(1)], "total").is_err());
        assert!(percent(Decimal::MAX, dec!(1), "share").is_err());
    }

    #[test]
    fn period_counts_are_capped() {
        assert_eq!(period_count(dec!(1000), "periods").unwrap(), MAX_PERIODS);
        assert!(matches!(
            period_count(dec!(1001), "periods"),
            Err(FormulaError::InvalidArgument(msg)) if msg.contains("limited to 1000")
        ));
        assert!(period_count(dec!(4000000000), "periods").is_err());
    }

    #[test]
    fn compounding_reports_underflow() {
        assert_eq!(compounding_levels(dec!(2), 3, "level").unwrap(), vec![dec!(1), dec!(2), dec!(4), dec!(8)]);
        let err = compounding_levels(dec!(0.5), 100, "price level").unwrap_err();
        assert!(matches!(err, FormulaError::InvalidArgument(msg) if msg.contains("underflows")));
    }

    #[test]
    fn negative_zero_counts_as_zero() {
        assert_eq!(non_negative(-dec!(0), "employed").unwrap(), dec!(0));
    }
}
