use analytics::{AnalyticsEngine, AnalyticsError, CorrelationDirection, CorrelationStrength};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Unemployment generated exactly by `change = -0.5 x (g - 2.2)` from 9.5%.
fn okun_economy() -> (Vec<Decimal>, Vec<Decimal>) {
    let growth = vec![dec!(2.0), dec!(1.0), dec!(3.0), dec!(-1.0), dec!(4.0), dec!(0.0)];
    let mut unemployment = vec![dec!(9.5)];
    for g in &growth[1..] {
        let last = *unemployment.last().unwrap();
        unemployment.push(last - dec!(0.5) * (*g - dec!(2.2)));
    }
    (growth, unemployment)
}

#[test]
fn recovers_the_coefficient_and_natural_growth() {
    let (growth, unemployment) = okun_economy();
    let estimate = AnalyticsEngine::new().okun_estimate(&growth, &unemployment).unwrap();

    assert_eq!(estimate.observations, 5);
    assert_eq!(estimate.coefficient.round_dp(6), dec!(0.5));
    assert_eq!(estimate.natural_growth.map(|g| g.round_dp(6)), Some(dec!(2.2)));
    assert_eq!(estimate.r_squared.round_dp(6), dec!(1));
}

#[test]
fn growth_and_unemployment_changes_move_against_each_other() {
    let (growth, unemployment) = okun_economy();
    let changes: Vec<Decimal> = unemployment.windows(2).map(|w| w[1] - w[0]).collect();
    let correlation = AnalyticsEngine::new().correlation(&growth[1..], &changes).unwrap();

    assert_eq!(correlation.coefficient.round_dp(6), dec!(-1));
    assert_eq!(correlation.strength, CorrelationStrength::Strong);
    assert_eq!(correlation.direction, CorrelationDirection::Negative);
}

#[test]
fn two_periods_are_not_enough() {
    let err = AnalyticsEngine::new()
        .okun_estimate(&[dec!(1), dec!(2)], &[dec!(8), dec!(7.5)])
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::NotEnoughData(_)));
}

#[test]
fn trend_of_a_compounding_series() {
    // 100 growing 2% a year for four years.
    let values = [dec!(100), dec!(102), dec!(104.04), dec!(106.1208), dec!(108.243216)];
    let trend = AnalyticsEngine::new().trend(&values).unwrap();

    assert_eq!(trend.periods, 5);
    assert_eq!(trend.average_growth.map(|g| g.round_dp(4)), Some(dec!(2)));
    assert!(trend.regression.slope > dec!(2));
    assert!(trend.regression.r_squared > dec!(0.99));
}
