//! Datasets bundled with the application.
//!
//! Monetary values are in billions of euros for France and in millions of
//! euros for the textbook exercises.

use crate::dataset::{Column, Dataset};
use rust_decimal_macros::dec;

/// French macro aggregates, 2015 to 2023.
pub fn france_sample() -> Dataset {
    Dataset::new(
        "france",
        vec![
            Column::complete(
                "year",
                &[
                    dec!(2015),
                    dec!(2016),
                    dec!(2017),
                    dec!(2018),
                    dec!(2019),
                    dec!(2020),
                    dec!(2021),
                    dec!(2022),
                    dec!(2023),
                ],
            ),
            Column::complete(
                "real_gdp",
                &[
                    dec!(2194.2),
                    dec!(2219.8),
                    dec!(2291.3),
                    dec!(2346.2),
                    dec!(2388.1),
                    dec!(2289.8),
                    dec!(2415.6),
                    dec!(2489.3),
                    dec!(2542.1),
                ],
            ),
            Column::complete(
                "nominal_gdp",
                &[
                    dec!(2194.2),
                    dec!(2231.1),
                    dec!(2345.2),
                    dec!(2424.6),
                    dec!(2491.8),
                    dec!(2396.8),
                    dec!(2564.3),
                    dec!(2718.5),
                    dec!(2865.2),
                ],
            ),
            Column::complete(
                "growth",
                &[
                    dec!(1.1),
                    dec!(1.1),
                    dec!(2.3),
                    dec!(1.9),
                    dec!(1.8),
                    dec!(-7.9),
                    dec!(6.8),
                    dec!(2.5),
                    dec!(0.9),
                ],
            ),
            Column::complete(
                "inflation",
                &[
                    dec!(0.1),
                    dec!(0.3),
                    dec!(1.2),
                    dec!(2.1),
                    dec!(1.3),
                    dec!(0.5),
                    dec!(1.6),
                    dec!(5.2),
                    dec!(4.9),
                ],
            ),
            Column::complete(
                "unemployment",
                &[
                    dec!(10.4),
                    dec!(10.1),
                    dec!(9.4),
                    dec!(9.1),
                    dec!(8.4),
                    dec!(8.0),
                    dec!(7.9),
                    dec!(7.3),
                    dec!(7.1),
                ],
            ),
        ],
    )
}

/// The steel and automobile industries; row 0 is steel, row 1 is automobiles.
///
/// Steel extracts its own ore and sells all 1000 of output to the car maker.
pub fn two_industry_example() -> Dataset {
    Dataset::new(
        "two_industries",
        vec![
            Column::complete("production", &[dec!(1000), dec!(2000)]),
            Column::complete("intermediate_consumption", &[dec!(0), dec!(1000)]),
            Column::complete("wages", &[dec!(100), dec!(400)]),
            Column::complete("interest", &[dec!(30), dec!(10)]),
            Column::complete("profits", &[dec!(870), dec!(590)]),
        ],
    )
}

/// A single-good economy producing computers over three years.
pub fn computers_example() -> Dataset {
    Dataset::new(
        "computers",
        vec![
            Column::complete("year", &[dec!(1), dec!(2), dec!(3)]),
            Column::complete("quantity", &[dec!(50000), dec!(55000), dec!(58000)]),
            Column::complete("price", &[dec!(100), dec!(120), dec!(150)]),
        ],
    )
}

/// A bread, milk and meat basket; rows are in that order.
pub fn cpi_exercise() -> Dataset {
    Dataset::new(
        "cpi_basket",
        vec![
            Column::complete("base_quantity", &[dec!(10), dec!(5), dec!(2)]),
            Column::complete("base_price", &[dec!(1.00), dec!(0.80), dec!(15)]),
            Column::complete("current_price", &[dec!(1.20), dec!(1.00), dec!(18)]),
        ],
    )
}

/// A labor market in millions of people.
pub fn labor_exercise() -> Dataset {
    Dataset::new(
        "labor_market",
        vec![
            Column::complete("working_age_population", &[dec!(50)]),
            Column::complete("employed", &[dec!(22)]),
            Column::complete("unemployed", &[dec!(3)]),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn france_sample_is_rectangular() {
        let france = france_sample();
        assert_eq!(france.row_count(), 9);
        for column in &france.columns {
            assert_eq!(column.values.len(), 9, "{}", column.name);
            assert!(column.values.iter().all(Option::is_some), "{}", column.name);
        }
    }

    #[test]
    fn two_industry_incomes_add_up_to_value_added() {
        let data = two_industry_example();
        let column = |name| data.numeric_column(name).unwrap();
        let (production, ci) = (column("production"), column("intermediate_consumption"));
        let (wages, interest, profits) = (column("wages"), column("interest"), column("profits"));
        for i in 0..2 {
            assert_eq!(production[i] - ci[i], wages[i] + interest[i] + profits[i]);
        }
    }
}
