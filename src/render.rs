//! Terminal tables for the CLI.

use analytics::{Correlation, CorrelationMatrix, OkunEstimate, Regression, Summary, TrendReport};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::{Concept, FormulaResult};
use evaluator::PolicyEffect;
use evaluator::relations::OkunScenario;
use rust_decimal::Decimal;

fn new_table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn number(value: Decimal) -> Cell {
    Cell::new(fmt_decimal(value)).set_alignment(CellAlignment::Right)
}

fn fmt_decimal(value: Decimal) -> String {
    value.round_dp(4).normalize().to_string()
}

fn fmt_optional(value: Option<Decimal>) -> String {
    value.map(fmt_decimal).unwrap_or_else(|| "-".to_string())
}

fn fmt_signed(value: Decimal) -> String {
    if value.is_sign_positive() && !value.is_zero() {
        format!("+{}", fmt_decimal(value))
    } else {
        fmt_decimal(value)
    }
}

pub fn concepts_table() -> Table {
    let mut table = new_table(["Concept", "Formula", "Inputs"]);
    for concept in Concept::ALL {
        let mut inputs: Vec<String> = concept.required_values().iter().map(|v| v.to_string()).collect();
        inputs.extend(concept.optional_values().iter().map(|v| format!("[{v}]")));
        inputs.extend(concept.required_series().iter().map(|s| format!("{s}[]")));
        inputs.extend(concept.required_labels().iter().map(|l| format!("{l}:label")));
        table.add_row(vec![concept.as_str().to_string(), concept.description().to_string(), inputs.join(", ")]);
    }
    table
}

pub fn result_table(result: &FormulaResult) -> Table {
    let mut table = new_table(["Output", "Value"]);
    for (name, value) in &result.outputs {
        table.add_row(vec![Cell::new(name), number(*value)]);
    }
    for (name, values) in &result.series {
        let joined = values.iter().map(|v| fmt_decimal(*v)).collect::<Vec<_>>().join(", ");
        table.add_row(vec![Cell::new(name), Cell::new(joined)]);
    }
    if let Some(classification) = result.classification {
        table.add_row(vec![Cell::new("classification"), Cell::new(classification)]);
    }
    table
}

pub fn policy_table(policies: &[PolicyEffect]) -> Table {
    let mut table = new_table(["Policy", "Description", "Growth", "Inflation", "Unemployment", "Deficit", "Rates"]);
    for policy in policies {
        table.add_row(vec![
            Cell::new(policy.kind),
            Cell::new(policy.description),
            Cell::new(fmt_signed(policy.growth)),
            Cell::new(fmt_signed(policy.inflation)),
            Cell::new(fmt_signed(policy.unemployment)),
            Cell::new(fmt_signed(policy.deficit)),
            Cell::new(fmt_signed(policy.interest_rate)),
        ]);
    }
    table
}

/// One block of rows per exercise, each output on its own row.
pub fn exercises_table(results: &[(&str, FormulaResult)]) -> Table {
    let mut table = new_table(["Exercise", "Concept", "Output", "Value"]);
    for (title, result) in results {
        for (name, value) in &result.outputs {
            table.add_row(vec![
                Cell::new(title),
                Cell::new(result.concept),
                Cell::new(name),
                number(*value),
            ]);
        }
        if let Some(classification) = result.classification {
            table.add_row(vec![
                Cell::new(title),
                Cell::new(result.concept),
                Cell::new("classification"),
                Cell::new(classification),
            ]);
        }
    }
    table
}

pub fn doubling_table(rows: &[(Decimal, Decimal, Decimal)], years: u32) -> Table {
    let after = format!("Index after {years} years");
    let mut table = new_table(["Growth %", "Years to double", after.as_str()]);
    for (rate, years_to_double, end) in rows {
        table.add_row(vec![number(*rate), number(*years_to_double), number(*end)]);
    }
    table
}

pub fn okun_table(scenarios: &[OkunScenario], initial_unemployment: Decimal) -> Table {
    let mut table = new_table(["Scenario", "Growth %", "Gap to natural", "Change in u", "Unemployment %", "Direction"]);
    for scenario in scenarios {
        let outcome = &scenario.outcome;
        table.add_row(vec![
            Cell::new(&scenario.name),
            number(scenario.growth),
            Cell::new(fmt_signed(scenario.gap_to_natural)),
            Cell::new(fmt_signed(outcome.unemployment_change)),
            Cell::new(format!(
                "{} -> {}",
                fmt_decimal(initial_unemployment),
                fmt_decimal(outcome.new_unemployment)
            )),
            Cell::new(core_types::Classification::from(outcome.direction)),
        ]);
    }
    table
}

pub fn phillips_table(points: &[(Decimal, Decimal)]) -> Table {
    let mut table = new_table(["Unemployment %", "Inflation %"]);
    for (unemployment, inflation) in points {
        table.add_row(vec![number(*unemployment), number(*inflation)]);
    }
    table
}

pub fn summary_table(columns: &[(&str, Summary, Option<TrendReport>)]) -> Table {
    let mut table = new_table(["Column", "Count", "Mean", "Std dev", "Min", "Max", "Trend slope", "Avg growth %"]);
    for (name, summary, trend) in columns {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(summary.count),
            number(summary.mean),
            Cell::new(fmt_optional(summary.std_dev)),
            number(summary.min),
            number(summary.max),
            Cell::new(fmt_optional(trend.as_ref().map(|t| t.regression.slope))),
            Cell::new(fmt_optional(trend.as_ref().and_then(|t| t.average_growth))),
        ]);
    }
    table
}

pub fn correlation_table(x: &str, y: &str, correlation: &Correlation, regression: &Regression) -> Table {
    let mut table = new_table(["Pair", "r", "Reading", "Slope", "Intercept", "R²"]);
    table.add_row(vec![
        Cell::new(format!("{x} / {y}")),
        number(correlation.coefficient),
        Cell::new(format!("{} {}", correlation.strength.as_str(), correlation.direction.as_str())),
        number(regression.slope),
        number(regression.intercept),
        number(regression.r_squared),
    ]);
    table
}

/// Square table of pairwise coefficients, `-` where a pair is undefined.
pub fn correlation_matrix_table(matrix: &CorrelationMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![String::new()];
    header.extend(matrix.columns.iter().cloned());
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    for (name, row) in matrix.columns.iter().zip(&matrix.coefficients) {
        let mut cells = vec![Cell::new(name)];
        cells.extend(
            row.iter()
                .map(|r| Cell::new(fmt_optional(r.map(|r| r.round_dp(3)))).set_alignment(CellAlignment::Right)),
        );
        table.add_row(cells);
    }
    table
}

pub fn okun_estimate_table(estimate: &OkunEstimate) -> Table {
    let mut table = new_table(["Okun coefficient", "R²", "Natural growth %", "Observations"]);
    table.add_row(vec![
        number(estimate.coefficient),
        number(estimate.r_squared),
        Cell::new(fmt_optional(estimate.natural_growth)),
        Cell::new(estimate.observations),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimals_are_trimmed_for_display() {
        assert_eq!(fmt_decimal(dec!(8.8500)), "8.85");
        assert_eq!(fmt_decimal(dec!(23.333333)), "23.3333");
        assert_eq!(fmt_signed(dec!(1.5)), "+1.5");
        assert_eq!(fmt_signed(dec!(-0.7)), "-0.7");
        assert_eq!(fmt_optional(None), "-");
    }

    #[test]
    fn result_table_lists_outputs_and_classification() {
        let result = FormulaResult::new(Concept::OkunsLaw)
            .with_output("new_unemployment", dec!(8.85))
            .with_classification(core_types::Direction::Falling);
        let rendered = result_table(&result).to_string();
        assert!(rendered.contains("new_unemployment"));
        assert!(rendered.contains("8.85"));
        assert!(rendered.contains("falling"));
    }

    #[test]
    fn every_concept_is_listed() {
        let rendered = concepts_table().to_string();
        for concept in Concept::ALL {
            assert!(rendered.contains(concept.as_str()), "{concept}");
        }
    }

    #[test]
    fn matrix_marks_undefined_pairs() {
        let matrix = CorrelationMatrix {
            columns: vec!["gdp".to_string(), "flat".to_string()],
            coefficients: vec![vec![Some(dec!(1)), None], vec![None, None]],
        };
        let rendered = correlation_matrix_table(&matrix).to_string();
        assert!(rendered.contains("gdp"));
        assert!(rendered.contains("flat"));
        assert!(rendered.contains('-'));
    }
}
