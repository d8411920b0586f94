use configuration::ClampRule;
use core_types::{Concept, FormulaResult};
use rust_decimal::Decimal;

/// Presentation bounds applied to evaluator outputs after the fact.
///
/// The evaluator itself never clamps. A clamped value is no longer the result
/// of the formula, so every adjustment is recorded as a warning on the result.
#[derive(Debug, Clone, Default)]
pub struct DisplayClamps {
    rules: Vec<ClampRule>,
}

impl DisplayClamps {
    pub fn new(rules: &[ClampRule]) -> Self {
        Self { rules: rules.to_vec() }
    }

    /// The bounds the dashboards have always shown with.
    pub fn standard() -> Self {
        Self {
            rules: configuration::DisplayConfig::default().clamps,
        }
    }

    pub fn rules_for(&self, concept: Concept) -> impl Iterator<Item = &ClampRule> {
        self.rules.iter().filter(move |rule| rule.concept == concept)
    }

    pub fn apply(&self, mut result: FormulaResult) -> FormulaResult {
        for rule in self.rules_for(result.concept) {
            let Some(value) = result.outputs.get_mut(&rule.output) else {
                continue;
            };
            let clamped = clamp(*value, rule.min, rule.max);
            if clamped != *value {
                tracing::warn!(
                    concept = %rule.concept,
                    output = %rule.output,
                    raw = %value,
                    shown = %clamped,
                    "Clamping output for display"
                );
                let warning = format!("{} clamped from {} to {} for display", rule.output, value, clamped);
                *value = clamped;
                result.warnings.push(warning);
            }
        }
        result
    }
}

fn clamp(value: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> Decimal {
    let floored = min.map_or(value, |min| value.max(min));
    max.map_or(floored, |max| floored.min(max))
}
