use core_types::PolicyKind;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Stylized first-year effects of a policy, in percentage points.
///
/// These are teaching constants, not model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolicyEffect {
    pub kind: PolicyKind,
    pub description: &'static str,
    pub growth: Decimal,
    pub inflation: Decimal,
    pub unemployment: Decimal,
    pub deficit: Decimal,
    pub interest_rate: Decimal,
}

pub static POLICY_TABLE: [PolicyEffect; 6] = [
    PolicyEffect {
        kind: PolicyKind::ExpansionaryFiscal,
        description: "Raise government spending or cut taxes",
        growth: dec!(1.5),
        inflation: dec!(0.8),
        unemployment: dec!(-0.7),
        deficit: dec!(1.2),
        interest_rate: dec!(0.3),
    },
    PolicyEffect {
        kind: PolicyKind::ContractionaryFiscal,
        description: "Cut government spending or raise taxes",
        growth: dec!(-1.2),
        inflation: dec!(-0.6),
        unemployment: dec!(0.6),
        deficit: dec!(-1.0),
        interest_rate: dec!(-0.2),
    },
    PolicyEffect {
        kind: PolicyKind::ExpansionaryMonetary,
        description: "Lower the policy rate or expand the money supply",
        growth: dec!(1.0),
        inflation: dec!(0.5),
        unemployment: dec!(-0.4),
        deficit: dec!(0.0),
        interest_rate: dec!(-0.5),
    },
    PolicyEffect {
        kind: PolicyKind::ContractionaryMonetary,
        description: "Raise the policy rate or shrink the money supply",
        growth: dec!(-0.8),
        inflation: dec!(-0.4),
        unemployment: dec!(0.3),
        deficit: dec!(0.0),
        interest_rate: dec!(0.6),
    },
    PolicyEffect {
        kind: PolicyKind::ExpansionaryTrade,
        description: "Promote exports or lower trade barriers",
        growth: dec!(0.7),
        inflation: dec!(0.2),
        unemployment: dec!(-0.3),
        deficit: dec!(0.1),
        interest_rate: dec!(0.0),
    },
    PolicyEffect {
        kind: PolicyKind::LaborMarketReform,
        description: "Reforms that make the labor market more flexible",
        growth: dec!(0.5),
        inflation: dec!(0.0),
        unemployment: dec!(-0.8),
        deficit: dec!(-0.2),
        interest_rate: dec!(0.0),
    },
];

pub fn lookup(kind: PolicyKind) -> &'static PolicyEffect {
    let row = match kind {
        PolicyKind::ExpansionaryFiscal => 0,
        PolicyKind::ContractionaryFiscal => 1,
        PolicyKind::ExpansionaryMonetary => 2,
        PolicyKind::ContractionaryMonetary => 3,
        PolicyKind::ExpansionaryTrade => 4,
        PolicyKind::LaborMarketReform => 5,
    };
    &POLICY_TABLE[row]
}
