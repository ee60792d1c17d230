use super::domain::ParsedData;
use serde::Serialize;
use std::fmt;

/// Rules in the order they are evaluated and explained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Income,
    Employment,
    Age,
    RiskTolerance,
    RiskFlags,
}

impl RuleKind {
    pub fn label(self) -> &'static str {
        match self {
            RuleKind::Income => "income",
            RuleKind::Employment => "employment",
            RuleKind::Age => "age",
            RuleKind::RiskTolerance => "risk tolerance",
            RuleKind::RiskFlags => "risk flags",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points and explanation produced by a single rule that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: RuleKind,
    pub delta: i64,
    pub fragment: Option<String>,
}

impl RuleContribution {
    fn new(rule: RuleKind, delta: i64, fragment: impl Into<String>) -> Self {
        Self {
            rule,
            delta,
            fragment: Some(fragment.into()),
        }
    }
}

pub(crate) type Rule = fn(&ParsedData) -> Option<RuleContribution>;

pub(crate) const RULES: [(RuleKind, Rule); 5] = [
    (RuleKind::Income, income),
    (RuleKind::Employment, employment),
    (RuleKind::Age, age),
    (RuleKind::RiskTolerance, risk_tolerance),
    (RuleKind::RiskFlags, risk_flags),
];

const INCOME_TIERS: [(f64, i64, &str); 4] = [
    (100_000.0, 30, "Excellent income (+30)"),
    (75_000.0, 20, "Very good income (+20)"),
    (50_000.0, 10, "Good income (+10)"),
    (30_000.0, 5, "Moderate income (+5)"),
];

const FLAG_PENALTY: i64 = 10;

/// Always fires: an absent (or zero) income is explained explicitly.
pub(crate) fn income(data: &ParsedData) -> Option<RuleContribution> {
    let Some(income) = data.income().filter(|income| *income != 0.0) else {
        return Some(RuleContribution::new(
            RuleKind::Income,
            0,
            "No income information provided",
        ));
    };

    let contribution = INCOME_TIERS
        .iter()
        .find(|(threshold, _, _)| income >= *threshold)
        .map(|(_, bonus, fragment)| RuleContribution::new(RuleKind::Income, *bonus, *fragment))
        .unwrap_or_else(|| RuleContribution::new(RuleKind::Income, 0, "Lower income (no bonus)"));

    Some(contribution)
}

/// Unrecognised statuses are echoed back verbatim without points.
pub(crate) fn employment(data: &ParsedData) -> Option<RuleContribution> {
    let status = data.employment().filter(|status| !status.is_empty())?;

    let contribution = match status {
        "full-time" => RuleContribution::new(RuleKind::Employment, 5, "Full-time employment (+5)"),
        "self-employed" => RuleContribution::new(RuleKind::Employment, 3, "Self-employed (+3)"),
        "part-time" => RuleContribution::new(RuleKind::Employment, 1, "Part-time employment (+1)"),
        other => RuleContribution::new(
            RuleKind::Employment,
            0,
            format!("Employment status: {other}"),
        ),
    };

    Some(contribution)
}

/// Silent outside the scored brackets.
pub(crate) fn age(data: &ParsedData) -> Option<RuleContribution> {
    match data.age()? {
        25..=45 => Some(RuleContribution::new(
            RuleKind::Age,
            5,
            "Optimal age range (+5)",
        )),
        18..=24 | 46..=65 => Some(RuleContribution::new(
            RuleKind::Age,
            2,
            "Good age range (+2)",
        )),
        _ => None,
    }
}

/// Silent for unrecognised tolerances.
pub(crate) fn risk_tolerance(data: &ParsedData) -> Option<RuleContribution> {
    match data.risk_tolerance()? {
        "moderate" => Some(RuleContribution::new(
            RuleKind::RiskTolerance,
            5,
            "Moderate risk tolerance (+5)",
        )),
        "low" => Some(RuleContribution::new(
            RuleKind::RiskTolerance,
            3,
            "Conservative risk tolerance (+3)",
        )),
        "high" => Some(RuleContribution::new(
            RuleKind::RiskTolerance,
            2,
            "Aggressive risk tolerance (+2)",
        )),
        _ => None,
    }
}

pub(crate) fn risk_flags(data: &ParsedData) -> Option<RuleContribution> {
    let count = i64::try_from(data.flag_count()).unwrap_or(i64::MAX);
    let penalty = count.saturating_mul(FLAG_PENALTY);
    if penalty == 0 {
        return None;
    }

    Some(RuleContribution::new(
        RuleKind::RiskFlags,
        -penalty,
        format!("Risk flags penalty (-{penalty})"),
    ))
}
