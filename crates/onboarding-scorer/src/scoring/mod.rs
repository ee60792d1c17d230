//! Deterministic onboarding score.
//!
//! Every rule inspects the parsed profile on its own and either stays silent or
//! contributes a signed delta plus an explanation fragment. Contributions are folded onto the
//! base score in a fixed order and the total is clamped to `0..=100` once at the end.

pub mod domain;
mod rules;

pub use domain::{
    ParsedData, PersonalInfo, Preferences, RequestValidationError, ScoreRequest, ScoreResponse,
};
pub use rules::{RuleContribution, RuleKind};

use serde::Serialize;
use tracing::{debug, info};

pub const BASE_SCORE: i64 = 50;
pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Final score together with the rule trail that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub score: u8,
    pub explanation: String,
    pub contributions: Vec<RuleContribution>,
}

impl ScoreOutcome {
    /// Sum of all rule deltas on top of the base score, before clamping.
    pub fn unclamped_total(&self) -> i64 {
        self.contributions
            .iter()
            .fold(BASE_SCORE, |total, contribution| {
                total.saturating_add(contribution.delta)
            })
    }
}

impl From<ScoreOutcome> for ScoreResponse {
    fn from(outcome: ScoreOutcome) -> Self {
        Self {
            score: outcome.score,
            explanation: outcome.explanation,
        }
    }
}

/// Runs every rule against `data` and assembles the explanation.
pub fn evaluate(data: &ParsedData) -> ScoreOutcome {
    let contributions: Vec<RuleContribution> = rules::RULES
        .iter()
        .filter_map(|(kind, rule)| {
            let contribution = rule(data);
            debug!(rule = %kind, delta = contribution.as_ref().map(|c| c.delta), "rule evaluated");
            contribution
        })
        .collect();

    let (total, fragments) = contributions.iter().fold(
        (BASE_SCORE, Vec::with_capacity(contributions.len())),
        |(total, mut fragments), contribution| {
            if let Some(fragment) = contribution.fragment.as_deref() {
                fragments.push(fragment);
            }
            (total.saturating_add(contribution.delta), fragments)
        },
    );

    let score = clamp(total);
    let explanation = format!("Score: {score}/100. {}", fragments.join("; "));

    info!(score, explanation = %explanation, "calculated score");

    ScoreOutcome {
        score,
        explanation,
        contributions,
    }
}

fn clamp(total: i64) -> u8 {
    let bounded = total.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE));
    u8::try_from(bounded).unwrap_or(MAX_SCORE)
}
