//! Behavioral checks for the public scoring API, driven from JSON payloads the way the
//! orchestration layer sends them.

use onboarding_scorer::scoring::{evaluate, ParsedData, PersonalInfo, RuleKind, ScoreRequest};
use serde_json::{json, Value};

fn parsed(value: Value) -> ParsedData {
    serde_json::from_value(value).expect("valid parsed data")
}

fn income_only(income: f64) -> ParsedData {
    ParsedData {
        personal_info: Some(PersonalInfo {
            income: Some(income),
            ..PersonalInfo::default()
        }),
        ..ParsedData::default()
    }
}

fn with_flags(mut data: ParsedData, count: usize) -> ParsedData {
    data.flags = Some((0..count).map(|idx| format!("flag-{idx}")).collect());
    data
}

#[test]
fn empty_payload_returns_base_score() {
    let outcome = evaluate(&parsed(json!({})));
    assert_eq!(outcome.score, 50);
    assert!(outcome.explanation.contains("50"));
}

#[test]
fn scoring_is_deterministic() {
    let data = parsed(json!({
        "personalInfo": { "age": 52, "income": 61000, "employment": "part-time" },
        "preferences": { "riskTolerance": "high" },
        "flags": ["late-payment"]
    }));

    let first = evaluate(&data);
    let second = evaluate(&data);

    assert_eq!(first, second);
}

#[test]
fn each_flag_costs_ten_points_until_zero() {
    let base = parsed(json!({
        "personalInfo": { "age": 30, "income": 80000 }
    }));
    let base_score = i64::from(evaluate(&base).score);

    let mut previous = base_score;
    for count in 1..=12 {
        let score = i64::from(evaluate(&with_flags(base.clone(), count)).score);
        assert!(score <= previous, "flag {count} must never raise the score");
        assert_eq!(score, (base_score - 10 * count as i64).max(0));
        previous = score;
    }
}

#[test]
fn two_flags_subtract_twenty() {
    let no_flags = evaluate(&parsed(json!({ "flags": [] })));
    let flagged = evaluate(&parsed(json!({ "flags": ["debt", "bankruptcy"] })));

    assert_eq!(flagged.score + 20, no_flags.score);
    assert!(!no_flags.explanation.contains("Risk flags"));
    assert!(flagged.explanation.contains("Risk flags penalty (-20)"));
}

#[test]
fn employment_bonus_is_additive() {
    let base = evaluate(&income_only(50_000.0)).score;

    for (status, bonus) in [("full-time", 5), ("self-employed", 3), ("part-time", 1)] {
        let mut data = income_only(50_000.0);
        if let Some(info) = data.personal_info.as_mut() {
            info.employment = Some(status.to_string());
        }
        assert_eq!(evaluate(&data).score, base + bonus, "status {status}");
    }
}

#[test]
fn age_bonus_matches_brackets() {
    let score_for = |age: u32| evaluate(&parsed(json!({ "personalInfo": { "age": age } })));

    assert_eq!(score_for(35).score, 55);
    assert_eq!(score_for(22).score, 52);

    for age in [70, 10] {
        let outcome = score_for(age);
        assert_eq!(outcome.score, 50);
        assert!(outcome
            .contributions
            .iter()
            .all(|contribution| contribution.rule != RuleKind::Age));
        assert!(!outcome.explanation.contains("age range"));
    }
}

#[test]
fn income_tier_boundaries() {
    let cases = [
        (100_000.0, 80),
        (99_999.0, 70),
        (75_000.0, 70),
        (50_000.0, 60),
        (30_000.0, 55),
        (29_999.0, 50),
    ];

    for (income, expected) in cases {
        assert_eq!(evaluate(&income_only(income)).score, expected, "income {income}");
    }
}

#[test]
fn end_to_end_profile_scores_eighty_five() {
    let request: ScoreRequest = serde_json::from_value(json!({
        "userId": "123e4567-e89b-12d3-a456-426614174000",
        "parsedData": {
            "personalInfo": { "age": 30, "income": 75000, "employment": "full-time" },
            "preferences": { "riskTolerance": "moderate" },
            "flags": []
        }
    }))
    .expect("request parses");
    request.validate().expect("request is valid");

    let outcome = evaluate(&request.parsed_data);

    assert_eq!(outcome.score, 85);
    assert_eq!(
        outcome.explanation,
        "Score: 85/100. Very good income (+20); Full-time employment (+5); \
         Optimal age range (+5); Moderate risk tolerance (+5)"
    );
    assert_eq!(outcome.unclamped_total(), 85);
}

#[test]
fn score_stays_within_bounds_for_degenerate_inputs() {
    let maximal = parsed(json!({
        "personalInfo": { "age": 30, "income": 1.0e12, "employment": "full-time" },
        "preferences": { "riskTolerance": "moderate" }
    }));
    assert!(evaluate(&maximal).score <= 100);

    let buried = with_flags(ParsedData::default(), 10_000);
    let outcome = evaluate(&buried);
    assert_eq!(outcome.score, 0);
    assert!(outcome.explanation.contains("Risk flags penalty (-100000)"));
}

#[test]
fn contribution_deltas_sum_to_unclamped_total() {
    let outcome = evaluate(&parsed(json!({
        "personalInfo": { "age": 60, "income": 31000, "employment": "freelance" },
        "preferences": { "riskTolerance": "low" },
        "flags": ["a"]
    })));

    let sum: i64 = outcome.contributions.iter().map(|c| c.delta).sum();
    assert_eq!(outcome.unclamped_total(), 50 + sum);
    assert_eq!(outcome.score, 50);
    assert_eq!(
        outcome.explanation,
        "Score: 50/100. Moderate income (+5); Employment status: freelance; \
         Good age range (+2); Conservative risk tolerance (+3); Risk flags penalty (-10)"
    );
}
