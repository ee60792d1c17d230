use clap::Args;
use onboarding_scorer::error::AppError;
use onboarding_scorer::scoring::{evaluate, ParsedData, ScoreOutcome, ScoreRequest, ScoreResponse};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding a `{userId, parsedData}` request or a bare parsedData object ("-" for stdin)
    #[arg(long, short)]
    pub(crate) input: PathBuf,
    /// Print the HTTP response body instead of the rule breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = read_input(&args.input)?;
    let (user_id, data) = parse_document(&raw)?;
    let outcome = evaluate(&data);

    if args.json {
        let body = serde_json::to_string_pretty(&ScoreResponse::from(outcome))
            .map_err(|err| AppError::Internal(err.to_string()))?;
        println!("{body}");
    } else {
        render_outcome(user_id.as_deref(), &outcome);
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String, AppError> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Accepts either a full request or just its `parsedData` payload.
pub(crate) fn parse_document(raw: &str) -> Result<(Option<String>, ParsedData), AppError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| AppError::Validation(format!("input is not valid JSON: {err}")))?;

    if value.get("parsedData").is_some() {
        let request: ScoreRequest = serde_json::from_value(value)
            .map_err(|err| AppError::Validation(format!("invalid score request: {err}")))?;
        request.validate()?;
        return Ok((Some(request.user_id), request.parsed_data));
    }

    let data: ParsedData = serde_json::from_value(value)
        .map_err(|err| AppError::Validation(format!("invalid parsedData: {err}")))?;
    let request = ScoreRequest {
        user_id: String::new(),
        parsed_data: data,
    };
    request.validate()?;
    Ok((None, request.parsed_data))
}

fn render_outcome(user_id: Option<&str>, outcome: &ScoreOutcome) {
    match user_id {
        Some(id) => println!("Onboarding score for {id}"),
        None => println!("Onboarding score"),
    }
    println!("Score: {}/100", outcome.score);

    println!("\nRule contributions");
    for contribution in &outcome.contributions {
        let note = contribution.fragment.as_deref().unwrap_or("-");
        println!("- {}: {:+} ({})", contribution.rule, contribution.delta, note);
    }

    let total = outcome.unclamped_total();
    if total != i64::from(outcome.score) {
        println!("\nUnclamped total {total} clamped to {}", outcome.score);
    }

    println!("\nExplanation: {}", outcome.explanation);
}
