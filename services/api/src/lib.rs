mod cli;
mod extract;
mod infra;
mod routes;
mod score;
mod server;

use onboarding_scorer::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
