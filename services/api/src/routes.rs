use crate::extract::{InternalCaller, ValidScoreRequest};
use crate::infra::{ApiState, DOCS_PATH, SERVICE_NAME, SERVICE_VERSION};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use onboarding_scorer::error::AppError;
use onboarding_scorer::scoring::{self, ScoreResponse};
use serde::Serialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) timestamp: String,
    pub(crate) version: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ServiceInfoResponse {
    pub(crate) service: &'static str,
    pub(crate) version: &'static str,
    pub(crate) status: &'static str,
    pub(crate) docs: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RouteDoc {
    pub(crate) method: &'static str,
    pub(crate) path: &'static str,
    pub(crate) authenticated: bool,
    pub(crate) description: &'static str,
}

const ROUTES: [RouteDoc; 6] = [
    RouteDoc {
        method: "GET",
        path: "/",
        authenticated: false,
        description: "Service metadata",
    },
    RouteDoc {
        method: "GET",
        path: "/health",
        authenticated: false,
        description: "Liveness probe with server timestamp and version",
    },
    RouteDoc {
        method: "GET",
        path: "/ready",
        authenticated: false,
        description: "Readiness probe, 503 until the listener is bound",
    },
    RouteDoc {
        method: "GET",
        path: "/metrics",
        authenticated: false,
        description: "Prometheus metrics",
    },
    RouteDoc {
        method: "GET",
        path: DOCS_PATH,
        authenticated: false,
        description: "This route listing",
    },
    RouteDoc {
        method: "POST",
        path: "/score",
        authenticated: true,
        description: "Score {userId, parsedData}; requires X-Internal-Token",
    },
];

pub(crate) fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(DOCS_PATH, get(docs_endpoint))
        .route("/score", post(score_endpoint))
        .with_state(state)
}

pub(crate) async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
        status: "running",
        docs: DOCS_PATH,
    })
}

pub(crate) async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        version: SERVICE_VERSION,
    })
}

pub(crate) async fn readiness_endpoint(State(state): State<ApiState>) -> impl IntoResponse {
    if state.is_ready() {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(State(state): State<ApiState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn docs_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "routes": ROUTES,
    }))
}

pub(crate) async fn score_endpoint(
    _caller: InternalCaller,
    ValidScoreRequest(request): ValidScoreRequest,
) -> Result<Json<ScoreResponse>, AppError> {
    info!(user_id = %request.user_id, "calculating score");

    let outcome = scoring::evaluate(&request.parsed_data);

    info!(user_id = %request.user_id, score = outcome.score, "score calculated");
    Ok(Json(ScoreResponse::from(outcome)))
}
