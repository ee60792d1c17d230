use crate::cli::ServeArgs;
use crate::infra::ApiState;
use crate::routes::router;
use axum::response::{IntoResponse, Response};
use axum::Router;
use axum_prometheus::PrometheusMetricLayer;
use onboarding_scorer::auth::TokenVerifier;
use onboarding_scorer::config::AppConfig;
use onboarding_scorer::error::AppError;
use onboarding_scorer::telemetry;
use std::any::Any;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.auth.uses_default_token() {
        warn!("INTERNAL_SCORER_TOKEN not set; using the development placeholder token");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let state = ApiState::new(TokenVerifier::from_config(&config.auth), prometheus_handle);

    let app = with_service_layers(router(state.clone()), config.server.request_timeout)
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    state.mark_ready();

    info!(?config.environment, %addr, "scorer service ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("scorer service shutting down");
    Ok(())
}

/// Cross-cutting HTTP behavior: request tracing, permissive CORS, a request timeout, and
/// panics converted into a generic 500.
pub(crate) fn with_service_layers(app: Router, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    app.layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::test_support::{api_state, read_json_body};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use onboarding_scorer::error::INTERNAL_ERROR_DETAIL;
    use tower::ServiceExt;

    #[tokio::test]
    async fn panics_become_generic_internal_errors() {
        async fn explode() -> &'static str {
            panic!("score table missing")
        }

        let app = Router::new().route("/boom", get(explode));
        let app = with_service_layers(app, Duration::from_secs(5));

        let response = app
            .oneshot(Request::get("/boom").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = read_json_body(response).await;
        assert_eq!(payload["detail"], INTERNAL_ERROR_DETAIL);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let app = with_service_layers(router(api_state()), Duration::from_secs(5));

        let response = app
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "https://orchestrator.internal")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
