use metrics_exporter_prometheus::PrometheusHandle;
use onboarding_scorer::auth::TokenVerifier;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub(crate) const SERVICE_NAME: &str = "Onboarding Scoring Service";
pub(crate) const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const DOCS_PATH: &str = "/docs";

/// State shared by every handler. Only the readiness flag ever changes.
#[derive(Clone)]
pub(crate) struct ApiState {
    pub(crate) verifier: Arc<TokenVerifier>,
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

impl ApiState {
    pub(crate) fn new(verifier: TokenVerifier, metrics: PrometheusHandle) -> Self {
        Self {
            verifier: Arc::new(verifier),
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
        }
    }

    pub(crate) fn mark_ready(&self) {
        self.readiness.store(true, Ordering::Release);
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.readiness.load(Ordering::Acquire)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ApiState;
    use axum::response::Response;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use onboarding_scorer::auth::TokenVerifier;
    use serde_json::Value;

    pub(crate) const TEST_TOKEN: &str = "test-internal-token";

    /// State with a private recorder so tests never touch the global one.
    pub(crate) fn api_state() -> ApiState {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        ApiState::new(TokenVerifier::new(TEST_TOKEN), handle)
    }

    pub(crate) async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}
