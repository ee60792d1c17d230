use crate::infra::ApiState;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::Json;
use onboarding_scorer::auth::{AuthError, INTERNAL_TOKEN_HEADER};
use onboarding_scorer::error::AppError;
use onboarding_scorer::scoring::ScoreRequest;
use tracing::warn;

/// Proof that the request carried the shared internal token.
#[derive(Debug)]
pub(crate) struct InternalCaller;

#[axum::async_trait]
impl FromRequestParts<ApiState> for InternalCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        let result = match parts.headers.get(INTERNAL_TOKEN_HEADER) {
            None => state.verifier.verify(None),
            Some(value) => match value.to_str() {
                Ok(token) => state.verifier.verify(Some(token)),
                Err(_) => Err(AuthError::InvalidToken),
            },
        };

        result.map(|()| InternalCaller).map_err(|err| {
            warn!(path = %parts.uri.path(), reason = %err, "rejected internal caller");
            AppError::from(err)
        })
    }
}

/// JSON body parsed into a [`ScoreRequest`] and checked beyond its shape.
/// Every rejection is reported as a validation failure.
#[derive(Debug)]
pub(crate) struct ValidScoreRequest(pub(crate) ScoreRequest);

#[axum::async_trait]
impl<S> FromRequest<S> for ValidScoreRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(request) = Json::<ScoreRequest>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        request.validate()?;
        Ok(Self(request))
    }
}
