use crate::store::StoreError;
use crate::validation::ValidationErrors;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Errors a handler can surface to the caller.
///
/// Notification failures are deliberately absent: they are logged where they
/// happen and never reach the response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 422 with every offending field listed under `detail`
    #[error("request validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// 500 with a fixed, caller-safe message; the source is only logged
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Wraps a store failure behind a fixed user-facing message and logs the cause.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| {
            tracing::error!(error = %source, "{}", context);
            ApiError::Store { context, source }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => json!({ "detail": errors }),
            ApiError::Store { context, .. } => json!({ "detail": context }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
