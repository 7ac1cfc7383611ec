//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

// Errors

/// Error raised by API handlers, carrying the status to respond with.
pub struct ApiError {
    status: StatusCode,
    inner: anyhow::Error,
}

impl ApiError {
    /// Client error whose message is shown in the response body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            inner: anyhow::anyhow!(message.into()),
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.inner);

        (self.status, Json(json!({ "error": self.inner.to_string() }))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            inner: err.into(),
        }
    }
}

// Re-export public types from each route

pub mod tasks {
    pub use crate::api::routes::tasks::public::*;
}

pub mod schedule {
    pub use crate::api::routes::schedule::public::*;
}

pub mod natural {
    pub use crate::api::routes::natural::public::*;
}
