//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use careport_domain::error::CareportError;
use careport_domain::record::Record;

/// JSON error body returned by API endpoints.
///
/// `code` carries the machine-readable reason for bad-request conditions
/// (`idnull`, `idinvalid`, `idnotfound`, `idexists`).
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    entity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

/// Maps [`CareportError`] to an HTTP response with appropriate status code.
pub struct ApiError {
    entity: &'static str,
    error: CareportError,
}

impl ApiError {
    /// Wrap an error, tagging it with the record type it concerns.
    #[must_use]
    pub fn new<T: Record>(error: CareportError) -> Self {
        Self {
            entity: T::ENTITY_NAME,
            error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, code) = match &self.error {
            CareportError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            CareportError::Identifier(err) => {
                (StatusCode::BAD_REQUEST, err.to_string(), Some(err.code()))
            }
            CareportError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string(), None),
            CareportError::Storage(err) => {
                tracing::error!(error = %err, entity = self.entity, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                entity: self.entity,
                code,
            }),
        )
            .into_response()
    }
}
