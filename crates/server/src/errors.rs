//! Transport mapping for ledger errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use userchain_ledger::{LedgerError, RegistryError};

/// Errors a route handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    /// Request body lacked a username or an email.
    MissingFields,
    /// A search query matched nothing.
    NothingMatched,
    /// Anything the ledger itself rejected.
    Ledger(LedgerError),
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self::Ledger(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingFields => rejected(StatusCode::BAD_REQUEST, "username and email are required"),
            ApiError::NothingMatched => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "no matching results" }))).into_response()
            }
            ApiError::Ledger(err) => match &err {
                LedgerError::UserNotFound(_) | LedgerError::BlockNotFound(_) => {
                    (StatusCode::NOT_FOUND, Json(json!({ "error": err.to_string() }))).into_response()
                }
                LedgerError::EmptyField(_)
                | LedgerError::Registry(RegistryError::DuplicateUsername(_))
                | LedgerError::Registry(RegistryError::DuplicateEmail(_)) => {
                    rejected(StatusCode::BAD_REQUEST, &err.to_string())
                }
                _ => {
                    tracing::error!(error = %err, "internal ledger error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "internal server error" })),
                    )
                        .into_response()
                }
            },
        }
    }
}

fn rejected(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}
