//! Error types for the tournament HTTP API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! Every error body has the shape `{"error": message, "status": code}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use swiss_core::{StoreError, SwissError};

/// Errors that can occur in the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A tournament operation failed.
    #[error(transparent)]
    Swiss(#[from] SwissError),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A UUID could not be parsed from the request path.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    /// The request body was missing or malformed.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// The query string was missing fields or malformed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Swiss(err) => swiss_status(err),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidUuid(_) | Self::InvalidBody(_) | Self::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

const fn swiss_status(err: &SwissError) -> StatusCode {
    match err {
        SwissError::Store(StoreError::Unavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        SwissError::Store(StoreError::Rejected { .. } | StoreError::DuplicateMatch { .. })
        | SwissError::OddPlayerCount { .. }
        | SwissError::DuplicateMatch { .. } => StatusCode::CONFLICT,
        SwissError::Store(StoreError::Inconsistent { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        SwissError::UnknownTournament { .. } | SwissError::UnknownPlayer { .. } => {
            StatusCode::NOT_FOUND
        }
        SwissError::SamePlayer { .. }
        | SwissError::InvalidRound { .. }
        | SwissError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use swiss_types::{PlayerId, Round, TournamentId};

    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (
                ApiError::from(SwissError::Store(StoreError::Unavailable {
                    reason: String::from("timeout"),
                })),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::from(SwissError::OddPlayerCount { count: 3 }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(SwissError::DuplicateMatch {
                    tournament_id: TournamentId::new(),
                    round: Round::FIRST,
                    player_a: PlayerId::new(),
                    player_b: PlayerId::new(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(SwissError::Store(StoreError::DuplicateMatch {
                    reason: String::from("already played"),
                })),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(SwissError::Store(StoreError::Inconsistent {
                    reason: String::from("wins > played"),
                })),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(SwissError::UnknownPlayer {
                    player_id: PlayerId::new(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(SwissError::InvalidRound { round: Round(0) }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::InvalidUuid(String::from("nope")),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }
}
