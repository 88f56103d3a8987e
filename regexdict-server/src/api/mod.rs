// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

pub mod expand;
pub mod health;
pub mod patterns;
pub mod sessions;

pub use expand::{cancel_session_expansion, expand_category, expand_session_category};
pub use health::health_check;
pub use patterns::{add_pattern, add_pattern_batch, preview_pattern};
pub use sessions::{
    create_session, delete_session, export_dictionary, get_dictionary, reset_dictionary,
};

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use regexdict_core::PatternError;
use regexdict_expand::CategoryExpander;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::sessions::{SessionError, SessionHandle, SessionRegistry};

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request was abandoned before it produced a result
    #[error("Gone: {0}")]
    Gone(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Gone(msg) => (StatusCode::GONE, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<PatternError> for ApiError {
    fn from(err: PatternError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

// Malformed bodies get the same `{error}` shape as every other failure
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::ServiceUnavailable(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    /// None when no provider key is configured
    pub expander: Option<Arc<dyn CategoryExpander>>,
}

impl AppState {
    pub fn new(sessions: SessionRegistry, expander: Option<Arc<dyn CategoryExpander>>) -> Self {
        Self {
            sessions: Arc::new(sessions),
            expander,
        }
    }

    /// Look up a session by its path id. Malformed ids are treated as unknown.
    pub(crate) fn session(&self, id: &str) -> Result<Arc<SessionHandle>, ApiError> {
        Uuid::parse_str(id)
            .ok()
            .and_then(|uuid| self.sessions.get(&uuid))
            .ok_or_else(|| ApiError::NotFound(format!("Session {} not found", id)))
    }

    pub(crate) fn expander(&self) -> Result<Arc<dyn CategoryExpander>, ApiError> {
        self.expander.clone().ok_or_else(|| {
            ApiError::ServiceUnavailable("Category expansion is not configured".to_string())
        })
    }
}
