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

//! Sessions API - per-client dictionaries and their export

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use regexdict_core::{AggregatorState, Dictionary};
use serde::Serialize;

use crate::api::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

/// Response for GET /api/v1/sessions/:id/dictionary
#[derive(Debug, Serialize)]
pub struct DictionaryResponse {
    pub state: AggregatorState,
    pub categories: usize,
    pub patterns: usize,
    pub dictionary: Dictionary,
}

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ApiError> {
    let id = state.sessions.create()?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: id.to_string(),
        }),
    ))
}

/// DELETE /api/v1/sessions/:id
#[tracing::instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = uuid::Uuid::parse_str(&session_id)
        .map(|id| state.sessions.remove(&id))
        .unwrap_or(false);

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "Session {} not found",
            session_id
        )))
    }
}

/// GET /api/v1/sessions/:id/dictionary
#[tracing::instrument(skip(state))]
pub async fn get_dictionary(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<DictionaryResponse>, ApiError> {
    let session = state.session(&session_id)?;
    let builder = session.builder.lock();
    let dictionary = builder.dictionary();

    Ok(Json(DictionaryResponse {
        state: builder.state(),
        categories: dictionary.len(),
        patterns: dictionary.pattern_count(),
        dictionary,
    }))
}

/// DELETE /api/v1/sessions/:id/dictionary
#[tracing::instrument(skip(state))]
pub async fn reset_dictionary(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = state.session(&session_id)?;
    session.builder.lock().reset();
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/export
///
/// Plain-text dictionary, ready to paste into Python source.
#[tracing::instrument(skip(state))]
pub async fn export_dictionary(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.session(&session_id)?;
    let text = session.builder.lock().export();

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}
