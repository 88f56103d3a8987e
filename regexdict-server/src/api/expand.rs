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

//! Category expansion endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use regexdict_expand::{ExpansionError, ExpansionOutcome, RequestId};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::api::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ExpandCategoryRequest {
    #[serde(default)]
    pub category: Option<String>,
}

impl ExpandCategoryRequest {
    fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct ExpandCategoryResponse {
    pub expanded: String,
}

#[derive(Debug, Serialize)]
pub struct CancelExpansionResponse {
    pub cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
}

/// POST /api/expand-category
///
/// A missing or unparsable body is answered like an empty category.
pub async fn expand_category(
    State(state): State<AppState>,
    body: Option<Json<ExpandCategoryRequest>>,
) -> Result<Json<ExpandCategoryResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let category = request
        .category()
        .ok_or_else(|| ApiError::BadRequest("Category is required".to_string()))?;

    let expander = state.expander()?;
    match expander.expand(category).await {
        Ok(expanded) => {
            info!(category, model = expander.model_name(), "Category expanded");
            Ok(Json(ExpandCategoryResponse { expanded }))
        }
        Err(e) => {
            error!(category, "Error expanding category: {}", e);
            Err(ApiError::Internal("Failed to expand category".to_string()))
        }
    }
}

/// POST /api/v1/sessions/:id/expand
///
/// One expansion per session at a time; a second request while one is in
/// flight gets 409, and a request cancelled before it finished gets 410.
#[tracing::instrument(skip(state, body))]
pub async fn expand_session_category(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Option<Json<ExpandCategoryRequest>>,
) -> Result<Json<ExpansionOutcome>, ApiError> {
    let session = state.session(&session_id)?;
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let category = request
        .category()
        .ok_or_else(|| ApiError::BadRequest("Category is required".to_string()))?;

    let expander = state.expander()?;
    let ticket = session.expansion.begin(category).map_err(map_expansion_error)?;

    let outcome = ticket
        .run(expander.as_ref())
        .await
        .map_err(map_expansion_error)?;

    Ok(Json(outcome))
}

/// DELETE /api/v1/sessions/:id/expand
#[tracing::instrument(skip(state))]
pub async fn cancel_session_expansion(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CancelExpansionResponse>, ApiError> {
    let session = state.session(&session_id)?;
    let request_id = session.expansion.cancel_outstanding();

    Ok(Json(CancelExpansionResponse {
        cancelled: request_id.is_some(),
        request_id,
    }))
}

fn map_expansion_error(err: ExpansionError) -> ApiError {
    match err {
        ExpansionError::EmptyCategory => ApiError::BadRequest(err.to_string()),
        ExpansionError::Busy(_) => ApiError::Conflict(err.to_string()),
        ExpansionError::Cancelled(_) => ApiError::Gone(err.to_string()),
        other => {
            error!("Error expanding category: {}", other);
            ApiError::Internal("Failed to expand category".to_string())
        }
    }
}
