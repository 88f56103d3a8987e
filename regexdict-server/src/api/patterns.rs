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

//! Pattern builder endpoints
//!
//! Preview is stateless; the session routes generate a pattern and add it
//! to that session's dictionary in the same call.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use regexdict_core::{AddOutcome, GeneratedPattern, PatternRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{ApiError, AppState};

/// A generated pattern with its preview line
#[derive(Debug, Serialize)]
pub struct PatternResponse {
    #[serde(flatten)]
    pub generated: GeneratedPattern,
    /// Absent when the builder returned nothing
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<AddOutcome>,
}

impl PatternResponse {
    fn new(generated: GeneratedPattern, outcome: Option<AddOutcome>) -> Self {
        Self {
            preview: generated.preview(),
            generated,
            outcome,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub patterns: Vec<PatternRequest>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<PatternResponse>,
    pub inserted: usize,
}

/// POST /api/v1/patterns/preview
pub async fn preview_pattern(
    payload: Result<Json<PatternRequest>, JsonRejection>,
) -> Result<Json<PatternResponse>, ApiError> {
    let Json(request) = payload?;
    let generated = request.build()?;
    Ok(Json(PatternResponse::new(generated, None)))
}

/// POST /api/v1/sessions/:id/patterns
#[tracing::instrument(skip(state, payload))]
pub async fn add_pattern(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<PatternRequest>, JsonRejection>,
) -> Result<Json<PatternResponse>, ApiError> {
    let Json(request) = payload?;
    let session = state.session(&session_id)?;
    let (generated, outcome) = session.builder.lock().add(&request)?;

    debug!(kind = %generated.kind, ?outcome, category = %generated.category, "Pattern added");
    Ok(Json(PatternResponse::new(generated, Some(outcome))))
}

/// POST /api/v1/sessions/:id/patterns/batch
///
/// All requests are built before any is added; one invalid window rejects
/// the whole batch.
#[tracing::instrument(skip(state, payload))]
pub async fn add_pattern_batch(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(request) = payload?;
    let session = state.session(&session_id)?;
    let (generated, outcomes) = session.builder.lock().add_batch(&request.patterns)?;

    let inserted = outcomes.iter().filter(|o| o.inserted()).count();
    debug!(count = request.patterns.len(), inserted, "Pattern batch added");
    let results = generated
        .into_iter()
        .zip(outcomes)
        .map(|(g, o)| PatternResponse::new(g, Some(o)))
        .collect();

    Ok(Json(BatchResponse { results, inserted }))
}
