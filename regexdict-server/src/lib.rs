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

pub mod api;
pub mod config;
pub mod sessions;

use anyhow::Result;
use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use regexdict_expand::{CategoryExpander, OpenAIExpander};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{
    add_pattern, add_pattern_batch, cancel_session_expansion, create_session, delete_session,
    expand_category, expand_session_category, export_dictionary, get_dictionary, health_check,
    preview_pattern, reset_dictionary, AppState,
};
use config::{ExpansionConfig, ServerConfig};
use sessions::SessionRegistry;

/// Build the HTTP router for the given state.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        // Single-shot expansion, no session needed
        .route("/api/expand-category", post(expand_category))
        .route("/api/v1/patterns/preview", post(preview_pattern))
        .route("/api/v1/sessions", post(create_session))
        .route("/api/v1/sessions/:id", delete(delete_session))
        .route("/api/v1/sessions/:id/patterns", post(add_pattern))
        .route("/api/v1/sessions/:id/patterns/batch", post(add_pattern_batch))
        .route(
            "/api/v1/sessions/:id/dictionary",
            get(get_dictionary).delete(reset_dictionary),
        )
        .route("/api/v1/sessions/:id/export", get(export_dictionary))
        .route(
            "/api/v1/sessions/:id/expand",
            post(expand_session_category).delete(cancel_session_expansion),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.server.enable_cors {
        router.layer(cors_layer(&config.server.cors_origins))
    } else {
        router
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Build the configured expander, if a provider key is available.
pub fn build_expander(config: &ExpansionConfig) -> Option<Arc<dyn CategoryExpander>> {
    let api_key = config.openai_api_key.clone()?;

    let expander = OpenAIExpander::new(api_key, config.model.clone())
        .with_base_url(config.base_url.clone())
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);
    Some(Arc::new(expander))
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "regexdict_server=info,regexdict_expand=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Regexdict Server");
    tracing::info!("Configuration: {:#?}", config);

    // Validate configuration
    config.validate()?;

    let expander = build_expander(&config.expansion);
    match &expander {
        Some(expander) => {
            tracing::info!("Category expansion enabled (model: {})", expander.model_name())
        }
        None => tracing::warn!(
            "No OpenAI API key configured (set OPENAI_API_KEY). Category expansion will be disabled."
        ),
    }

    let sessions = SessionRegistry::new(config.sessions.max_sessions, config.sessions.idle_ttl());
    let state = AppState::new(sessions, expander);
    let app = build_router(state, &config);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
