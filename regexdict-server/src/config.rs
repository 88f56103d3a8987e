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

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Regexdict Server Configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpServerConfig,
    #[serde(default)]
    pub expansion: ExpansionConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpServerConfig {
    /// HTTP API listen address (e.g., "127.0.0.1:47200")
    #[serde(default = "default_http_addr")]
    pub listen_addr: String,

    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// Allowed CORS origins (empty = allow all)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct ExpansionConfig {
    /// OpenAI API key; expansion endpoints answer 503 without one
    pub openai_api_key: Option<String>,

    /// Chat completions base URL (OpenAI-compatible)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Caps the length of the generated word list
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

// The key must never reach the logs
impl std::fmt::Debug for ExpansionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpansionConfig")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Maximum number of concurrently open builder sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Seconds without any request after which a session is evicted
    #[serde(default = "default_idle_ttl_secs")]
    pub idle_ttl_secs: u64,
}

impl SessionConfig {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }
}

// Default values
fn default_http_addr() -> String {
    "127.0.0.1:47200".to_string()
}

fn default_enable_cors() -> bool {
    true
}

fn default_base_url() -> String {
    regexdict_expand::openai::DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    regexdict_expand::openai::DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    regexdict_expand::openai::DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    regexdict_expand::openai::DEFAULT_MAX_TOKENS
}

fn default_max_sessions() -> usize {
    1000
}

fn default_idle_ttl_secs() -> u64 {
    30 * 60
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_http_addr(),
            enable_cors: default_enable_cors(),
            cors_origins: vec![],
        }
    }
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_ttl_secs: default_idle_ttl_secs(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with priority: env > file > defaults
    ///
    /// Supported environment variables:
    /// - REGEXDICT_HTTP_ADDR: HTTP listen address (default: 127.0.0.1:47200)
    /// - REGEXDICT_ENABLE_CORS: Enable CORS (default: true)
    /// - REGEXDICT_MAX_SESSIONS: Max open sessions (default: 1000)
    /// - REGEXDICT_SESSION_IDLE_TTL_SECS: Idle session lifetime (default: 1800)
    /// - OPENAI_API_KEY: Key for category expansion
    /// - REGEXDICT_OPENAI_BASE_URL: Chat completions base URL
    /// - REGEXDICT_EXPANSION_MODEL: Model used for expansion (default: gpt-3.5-turbo)
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(path) = config_file {
            if path.exists() {
                tracing::info!("Loading configuration from file: {:?}", path);
                Self::from_file(&path)?
            } else {
                tracing::warn!("Config file not found: {:?}, using defaults", path);
                Self::default()
            }
        } else {
            Self::default()
        };

        config.merge_with_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override with environment variables (only those explicitly set)
    fn merge_with_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = var("REGEXDICT_HTTP_ADDR") {
            self.server.listen_addr = addr;
        }

        if let Some(cors) = var("REGEXDICT_ENABLE_CORS") {
            self.server.enable_cors = cors.parse().unwrap_or(true);
        }

        if let Some(max) = var("REGEXDICT_MAX_SESSIONS") {
            if let Ok(val) = max.parse() {
                self.sessions.max_sessions = val;
            }
        }

        if let Some(ttl) = var("REGEXDICT_SESSION_IDLE_TTL_SECS") {
            if let Ok(val) = ttl.parse() {
                self.sessions.idle_ttl_secs = val;
            }
        }

        if let Some(key) = var("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
            self.expansion.openai_api_key = Some(key);
        }

        if let Some(base_url) = var("REGEXDICT_OPENAI_BASE_URL") {
            self.expansion.base_url = base_url;
        }

        if let Some(model) = var("REGEXDICT_EXPANSION_MODEL") {
            self.expansion.model = model;
        }
    }

    /// Parse listen address as SocketAddr
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(self.server.listen_addr.parse()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if self.sessions.max_sessions == 0 {
            anyhow::bail!("sessions.max_sessions must be at least 1");
        }

        if self.sessions.idle_ttl_secs == 0 {
            anyhow::bail!("sessions.idle_ttl_secs must be at least 1");
        }

        Ok(())
    }
}
