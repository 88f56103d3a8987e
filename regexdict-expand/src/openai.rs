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

//! OpenAI chat completions expander

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::{CategoryExpander, ExpansionError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.6;
/// Caps the length of the returned line
pub const DEFAULT_MAX_TOKENS: u32 = 150;

pub struct OpenAIExpander {
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OpenAIExpander {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl CategoryExpander for OpenAIExpander {
    async fn expand(&self, category: &str) -> Result<String, ExpansionError> {
        let request = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": user_prompt(category)
                }
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        });

        debug!(category, model = %self.model, "Requesting category expansion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await?;
            return Err(ExpansionError::Api { status, message });
        }

        let response_data: serde_json::Value = response.json().await?;

        // A reply without content counts as an empty list, not a failure
        let expanded = match response_data["choices"][0]["message"]["content"].as_str() {
            Some(content) => content.to_string(),
            None => {
                warn!(category, "Expansion response had no content");
                String::new()
            }
        };

        Ok(expanded)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let expander = OpenAIExpander::new("test".to_string(), DEFAULT_MODEL.to_string());

        assert_eq!(expander.model_name(), "gpt-3.5-turbo");
        assert_eq!(expander.base_url, DEFAULT_BASE_URL);
        assert_eq!(expander.max_tokens, 150);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let expander = OpenAIExpander::new("test".to_string(), DEFAULT_MODEL.to_string())
            .with_base_url("http://localhost:8080/v1/".to_string());

        assert_eq!(expander.base_url, "http://localhost:8080/v1");
    }
}
