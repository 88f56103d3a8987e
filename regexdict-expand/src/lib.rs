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

//! # Regexdict Expand
//!
//! Category expansion: given a category label, ask a text-generation
//! provider for one comma-separated line of related words and phrases.
//! The line feeds the tokenizer in place of a hand-typed word list.
//!
//! ```rust,ignore
//! use regexdict_expand::{ExpansionCoordinator, OpenAIExpander};
//!
//! let expander = OpenAIExpander::new(std::env::var("OPENAI_API_KEY")?, "gpt-3.5-turbo".into());
//! let coordinator = ExpansionCoordinator::new();
//!
//! let ticket = coordinator.begin("fruit")?;
//! let outcome = ticket.run(&expander).await?;
//! println!("{:?}", outcome.terms);
//! ```

use async_trait::async_trait;
use thiserror::Error;

pub mod coordinator;
pub mod openai;
pub mod prompt;

pub use coordinator::{ExpansionCoordinator, ExpansionOutcome, ExpansionTicket, RequestId};
pub use openai::OpenAIExpander;

/// Provider that turns a category into a comma-separated line of terms
#[async_trait]
pub trait CategoryExpander: Send + Sync {
    /// Expand one category. Callers validate that `category` is non-empty.
    async fn expand(&self, category: &str) -> Result<String, ExpansionError>;

    /// Model identifier used for the request
    fn model_name(&self) -> &str;
}

/// Errors from category expansion
#[derive(Debug, Error)]
pub enum ExpansionError {
    #[error("Category is required")]
    EmptyCategory,

    #[error("Expansion request {0} is already in flight")]
    Busy(RequestId),

    #[error("Expansion request {0} was cancelled")]
    Cancelled(RequestId),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
