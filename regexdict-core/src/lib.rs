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

//! Regexdict Core
//!
//! Turns comma-separated word lists and proximity parameters into regex
//! pattern text, and merges the results into an ordered, duplicate-free
//! category dictionary that can be rendered for copy/paste.
//!
//! Pattern text is only constructed here, never compiled or matched.
//!
//! ```
//! use regexdict_core::{build_standard, tokenize, BoundaryMode, DictionaryAggregator, render};
//!
//! let terms = tokenize("apple, banana ,  cherry,");
//! let pattern = build_standard(&terms, BoundaryMode::WordBounded);
//!
//! let mut dictionary = DictionaryAggregator::new();
//! dictionary.add("fruits", &pattern);
//!
//! assert_eq!(
//!     render(&dictionary.snapshot()),
//!     "{\n  \"fruits\": [ r\"\\b(apple|banana|cherry)\\b\" ]\n}"
//! );
//! ```

pub mod dictionary;
pub mod error;
pub mod escape;
pub mod export;
pub mod pattern;
pub mod session;
pub mod tokenizer;
pub mod window;

pub use dictionary::{AddOutcome, AggregatorState, Dictionary, DictionaryAggregator};
pub use error::{PatternError, Result};
pub use escape::{escape_literal, METACHARACTERS};
pub use export::{render, render_entry};
pub use pattern::{
    build_backward_window, build_forward_window, build_standard, BoundaryMode, GeneratedPattern,
    PatternKind, PatternRequest, WindowInput,
};
pub use session::BuilderSession;
pub use tokenizer::{tokenize, TERM_SEPARATOR};
pub use window::{WindowSpec, DEFAULT_WINDOW, MAX_WINDOW};
