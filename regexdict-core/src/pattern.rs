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

//! Pattern synthesis.
//!
//! Three builders share one template: a leading alternation group,
//! optionally followed by a bounded gap `.{0,W}` and a second group.
//!
//! - Standard: escaped literal terms, one group, word-bounded or not.
//! - Forward window: `\b(anchor)\b.{0,W}\b(t1|t2)\b`
//! - Backward window: `\b(t1|t2)\b.{0,W}\b(anchor)\b`
//!
//! Window builders do NOT escape anchor or triggers; those fields accept
//! regex syntax from the user. The gap is a plain bounded repetition that
//! consumes characters, not a zero-width assertion.
//!
//! Every builder returns the empty string when there is nothing to build.
//! Callers must not register that sentinel in a dictionary.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::Result;
use crate::escape::escape_literal;
use crate::export::render_entry;
use crate::tokenizer::tokenize;
use crate::window::WindowSpec;

/// Whether the Standard builder wraps its group in `\b...\b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    #[default]
    WordBounded,
    /// For symbol or emoji alternatives that have no word boundary
    Unbounded,
}

/// The builder a pattern came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Standard,
    ForwardWindow,
    BackwardWindow,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [
        PatternKind::Standard,
        PatternKind::ForwardWindow,
        PatternKind::BackwardWindow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Standard => "standard",
            PatternKind::ForwardWindow => "forward_window",
            PatternKind::BackwardWindow => "backward_window",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Template<'a> {
    lead: Vec<&'a str>,
    tail: Option<(WindowSpec, Vec<&'a str>)>,
    escape: bool,
    boundary: BoundaryMode,
}

impl Template<'_> {
    fn render(&self) -> String {
        let mut pattern = self.group(&self.lead);
        if let Some((window, tail)) = &self.tail {
            pattern.push_str(&format!(".{{0,{}}}", window.chars()));
            pattern.push_str(&self.group(tail));
        }
        pattern
    }

    fn group(&self, alternatives: &[&str]) -> String {
        let body = alternatives
            .iter()
            .map(|term| {
                if self.escape {
                    escape_literal(term)
                } else {
                    (*term).to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("|");

        match self.boundary {
            BoundaryMode::WordBounded => format!(r"\b({})\b", body),
            BoundaryMode::Unbounded => format!("({})", body),
        }
    }
}

/// Alternation of escaped literal terms.
pub fn build_standard<S: AsRef<str>>(terms: &[S], boundary: BoundaryMode) -> String {
    if terms.is_empty() {
        return String::new();
    }

    Template {
        lead: terms.iter().map(AsRef::as_ref).collect(),
        tail: None,
        escape: true,
        boundary,
    }
    .render()
}

/// Anchor followed within `window` characters by any trigger.
pub fn build_forward_window<S: AsRef<str>>(
    anchor: &str,
    triggers: &[S],
    window: WindowSpec,
) -> String {
    if triggers.is_empty() {
        return String::new();
    }

    Template {
        lead: vec![anchor],
        tail: Some((window, triggers.iter().map(AsRef::as_ref).collect())),
        escape: false,
        boundary: BoundaryMode::WordBounded,
    }
    .render()
}

/// Any trigger followed within `window` characters by the anchor.
pub fn build_backward_window<S: AsRef<str>>(
    anchor: &str,
    triggers: &[S],
    window: WindowSpec,
) -> String {
    if triggers.is_empty() {
        return String::new();
    }

    Template {
        lead: triggers.iter().map(AsRef::as_ref).collect(),
        tail: Some((window, vec![anchor])),
        escape: false,
        boundary: BoundaryMode::WordBounded,
    }
    .render()
}

/// Window as captured from a form field: either a number or its text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindowInput {
    Number(i64),
    Text(String),
}

impl WindowInput {
    pub fn resolve(&self) -> Result<WindowSpec> {
        match self {
            WindowInput::Number(n) => WindowSpec::try_from(*n),
            WindowInput::Text(s) => s.parse(),
        }
    }
}

fn resolve_window(window: Option<&WindowInput>) -> Result<WindowSpec> {
    window.map_or_else(|| Ok(WindowSpec::default()), WindowInput::resolve)
}

/// One builder invocation with raw, untokenized form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternRequest {
    Standard {
        category: String,
        /// Comma-separated literal words or phrases
        words: String,
        #[serde(default)]
        boundary: BoundaryMode,
    },
    ForwardWindow {
        category: String,
        anchor: String,
        /// Comma-separated trigger sub-patterns
        triggers: String,
        #[serde(default)]
        window: Option<WindowInput>,
    },
    BackwardWindow {
        category: String,
        anchor: String,
        triggers: String,
        #[serde(default)]
        window: Option<WindowInput>,
    },
}

impl PatternRequest {
    pub fn kind(&self) -> PatternKind {
        match self {
            PatternRequest::Standard { .. } => PatternKind::Standard,
            PatternRequest::ForwardWindow { .. } => PatternKind::ForwardWindow,
            PatternRequest::BackwardWindow { .. } => PatternKind::BackwardWindow,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            PatternRequest::Standard { category, .. }
            | PatternRequest::ForwardWindow { category, .. }
            | PatternRequest::BackwardWindow { category, .. } => category,
        }
    }

    /// Tokenize the raw fields and run the matching builder.
    ///
    /// Fails only on an invalid window; empty inputs give a sentinel result.
    pub fn build(&self) -> Result<GeneratedPattern> {
        let pattern = match self {
            PatternRequest::Standard {
                words, boundary, ..
            } => build_standard(&tokenize(words), *boundary),
            PatternRequest::ForwardWindow {
                anchor,
                triggers,
                window,
                ..
            } => {
                let window = resolve_window(window.as_ref())?;
                build_forward_window(anchor.trim(), &tokenize(triggers), window)
            }
            PatternRequest::BackwardWindow {
                anchor,
                triggers,
                window,
                ..
            } => {
                let window = resolve_window(window.as_ref())?;
                build_backward_window(anchor.trim(), &tokenize(triggers), window)
            }
        };

        debug!(
            kind = %self.kind(),
            category = self.category(),
            sentinel = pattern.is_empty(),
            "Generated pattern"
        );

        Ok(GeneratedPattern {
            kind: self.kind(),
            category: self.category().trim().to_string(),
            pattern,
        })
    }
}

/// Output of one builder invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPattern {
    pub kind: PatternKind,
    pub category: String,
    /// Empty when nothing could be built
    pub pattern: String,
}

impl GeneratedPattern {
    pub fn is_sentinel(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Single-entry line shown under a builder before it is added
    pub fn preview(&self) -> Option<String> {
        if self.is_sentinel() {
            None
        } else {
            Some(render_entry(&self.category, &self.pattern))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn window(chars: u32) -> WindowSpec {
        WindowSpec::new(chars).unwrap()
    }

    #[test]
    fn test_standard_word_bounded() {
        assert_eq!(build_standard(&["a", "b"], BoundaryMode::WordBounded), r"\b(a|b)\b");
    }

    #[test]
    fn test_standard_unbounded() {
        assert_eq!(build_standard(&["a", "b"], BoundaryMode::Unbounded), "(a|b)");
    }

    #[test]
    fn test_standard_empty_is_sentinel() {
        let empty: [&str; 0] = [];
        assert_eq!(build_standard(&empty, BoundaryMode::WordBounded), "");
        assert_eq!(build_standard(&empty, BoundaryMode::Unbounded), "");
    }

    #[test]
    fn test_standard_escapes_and_keeps_order_and_duplicates() {
        assert_eq!(
            build_standard(&["c++", "a.b", "c++"], BoundaryMode::Unbounded),
            r"(c\+\+|a\.b|c\+\+)"
        );
    }

    #[test]
    fn test_standard_matches_whole_words_only() {
        let pattern = build_standard(&["apple", "banana"], BoundaryMode::WordBounded);
        let re = Regex::new(&pattern).unwrap();

        assert!(re.is_match("an apple a day"));
        assert!(!re.is_match("pineapples"));
    }

    #[test]
    fn test_forward_window() {
        assert_eq!(
            build_forward_window("tom", &["aa", "recovery"], window(150)),
            r"\b(tom)\b.{0,150}\b(aa|recovery)\b"
        );
    }

    #[test]
    fn test_backward_window() {
        assert_eq!(
            build_backward_window("onion", &["chopped", "roasted"], window(10)),
            r"\b(chopped|roasted)\b.{0,10}\b(onion)\b"
        );
    }

    #[test]
    fn test_window_builders_do_not_escape() {
        assert_eq!(
            build_forward_window("tom(my)?", &["a|b"], window(5)),
            r"\b(tom(my)?)\b.{0,5}\b(a|b)\b"
        );
    }

    #[test]
    fn test_window_empty_triggers_is_sentinel() {
        let empty: [&str; 0] = [];
        assert_eq!(build_forward_window("tom", &empty, window(10)), "");
        assert_eq!(build_backward_window("tom", &empty, window(10)), "");
    }

    #[test]
    fn test_window_empty_anchor_still_builds() {
        assert_eq!(
            build_forward_window("", &["x"], window(3)),
            r"\b()\b.{0,3}\b(x)\b"
        );
    }

    #[test]
    fn test_forward_window_gap_is_bounded() {
        let re = Regex::new(&build_forward_window("tom", &["aa"], window(10))).unwrap();

        assert!(re.is_match("tom went to aa"));
        assert!(!re.is_match("tom went somewhere far away before aa"));
        assert!(!re.is_match("aa then tom"));
    }

    #[test]
    fn test_request_build_standard() {
        let request = PatternRequest::Standard {
            category: " fruits ".to_string(),
            words: "apple, banana ,  cherry,".to_string(),
            boundary: BoundaryMode::WordBounded,
        };
        let generated = request.build().unwrap();

        assert_eq!(generated.kind, PatternKind::Standard);
        assert_eq!(generated.category, "fruits");
        assert_eq!(generated.pattern, r"\b(apple|banana|cherry)\b");
        assert_eq!(
            generated.preview().unwrap(),
            r#""fruits": [ r"\b(apple|banana|cherry)\b" ]"#
        );
    }

    #[test]
    fn test_request_default_window() {
        let request = PatternRequest::ForwardWindow {
            category: "pal".to_string(),
            anchor: " tom ".to_string(),
            triggers: "aa, recovery".to_string(),
            window: None,
        };

        assert_eq!(
            request.build().unwrap().pattern,
            r"\b(tom)\b.{0,150}\b(aa|recovery)\b"
        );
    }

    #[test]
    fn test_request_rejects_bad_window() {
        let request = PatternRequest::BackwardWindow {
            category: "veg".to_string(),
            anchor: "onion".to_string(),
            triggers: "chopped".to_string(),
            window: Some(WindowInput::Text("lots".to_string())),
        };
        assert!(request.build().is_err());

        let request = PatternRequest::BackwardWindow {
            category: "veg".to_string(),
            anchor: "onion".to_string(),
            triggers: "chopped".to_string(),
            window: Some(WindowInput::Number(200)),
        };
        assert!(request.build().is_err());
    }

    #[test]
    fn test_request_sentinel_has_no_preview() {
        let request = PatternRequest::Standard {
            category: "fruits".to_string(),
            words: " , ".to_string(),
            boundary: BoundaryMode::Unbounded,
        };
        let generated = request.build().unwrap();

        assert!(generated.is_sentinel());
        assert_eq!(generated.preview(), None);
    }

    #[test]
    fn test_request_deserializes_from_form_json() {
        let request: PatternRequest = serde_json::from_str(
            r#"{"kind":"backward_window","category":"veg","anchor":"onion","triggers":"chopped, roasted","window":"10"}"#,
        )
        .unwrap();

        assert_eq!(request.kind(), PatternKind::BackwardWindow);
        assert_eq!(
            request.build().unwrap().pattern,
            r"\b(chopped|roasted)\b.{0,10}\b(onion)\b"
        );

        let request: PatternRequest = serde_json::from_str(
            r#"{"kind":"standard","category":"emoji","words":"🙂, 🙃","boundary":"unbounded"}"#,
        )
        .unwrap();
        assert_eq!(request.build().unwrap().pattern, "(🙂|🙃)");
    }
}
