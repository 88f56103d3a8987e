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

//! Text rendering of a dictionary for copy/paste into a pattern table.
//!
//! Output is a Python dict literal. Patterns are written as raw strings
//! where one can hold them and as escaped strings otherwise:
//!
//! ```text
//! {
//!   "fruits": [ r"\b(apple|banana)\b" ],
//!   "pal": [ r"\b(tom)\b.{0,150}\b(aa)\b", r"(x)" ]
//! }
//! ```
//!
//! Rendering only; nothing parses this format back.

use crate::dictionary::Dictionary;

/// Render the whole dictionary. An empty dictionary renders as `{}`.
pub fn render(dictionary: &Dictionary) -> String {
    if dictionary.is_empty() {
        return "{}".to_string();
    }

    let lines: Vec<String> = dictionary
        .iter()
        .map(|(category, patterns)| {
            format!("  {}", render_line(category, patterns.iter().map(String::as_str)))
        })
        .collect();

    format!("{{\n{}\n}}", lines.join(",\n"))
}

/// Render the one-pattern line `"category": [ r"..." ]` shown as a preview.
pub fn render_entry(category: &str, pattern: &str) -> String {
    render_line(category, std::iter::once(pattern))
}

fn render_line<'a>(category: &str, patterns: impl Iterator<Item = &'a str>) -> String {
    let literals: Vec<String> = patterns.map(pattern_literal).collect();
    format!("{}: [ {} ]", quoted_literal(category), literals.join(", "))
}

/// Raw string literal when one can hold the pattern verbatim, otherwise an
/// escaped `"..."` literal.
fn pattern_literal(pattern: &str) -> String {
    // Control characters and an unpaired trailing backslash need escapes
    let trailing_backslashes = pattern.chars().rev().take_while(|&ch| ch == '\\').count();
    if pattern.chars().any(char::is_control) || trailing_backslashes % 2 == 1 {
        return quoted_literal(pattern);
    }

    if !pattern.contains('"') {
        format!("r\"{}\"", pattern)
    } else if !pattern.contains('\'') {
        format!("r'{}'", pattern)
    } else if !pattern.contains("\"\"\"") && !pattern.ends_with('"') {
        format!("r\"\"\"{}\"\"\"", pattern)
    } else {
        quoted_literal(pattern)
    }
}

/// Double-quoted literal with backslashes, quotes and control characters escaped.
fn quoted_literal(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            ch if ch.is_control() => {
                let code = u32::from(ch);
                if code <= 0xff {
                    quoted.push_str(&format!("\\x{:02x}", code));
                } else {
                    quoted.push_str(&format!("\\u{:04x}", code));
                }
            }
            ch => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
