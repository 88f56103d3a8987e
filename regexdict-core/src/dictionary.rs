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

//! Category → pattern aggregation.
//!
//! Each category keeps its patterns in insertion order behind an
//! `IndexSet`, so duplicate suppression is a hash lookup rather than a scan.
//! Uniqueness is per category; the same pattern may sit under two keys.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::export;

/// Owned snapshot of the aggregated patterns.
///
/// Changing a snapshot never affects the aggregator it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: IndexMap<String, Vec<String>>,
}

impl Dictionary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of patterns across all categories
    pub fn pattern_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.entries.get(category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.entries
    }
}

impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&export::render(self))
    }
}

/// What a single `add` did. None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Inserted,
    Duplicate,
    /// The builder produced the empty sentinel
    EmptyPattern,
    EmptyCategory,
}

impl AddOutcome {
    pub fn inserted(self) -> bool {
        self == AddOutcome::Inserted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregatorState {
    Empty,
    Populated,
}

/// Accumulates `(category, pattern)` contributions.
#[derive(Debug, Clone, Default)]
pub struct DictionaryAggregator {
    entries: IndexMap<String, IndexSet<String>>,
}

impl DictionaryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AggregatorState {
        if self.entries.is_empty() {
            AggregatorState::Empty
        } else {
            AggregatorState::Populated
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, category: &str, pattern: &str) -> bool {
        self.entries
            .get(category)
            .is_some_and(|patterns| patterns.contains(pattern))
    }

    /// Register one pattern under `category`.
    ///
    /// Empty patterns and categories are ignored, and so is a pattern the
    /// category already holds. New patterns append after existing ones.
    pub fn add(&mut self, category: &str, pattern: &str) -> AddOutcome {
        if pattern.is_empty() {
            debug!(category, "Ignoring empty pattern");
            return AddOutcome::EmptyPattern;
        }
        if category.is_empty() {
            debug!("Ignoring pattern with empty category");
            return AddOutcome::EmptyCategory;
        }

        if self.contains(category, pattern) {
            debug!(category, pattern, "Pattern already registered");
            return AddOutcome::Duplicate;
        }

        let patterns = self.entries.entry(category.to_string()).or_default();
        patterns.insert(pattern.to_string());
        debug!(category, pattern, total = patterns.len(), "Pattern added");
        AddOutcome::Inserted
    }

    /// Apply [`add`](Self::add) to each pair in order. Returns how many were inserted.
    pub fn add_batch<I, C, P>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (C, P)>,
        C: AsRef<str>,
        P: AsRef<str>,
    {
        entries
            .into_iter()
            .filter(|(category, pattern)| {
                self.add(category.as_ref(), pattern.as_ref()).inserted()
            })
            .count()
    }

    /// Drop every category.
    pub fn reset(&mut self) {
        debug!(categories = self.entries.len(), "Resetting dictionary");
        self.entries.clear();
    }

    pub fn snapshot(&self) -> Dictionary {
        Dictionary {
            entries: self
                .entries
                .iter()
                .map(|(category, patterns)| {
                    (category.clone(), patterns.iter().cloned().collect())
                })
                .collect(),
        }
    }
}
