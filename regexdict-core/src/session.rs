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

//! Explicit per-user builder state.
//!
//! A session holds the last pattern each builder generated (its draft) and
//! the dictionary those drafts are added to. Sessions share nothing; a
//! server keeps one per client.

use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::dictionary::{AddOutcome, AggregatorState, Dictionary, DictionaryAggregator};
use crate::error::Result;
use crate::export;
use crate::pattern::{GeneratedPattern, PatternKind, PatternRequest};

#[derive(Debug, Clone, Default)]
pub struct BuilderSession {
    drafts: BTreeMap<PatternKind, GeneratedPattern>,
    dictionary: DictionaryAggregator,
}

impl BuilderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pattern and keep it as the draft for its builder.
    ///
    /// A sentinel result replaces the previous draft too, like regenerating
    /// from a cleared form.
    pub fn generate(&mut self, request: &PatternRequest) -> Result<&GeneratedPattern> {
        let generated = request.build()?;
        let kind = generated.kind;
        self.drafts.insert(kind, generated);
        Ok(&self.drafts[&kind])
    }

    pub fn draft(&self, kind: PatternKind) -> Option<&GeneratedPattern> {
        self.drafts.get(&kind)
    }

    /// Add the current draft of one builder to the dictionary.
    pub fn commit(&mut self, kind: PatternKind) -> AddOutcome {
        match self.drafts.get(&kind) {
            Some(draft) => self.dictionary.add(&draft.category, &draft.pattern),
            None => AddOutcome::EmptyPattern,
        }
    }

    /// Add every builder's draft in one batch. Returns the number inserted.
    pub fn commit_all(&mut self) -> usize {
        let inserted = self.dictionary.add_batch(
            self.drafts
                .values()
                .map(|draft| (draft.category.as_str(), draft.pattern.as_str())),
        );
        debug!(inserted, drafts = self.drafts.len(), "Committed drafts");
        inserted
    }

    /// Generate and add in one step.
    pub fn add(&mut self, request: &PatternRequest) -> Result<(GeneratedPattern, AddOutcome)> {
        let kind = self.generate(request)?.kind;
        let outcome = self.commit(kind);
        Ok((self.drafts[&kind].clone(), outcome))
    }

    /// Build several requests and add them as one batch.
    ///
    /// Every request is built before anything is added, so an invalid one
    /// leaves the dictionary untouched.
    pub fn add_batch(
        &mut self,
        requests: &[PatternRequest],
    ) -> Result<(Vec<GeneratedPattern>, Vec<AddOutcome>)> {
        let generated = requests
            .iter()
            .map(PatternRequest::build)
            .collect::<Result<Vec<_>>>()?;

        let outcomes = generated
            .iter()
            .map(|g| self.dictionary.add(&g.category, &g.pattern))
            .collect();

        for g in &generated {
            self.drafts.insert(g.kind, g.clone());
        }

        Ok((generated, outcomes))
    }

    pub fn state(&self) -> AggregatorState {
        self.dictionary.state()
    }

    pub fn dictionary(&self) -> Dictionary {
        self.dictionary.snapshot()
    }

    pub fn export(&self) -> String {
        export::render(&self.dictionary.snapshot())
    }

    /// Clear the dictionary and all drafts.
    pub fn reset(&mut self) {
        self.dictionary.reset();
        self.drafts.clear();
        info!("Session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{BoundaryMode, WindowInput};

    fn standard(category: &str, words: &str) -> PatternRequest {
        PatternRequest::Standard {
            category: category.to_string(),
            words: words.to_string(),
            boundary: BoundaryMode::WordBounded,
        }
    }

    fn forward(category: &str, anchor: &str, triggers: &str, window: i64) -> PatternRequest {
        PatternRequest::ForwardWindow {
            category: category.to_string(),
            anchor: anchor.to_string(),
            triggers: triggers.to_string(),
            window: Some(WindowInput::Number(window)),
        }
    }

    #[test]
    fn test_generate_keeps_draft_without_adding() {
        let mut session = BuilderSession::new();
        let draft = session.generate(&standard("fruits", "apple")).unwrap();

        assert_eq!(draft.pattern, r"\b(apple)\b");
        assert_eq!(session.state(), AggregatorState::Empty);
        assert!(session.draft(PatternKind::Standard).is_some());
        assert!(session.draft(PatternKind::ForwardWindow).is_none());
    }

    #[test]
    fn test_commit_adds_draft() {
        let mut session = BuilderSession::new();
        session.generate(&standard("fruits", "apple")).unwrap();

        assert_eq!(session.commit(PatternKind::Standard), AddOutcome::Inserted);
        assert_eq!(session.commit(PatternKind::Standard), AddOutcome::Duplicate);
        assert_eq!(session.commit(PatternKind::BackwardWindow), AddOutcome::EmptyPattern);
    }

    #[test]
    fn test_commit_all_in_builder_order() {
        let mut session = BuilderSession::new();
        session.generate(&forward("pal", "tom", "aa", 20)).unwrap();
        session.generate(&standard("fruits", "apple")).unwrap();

        assert_eq!(session.commit_all(), 2);
        let dictionary = session.dictionary();
        assert_eq!(dictionary.categories().collect::<Vec<_>>(), ["fruits", "pal"]);
    }

    #[test]
    fn test_add_returns_outcome() {
        let mut session = BuilderSession::new();

        let (generated, outcome) = session.add(&standard("fruits", "apple, pear")).unwrap();
        assert_eq!(generated.pattern, r"\b(apple|pear)\b");
        assert_eq!(outcome, AddOutcome::Inserted);

        let (generated, outcome) = session.add(&standard("fruits", " ")).unwrap();
        assert!(generated.is_sentinel());
        assert_eq!(outcome, AddOutcome::EmptyPattern);
    }

    #[test]
    fn test_add_batch_is_all_or_nothing() {
        let mut session = BuilderSession::new();
        let requests = vec![standard("fruits", "apple"), forward("pal", "tom", "aa", 999)];

        assert!(session.add_batch(&requests).is_err());
        assert!(session.dictionary().is_empty());
        assert!(session.draft(PatternKind::Standard).is_none());
    }

    #[test]
    fn test_add_batch_outcomes() {
        let mut session = BuilderSession::new();
        let requests = vec![
            standard("fruits", "apple"),
            standard("fruits", "apple"),
            forward("pal", "tom", "aa", 5),
        ];

        let (generated, outcomes) = session.add_batch(&requests).unwrap();
        assert_eq!(generated.len(), 3);
        assert_eq!(
            outcomes,
            vec![AddOutcome::Inserted, AddOutcome::Duplicate, AddOutcome::Inserted]
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = BuilderSession::new();
        session.add(&standard("fruits", "apple")).unwrap();
        session.reset();

        assert_eq!(session.state(), AggregatorState::Empty);
        assert!(session.draft(PatternKind::Standard).is_none());
        assert_eq!(session.export(), "{}");
    }

    #[test]
    fn test_sessions_do_not_share_state() {
        let mut first = BuilderSession::new();
        let second = BuilderSession::new();
        first.add(&standard("fruits", "apple")).unwrap();

        assert_eq!(first.state(), AggregatorState::Populated);
        assert_eq!(second.state(), AggregatorState::Empty);
    }
}
