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

//! Comma-delimited term splitting.

/// Separator between terms in user-supplied word lists
pub const TERM_SEPARATOR: char = ',';

/// Split a comma-delimited string into trimmed, non-empty terms.
///
/// Order is preserved and duplicates are kept; blank pieces (including the
/// one produced by a trailing comma) are dropped.
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.split(TERM_SEPARATOR)
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trims_and_drops_empty_pieces() {
        assert_eq!(
            tokenize("apple, banana ,  cherry,"),
            vec!["apple", "banana", "cherry"]
        );
    }

    #[test]
    fn test_blank_input_yields_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize(" , ,, ").is_empty());
    }

    #[test]
    fn test_keeps_duplicates_and_inner_spaces() {
        assert_eq!(
            tokenize("ice cream, pie,ice cream"),
            vec!["ice cream", "pie", "ice cream"]
        );
    }

    proptest! {
        #[test]
        fn prop_terms_are_trimmed_and_non_empty(raw in "[a-z ,]{0,64}") {
            for term in tokenize(&raw) {
                prop_assert!(!term.is_empty());
                prop_assert_eq!(term.trim(), term.as_str());
                prop_assert!(!term.contains(TERM_SEPARATOR));
            }
        }

        #[test]
        fn prop_joined_terms_tokenize_back(terms in prop::collection::vec("[a-z]{1,8}", 0..8)) {
            let raw = terms.join(" , ");
            prop_assert_eq!(tokenize(&raw), terms);
        }
    }
}
