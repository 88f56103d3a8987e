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

// End-to-end runs of tokenize -> build -> add -> render

use regexdict_core::{
    build_backward_window, build_forward_window, build_standard, render, tokenize, BoundaryMode,
    BuilderSession, DictionaryAggregator, PatternRequest, WindowInput, WindowSpec,
};

#[test]
fn test_standard_round_trip_keeps_pattern_verbatim() {
    let terms = tokenize("c++, node.js ,  rust");
    let pattern = build_standard(&terms, BoundaryMode::WordBounded);
    assert_eq!(pattern, r"\b(c\+\+|node\.js|rust)\b");

    let mut aggregator = DictionaryAggregator::new();
    aggregator.add("languages", &pattern);
    let rendered = render(&aggregator.snapshot());

    assert!(rendered.contains("\"languages\""));
    assert!(rendered.contains(&format!("r\"{}\"", pattern)));
}

#[test]
fn test_three_builders_into_one_dictionary() {
    let window = WindowSpec::new(150).unwrap();
    let mut aggregator = DictionaryAggregator::new();

    aggregator.add(
        "fruits",
        &build_standard(&tokenize("apple, banana, cherry"), BoundaryMode::WordBounded),
    );
    aggregator.add(
        "my_best_pal",
        &build_forward_window("tom(my)?", &tokenize("aa, sobriety, recovery"), window),
    );
    aggregator.add(
        "my_best_pal",
        &build_backward_window("tom(my)?", &tokenize("aa, sobriety, recovery"), window),
    );

    let expected = concat!(
        "{\n",
        r#"  "fruits": [ r"\b(apple|banana|cherry)\b" ],"#,
        "\n",
        r#"  "my_best_pal": [ r"\b(tom(my)?)\b.{0,150}\b(aa|sobriety|recovery)\b", r"\b(aa|sobriety|recovery)\b.{0,150}\b(tom(my)?)\b" ]"#,
        "\n}"
    );
    assert_eq!(render(&aggregator.snapshot()), expected);
}

#[test]
fn test_reset_then_render_is_empty() {
    let mut aggregator = DictionaryAggregator::new();
    aggregator.add("x", "(a)");
    aggregator.add("y", "(b)");
    aggregator.reset();

    assert_eq!(render(&aggregator.snapshot()), "{}");
}

#[test]
fn test_generated_patterns_compile() {
    let mut session = BuilderSession::new();
    let requests = vec![
        PatternRequest::Standard {
            category: "symbols".to_string(),
            words: "$, (, ), |, \\".to_string(),
            boundary: BoundaryMode::Unbounded,
        },
        PatternRequest::ForwardWindow {
            category: "pal".to_string(),
            anchor: "tom(my)?".to_string(),
            triggers: "aa, recovery".to_string(),
            window: Some(WindowInput::Text("40".to_string())),
        },
        PatternRequest::BackwardWindow {
            category: "veg".to_string(),
            anchor: "onion".to_string(),
            triggers: "chopped, roasted".to_string(),
            window: Some(WindowInput::Number(10)),
        },
    ];
    session.add_batch(&requests).unwrap();

    let dictionary = session.dictionary();
    assert_eq!(dictionary.pattern_count(), 3);

    let symbols = regex::Regex::new(&dictionary.get("symbols").unwrap()[0]).unwrap();
    assert!(symbols.is_match("costs $5"));
    assert!(!symbols.is_match("plain words"));

    let pal = regex::Regex::new(&dictionary.get("pal").unwrap()[0]).unwrap();
    assert!(pal.is_match("tommy said he went to aa last week"));

    let veg = regex::Regex::new(&dictionary.get("veg").unwrap()[0]).unwrap();
    assert!(veg.is_match("roasted red onion"));
    assert!(!veg.is_match("onion, roasted"));
}
