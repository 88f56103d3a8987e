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

// OpenAI expander against a mocked chat completions endpoint

use mockito::Matcher;
use regexdict_expand::{CategoryExpander, ExpansionCoordinator, ExpansionError, OpenAIExpander};

fn expander(base_url: String) -> OpenAIExpander {
    OpenAIExpander::new("sk-test".to_string(), "gpt-3.5-turbo".to_string()).with_base_url(base_url)
}

#[tokio::test]
async fn test_expand_returns_content_line() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 150
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"message":{"role":"assistant","content":"apple, banana, cherry, fruit salad"}}]}"#,
        )
        .create_async()
        .await;

    let expanded = expander(server.url()).expand("fruit").await.unwrap();

    assert_eq!(expanded, "apple, banana, cherry, fruit salad");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_prompt_mentions_category() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex(r#"about \\"road trips\\""#.to_string()))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"highway"}}]}"#)
        .create_async()
        .await;

    expander(server.url()).expand("road trips").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_content_is_empty_line() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let expanded = expander(server.url()).expand("fruit").await.unwrap();
    assert_eq!(expanded, "");
}

#[tokio::test]
async fn test_error_status_surfaces_as_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let err = expander(server.url()).expand("fruit").await.unwrap_err();
    match err {
        ExpansionError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "rate limited");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_coordinator_with_openai_expander() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"brb, be right back ,"}}]}"#)
        .create_async()
        .await;

    let coordinator = ExpansionCoordinator::new();
    let outcome = coordinator
        .expand(&expander(server.url()), "chat slang")
        .await
        .unwrap();

    assert_eq!(outcome.terms, vec!["brb", "be right back"]);
    assert_eq!(coordinator.outstanding(), None);
}
