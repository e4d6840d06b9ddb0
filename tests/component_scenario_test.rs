//! End-to-end turns over HTTP with the built-in tool set
//!
//! Both the completion service and the component search service are mocked.

use mockito::{Matcher, Server, ServerGuard};
use polaris_assist::config::ToolsConfig;
use polaris_assist::orchestration::{Conversation, Orchestrator, RuntimeConfig};
use polaris_assist::provider::{OpenAiProvider, ProviderSettings};
use polaris_assist::tools::builtin_registry;
use polaris_assist::types::{GenerateConfig, Role, Transcript};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn function_call_body(name: &str, arguments: &str) -> String {
    json!({
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "function_call": {"name": name, "arguments": arguments}
            },
            "finish_reason": "function_call"
        }]
    })
    .to_string()
}

fn answer_body(text: &str) -> String {
    json!({
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

fn orchestrator(llm: &ServerGuard, search_url: String) -> Orchestrator {
    let provider =
        OpenAiProvider::new(ProviderSettings::openai("sk-test").with_host(llm.url())).unwrap();
    let registry = builtin_registry(&ToolsConfig {
        search_url,
        search_timeout_seconds: 5,
    })
    .unwrap();
    Orchestrator::new(Arc::new(provider), Arc::new(registry), RuntimeConfig::default())
}

fn conversation() -> Conversation {
    Conversation::new(
        "components",
        "You help developers find Polaris components.",
        GenerateConfig::new("gpt-3.5-turbo").with_temperature(0.2),
    )
}

#[tokio::test]
async fn test_component_search_scenario() {
    let mut llm = Server::new_async().await;
    let mut search = Server::new_async().await;

    // The follow-up request carries the function result; register it first so
    // the catch-all below only sees the opening request.
    let follow_up = llm
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex(r#""role":"function""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(answer_body("Here is a Button component."))
        .expect(1)
        .create_async()
        .await;
    let opening = llm
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "messages": [
                {"role": "system", "content": "You help developers find Polaris components."},
                {"role": "user", "content": "I need a button"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(function_call_body("search_component", r#"{"description":"button"}"#))
        .expect(1)
        .create_async()
        .await;
    let search_mock = search
        .mock("POST", "/search")
        .match_body(Matcher::Json(json!({"inputText": "button"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"componentContent": "<Button>Save</Button>"}).to_string())
        .create_async()
        .await;

    let orchestrator = orchestrator(&llm, format!("{}/search", search.url()));
    let mut conversation = conversation();

    let outcome = conversation
        .send("I need a button", &orchestrator, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.answer, "Here is a Button component.");

    let transcript = conversation.transcript();
    assert_eq!(transcript.len(), 1 + 3);
    let entries = transcript.messages();
    assert_eq!(entries[1].role, Role::Assistant);
    assert_eq!(entries[1].function_call.as_ref().unwrap().name, "search_component");
    assert_eq!(entries[2].role, Role::Function);
    assert_eq!(entries[2].name, "search_component");
    assert_eq!(entries[2].content, "<Button>Save</Button>");
    assert_eq!(entries[3].content, "Here is a Button component.");

    assert_eq!(Transcript::from_json(&outcome.transcript_json).unwrap(), *transcript);

    opening.assert_async().await;
    follow_up.assert_async().await;
    search_mock.assert_async().await;
}

#[tokio::test]
async fn test_documentation_tool_scenario() {
    let mut llm = Server::new_async().await;

    let follow_up = llm
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex(r#""role":"function""#.to_string()))
        .with_status(200)
        .with_body(answer_body("Wrap your handlers with useActions."))
        .create_async()
        .await;
    let _opening = llm
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(function_call_body("get_use_actions_documentation", "{}"))
        .create_async()
        .await;

    // The search service is never contacted.
    let orchestrator = orchestrator(&llm, "http://127.0.0.1:9/search".to_string());
    let mut conversation = conversation();

    let outcome = conversation
        .send("How do screen actions work?", &orchestrator, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.answer, "Wrap your handlers with useActions.");
    assert_eq!(outcome.tool_calls.len(), 1);
    assert!(outcome.tool_calls[0].success);

    let function_entry = &conversation.transcript().messages()[2];
    assert_eq!(function_entry.name, "get_use_actions_documentation");
    assert!(function_entry.content.starts_with("# useActions"));

    follow_up.assert_async().await;
}

#[tokio::test]
async fn test_search_failure_is_reported_to_model() {
    let mut llm = Server::new_async().await;
    let mut search = Server::new_async().await;

    let follow_up = llm
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex(r#""role":"function""#.to_string()))
        .with_status(200)
        .with_body(answer_body("The component search is unavailable right now."))
        .create_async()
        .await;
    let _opening = llm
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(function_call_body("search_component", r#"{"description":"modal"}"#))
        .create_async()
        .await;
    let _search = search
        .mock("POST", "/search")
        .with_status(500)
        .with_body("index offline")
        .create_async()
        .await;

    let orchestrator = orchestrator(&llm, format!("{}/search", search.url()));
    let mut conversation = conversation();

    let outcome = conversation
        .send("Find me a modal", &orchestrator, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.answer, "The component search is unavailable right now.");
    assert!(!outcome.tool_calls[0].success);

    let content: Value =
        serde_json::from_str(&conversation.transcript().messages()[2].content).unwrap();
    let error = content["error"].as_str().unwrap();
    assert!(error.contains("500"));
    assert!(error.contains("index offline"));

    follow_up.assert_async().await;
}
