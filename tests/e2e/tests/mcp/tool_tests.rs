//! Tool Tests
//!
//! `list_tools` and `call_tool` against the built-in and mock registries.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use linemcp_e2e_tests::mocks::fixtures::{expect_error, expect_result, tool_text};
use linemcp_e2e_tests::mocks::tools::mock_registry;
use linemcp_e2e_tests::{RequestFactory, SessionHarness};
use serde_json::{Value, json};

fn mock_harness() -> (SessionHarness, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    (SessionHarness::with_registry(mock_registry(calls.clone())), calls)
}

// ============================================================================
// LIST TOOLS
// ============================================================================

#[test]
fn test_list_tools_describes_hello_world() {
    let harness = SessionHarness::new();

    let response = harness.exchange(&RequestFactory::list_tools(2));
    let tools = expect_result(&response)["tools"].as_array().unwrap().clone();

    assert_eq!(tools.len(), 1);
    let tool = &tools[0];
    assert_eq!(tool["name"], "hello_world");
    assert_eq!(tool["description"], "A simple hello world function");
    assert_eq!(tool["inputSchema"]["type"], "object");
    assert_eq!(tool["inputSchema"]["properties"]["name"]["type"], "string");
    assert_eq!(tool["inputSchema"]["properties"]["name"]["description"], "Your name");
}

#[test]
fn test_list_tools_keeps_registration_order() {
    let (harness, _) = mock_harness();

    let response = harness.exchange(&RequestFactory::list_tools(1));
    let names: Vec<&str> = expect_result(&response)["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, ["hello_world", "echo", "failing", "counter"]);
}

#[test]
fn test_list_tools_ignores_params() {
    let harness = SessionHarness::new();

    let plain = harness.exchange(&RequestFactory::list_tools(1));
    let noisy = harness.exchange(&RequestFactory::request(
        json!(1),
        "list_tools",
        json!({"cursor": "abc", "limit": 1}),
    ));

    assert_eq!(plain, noisy);
}

// ============================================================================
// HELLO WORLD
// ============================================================================

#[test]
fn test_hello_by_name() {
    let harness = SessionHarness::new();

    let response = harness.exchange(&RequestFactory::hello(3, "Ada"));
    let result = expect_result(&response);

    assert_eq!(tool_text(result), "Hello, Ada!");
    assert!(result.get("isError").is_none());
}

#[test]
fn test_hello_defaults_to_world() {
    let harness = SessionHarness::new();
    let lines = [
        RequestFactory::call_tool(1, "hello_world", json!({})),
        RequestFactory::call_tool(1, "hello_world", json!({"name": 42})),
        RequestFactory::call_tool(1, "hello_world", json!({"name": null})),
        RequestFactory::call_tool(1, "hello_world", json!("not an object")),
        RequestFactory::request(json!(1), "call_tool", json!({"name": "hello_world"})),
    ];

    for line in &lines {
        let response = harness.exchange(line);
        assert_eq!(tool_text(expect_result(&response)), "Hello, World!", "line: {}", line);
    }
}

#[test]
fn test_hello_keeps_empty_and_unicode_names() {
    let harness = SessionHarness::new();

    let response = harness.exchange(&RequestFactory::hello(1, ""));
    assert_eq!(tool_text(expect_result(&response)), "Hello, !");

    let response = harness.exchange(&RequestFactory::hello(2, "Zoë \"Z\" 世界"));
    assert_eq!(tool_text(expect_result(&response)), "Hello, Zoë \"Z\" 世界!");
}

#[test]
fn test_hello_ignores_extra_arguments() {
    let harness = SessionHarness::new();

    let response = harness.exchange(&RequestFactory::call_tool(
        1,
        "hello_world",
        json!({"name": "Ada", "shout": true}),
    ));

    assert_eq!(tool_text(expect_result(&response)), "Hello, Ada!");
}

// ============================================================================
// TOOL NOT FOUND
// ============================================================================

#[test]
fn test_unknown_tool() {
    let harness = SessionHarness::new();

    let response = harness.exchange(&RequestFactory::call_tool(4, "nonexistent", json!({})));

    assert_eq!(response["id"], 4);
    let message = expect_error(&response, -32601);
    assert!(message.contains("nonexistent"));
    assert_eq!(harness.event_count("tool_not_found"), 1);
}

#[test]
fn test_missing_tool_name() {
    let harness = SessionHarness::new();

    for params in [json!({}), json!({"name": 7}), json!({"arguments": {"name": "Ada"}})] {
        let response = harness.exchange(&RequestFactory::request(json!(1), "call_tool", params));
        expect_error(&response, -32601);
    }
}

#[test]
fn test_tool_names_are_case_sensitive() {
    let harness = SessionHarness::new();

    let response = harness.exchange(&RequestFactory::hello(1, "Ada").replace("hello_world", "Hello_World"));

    expect_error(&response, -32601);
}

// ============================================================================
// MOCK TOOLS
// ============================================================================

#[test]
fn test_echo_receives_arguments() {
    let (harness, _) = mock_harness();

    let response = harness.exchange(&RequestFactory::call_tool(1, "echo", json!({"a": [1, 2]})));
    let echoed: Value = serde_json::from_str(tool_text(expect_result(&response))).unwrap();

    assert_eq!(echoed, json!({"a": [1, 2]}));
}

#[test]
fn test_failing_tool_is_an_error_result() {
    let (harness, _) = mock_harness();

    let response = harness.exchange(&RequestFactory::call_tool(1, "failing", json!({})));
    let result = expect_result(&response);

    assert_eq!(result["isError"], true);
    assert_eq!(tool_text(result), "Error: mock failure");
}

#[test]
fn test_each_call_runs_the_handler_once() {
    let (harness, calls) = mock_harness();

    let output = harness.run(&[
        RequestFactory::call_tool(1, "counter", json!({})),
        RequestFactory::list_tools(2),
        RequestFactory::call_tool(3, "counter", json!({})),
        RequestFactory::call_tool(4, "counter", json!({})),
    ]);

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(tool_text(expect_result(output.response(0))), "1");
    assert_eq!(tool_text(expect_result(output.response(2))), "2");
    assert_eq!(tool_text(expect_result(output.response(3))), "3");
}
