//! Tests for checking node assertions against execution traces.
mod common;
use common::*;
use flowprobe::prelude::*;
use serde_json::json;

fn trace(run_data: serde_json::Value) -> ExecutionTrace {
    ExecutionTrace::from_value(trace_document(run_data, None)).unwrap()
}

fn expect_data(data: serde_json::Value) -> Assertions {
    Assertions {
        data: Some(data),
        ..Default::default()
    }
}

#[test]
fn test_passing_data_ignores_key_order() {
    let trace = trace(json!({
        "Set Y": [run_entry(&[json!({"x": 1, "y": {"b": 2, "a": 1}})])]
    }));
    let failures = evaluate("Set Y", &expect_data(json!({"y": {"a": 1, "b": 2}, "x": 1})), &trace);
    assert!(failures.is_empty(), "{:?}", failures);
}

#[test]
fn test_data_mismatch_reports_both_sides() {
    let trace = trace(json!({ "Set Y": [run_entry(&[json!({"x": 1})])] }));
    let failures = evaluate("Set Y", &expect_data(json!({"x": 2})), &trace);
    assert_eq!(failures.len(), 1);
    let message = failures[0].to_string();
    assert!(message.starts_with("Node \"Set Y\": data mismatch"));
    assert!(message.contains("\"x\": 2"));
    assert!(message.contains("\"x\": 1"));
}

#[test]
fn test_data_against_node_without_items_compares_to_empty_object() {
    let trace = trace(json!({ "Done": [run_entry(&[])] }));
    assert!(evaluate("Done", &expect_data(json!({})), &trace).is_empty());
    assert!(matches!(
        evaluate("Done", &expect_data(json!({"x": 1})), &trace).as_slice(),
        [AssertionFailure::DataMismatch { .. }]
    ));
}

#[test]
fn test_missing_include_fields_lists_them() {
    let trace = trace(json!({ "Set Y": [run_entry(&[json!({"a": 1})])] }));
    let assertions = Assertions {
        include_fields: Some(vec!["a".to_string(), "b".to_string()]),
        ..Default::default()
    };
    let failures = evaluate("Set Y", &assertions, &trace);
    assert_eq!(failures.len(), 1);
    match &failures[0] {
        AssertionFailure::MissingFields { node, missing, .. } => {
            assert_eq!(node, "Set Y");
            assert_eq!(missing, "[\"b\"]");
        }
        other => panic!("unexpected failure: {other:?}"),
    }
    assert!(failures[0].to_string().contains("missing fields [\"b\"]"));
}

#[test]
fn test_include_fields_without_output_items() {
    let trace = trace(json!({ "Done": [run_entry(&[])] }));
    let assertions = Assertions {
        include_fields: Some(vec!["a".to_string()]),
        ..Default::default()
    };
    assert_eq!(
        evaluate("Done", &assertions, &trace),
        vec![AssertionFailure::NoOutputItems {
            node: "Done".to_string()
        }]
    );
}

#[test]
fn test_node_not_found_short_circuits() {
    let trace = trace(json!({ "Set Y": [run_entry(&[json!({})])] }));
    let assertions = Assertions {
        data: Some(json!({"x": 1})),
        include_fields: Some(vec!["x".to_string()]),
        execution_status: Some("success".to_string()),
        ..Default::default()
    };
    let failures = evaluate("Missing", &assertions, &trace);
    assert_eq!(
        failures,
        vec![AssertionFailure::NodeNotFound {
            node: "Missing".to_string()
        }]
    );
    assert_eq!(failures[0].to_string(), "Node \"Missing\": not found in runData");
}

#[test]
fn test_last_run_is_checked() {
    let trace = trace(json!({
        "Loop": [
            run_entry(&[json!({"round": 1})]),
            run_entry(&[json!({"round": 2})])
        ]
    }));
    assert!(evaluate("Loop", &expect_data(json!({"round": 2})), &trace).is_empty());
    assert_eq!(evaluate("Loop", &expect_data(json!({"round": 1})), &trace).len(), 1);
}

#[test]
fn test_execution_status() {
    let trace = trace(json!({
        "Ok": [run_entry(&[json!({})])],
        "Bare": [{ "data": { "main": [[{ "json": {} }]] } }]
    }));
    let want_error = Assertions {
        execution_status: Some("error".to_string()),
        ..Default::default()
    };

    let failures = evaluate("Ok", &want_error, &trace);
    assert_eq!(
        failures[0].to_string(),
        "Node \"Ok\": executionStatus mismatch (want=error, got=success)"
    );

    let failures = evaluate("Bare", &want_error, &trace);
    assert!(failures[0].to_string().contains("got=None"));

    let want_success = Assertions {
        execution_status: Some("success".to_string()),
        ..Default::default()
    };
    assert!(evaluate("Ok", &want_success, &trace).is_empty());
}

#[test]
fn test_error_message_from_node_or_workflow() {
    let node_error = ExecutionTrace::from_value(trace_document(
        json!({
            "Call API": [{
                "executionStatus": "error",
                "error": { "message": "Request failed with status code 404" },
                "data": { "main": [] }
            }]
        }),
        None,
    ))
    .unwrap();
    let assertions = Assertions {
        error_message: Some("status code 404".to_string()),
        execution_status: Some("error".to_string()),
        ..Default::default()
    };
    assert!(evaluate("Call API", &assertions, &node_error).is_empty());

    let workflow_error = ExecutionTrace::from_value(trace_document(
        json!({ "Call API": [run_entry(&[])] }),
        Some("Workflow failed: status code 404"),
    ))
    .unwrap();
    let assertions = Assertions {
        error_message: Some("status code 404".to_string()),
        ..Default::default()
    };
    assert!(evaluate("Call API", &assertions, &workflow_error).is_empty());

    let assertions = Assertions {
        error_message: Some("timeout".to_string()),
        ..Default::default()
    };
    assert_eq!(
        evaluate("Call API", &assertions, &workflow_error),
        vec![AssertionFailure::ErrorMessageMissing {
            node: "Call API".to_string(),
            want: "timeout".to_string()
        }]
    );
}

#[test]
fn test_all_failures_are_reported() {
    let trace = trace(json!({ "Set Y": [run_entry(&[json!({"a": 1})])] }));
    let assertions = Assertions {
        data: Some(json!({"a": 2})),
        include_fields: Some(vec!["z".to_string()]),
        execution_status: Some("error".to_string()),
        error_message: Some("boom".to_string()),
        ..Default::default()
    };
    let failures = evaluate("Set Y", &assertions, &trace);
    assert_eq!(failures.len(), 4);
    assert!(matches!(failures[0], AssertionFailure::StatusMismatch { .. }));
    assert!(matches!(failures[1], AssertionFailure::ErrorMessageMissing { .. }));
    assert!(matches!(failures[2], AssertionFailure::DataMismatch { .. }));
    assert!(matches!(failures[3], AssertionFailure::MissingFields { .. }));
}

#[test]
fn test_no_assertions_only_requires_presence() {
    let trace = trace(json!({ "Done": [run_entry(&[])] }));
    assert!(evaluate("Done", &Assertions::default(), &trace).is_empty());
}

#[test]
fn test_trace_from_noisy_output() {
    let document = trace_document(json!({ "Set Y": [run_entry(&[json!({"y": "}"})])] }), None);
    let trace = ExecutionTrace::from_output(&noisy_output(&document)).unwrap();
    assert_eq!(trace.node_names().collect::<Vec<_>>(), vec!["Set Y"]);
    assert_eq!(
        trace.last_run("Set Y").and_then(|r| r.first_item()),
        Some(&json!({"y": "}"}))
    );
    assert!(trace.runs("Done").is_empty());
}

#[test]
fn test_trace_with_unexpected_shape() {
    let err = ExecutionTrace::from_value(json!({ "data": { "resultData": { "runData": [] } } }))
        .unwrap_err();
    assert!(matches!(err, ExtractionError::InvalidTrace(_)));
}
