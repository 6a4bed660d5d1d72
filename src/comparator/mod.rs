//! Evaluates one node's assertions against an execution trace.

mod equality;

pub use equality::json_eq;

use crate::error::AssertionFailure;
use crate::suite::Assertions;
use crate::trace::ExecutionTrace;
use serde_json::{Map, Value};

/// Checks `assertions` against the most recent run of `node` in `trace`.
///
/// Every declared rule is evaluated and every failure is returned, so a single
/// engine run yields as much diagnostic output as possible. An empty list
/// means the node passed. A node that never ran only reports its absence.
pub fn evaluate(node: &str, assertions: &Assertions, trace: &ExecutionTrace) -> Vec<AssertionFailure> {
    let Some(last) = trace.last_run(node) else {
        return vec![AssertionFailure::NodeNotFound {
            node: node.to_string(),
        }];
    };

    let mut failures = Vec::new();

    if let Some(want) = &assertions.execution_status {
        let got = last.execution_status.as_deref();
        if got != Some(want.as_str()) {
            failures.push(AssertionFailure::StatusMismatch {
                node: node.to_string(),
                want: want.clone(),
                got: got.unwrap_or("None").to_string(),
            });
        }
    }

    if let Some(want) = &assertions.error_message {
        let contains = |message: Option<&str>| message.unwrap_or_default().contains(want.as_str());
        if !contains(last.error_message()) && !contains(trace.error_message()) {
            failures.push(AssertionFailure::ErrorMessageMissing {
                node: node.to_string(),
                want: want.clone(),
            });
        }
    }

    if let Some(want) = &assertions.data {
        let empty = Value::Object(Map::new());
        let got = last.first_item().unwrap_or(&empty);
        if !json_eq(want, got) {
            failures.push(AssertionFailure::DataMismatch {
                node: node.to_string(),
                want: pretty(want),
                got: pretty(got),
            });
        }
    }

    if let Some(fields) = &assertions.include_fields {
        match last.first_item() {
            None => failures.push(AssertionFailure::NoOutputItems {
                node: node.to_string(),
            }),
            Some(item) => {
                let missing: Vec<&str> = fields
                    .iter()
                    .map(String::as_str)
                    .filter(|field| item.get(field).is_none())
                    .collect();
                if !missing.is_empty() {
                    failures.push(AssertionFailure::MissingFields {
                        node: node.to_string(),
                        missing: Value::from(missing).to_string(),
                        item: pretty(item),
                    });
                }
            }
        }
    }

    failures
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
