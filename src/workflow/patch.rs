use super::definition::{Edge, Node, NodeConnections, WorkflowGraph};
use crate::error::ConfigError;
use ahash::AHashSet;
use serde_json::{Value, json};
use uuid::Uuid;

pub const MANUAL_TRIGGER_NAME: &str = "When clicking ‘Execute workflow’";
pub const MANUAL_TRIGGER_TYPE: &str = "n8n-nodes-base.manualTrigger";
pub const STATIC_OUTPUT_NAME: &str = "Edit Fields";
pub const STATIC_OUTPUT_TYPE: &str = "n8n-nodes-base.set";

/// Names of the two nodes injected by [`patch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedNodes {
    pub manual_trigger: String,
    pub static_output: String,
}

/// Injects a synthetic input path next to `trigger`.
///
/// The returned graph holds every existing node and connection entry
/// unchanged, plus a manual start node wired into a static output node that
/// emits `payload` as its only item. The static output node is connected to a
/// copy of the trigger's primary downstream edges, so execution reaches the
/// same nodes the real trigger would, in parallel to it.
pub fn patch(
    graph: &WorkflowGraph,
    trigger: &str,
    payload: &Value,
) -> Result<WorkflowGraph, ConfigError> {
    patch_with_names(graph, trigger, payload).map(|(patched, _)| patched)
}

/// Same as [`patch`], also reporting which names the injected nodes received.
pub fn patch_with_names(
    graph: &WorkflowGraph,
    trigger: &str,
    payload: &Value,
) -> Result<(WorkflowGraph, InjectedNodes), ConfigError> {
    if !graph.contains_node(trigger) {
        return Err(ConfigError::TriggerNotInWorkflow(trigger.to_string()));
    }

    let mut patched = graph.clone();
    let downstream = graph.downstream(trigger, 0).to_vec();

    let mut taken: AHashSet<&str> = graph.nodes.iter().map(|n| n.name.as_str()).collect();
    taken.extend(graph.connections.keys().map(String::as_str));
    let manual_name = unique_name(MANUAL_TRIGGER_NAME, &taken);
    taken.insert(&manual_name);
    let static_name = unique_name(STATIC_OUTPUT_NAME, &taken);

    patched.nodes.push(manual_trigger_node(&manual_name));
    patched.nodes.push(static_output_node(&static_name, payload));

    patched.connections.insert(
        manual_name.clone(),
        NodeConnections::main_ports(vec![vec![Edge::main(static_name.clone(), 0)]]),
    );
    patched
        .connections
        .insert(static_name.clone(), NodeConnections::main_ports(vec![downstream]));

    Ok((
        patched,
        InjectedNodes {
            manual_trigger: manual_name,
            static_output: static_name,
        },
    ))
}

fn manual_trigger_node(name: &str) -> Node {
    Node {
        name: name.to_string(),
        node_type: MANUAL_TRIGGER_TYPE.to_string(),
        id: Some(Uuid::new_v4().to_string()),
        parameters: Some(json!({})),
        type_version: Some(json!(1)),
        position: Some(json!([0, -192])),
        extra: Default::default(),
    }
}

fn static_output_node(name: &str, payload: &Value) -> Node {
    // `to_string_pretty` only fails for maps with non-string keys, which a
    // `serde_json::Value` cannot hold.
    let json_output = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    Node {
        name: name.to_string(),
        node_type: STATIC_OUTPUT_TYPE.to_string(),
        id: Some(Uuid::new_v4().to_string()),
        parameters: Some(json!({
            "mode": "raw",
            "jsonOutput": json_output,
            "options": {}
        })),
        type_version: Some(json!(3.4)),
        position: Some(json!([224, -192])),
        extra: Default::default(),
    }
}

/// `base`, or `base` followed by the first free numeric suffix.
fn unique_name(base: &str, taken: &AHashSet<&str>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}
