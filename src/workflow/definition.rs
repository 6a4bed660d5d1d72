use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A workflow graph document as exported by the engine.
///
/// Only the parts the tester reasons about are typed. Every other key is kept
/// in `extra`, and optional keys stay absent when the source omits them, so a
/// graph survives a load/save round-trip untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct WorkflowGraph {
    /// Engine-assigned id. Older exports use numbers, newer ones strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: IndexMap<String, NodeConnections>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single node of a workflow graph. Node names are unique within a graph.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(
        default,
        rename = "typeVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The outgoing connections of one node, grouped by output port.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NodeConnections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<Vec<Vec<Edge>>>,
    /// Non-`main` connection kinds (sub-node wiring), carried verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single edge from an output port to a target node's input port.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub node: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    /// An edge into input port `index` of `node` on the `main` connection kind.
    pub fn main(node: impl Into<String>, index: u32) -> Self {
        Self {
            node: node.into(),
            kind: Some("main".to_string()),
            index: Some(index),
            extra: Map::new(),
        }
    }
}

impl Node {
    /// A single entry of the node's `parameters` object.
    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.as_ref().and_then(|p| p.get(key))
    }
}

impl NodeConnections {
    /// Connections on the `main` kind: one ordered edge list per output port.
    pub fn main_ports(ports: Vec<Vec<Edge>>) -> Self {
        Self {
            main: Some(ports),
            ..Default::default()
        }
    }
}

impl WorkflowGraph {
    /// Parses a workflow graph from its JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a workflow graph from a JSON file on disk.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let read_error = |message: String| ConfigError::WorkflowRead {
            path: path.display().to_string(),
            message,
        };
        let content = fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;
        Self::from_json_str(&content).map_err(|e| read_error(e.to_string()))
    }

    /// Serializes the graph back into compact JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The id to execute the workflow under, in text form. Empty ids count
    /// as absent.
    pub fn execution_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node(name).is_some()
    }

    /// The edges leaving `source` on output port `port`, or an empty slice if
    /// the node has no recorded connections there.
    pub fn downstream(&self, source: &str, port: usize) -> &[Edge] {
        self.connections
            .get(source)
            .and_then(|c| c.main.as_ref())
            .and_then(|ports| ports.get(port))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
