use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The whole test specification document: workflow id -> its tests.
///
/// Iteration follows the order of the source document.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(transparent)]
pub struct TestSuite {
    pub workflows: IndexMap<String, WorkflowSuite>,
}

/// All tests declared against one workflow graph.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowSuite {
    /// Path of the workflow graph JSON document.
    #[serde(default)]
    pub workflow_dir: Option<PathBuf>,
    #[serde(default)]
    pub tests: IndexMap<String, TestCase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: IndexMap<String, NodeExpectation>,
}

/// The role a node plays in a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Trigger,
    Webhook,
    Node,
    Output,
}

impl Role {
    /// Whether this role starts execution of the workflow.
    pub fn is_entry_point(self) -> bool {
        match self {
            Role::Trigger | Role::Webhook => true,
            Role::Node | Role::Output => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Trigger => "trigger",
            Role::Webhook => "webhook",
            Role::Node => "node",
            Role::Output => "output",
        };
        f.write_str(name)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trigger" => Ok(Role::Trigger),
            "webhook" => Ok(Role::Webhook),
            "node" => Ok(Role::Node),
            "output" => Ok(Role::Output),
            other => Err(format!(
                "unknown node type '{other}' (expected trigger, webhook, node or output)"
            )),
        }
    }
}

/// Shell commands run around a test on behalf of a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandHooks {
    pub pre_command: Option<String>,
    pub post_command: Option<String>,
    /// Expected trimmed stdout of `post_command`. An absent value means "empty".
    pub post_command_expected_output: Option<String>,
}

/// The input injected through a `trigger` node.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSpec {
    pub data: Value,
    pub hooks: CommandHooks,
}

/// A webhook call and the HTTP response it must produce.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookSpec {
    pub data: Value,
    pub webhook_url: Option<String>,
    pub response_code: Option<u16>,
    pub response_data: Option<String>,
    pub hooks: CommandHooks,
}

/// Assertions on a node's most recent run in the execution trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assertions {
    pub data: Option<Value>,
    pub include_fields: Option<Vec<String>>,
    pub execution_status: Option<String>,
    pub error_message: Option<String>,
    pub hooks: CommandHooks,
}

impl Assertions {
    /// Whether any trace-based check is declared.
    pub fn has_trace_checks(&self) -> bool {
        self.data.is_some()
            || self.include_fields.is_some()
            || self.execution_status.is_some()
            || self.error_message.is_some()
    }
}

/// What a test expects of a single node, keyed by the node's role.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNodeExpectation")]
pub enum NodeExpectation {
    Trigger(TriggerSpec),
    Webhook(WebhookSpec),
    Node(Assertions),
    Output(Assertions),
}

impl NodeExpectation {
    pub fn role(&self) -> Role {
        match self {
            NodeExpectation::Trigger(_) => Role::Trigger,
            NodeExpectation::Webhook(_) => Role::Webhook,
            NodeExpectation::Node(_) => Role::Node,
            NodeExpectation::Output(_) => Role::Output,
        }
    }

    pub fn hooks(&self) -> &CommandHooks {
        match self {
            NodeExpectation::Trigger(spec) => &spec.hooks,
            NodeExpectation::Webhook(spec) => &spec.hooks,
            NodeExpectation::Node(assertions) | NodeExpectation::Output(assertions) => {
                &assertions.hooks
            }
        }
    }
}

/// The node that starts execution of a test.
#[derive(Debug, Clone, Copy)]
pub enum EntryPoint<'a> {
    Trigger { node: &'a str, spec: &'a TriggerSpec },
    Webhook { node: &'a str, spec: &'a WebhookSpec },
}

impl<'a> EntryPoint<'a> {
    pub fn node(&self) -> &'a str {
        match self {
            EntryPoint::Trigger { node, .. } | EntryPoint::Webhook { node, .. } => node,
        }
    }
}

impl TestCase {
    /// The test's display name, falling back to its id.
    pub fn display_name<'a>(&'a self, test_id: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(test_id)
    }

    /// Finds the single trigger or webhook node of the test.
    pub fn entry_point(&self) -> Result<EntryPoint<'_>, ConfigError> {
        let mut found = self.nodes.iter().filter_map(|(name, expectation)| match expectation {
            NodeExpectation::Trigger(spec) => Some(EntryPoint::Trigger { node: name, spec }),
            NodeExpectation::Webhook(spec) => Some(EntryPoint::Webhook { node: name, spec }),
            NodeExpectation::Node(_) | NodeExpectation::Output(_) => None,
        });

        match (found.next(), found.next()) {
            (Some(entry), None) => Ok(entry),
            (None, _) => Err(ConfigError::TriggerCount { found: 0 }),
            (Some(_), Some(_)) => Err(ConfigError::TriggerCount {
                found: 2 + found.count(),
            }),
        }
    }
}

// --- Raw document shape ---
// A node entry as written in the YAML document. Converted into the
// role-specific `NodeExpectation` once the role is known.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNodeExpectation {
    #[serde(rename = "type")]
    role: String,
    #[serde(default, deserialize_with = "present")]
    data: Option<Value>,
    #[serde(default)]
    include_fields: Option<Vec<String>>,
    #[serde(default, deserialize_with = "scalar_string")]
    execution_status: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    error_message: Option<String>,
    #[serde(default)]
    pre_command: Option<String>,
    #[serde(default)]
    post_command: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    post_command_expected_output: Option<String>,
    #[serde(default, rename = "webhook_url", alias = "webhookUrl")]
    webhook_url: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    response_code: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    response_data: Option<String>,
}

impl TryFrom<RawNodeExpectation> for NodeExpectation {
    type Error = String;

    fn try_from(raw: RawNodeExpectation) -> Result<Self, Self::Error> {
        let role: Role = raw.role.parse()?;
        let hooks = CommandHooks {
            pre_command: raw.pre_command.filter(|c| !c.trim().is_empty()),
            post_command: raw.post_command.filter(|c| !c.trim().is_empty()),
            post_command_expected_output: raw.post_command_expected_output,
        };
        let data = raw.data;

        Ok(match role {
            Role::Trigger => NodeExpectation::Trigger(TriggerSpec {
                data: input_payload(data),
                hooks,
            }),
            Role::Webhook => {
                let response_code = raw
                    .response_code
                    .as_deref()
                    .map(|code| {
                        code.trim()
                            .parse::<u16>()
                            .map_err(|_| format!("responseCode '{code}' is not a valid HTTP status"))
                    })
                    .transpose()?;
                NodeExpectation::Webhook(WebhookSpec {
                    data: input_payload(data),
                    webhook_url: raw.webhook_url.filter(|u| !u.trim().is_empty()),
                    response_code,
                    response_data: raw.response_data,
                    hooks,
                })
            }
            Role::Node | Role::Output => {
                let assertions = Assertions {
                    data,
                    include_fields: raw.include_fields,
                    execution_status: raw.execution_status,
                    error_message: raw.error_message,
                    hooks,
                };
                if role == Role::Node {
                    NodeExpectation::Node(assertions)
                } else {
                    NodeExpectation::Output(assertions)
                }
            }
        })
    }
}

/// A trigger without `data` injects an empty object. An explicit value,
/// `null` included, is injected as written.
fn input_payload(data: Option<Value>) -> Value {
    data.unwrap_or_else(|| Value::Object(Default::default()))
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Accepts any YAML scalar and keeps its textual form.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
