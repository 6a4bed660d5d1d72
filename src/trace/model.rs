use super::extract::extract_first_json_object;
use crate::error::ExtractionError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// The decoded result of one workflow execution.
///
/// Mirrors `{data: {resultData: {runData: {...}, error?}}}`; every level is
/// optional so partial traces still decode.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ExecutionTrace {
    #[serde(default)]
    data: TraceData,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
struct TraceData {
    #[serde(default, rename = "resultData")]
    result_data: ResultData,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
struct ResultData {
    #[serde(default, rename = "runData")]
    run_data: IndexMap<String, Vec<RunEntry>>,
    #[serde(default)]
    error: Option<ErrorInfo>,
}

/// One recorded run of a single node.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RunEntry {
    #[serde(default)]
    pub data: RunOutput,
    #[serde(default, rename = "executionStatus")]
    pub execution_status: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

/// Output items of a run, grouped by output port. A port the engine did not
/// populate is recorded as `null`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RunOutput {
    #[serde(default)]
    pub main: Vec<Option<Vec<Value>>>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ErrorInfo {
    #[serde(default)]
    pub message: Option<String>,
}

impl ExecutionTrace {
    /// Decodes a trace from an already-parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self, ExtractionError> {
        serde_json::from_value(value).map_err(|e| ExtractionError::InvalidTrace(e.to_string()))
    }

    /// Pulls the first JSON object out of raw engine output and decodes it.
    pub fn from_output(output: &str) -> Result<Self, ExtractionError> {
        Self::from_value(extract_first_json_object(output)?)
    }

    /// All recorded runs of `node`, oldest first.
    pub fn runs(&self, node: &str) -> &[RunEntry] {
        self.data
            .result_data
            .run_data
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The most recent run of `node`.
    pub fn last_run(&self, node: &str) -> Option<&RunEntry> {
        self.runs(node).last()
    }

    /// Message of the workflow-level error, if the execution failed as a whole.
    pub fn error_message(&self) -> Option<&str> {
        self.data
            .result_data
            .error
            .as_ref()
            .and_then(|e| e.message.as_deref())
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.data.result_data.run_data.keys().map(String::as_str)
    }
}

impl RunEntry {
    /// The `json` payloads of every output item, port by port.
    pub fn items(&self) -> impl Iterator<Item = &Value> {
        self.data
            .main
            .iter()
            .flatten()
            .flatten()
            .filter_map(|item| item.get("json"))
    }

    /// The first output item's payload, if the run produced any.
    pub fn first_item(&self) -> Option<&Value> {
        self.items().next()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.message.as_deref())
    }
}
