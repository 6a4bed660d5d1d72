//! Invocation of the external workflow engine.
//!
//! The engine is a black box reached through two narrow seams: [`Engine`] for
//! importing and executing workflow documents, and [`WebhookClient`] for
//! webhook-triggered tests. [`CliEngine`] and [`HttpWebhookClient`] are the
//! production implementations.

pub mod cli;
pub mod http;
pub mod shell;

pub use cli::CliEngine;
pub use http::HttpWebhookClient;
pub use shell::{CommandOutput, run_shell};

use crate::error::{ExecutionError, TestError};
use crate::trace::ExecutionTrace;
use crate::workflow::WorkflowGraph;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

const PATCHED_FILE_NAME: &str = "patched_workflow.json";

/// Imports and runs workflows by id.
///
/// Implementations assume exclusive ownership of the workflow id for the
/// duration of a test.
pub trait Engine {
    /// Imports the workflow document at `path`, replacing any stored workflow
    /// with the same id.
    fn import_workflow(&self, path: &Path) -> Result<(), ExecutionError>;

    /// Executes a previously imported workflow and returns the engine's raw,
    /// possibly log-interleaved, output.
    fn execute_workflow(&self, workflow_id: &str) -> Result<String, ExecutionError>;
}

/// Status and body of a webhook response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

/// Sends JSON payloads to webhook URLs.
pub trait WebhookClient {
    fn post(&self, url: &str, payload: &Value) -> Result<WebhookResponse, ExecutionError>;
}

/// Persists `graph` to a scoped temporary file, imports and executes it, and
/// decodes the execution trace from the engine output.
///
/// The temporary directory is removed when this function returns, whether or
/// not the engine succeeded.
pub fn execute_graph(
    engine: &dyn Engine,
    graph: &WorkflowGraph,
    workflow_id: &str,
) -> Result<ExecutionTrace, TestError> {
    let dir = tempfile::tempdir().map_err(|e| ExecutionError::TempFile(e.to_string()))?;
    let path = dir.path().join(PATCHED_FILE_NAME);
    let document = graph
        .to_json_string()
        .map_err(|e| ExecutionError::TempFile(e.to_string()))?;
    fs::write(&path, document).map_err(|e| ExecutionError::TempFile(e.to_string()))?;
    debug!(path = %path.display(), "wrote patched workflow");

    engine.import_workflow(&path)?;
    let output = engine.execute_workflow(workflow_id)?;
    Ok(ExecutionTrace::from_output(&output)?)
}
