//! Common test utilities: fixture graphs, engine output and fake drivers.
use flowprobe::prelude::*;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::result::Result;

/// A three-node workflow: `Webhook In -> Set Y -> Done`.
#[allow(dead_code)]
pub const SAMPLE_WORKFLOW_JSON: &str = r#"{
  "id": "wf-sample",
  "name": "Sample",
  "nodes": [
    {
      "parameters": { "path": "in", "httpMethod": "POST" },
      "type": "n8n-nodes-base.webhook",
      "typeVersion": 2,
      "position": [0, 0],
      "id": "node-1",
      "name": "Webhook In",
      "webhookId": "hook-1"
    },
    {
      "parameters": { "mode": "manual", "options": {} },
      "type": "n8n-nodes-base.set",
      "typeVersion": 3.4,
      "position": [220, 0],
      "id": "node-2",
      "name": "Set Y"
    },
    {
      "parameters": {},
      "type": "n8n-nodes-base.noOp",
      "typeVersion": 1,
      "position": [440, 0],
      "id": "node-3",
      "name": "Done"
    }
  ],
  "connections": {
    "Webhook In": { "main": [[{ "node": "Set Y", "type": "main", "index": 0 }]] },
    "Set Y": { "main": [[{ "node": "Done", "type": "main", "index": 0 }]] }
  },
  "settings": { "executionOrder": "v1" },
  "pinData": {}
}"#;

#[allow(dead_code)]
pub fn sample_graph() -> WorkflowGraph {
    WorkflowGraph::from_json_str(SAMPLE_WORKFLOW_JSON).unwrap()
}

/// Writes the sample workflow into `dir` and returns its path.
#[allow(dead_code)]
pub fn write_sample_workflow(dir: &Path) -> PathBuf {
    let path = dir.join("sample.json");
    fs::write(&path, SAMPLE_WORKFLOW_JSON).unwrap();
    path
}

/// Wraps a `runData` object into a full execution document.
#[allow(dead_code)]
pub fn trace_document(run_data: Value, top_error: Option<&str>) -> Value {
    let mut result_data = json!({ "runData": run_data });
    if let Some(message) = top_error {
        result_data["error"] = json!({ "message": message });
    }
    json!({ "data": { "resultData": result_data } })
}

/// One successful run entry whose first port carries `items`.
#[allow(dead_code)]
pub fn run_entry(items: &[Value]) -> Value {
    let wrapped: Vec<Value> = items.iter().map(|i| json!({ "json": i })).collect();
    json!({
        "startTime": 1,
        "executionStatus": "success",
        "data": { "main": [wrapped] }
    })
}

/// Engine output as the CLI prints it: log noise around the JSON document.
#[allow(dead_code)]
pub fn noisy_output(document: &Value) -> String {
    format!(
        "Loading workflow... \"quoted\" warning\nExecution was successful:\n{}\nShutting down}} bye\n",
        serde_json::to_string_pretty(document).unwrap()
    )
}

/// What a fake engine saw while a runner used it.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct EngineLog {
    pub imported: Vec<WorkflowGraph>,
    pub imported_paths: Vec<PathBuf>,
    pub executed: Vec<String>,
}

/// An engine that records imports and replays canned output.
#[allow(dead_code)]
pub struct FakeEngine {
    pub output: String,
    pub fail_import: bool,
    pub log: Rc<RefCell<EngineLog>>,
}

#[allow(dead_code)]
impl FakeEngine {
    pub fn new(output: impl Into<String>) -> (Self, Rc<RefCell<EngineLog>>) {
        let log = Rc::new(RefCell::new(EngineLog::default()));
        let engine = Self {
            output: output.into(),
            fail_import: false,
            log: Rc::clone(&log),
        };
        (engine, log)
    }

    pub fn failing_import() -> (Self, Rc<RefCell<EngineLog>>) {
        let (mut engine, log) = Self::new("");
        engine.fail_import = true;
        (engine, log)
    }
}

impl Engine for FakeEngine {
    fn import_workflow(&self, path: &Path) -> Result<(), ExecutionError> {
        let mut log = self.log.borrow_mut();
        log.imported_paths.push(path.to_path_buf());
        if self.fail_import {
            return Err(ExecutionError::ImportFailed {
                path: path.display().to_string(),
                code: 1,
            });
        }
        let content = fs::read_to_string(path).unwrap();
        log.imported
            .push(WorkflowGraph::from_json_str(&content).unwrap());
        Ok(())
    }

    fn execute_workflow(&self, workflow_id: &str) -> Result<String, ExecutionError> {
        self.log.borrow_mut().executed.push(workflow_id.to_string());
        Ok(self.output.clone())
    }
}

/// A webhook client that answers every call with the same response.
#[allow(dead_code)]
pub struct FakeWebhook {
    pub response: WebhookResponse,
    pub calls: Rc<RefCell<Vec<(String, Value)>>>,
}

#[allow(dead_code)]
impl FakeWebhook {
    pub fn new(status: u16, body: &str) -> (Self, Rc<RefCell<Vec<(String, Value)>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let client = Self {
            response: WebhookResponse {
                status,
                body: body.to_string(),
            },
            calls: Rc::clone(&calls),
        };
        (client, calls)
    }
}

impl WebhookClient for FakeWebhook {
    fn post(&self, url: &str, payload: &Value) -> Result<WebhookResponse, ExecutionError> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), payload.clone()));
        Ok(self.response.clone())
    }
}

/// Builds a runner from fakes.
#[allow(dead_code)]
pub fn runner_with(engine: FakeEngine, webhook: FakeWebhook) -> TestRunner {
    TestRunner::builder(Box::new(engine))
        .with_webhook_client(Box::new(webhook))
        .build()
        .unwrap()
}

/// Records every reporter event as a line of text.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct RecordingReporter {
    pub events: Vec<String>,
    pub verdicts: Vec<Verdict>,
}

impl Reporter for RecordingReporter {
    fn workflow_started(&mut self, workflow_id: &str) {
        self.events.push(format!("start {}", workflow_id));
    }

    fn test_finished(&mut self, workflow_id: &str, verdict: &Verdict) {
        self.events
            .push(format!("test {}::{} {}", workflow_id, verdict.test_id, verdict.passed()));
        self.verdicts.push(verdict.clone());
    }

    fn workflow_finished(&mut self, workflow_id: &str, tally: Tally) {
        self.events
            .push(format!("end {} {}/{}", workflow_id, tally.passed, tally.total));
    }

    fn suite_finished(&mut self, tally: Tally) {
        self.events
            .push(format!("done {}/{}", tally.passed, tally.total));
    }
}

/// Parses a single test case from the YAML of its `nodes` mapping.
#[allow(dead_code)]
pub fn test_case(nodes_yaml: &str) -> TestCase {
    let yaml = format!("name: case\nnodes:\n{}", indent(nodes_yaml, 2));
    serde_yaml::from_str(&yaml).unwrap()
}

#[allow(dead_code)]
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| format!("{}{}\n", pad, line))
        .collect()
}
