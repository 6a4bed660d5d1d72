use thiserror::Error;

/// Errors caused by a malformed or ambiguous test declaration or workflow document.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Each test must have exactly one trigger/webhook node, found: {found}")]
    TriggerCount { found: usize },

    #[error("webhook_url missing for webhook trigger '{node}'")]
    MissingWebhookUrl { node: String },

    #[error("Trigger node '{0}' was not found in the workflow graph")]
    TriggerNotInWorkflow(String),

    #[error("failed to read workflow JSON at {path}: {message}")]
    WorkflowRead { path: String, message: String },

    #[error("workflow_dir not found for \"{workflow_id}\": {path}")]
    WorkflowDirNotFound { workflow_id: String, path: String },

    #[error("failed to read test specification '{path}': {message}")]
    SuiteRead { path: String, message: String },

    #[error("failed to parse test specification: {0}")]
    SuiteParse(String),
}

/// Errors raised while pulling a JSON execution trace out of engine output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No JSON object found in engine output")]
    NotFound,

    #[error("Unterminated JSON in engine output")]
    Unterminated,

    #[error("Engine output contained malformed JSON: {0}")]
    InvalidJson(String),

    #[error("Engine output is not a recognizable execution trace: {0}")]
    InvalidTrace(String),
}

/// Errors raised when the external engine (process or HTTP endpoint) fails or is unreachable.
#[derive(Error, Debug, Clone)]
pub enum ExecutionError {
    #[error("Failed to launch `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("Failed to import workflow from {path} (rc={code})")]
    ImportFailed { path: String, code: i32 },

    #[error("HTTP request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("Could not persist patched workflow: {0}")]
    TempFile(String),
}

/// Errors raised by per-node pre/post shell commands.
#[derive(Error, Debug, Clone)]
pub enum CommandError {
    #[error("preCommand for node '{node}' failed (rc={code})")]
    PreCommandFailed { node: String, code: i32 },

    #[error("command `{command}` could not be started: {message}")]
    Spawn { command: String, message: String },

    #[error("[postCommand:{node}] stdout mismatch (want=\"{want}\", got=\"{got}\")")]
    PostCommandMismatch {
        node: String,
        want: String,
        got: String,
    },
}

/// A single comparison rule that did not hold.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssertionFailure {
    #[error("Node \"{node}\": not found in runData")]
    NodeNotFound { node: String },

    #[error("Node \"{node}\": executionStatus mismatch (want={want}, got={got})")]
    StatusMismatch {
        node: String,
        want: String,
        got: String,
    },

    #[error("Node \"{node}\": expected errorMessage \"{want}\" not found")]
    ErrorMessageMissing { node: String, want: String },

    #[error("Node \"{node}\": data mismatch\n  want={want}\n  got ={got}")]
    DataMismatch {
        node: String,
        want: String,
        got: String,
    },

    #[error("Node \"{node}\": expected includeFields but no items were output")]
    NoOutputItems { node: String },

    #[error("Node \"{node}\": missing fields {missing} in {item}")]
    MissingFields {
        node: String,
        missing: String,
        item: String,
    },

    #[error("Node \"{node}\": unsupported type \"{role}\" (expected node/output)")]
    UnsupportedRole { node: String, role: String },

    #[error("responseCode mismatch (want={want}, got={got})")]
    ResponseCodeMismatch { want: u16, got: u16 },

    #[error("responseData mismatch\n  want={want}\n  got ={got}")]
    ResponseDataMismatch { want: String, got: String },
}

/// Any error that aborts a single test. Caught at the test boundary and
/// recorded as one failure message.
#[derive(Error, Debug, Clone)]
pub enum TestError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Command(#[from] CommandError),
}
