use super::Engine;
use super::shell::run_shell;
use crate::error::ExecutionError;
use std::path::Path;
use tracing::info;

pub const DEFAULT_PREFIX: &str = "n8n";

/// Drives the engine through its command-line interface.
///
/// The prefix is the command that starts the engine CLI, such as `n8n` or
/// `docker exec <container> n8n`.
#[derive(Debug, Clone)]
pub struct CliEngine {
    prefix: String,
}

impl CliEngine {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().trim().to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn import_command(&self, path: &Path) -> String {
        format!(
            "{} import:workflow --input \"{}\" --overwrite",
            self.prefix,
            path.display()
        )
    }

    fn execute_command(&self, workflow_id: &str) -> String {
        format!("{} execute --id {} --rawOutput", self.prefix, workflow_id)
    }
}

impl Default for CliEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl Engine for CliEngine {
    fn import_workflow(&self, path: &Path) -> Result<(), ExecutionError> {
        let command = self.import_command(path);
        info!(path = %path.display(), "importing workflow");
        let output = run_shell(&command).map_err(|e| ExecutionError::Spawn {
            command: command.clone(),
            message: e.to_string(),
        })?;
        if output.success() {
            Ok(())
        } else {
            Err(ExecutionError::ImportFailed {
                path: path.display().to_string(),
                code: output.code_or_signal(),
            })
        }
    }

    fn execute_workflow(&self, workflow_id: &str) -> Result<String, ExecutionError> {
        let command = self.execute_command(workflow_id);
        info!(workflow = workflow_id, "executing workflow");
        let output = run_shell(&command).map_err(|e| ExecutionError::Spawn {
            command: command.clone(),
            message: e.to_string(),
        })?;
        // The trace may land on either stream depending on the engine's log
        // configuration, so both are searched.
        Ok(format!("{}\n{}", output.stdout, output.stderr))
    }
}
