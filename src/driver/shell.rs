use std::io;
use std::process::Command;
use tracing::debug;

/// Captured result of a finished shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code as reported in messages; signal termination reads as `-1`.
    pub fn code_or_signal(&self) -> i32 {
        self.code.unwrap_or(-1)
    }
}

/// Runs `command` through the platform shell and waits for it to finish.
///
/// Only a failure to start the shell is an error; a nonzero exit is reported
/// through [`CommandOutput::code`].
pub fn run_shell(command: &str) -> io::Result<CommandOutput> {
    let output = shell(command).output()?;
    let result = CommandOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    debug!(
        command,
        rc = result.code_or_signal(),
        stdout = %result.stdout,
        stderr = %result.stderr,
        "shell command finished"
    );
    Ok(result)
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}
