//! Run — synchronous and asynchronous shell command execution.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmdError {
    #[error("Failed to run shell command `{cmd}`: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
}

/// Captured result of a shell command.
///
/// A non-zero exit is not an error — callers branch on [`CmdOutput::code`]
/// the same way they would inspect `$?`.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    /// Exit code, or `-1` when the process was terminated by a signal.
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CmdOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    fn from_output(output: std::process::Output) -> Self {
        Self {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a shell command line (redirects, wildcards, pipes all work) and
/// capture its exit code and output.
pub fn run(cmd: &str) -> Result<CmdOutput, CmdError> {
    tracing::debug!(%cmd, "Running shell command");

    let output = std::process::Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .output()
        .map_err(|source| CmdError::Spawn {
            cmd: cmd.to_string(),
            source,
        })?;

    Ok(CmdOutput::from_output(output))
}

/// Async variant of [`run`] for callers already inside the tokio runtime.
pub async fn run_async(cmd: &str) -> Result<CmdOutput, CmdError> {
    tracing::debug!(%cmd, "Running shell command (async)");

    let output = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .output()
        .await
        .map_err(|source| CmdError::Spawn {
            cmd: cmd.to_string(),
            source,
        })?;

    Ok(CmdOutput::from_output(output))
}
