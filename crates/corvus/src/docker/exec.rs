//! Exec domain — run a command inside a container and collect its output.

use bollard::container::LogOutput;
use bytes::BytesMut;
use futures_util::stream::StreamExt;

use super::client::{DockerClient, DockerError};

/// Collected result of an in-container exec.
#[derive(Debug, Clone, Default)]
pub struct ExecOutput {
    /// Exit code reported by the daemon, or `-1` when it was unavailable.
    pub exit_code: i64,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Last non-empty stdout line, if any.  Backup scripts and the like
    /// conventionally print their verdict last.
    pub fn last_stdout_line(&self) -> Option<&str> {
        self.stdout.lines().rev().find(|line| !line.trim().is_empty())
    }
}

impl DockerClient {
    /// Run `cmd` inside a running container, wait for completion, and
    /// collect stdout/stderr plus the exit code.  A 404 maps to
    /// [`DockerError::ContainerNotFound`].
    pub async fn run_exec(
        &self,
        container_id: &str,
        cmd: Vec<String>,
    ) -> Result<ExecOutput, DockerError> {
        use bollard::exec::StartExecOptions;
        use bollard::models::ExecConfig;

        let config = ExecConfig {
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            cmd: Some(cmd),
            ..Default::default()
        };

        let created = self
            .client
            .create_exec(container_id, config)
            .await
            .map_err(|e| match e {
                bollard::errors::Error::DockerResponseServerError {
                    status_code: 404, ..
                } => DockerError::ContainerNotFound(container_id.to_string()),
                other => DockerError::BollardError(other),
            })?;

        let options = Some(StartExecOptions {
            detach: false,
            ..Default::default()
        });

        let started = self.client.start_exec(&created.id, options).await?;

        let mut stdout = BytesMut::new();
        let mut stderr = BytesMut::new();

        match started {
            bollard::exec::StartExecResults::Attached { mut output, .. } => {
                while let Some(chunk) = output.next().await {
                    match chunk? {
                        LogOutput::StdOut { message } => stdout.extend_from_slice(&message),
                        LogOutput::StdErr { message } => stderr.extend_from_slice(&message),
                        _ => {}
                    }
                }
            }
            bollard::exec::StartExecResults::Detached => {
                return Err(DockerError::ExecNotAttached);
            }
        }

        let inspect = self.client.inspect_exec(&created.id).await?;
        let exit_code = inspect.exit_code.unwrap_or(-1);

        tracing::debug!(container_id, exit_code, "Exec completed");

        Ok(ExecOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_stdout_line_skips_trailing_blanks() {
        let out = ExecOutput {
            exit_code: 0,
            stdout: "step 1\nbackup complete\n\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(out.last_stdout_line(), Some("backup complete"));
    }

    #[test]
    fn test_last_stdout_line_empty_output() {
        let out = ExecOutput::default();
        assert_eq!(out.last_stdout_line(), None);
    }
}
