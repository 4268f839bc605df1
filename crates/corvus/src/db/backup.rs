//! Backup — trigger a backup script inside a database container.

use crate::client::docker::DockerOps;

use super::error::{DbError, Result};

/// Run `script` inside a running database container via Docker exec and
/// return the script's last stdout line (its verdict, by convention).
///
/// A non-zero exit is an error carrying the script's stderr.
pub async fn run_container_backup(
    docker: &dyn DockerOps,
    container: &str,
    script: &str,
) -> Result<String> {
    tracing::info!(container, script, "Running database backup via container exec");

    let output = docker.run_exec(container, vec![script.to_string()]).await?;

    if !output.success() {
        return Err(DbError::BackupFailed {
            container: container.to_string(),
            exit_code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    let verdict = output.last_stdout_line().unwrap_or_default().to_string();
    tracing::debug!(container, %verdict, "Backup script finished");

    Ok(verdict)
}
