//! Watch — wait for a file's content hash to stop changing.

use std::path::Path;
use std::time::Duration;

use tokio::time::Instant;

use crate::hash::xxh32_file;

/// Knobs for [`has_stabilized`].
#[derive(Debug, Clone)]
pub struct StabilizeOptions {
    /// Give up after this long. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Delay between consecutive digest reads.
    pub interval: Duration,
}

impl Default for StabilizeOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            interval: Duration::from_secs(1),
        }
    }
}

/// Poll a file's xxHash-32 digest until two consecutive reads match.
///
/// Returns `Ok(true)` once the digest repeats — the heuristic for "done
/// being written" — and `Ok(false)` when the deadline passes first.
/// Read errors (including the file disappearing mid-watch) propagate.
pub async fn has_stabilized(
    path: impl AsRef<Path>,
    opts: &StabilizeOptions,
) -> Result<bool, std::io::Error> {
    let path = path.as_ref();
    let deadline = opts.timeout.map(|t| Instant::now() + t);
    let mut previous: Option<String> = None;

    loop {
        let digest = xxh32_file(path)?;

        if previous.as_deref() == Some(&digest) {
            tracing::info!(path = %path.display(), %digest, "Digest stabilized");
            return Ok(true);
        }

        tracing::debug!(
            path = %path.display(),
            old = previous.as_deref().unwrap_or("-"),
            new = %digest,
            "Digest changed"
        );
        previous = Some(digest);

        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Ok(false);
            }
        }

        tokio::time::sleep(opts.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    /// Rewrite `path` with a fresh counter value every `period` for `cycles`
    /// iterations, mimicking a file still in transit.
    async fn keep_file_changing(path: PathBuf, period: Duration, cycles: u32) {
        for i in 0..cycles {
            let mut file = std::fs::File::create(&path).unwrap();
            write!(file, "revision {i}").unwrap();
            tokio::time::sleep(period).await;
        }
    }

    #[tokio::test]
    async fn test_stabilizes_after_writer_stops() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in-transit.txt");
        std::fs::File::create(&path).unwrap();

        let writer = tokio::spawn(keep_file_changing(
            path.clone(),
            Duration::from_millis(10),
            20,
        ));

        let opts = StabilizeOptions {
            timeout: Some(Duration::from_secs(10)),
            interval: Duration::from_millis(25),
        };
        assert!(has_stabilized(&path, &opts).await.unwrap());
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn test_gives_up_when_writer_outlasts_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in-transit.txt");
        std::fs::File::create(&path).unwrap();

        // Writer churns for ~2s; watcher only waits 150ms.
        let writer = tokio::spawn(keep_file_changing(
            path.clone(),
            Duration::from_millis(10),
            200,
        ));

        let opts = StabilizeOptions {
            timeout: Some(Duration::from_millis(150)),
            interval: Duration::from_millis(40),
        };
        assert!(!has_stabilized(&path, &opts).await.unwrap());
        writer.abort();
    }

    #[tokio::test]
    async fn test_quiet_file_stabilizes_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("done.txt");
        std::fs::File::create(&path).unwrap().write_all(b"done").unwrap();

        let opts = StabilizeOptions {
            timeout: None,
            interval: Duration::from_millis(5),
        };
        assert!(has_stabilized(&path, &opts).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let opts = StabilizeOptions::default();
        assert!(has_stabilized("/no/such/file", &opts).await.is_err());
    }
}
