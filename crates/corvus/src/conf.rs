//! Conf — JSON configuration-file discovery across conventional locations.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfError {
    #[error("Configuration file not found: '{filename}'")]
    Missing { filename: String },
    #[error("Failed to parse configuration file: '{path}'")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Look for `<stem>.cfg.json` in conventional locations and parse it.
///
/// `name` may be a bare stem or a script path — the extension is stripped
/// and only the file stem is kept.  Locations are probed in order:
///
/// 1. the directory named by `$<STEM>_CONFIG`
/// 2. the current directory
/// 3. the home directory
/// 4. the per-user data directory for `<stem>` (`~/.local/share/<stem>` on Linux)
/// 5. `/etc/<stem>`
///
/// The first readable candidate wins.  A candidate that opens but fails to
/// parse aborts discovery — a broken config must not be silently shadowed
/// by a fallback location.
pub fn discover<T: DeserializeOwned>(name: &str) -> Result<T, ConfError> {
    let (stem, file_name) = config_file_name(name);
    tracing::debug!(%file_name, "Expecting a configuration file");

    for location in candidate_dirs(&stem) {
        let path = location.join(&file_name);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => {
                tracing::debug!(path = %path.display(), "Not found, trying next location");
                continue;
            }
        };

        let config = serde_json::from_str(&contents).map_err(|source| {
            tracing::error!(path = %path.display(), "Failed to parse configuration file");
            ConfError::Malformed {
                path: path.clone(),
                source,
            }
        })?;

        tracing::info!(path = %path.display(), "Using configuration file");
        return Ok(config);
    }

    tracing::error!(%file_name, "Configuration file not found");
    Err(ConfError::Missing {
        filename: file_name,
    })
}

/// Derive the config stem and filename from a name or script path.
fn config_file_name(name: &str) -> (String, String) {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string();
    let file_name = format!("{stem}.cfg.json");
    (stem, file_name)
}

fn candidate_dirs(stem: &str) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    let env_var = format!("{}_CONFIG", stem.to_uppercase());
    if let Ok(dir) = std::env::var(&env_var) {
        if !dir.is_empty() {
            dirs.push(PathBuf::from(dir));
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(home) = dirs::home_dir() {
        dirs.push(home);
    }
    if let Some(data) = dirs::data_dir() {
        dirs.push(data.join(stem));
    }
    dirs.push(PathBuf::from("/etc").join(stem));

    dirs
}
