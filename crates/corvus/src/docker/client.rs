//! Docker client — core struct, constructor, error types.
//!
//! Domain methods live in sibling modules (`image`, `exec`) which add
//! `impl DockerClient` blocks.

use bollard::Docker;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DockerError {
    #[error("Docker connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Image not found: {0}")]
    ImageNotFound(String),
    #[error("Container not found: {0}")]
    ContainerNotFound(String),
    #[error("Exec produced no attached output stream")]
    ExecNotAttached,
    #[error("Bollard error: {0}")]
    BollardError(#[from] bollard::errors::Error),
}

#[derive(Debug, Clone)]
pub struct DockerClient {
    /// The bollard Docker client.  `pub(super)` so that domain modules
    /// in sibling files can call bollard APIs directly.
    pub(super) client: Docker,
}

impl DockerClient {
    /// Connect to the daemon at `socket_path`, or with platform defaults
    /// when the path is empty.
    pub fn new(socket_path: &str) -> Result<Self, DockerError> {
        let connection = if socket_path.is_empty() {
            Docker::connect_with_defaults()
                .map_err(|e| DockerError::ConnectionFailed(e.to_string()))?
        } else {
            let clean_path = socket_path.trim_start_matches("unix://");
            Docker::connect_with_socket(clean_path, 120, &bollard::API_DEFAULT_VERSION)
                .map_err(|e| DockerError::ConnectionFailed(e.to_string()))?
        };

        Ok(DockerClient { client: connection })
    }
}

/// Render `name` + `tag` as a full image reference, defaulting the tag to
/// `latest` when empty.
pub(crate) fn image_reference(name: &str, tag: &str) -> String {
    let tag = if tag.is_empty() { "latest" } else { tag };
    format!("{name}:{tag}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_reference_with_tag() {
        assert_eq!(image_reference("busybox", "stable-glibc"), "busybox:stable-glibc");
    }

    #[test]
    fn test_image_reference_defaults_to_latest() {
        assert_eq!(image_reference("hello-world", ""), "hello-world:latest");
    }
}
