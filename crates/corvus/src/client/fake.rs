//! Fake — test double for Docker operations.
//!
//! Provides a deterministic [`FakeDocker`] that implements [`DockerOps`]
//! using in-memory state, so image and exec helpers are testable without
//! a running Docker daemon.

use std::collections::HashMap;
use std::pin::Pin;

use tokio::sync::Mutex;

use crate::client::docker::DockerOps;
use crate::docker::client::{image_reference, DockerError};
use crate::docker::exec::ExecOutput;

/// Mutable inner state protected by a mutex.
#[derive(Default)]
struct Inner {
    /// Full image reference (`name:tag`) → label map.
    images: HashMap<String, HashMap<String, String>>,
    /// Container id → canned exec result.
    exec_results: HashMap<String, ExecOutput>,
}

/// A fake Docker client for deterministic testing.
///
/// The builder methods pre-populate images and exec results before
/// running test code.
#[derive(Default)]
pub struct FakeDocker {
    inner: Mutex<Inner>,
}

impl FakeDocker {
    /// Create an empty fake Docker client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an image (full `name:tag` reference) with its labels.
    pub async fn add_image(&self, reference: &str, labels: HashMap<String, String>) {
        self.inner
            .lock()
            .await
            .images
            .insert(reference.to_string(), labels);
    }

    /// Seed the exec result for a container.  Any container without a
    /// seeded result behaves as missing (404).
    pub async fn set_exec_result(&self, container_id: &str, output: ExecOutput) {
        self.inner
            .lock()
            .await
            .exec_results
            .insert(container_id.to_string(), output);
    }
}

impl DockerOps for FakeDocker {
    fn image_exists<'a>(
        &'a self,
        name: &'a str,
        tag: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<bool, DockerError>> + Send + 'a>> {
        Box::pin(async move {
            let reference = image_reference(name, tag);
            Ok(self.inner.lock().await.images.contains_key(&reference))
        })
    }

    fn image_labels<'a>(
        &'a self,
        name: &'a str,
        tag: &'a str,
    ) -> Pin<
        Box<
            dyn std::future::Future<Output = Result<HashMap<String, String>, DockerError>>
                + Send
                + 'a,
        >,
    > {
        Box::pin(async move {
            let reference = image_reference(name, tag);
            self.inner
                .lock()
                .await
                .images
                .get(&reference)
                .cloned()
                .ok_or(DockerError::ImageNotFound(reference))
        })
    }

    fn run_exec<'a>(
        &'a self,
        container_id: &'a str,
        _cmd: Vec<String>,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<ExecOutput, DockerError>> + Send + 'a>>
    {
        Box::pin(async move {
            self.inner
                .lock()
                .await
                .exec_results
                .get(container_id)
                .cloned()
                .ok_or(DockerError::ContainerNotFound(container_id.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_image_exists() {
        let fake = FakeDocker::new();
        fake.add_image("busybox:stable-glibc", HashMap::new()).await;

        assert!(fake.image_exists("busybox", "stable-glibc").await.unwrap());
        assert!(!fake.image_exists("busybox", "musl").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_tag_means_latest() {
        let fake = FakeDocker::new();
        fake.add_image("hello-world:latest", HashMap::new()).await;

        assert!(fake.image_exists("hello-world", "").await.unwrap());
    }

    #[tokio::test]
    async fn test_image_labels_roundtrip() {
        let fake = FakeDocker::new();
        let labels = HashMap::from([("maintainer".to_string(), "ops".to_string())]);
        fake.add_image("app:1.2.3", labels.clone()).await;

        assert_eq!(fake.image_labels("app", "1.2.3").await.unwrap(), labels);
    }

    #[tokio::test]
    async fn test_missing_image_labels_is_not_found() {
        let fake = FakeDocker::new();
        let err = fake.image_labels("ghost", "1.0.0").await.unwrap_err();
        assert!(matches!(err, DockerError::ImageNotFound(reference) if reference == "ghost:1.0.0"));
    }

    #[tokio::test]
    async fn test_exec_against_unknown_container() {
        let fake = FakeDocker::new();
        let err = fake
            .run_exec("missing", vec!["/backup.sh".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, DockerError::ContainerNotFound(_)));
    }
}
