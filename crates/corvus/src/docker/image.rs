//! Image domain — existence checks and label lookup.

use std::collections::HashMap;

use super::client::{image_reference, DockerClient, DockerError};

impl DockerClient {
    /// Check whether `name:tag` resolves on the daemon (tag defaults to
    /// `latest` when empty).  A 404 from inspect is `false`; every other
    /// failure propagates.
    pub async fn image_exists(&self, name: &str, tag: &str) -> Result<bool, DockerError> {
        let reference = image_reference(name, tag);

        match self.client.inspect_image(&reference).await {
            Ok(_) => Ok(true),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => {
                tracing::debug!(%reference, "Image not found");
                Ok(false)
            }
            Err(e) => Err(DockerError::from(e)),
        }
    }

    /// Return the label map of an image.  An image without labels yields an
    /// empty map; a missing image is [`DockerError::ImageNotFound`].
    pub async fn image_labels(
        &self,
        name: &str,
        tag: &str,
    ) -> Result<HashMap<String, String>, DockerError> {
        let reference = image_reference(name, tag);

        let inspect = self
            .client
            .inspect_image(&reference)
            .await
            .map_err(|e| match e {
                bollard::errors::Error::DockerResponseServerError {
                    status_code: 404, ..
                } => DockerError::ImageNotFound(reference.clone()),
                other => DockerError::BollardError(other),
            })?;

        Ok(inspect
            .config
            .and_then(|config| config.labels)
            .unwrap_or_default())
    }
}
