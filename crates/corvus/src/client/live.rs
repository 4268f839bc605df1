//! Live — [`DockerOps`] backed by the real bollard client.

use std::collections::HashMap;
use std::pin::Pin;

use crate::client::docker::DockerOps;
use crate::docker::client::{DockerClient, DockerError};
use crate::docker::exec::ExecOutput;

impl DockerOps for DockerClient {
    fn image_exists<'a>(
        &'a self,
        name: &'a str,
        tag: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<bool, DockerError>> + Send + 'a>> {
        Box::pin(DockerClient::image_exists(self, name, tag))
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
        Box::pin(DockerClient::image_labels(self, name, tag))
    }

    fn run_exec<'a>(
        &'a self,
        container_id: &'a str,
        cmd: Vec<String>,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<ExecOutput, DockerError>> + Send + 'a>>
    {
        Box::pin(DockerClient::run_exec(self, container_id, cmd))
    }
}
