//! Docker trait — abstract interface for the Docker operations corvus uses.
//!
//! `live.rs` provides the real Bollard-backed implementation.
//! `fake.rs` provides a test double.

use std::collections::HashMap;
use std::pin::Pin;

use crate::docker::client::DockerError;
use crate::docker::exec::ExecOutput;

/// Unified async interface over the Docker daemon.
///
/// Object-safe thanks to `Pin<Box<…>>` returns, so helpers can take
/// `&dyn DockerOps` and be exercised without a running daemon.
pub trait DockerOps: Send + Sync {
    // ── Image queries ───────────────────────────────────────────

    fn image_exists<'a>(
        &'a self,
        name: &'a str,
        tag: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<bool, DockerError>> + Send + 'a>>;

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
    >;

    // ── Exec ────────────────────────────────────────────────────

    fn run_exec<'a>(
        &'a self,
        container_id: &'a str,
        cmd: Vec<String>,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<ExecOutput, DockerError>> + Send + 'a>>;
}
