//! Docker module — client construction, image queries, in-container exec.

pub mod client;
pub mod exec;
pub mod image;

pub use client::{DockerClient, DockerError};
pub use exec::ExecOutput;
