//! Client module — abstract Docker interface, live impl, and test double.

pub mod docker;
pub mod fake;
pub mod live;

pub use docker::DockerOps;
pub use fake::FakeDocker;
