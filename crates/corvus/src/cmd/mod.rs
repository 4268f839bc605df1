//! Cmd module — shell command wrappers and path reporting.

pub mod report;
pub mod run;

pub use report::{describe_path, format_size, PathKind};
pub use run::{run, run_async, CmdError, CmdOutput};
