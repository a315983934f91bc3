//! Subprocess execution for external-command invocations
//!
//! Provides argv-style command descriptions and a blocking process runner
//! with timeout enforcement, full stdout/stderr capture, and best-effort
//! stderr recovery when a process has to be killed.
//!
//! # Security Model
//!
//! All process execution goes through [`CommandSpec`] to ensure argv-style
//! invocation. Arguments are passed to the operating system as discrete
//! elements; no shell string evaluation ever occurs.

mod command_spec;
mod error;
mod pipe;
mod process;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use pipe::PipeRunner;
pub use process::{ProcessOutput, ProcessRunner};
