//! extcmd - run external programs on behalf of editor commands
//!
//! This crate is the process-invocation core of an editor extension: a host
//! hands it an executable, a piece of editor state (selected text, a file
//! name, or nothing), and a delivery mode; it runs the tool with a timeout,
//! collects stdout/stderr and the exit status, and reports a structured
//! outcome for the host to present. Everything editor-specific — panels,
//! selections, settings files — stays on the host's side of the boundary.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use extcmd::{DeliveryMode, InvocationRequest, Invoker};
//!
//! // One Invoker per command binding; it enforces single-flight.
//! let invoker = Invoker::new();
//!
//! let request = InvocationRequest::builder(["sort", "--unique"])
//!     .mode(DeliveryMode::Stdin)
//!     .input("b\na\nb\n")
//!     .replaces_selection(true)
//!     .build()
//!     .unwrap();
//!
//! let outcome = invoker.invoke(&request);
//! match (&outcome.error, outcome.exit_code) {
//!     (None, Some(0)) => { /* write outcome.stdout to the output sink */ }
//!     (None, Some(code)) => eprintln!("tool returned status {code}"),
//!     (Some(err), _) => eprintln!("{err}"),
//!     (None, None) => { /* launched without waiting; nothing to collect */ }
//! }
//! if !outcome.stderr.is_empty() {
//!     // surface diagnostics in addition to the structured result
//! }
//! ```
//!
//! # Delivery modes
//!
//! | Token | Input reaches the tool via |
//! |-------|----------------------------|
//! | `stdin` | its standard input |
//! | `single_argument` | one extra argument |
//! | `temporary_file` | a scratch file path as one extra argument |
//! | `nothing` | not at all |
//!
//! `temporary_file` optionally reads the (possibly rewritten) scratch file
//! back as the result, for tools that format their input file in place. The
//! scratch file is deleted on every exit path.
//!
//! # Failure model
//!
//! `invoke` never panics for expected failures. A tool that *ran* — even
//! with a non-zero exit status — yields `exit_code`; an invocation that
//! could not run yields exactly one [`InvokeError`]: `UnsupportedMode`,
//! `LaunchFailed`, `Timeout`, `Busy`, or `Unknown`. Stderr is always
//! captured best-effort, including from processes killed on timeout.

pub mod error;
pub mod invoker;
pub mod logging;
pub mod mode;
pub mod normalize;
mod outcome;
mod policy;
mod request;
mod strategy;

pub use error::InvokeError;
pub use invoker::Invoker;
pub use mode::DeliveryMode;
pub use outcome::InvocationOutcome;
pub use request::{InvocationRequest, InvocationRequestBuilder, RequestError};

// Re-exported so hosts can drive the invoker with a custom runner or
// pre-bound command specs without naming the member crates.
pub use extcmd_config::Config;
pub use extcmd_runner::{CommandSpec, PipeRunner, ProcessOutput, ProcessRunner, RunnerError};
