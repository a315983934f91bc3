use std::io;
use thiserror::Error;

/// Execution-layer failures.
///
/// A process that runs to completion is never an error here, whatever its
/// exit code — exit-status interpretation belongs to the caller. These
/// variants cover the cases where no trustworthy result exists: the program
/// never started, was killed on timeout, or produced output this library
/// cannot represent.
///
/// Variants that can occur after the child produced diagnostics carry the
/// stderr text salvaged so far; a killed formatter frequently manages to
/// explain itself before dying.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The OS could not start the program (not found, not executable,
    /// permission denied).
    #[error("could not run `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The process exceeded its allotted time and was forcibly terminated.
    #[error("`{program}` took longer than {timeout_secs}s and was killed")]
    Timeout {
        program: String,
        timeout_secs: u64,
        /// Stderr text drained before the handle was discarded.
        stderr: String,
    },

    /// An output stream was not valid UTF-8.
    #[error("`{program}` wrote invalid UTF-8 on {stream}")]
    NonUtf8Output {
        program: String,
        stream: &'static str,
        /// Best-effort (lossy) stderr text.
        stderr: String,
    },

    /// Any other failure while communicating with the process.
    #[error("i/o failure while running `{program}`: {reason}")]
    Io {
        program: String,
        reason: String,
        stderr: String,
    },
}

impl RunnerError {
    /// Stderr text salvaged before the failure, empty if none was captured.
    #[must_use]
    pub fn stderr(&self) -> &str {
        match self {
            Self::Launch { .. } => "",
            Self::Timeout { stderr, .. }
            | Self::NonUtf8Output { stderr, .. }
            | Self::Io { stderr, .. } => stderr,
        }
    }

    /// The program this failure is about.
    #[must_use]
    pub fn program(&self) -> &str {
        match self {
            Self::Launch { program, .. }
            | Self::Timeout { program, .. }
            | Self::NonUtf8Output { program, .. }
            | Self::Io { program, .. } => program,
        }
    }
}
