use extcmd_runner::RunnerError;
use thiserror::Error;

/// The invocation-failure taxonomy.
///
/// Every variant maps to one short, human-readable message for the host's
/// status line; stderr text travels separately on the outcome and is
/// surfaced in addition to, never instead of, the structured error.
///
/// None of these is retried: a launch failure or timeout resolves into a
/// structured outcome and the next attempt is a fresh user action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// The requested input-delivery mode token is not recognized. Detected
    /// before any process starts; always a caller/configuration bug.
    #[error("unknown delivery mode `{token}`")]
    UnsupportedMode { token: String },

    /// The OS could not start the executable.
    #[error("could not run `{program}`")]
    LaunchFailed { program: String, reason: String },

    /// The subprocess exceeded its allotted time and was killed.
    #[error("`{program}` takes too long (killed after {timeout_secs}s)")]
    Timeout { program: String, timeout_secs: u64 },

    /// An invocation for the same command binding is already in flight; this
    /// request was dropped, not queued.
    #[error("busy: an invocation is already in flight")]
    Busy,

    /// Any other failure during spawn, communication, or output decoding.
    #[error("unknown error while running `{program}`: {reason}")]
    Unknown { program: String, reason: String },
}

/// Split a runner failure into its public error kind and the stderr text
/// salvaged alongside it.
pub(crate) fn split_runner_error(err: RunnerError) -> (InvokeError, String) {
    match err {
        RunnerError::Launch { program, source } => (
            InvokeError::LaunchFailed {
                program,
                reason: source.to_string(),
            },
            String::new(),
        ),
        RunnerError::Timeout {
            program,
            timeout_secs,
            stderr,
        } => (
            InvokeError::Timeout {
                program,
                timeout_secs,
            },
            stderr,
        ),
        RunnerError::NonUtf8Output {
            program,
            stream,
            stderr,
        } => (
            InvokeError::Unknown {
                program,
                reason: format!("{stream} was not valid UTF-8"),
            },
            stderr,
        ),
        RunnerError::Io {
            program,
            reason,
            stderr,
        } => (InvokeError::Unknown { program, reason }, stderr),
    }
}
