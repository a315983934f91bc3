use crate::error::InvokeError;

/// Outcome of one invocation.
///
/// Exactly one of `exit_code` and `error` is present: a process that *ran* —
/// even with a non-zero exit code — is distinct from an invocation that
/// failed (could not run, timed out, busy). What a non-zero exit code means
/// is the caller's call.
///
/// `stderr` is never absent; it defaults to the empty string. Even timed-out
/// and half-run processes may have written diagnostics worth surfacing.
#[derive(Debug, Clone)]
pub struct InvocationOutcome {
    /// Captured (and normalized) standard output. Present exactly when the
    /// process ran to completion with capture enabled.
    pub stdout: Option<String>,
    /// Captured standard error, best-effort, possibly empty.
    pub stderr: String,
    /// The process's real exit code, absent when it never produced one.
    pub exit_code: Option<i32>,
    /// The failure kind, absent when the process ran to completion.
    pub error: Option<InvokeError>,
}

impl InvocationOutcome {
    pub(crate) fn completed(stdout: Option<String>, stderr: String, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code: Some(exit_code),
            error: None,
        }
    }

    pub(crate) fn failed(error: InvokeError, stderr: String) -> Self {
        Self {
            stdout: None,
            stderr,
            exit_code: None,
            error: Some(error),
        }
    }

    /// Whether the process ran to completion (regardless of its exit code).
    #[must_use]
    pub fn ran(&self) -> bool {
        self.exit_code.is_some()
    }

    /// Whether the process ran to completion with exit code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
