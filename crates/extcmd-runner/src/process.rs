use std::time::Duration;

use crate::error::RunnerError;
use crate::CommandSpec;

/// Output from a process that ran to completion.
///
/// Both streams are fully decoded text; `exit_code` is `None` only when the
/// process was terminated by a signal before reporting a status.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    /// Create a new `ProcessOutput` with the given values.
    #[must_use]
    pub fn new(stdout: String, stderr: String, exit_code: Option<i32>) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Synthesized success for a launch whose output was deliberately left
    /// connected to the host (interactive or GUI tools managing their own
    /// lifecycle).
    #[must_use]
    pub fn detached() -> Self {
        Self::new(String::new(), String::new(), Some(0))
    }

    /// Check if the process exited successfully (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for process execution.
///
/// Implementations MUST use argv-style APIs only (no shell string
/// evaluation); [`CommandSpec`] guarantees arguments stay discrete.
///
/// The interface is synchronous: the call blocks until the child exits, the
/// timeout fires, or — with `capture` off — the child is spawned.
/// Implementations may internally drive an async runtime but must not expose
/// async in the public API.
pub trait ProcessRunner {
    /// Execute a command.
    ///
    /// * `stdin` — payload written in full to the child's standard input,
    ///   which is then closed to signal end-of-input. `None` leaves stdin
    ///   closed from the start.
    /// * `timeout` — enforced only when capturing; on expiry the child is
    ///   forcibly terminated and already-buffered stderr is salvaged into the
    ///   returned [`RunnerError::Timeout`].
    /// * `capture` — when `false`, the child's streams stay connected to the
    ///   host, no stdin is piped, and a synthesized success is returned as
    ///   soon as the child is spawned.
    ///
    /// Returns `Ok` with the real exit code for any process that ran to
    /// completion, zero or not.
    fn run(
        &self,
        cmd: &CommandSpec,
        stdin: Option<&str>,
        timeout: Duration,
        capture: bool,
    ) -> Result<ProcessOutput, RunnerError>;
}
