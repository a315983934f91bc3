use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use extcmd_runner::{PipeRunner, ProcessRunner};
use tracing::{debug, info, warn};

use crate::error::{split_runner_error, InvokeError};
use crate::mode::DeliveryMode;
use crate::normalize;
use crate::outcome::InvocationOutcome;
use crate::policy;
use crate::request::InvocationRequest;
use crate::strategy::StrategyOutput;

/// The invocation orchestrator for one command binding.
///
/// `invoke` validates the delivery mode before anything is spawned, runs the
/// selected strategy, normalizes the output, and resolves every expected
/// failure into a structured [`InvocationOutcome`] — it never panics for
/// launch failures, timeouts, or unknown modes.
///
/// At most one invocation per `Invoker` is in flight at a time: a second
/// call while one is outstanding fails fast with
/// [`InvokeError::Busy`](crate::InvokeError::Busy) instead of queuing or
/// cancelling. Host environments are event-driven; a stuck tool must not
/// stack up re-triggered commands behind it. The latch is scoped to this
/// instance — one `Invoker` per command binding — and is released on every
/// exit path.
///
/// # Example
///
/// ```rust,no_run
/// use extcmd::{DeliveryMode, InvocationRequest, Invoker};
///
/// let invoker = Invoker::new();
/// let request = InvocationRequest::builder(["sort"])
///     .mode(DeliveryMode::Stdin)
///     .input("b\na\n")
///     .replaces_selection(true)
///     .build()
///     .unwrap();
///
/// let outcome = invoker.invoke(&request);
/// if outcome.success() {
///     // hand outcome.stdout to the output sink
/// }
/// ```
pub struct Invoker<R = PipeRunner> {
    runner: R,
    scratch_dir: Option<PathBuf>,
    busy: AtomicBool,
}

impl Invoker<PipeRunner> {
    /// Create an invoker backed by the real process runner.
    #[must_use]
    pub fn new() -> Self {
        Self::with_runner(PipeRunner::new())
    }

    /// Create an invoker taking its scratch directory from configuration.
    #[must_use]
    pub fn from_config(config: &extcmd_config::Config) -> Self {
        let mut invoker = Self::new();
        invoker.scratch_dir = config.scratch_dir().map(PathBuf::from);
        invoker
    }
}

impl Default for Invoker<PipeRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> Invoker<R> {
    /// Create an invoker with a custom runner (tests, alternative backends).
    #[must_use]
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            scratch_dir: None,
            busy: AtomicBool::new(false),
        }
    }

    /// Override the scratch directory used by temp-file mode.
    #[must_use]
    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Run one invocation to completion and report its outcome.
    pub fn invoke(&self, request: &InvocationRequest) -> InvocationOutcome {
        let mode = match DeliveryMode::parse(&request.mode) {
            Ok(mode) => mode,
            Err(err) => {
                warn!(token = %request.mode, "rejecting invocation with unknown delivery mode");
                return InvocationOutcome::failed(err, String::new());
            }
        };

        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            debug!(program = %request.command.display_name(), "dropping invocation: busy");
            return InvocationOutcome::failed(InvokeError::Busy, String::new());
        };

        let program = request.command.display_name();
        let started = Instant::now();
        debug!(program = %program, mode = %mode, "invoking external program");

        match policy::execute(mode, &self.runner, request, self.scratch_dir.as_deref()) {
            Ok(StrategyOutput {
                raw,
                effective_stdout,
            }) => match raw.exit_code {
                Some(code) => {
                    info!(
                        program = %program,
                        exit_code = code,
                        duration_ms = started.elapsed().as_millis() as u64,
                        "external program finished"
                    );
                    let stdout = request.capture_output.then(|| {
                        normalize::trim_trailing_newline(
                            &request.input,
                            effective_stdout,
                            request.replaces_selection,
                        )
                    });
                    InvocationOutcome::completed(stdout, raw.stderr, code)
                }
                None => {
                    warn!(program = %program, "external program was terminated by a signal");
                    InvocationOutcome::failed(
                        InvokeError::Unknown {
                            program,
                            reason: "terminated by a signal before reporting an exit status"
                                .to_string(),
                        },
                        raw.stderr,
                    )
                }
            },
            Err(err) => {
                let (kind, stderr) = split_runner_error(err);
                warn!(program = %program, error = %kind, "invocation failed");
                InvocationOutcome::failed(kind, stderr)
            }
        }
    }
}

/// Exclusive hold on the busy latch, released on drop.
///
/// Drop-based release is what guarantees the latch cannot stay set when a
/// strategy errors or panics mid-invocation.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
            .then_some(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
