use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout};
use tracing::{debug, warn};

use crate::error::RunnerError;
use crate::process::{ProcessOutput, ProcessRunner};
use crate::CommandSpec;

/// How long to keep draining pipes after a kill before giving up.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(100);

/// Blocking process runner built on piped stdio.
///
/// `PipeRunner` is the primary implementation of [`ProcessRunner`]. It spawns
/// the child with piped streams, writes the stdin payload concurrently with
/// reading stdout and stderr (so neither side can deadlock on a full pipe
/// buffer), and enforces the timeout around the whole exchange.
///
/// When the timeout fires the child is forcibly terminated, then whatever
/// stderr bytes are already available are drained, bounded to a short window
/// and never blocking past it, so a killed tool's diagnostics survive into
/// the returned error.
///
/// The public interface is synchronous; a current-thread Tokio runtime is
/// driven internally per call.
///
/// # Example
///
/// ```rust,no_run
/// use extcmd_runner::{CommandSpec, PipeRunner, ProcessRunner};
/// use std::time::Duration;
///
/// let runner = PipeRunner::new();
/// let cmd = CommandSpec::new("sort").arg("--reverse");
///
/// let output = runner
///     .run(&cmd, Some("b\na\nc\n"), Duration::from_secs(3), true)
///     .unwrap();
/// assert!(output.success());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeRunner;

impl PipeRunner {
    /// Create a new `PipeRunner`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for PipeRunner {
    fn run(
        &self,
        cmd: &CommandSpec,
        stdin: Option<&str>,
        timeout: Duration,
        capture: bool,
    ) -> Result<ProcessOutput, RunnerError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RunnerError::Io {
                program: cmd.display_name(),
                reason: format!("failed to start runtime: {e}"),
                stderr: String::new(),
            })?;

        runtime.block_on(run_async(cmd, stdin, timeout, capture))
    }
}

async fn run_async(
    cmd: &CommandSpec,
    stdin: Option<&str>,
    timeout: Duration,
    capture: bool,
) -> Result<ProcessOutput, RunnerError> {
    let program = cmd.display_name();

    let mut command = cmd.to_command();
    if capture {
        command
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
    } else {
        // Streams stay connected to the host; the tool owns its lifecycle
        // from here on, so nothing is piped in either.
        command.stdin(Stdio::null());
    }

    let mut child = command.spawn().map_err(|e| RunnerError::Launch {
        program: program.clone(),
        source: e,
    })?;
    debug!(program = %program, capture, "spawned external process");

    if !capture {
        return Ok(ProcessOutput::detached());
    }

    let stdin_pipe = child.stdin.take();
    let mut stdout_pipe = take_pipe(child.stdout.take(), "stdout", &program)?;
    let mut stderr_pipe = take_pipe(child.stderr.take(), "stderr", &program)?;

    let mut stdout_buf = Vec::new();
    let mut stderr_buf = Vec::new();

    let exchange = drive(
        &mut child,
        stdin,
        stdin_pipe,
        &mut stdout_pipe,
        &mut stderr_pipe,
        &mut stdout_buf,
        &mut stderr_buf,
    );

    match tokio::time::timeout(timeout, exchange).await {
        Ok(Ok(status)) => {
            let stderr = decode(stderr_buf, "stderr", &program, None)?;
            let stdout = decode(stdout_buf, "stdout", &program, Some(&stderr))?;
            Ok(ProcessOutput::new(stdout, stderr, status.code()))
        }
        Ok(Err(err)) => {
            let _ = child.start_kill();
            let _ = child.wait().await;
            Err(RunnerError::Io {
                program,
                reason: err.to_string(),
                stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
            })
        }
        Err(_elapsed) => {
            warn!(program = %program, timeout_secs = timeout.as_secs(), "killing process on timeout");
            let _ = child.start_kill();
            drain_pipes(
                &mut stdout_pipe,
                &mut stderr_pipe,
                &mut stdout_buf,
                &mut stderr_buf,
            )
            .await;
            let _ = child.wait().await;
            Err(RunnerError::Timeout {
                program,
                timeout_secs: timeout.as_secs(),
                stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
            })
        }
    }
}

fn take_pipe<T>(pipe: Option<T>, stream: &'static str, program: &str) -> Result<T, RunnerError> {
    pipe.ok_or_else(|| RunnerError::Io {
        program: program.to_string(),
        reason: format!("child {stream} pipe was not available"),
        stderr: String::new(),
    })
}

fn decode(
    buf: Vec<u8>,
    stream: &'static str,
    program: &str,
    stderr: Option<&str>,
) -> Result<String, RunnerError> {
    String::from_utf8(buf).map_err(|err| RunnerError::NonUtf8Output {
        program: program.to_string(),
        stream,
        stderr: stderr.map_or_else(
            || String::from_utf8_lossy(err.as_bytes()).into_owned(),
            ToOwned::to_owned,
        ),
    })
}

/// Feed the stdin payload and read both pipes to EOF, then reap the child.
///
/// The payload write runs concurrently with the pipe reads: a child that
/// floods stdout before consuming its stdin would otherwise deadlock against
/// a full pipe buffer.
async fn drive(
    child: &mut Child,
    payload: Option<&str>,
    stdin_pipe: Option<ChildStdin>,
    stdout_pipe: &mut ChildStdout,
    stderr_pipe: &mut ChildStderr,
    stdout_buf: &mut Vec<u8>,
    stderr_buf: &mut Vec<u8>,
) -> io::Result<ExitStatus> {
    let feed = async {
        if let (Some(mut pipe), Some(text)) = (stdin_pipe, payload) {
            match pipe.write_all(text.as_bytes()).await {
                // A child that exits without reading its input is not an
                // error; its exit status tells the real story.
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
                other => other?,
            }
            let _ = pipe.shutdown().await;
            // Dropping the handle closes the stream, signalling end-of-input.
        }
        Ok::<(), io::Error>(())
    };

    let read = async {
        let mut stdout_chunk = vec![0u8; 8192];
        let mut stderr_chunk = vec![0u8; 8192];
        let mut stdout_done = false;
        let mut stderr_done = false;

        while !(stdout_done && stderr_done) {
            tokio::select! {
                result = stdout_pipe.read(&mut stdout_chunk), if !stdout_done => {
                    match result {
                        Ok(0) => stdout_done = true,
                        Ok(n) => stdout_buf.extend_from_slice(&stdout_chunk[..n]),
                        Err(err) => return Err(err),
                    }
                }
                result = stderr_pipe.read(&mut stderr_chunk), if !stderr_done => {
                    match result {
                        Ok(0) => stderr_done = true,
                        Ok(n) => stderr_buf.extend_from_slice(&stderr_chunk[..n]),
                        Err(err) => return Err(err),
                    }
                }
            }
        }

        Ok(())
    };

    let (fed, read_result) = tokio::join!(feed, read);
    fed?;
    read_result?;

    child.wait().await
}

/// Best-effort drain after a kill: capture whatever bytes are already
/// available, never block past the drain window.
async fn drain_pipes(
    stdout_pipe: &mut ChildStdout,
    stderr_pipe: &mut ChildStderr,
    stdout_buf: &mut Vec<u8>,
    stderr_buf: &mut Vec<u8>,
) {
    let mut stdout_chunk = vec![0u8; 8192];
    let mut stderr_chunk = vec![0u8; 8192];

    let _ = tokio::time::timeout(DRAIN_TIMEOUT, async {
        loop {
            tokio::select! {
                result = stdout_pipe.read(&mut stdout_chunk) => {
                    match result {
                        Ok(0) | Err(_) => break,
                        Ok(n) => stdout_buf.extend_from_slice(&stdout_chunk[..n]),
                    }
                }
                result = stderr_pipe.read(&mut stderr_chunk) => {
                    match result {
                        Ok(0) | Err(_) => {},
                        Ok(n) => stderr_buf.extend_from_slice(&stderr_chunk[..n]),
                    }
                }
            }
        }
    })
    .await;
}
