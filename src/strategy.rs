//! The four input-delivery strategies.
//!
//! Each strategy owns the mechanics of getting `input` to the subprocess —
//! piped stdin, one extra argument, a scratch file path, or nothing — and
//! hands everything else to the [`ProcessRunner`].

use std::fs;
use std::io::Write;
use std::path::Path;

use extcmd_runner::{ProcessOutput, ProcessRunner, RunnerError};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::request::InvocationRequest;

/// What a strategy produced.
///
/// `raw` is the subprocess's own output; `effective_stdout` is the text that
/// stands as the invocation's result. The two differ only for temp-file
/// read-back, where the rewritten file wins and the subprocess's stdout is
/// kept for logging — conflating them would silently change what "the tool
/// produced" means.
#[derive(Debug)]
pub(crate) struct StrategyOutput {
    pub raw: ProcessOutput,
    pub effective_stdout: String,
}

impl StrategyOutput {
    fn plain(raw: ProcessOutput) -> Self {
        let effective_stdout = raw.stdout.clone();
        Self {
            raw,
            effective_stdout,
        }
    }
}

/// Deliver `input` through the subprocess's standard input.
pub(crate) fn run_stdin<R: ProcessRunner>(
    runner: &R,
    request: &InvocationRequest,
) -> Result<StrategyOutput, RunnerError> {
    runner
        .run(
            &request.command,
            Some(&request.input),
            request.timeout,
            request.capture_output,
        )
        .map(StrategyOutput::plain)
}

/// Deliver `input` as one extra argument.
pub(crate) fn run_single_argument<R: ProcessRunner>(
    runner: &R,
    request: &InvocationRequest,
) -> Result<StrategyOutput, RunnerError> {
    let command = request.command.clone().arg(request.input.as_str());
    runner
        .run(&command, None, request.timeout, request.capture_output)
        .map(StrategyOutput::plain)
}

/// Run the program with no input at all.
pub(crate) fn run_nothing<R: ProcessRunner>(
    runner: &R,
    request: &InvocationRequest,
) -> Result<StrategyOutput, RunnerError> {
    runner
        .run(
            &request.command,
            None,
            request.timeout,
            request.capture_output,
        )
        .map(StrategyOutput::plain)
}

/// Persist `input` to a scratch file and pass its path as one extra argument.
///
/// The scratch file lives for exactly this invocation: the `NamedTempFile`
/// guard deletes it on every exit path, including when the runner fails.
/// With `read_back_file` set, the file's final contents become the effective
/// result — for tools that rewrite their input file in place.
pub(crate) fn run_temp_file<R: ProcessRunner>(
    runner: &R,
    request: &InvocationRequest,
    scratch_dir: Option<&Path>,
) -> Result<StrategyOutput, RunnerError> {
    let program = request.command.display_name();

    let mut file = create_scratch(scratch_dir)
        .map_err(|err| scratch_error(&program, format!("could not create scratch file: {err}")))?;
    file.write_all(request.input.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|err| scratch_error(&program, format!("could not write scratch file: {err}")))?;
    debug!(path = %file.path().display(), bytes = request.input.len(), "wrote scratch file");

    let command = request.command.clone().arg(file.path().as_os_str());
    let raw = runner.run(&command, None, request.timeout, request.capture_output)?;

    let effective_stdout = if request.read_back_file {
        let text = fs::read_to_string(file.path()).map_err(|err| RunnerError::Io {
            program,
            reason: format!("could not re-read scratch file: {err}"),
            stderr: raw.stderr.clone(),
        })?;
        debug!(
            raw_stdout_bytes = raw.stdout.len(),
            read_back_bytes = text.len(),
            "scratch file read back as result"
        );
        text
    } else {
        raw.stdout.clone()
    };

    Ok(StrategyOutput {
        raw,
        effective_stdout,
    })
}

fn create_scratch(dir: Option<&Path>) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("extcmd-").suffix(".txt");
    match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
}

fn scratch_error(program: &str, reason: String) -> RunnerError {
    RunnerError::Io {
        program: program.to_string(),
        reason,
        stderr: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::FnRunner;
    use crate::{DeliveryMode, InvocationRequest};
    use std::ffi::OsString;
    use std::path::PathBuf;
    use std::sync::Mutex;

    fn request(mode: DeliveryMode, input: &str) -> InvocationRequest {
        InvocationRequest::builder(["tool", "--flag"])
            .mode(mode)
            .input(input)
            .build()
            .unwrap()
    }

    #[test]
    fn test_stdin_strategy_pipes_input_without_extra_arg() {
        let seen = Mutex::new(None);
        let runner = FnRunner(|cmd: &extcmd_runner::CommandSpec, stdin: Option<&str>, _, _| {
            *seen.lock().unwrap() = Some((cmd.args.clone(), stdin.map(ToOwned::to_owned)));
            Ok(ProcessOutput::new("out".into(), String::new(), Some(0)))
        });

        let req = request(DeliveryMode::Stdin, "payload");
        let result = run_stdin(&runner, &req).unwrap();

        let (args, stdin) = seen.lock().unwrap().take().unwrap();
        assert_eq!(args, vec![OsString::from("--flag")]);
        assert_eq!(stdin.as_deref(), Some("payload"));
        assert_eq!(result.effective_stdout, "out");
    }

    #[test]
    fn test_single_argument_strategy_appends_payload() {
        let seen = Mutex::new(None);
        let runner = FnRunner(|cmd: &extcmd_runner::CommandSpec, stdin: Option<&str>, _, _| {
            *seen.lock().unwrap() = Some((cmd.args.clone(), stdin.is_some()));
            Ok(ProcessOutput::new(String::new(), String::new(), Some(0)))
        });

        let req = request(DeliveryMode::SingleArgument, "payload");
        run_single_argument(&runner, &req).unwrap();

        let (args, had_stdin) = seen.lock().unwrap().take().unwrap();
        assert_eq!(
            args,
            vec![OsString::from("--flag"), OsString::from("payload")]
        );
        assert!(!had_stdin);
    }

    #[test]
    fn test_nothing_strategy_passes_nothing() {
        let seen = Mutex::new(None);
        let runner = FnRunner(|cmd: &extcmd_runner::CommandSpec, stdin: Option<&str>, _, _| {
            *seen.lock().unwrap() = Some((cmd.args.clone(), stdin.is_some()));
            Ok(ProcessOutput::new(String::new(), String::new(), Some(0)))
        });

        let req = request(DeliveryMode::Nothing, "ignored");
        run_nothing(&runner, &req).unwrap();

        let (args, had_stdin) = seen.lock().unwrap().take().unwrap();
        assert_eq!(args, vec![OsString::from("--flag")]);
        assert!(!had_stdin);
    }

    #[test]
    fn test_temp_file_strategy_passes_live_path_and_cleans_up() {
        let scratch = tempfile::tempdir().unwrap();
        let observed = Mutex::new(None);

        let runner = FnRunner(|cmd: &extcmd_runner::CommandSpec, stdin: Option<&str>, _, _| {
            let path = PathBuf::from(cmd.args.last().unwrap());
            // The scratch file must exist, with the input inside, while the
            // subprocess runs.
            let content = fs::read_to_string(&path).unwrap();
            *observed.lock().unwrap() = Some((path, content, stdin.is_some()));
            Ok(ProcessOutput::new("tool out".into(), String::new(), Some(0)))
        });

        let req = request(DeliveryMode::TemporaryFile, "file payload");
        let result = run_temp_file(&runner, &req, Some(scratch.path())).unwrap();

        let (path, content, had_stdin) = observed.lock().unwrap().take().unwrap();
        assert!(path.starts_with(scratch.path()));
        assert_eq!(content, "file payload");
        assert!(!had_stdin);
        assert_eq!(result.effective_stdout, "tool out");
        assert!(!path.exists(), "scratch file must be deleted after the run");
    }

    #[test]
    fn test_temp_file_read_back_prefers_file_contents() {
        let scratch = tempfile::tempdir().unwrap();
        let runner = FnRunner(|cmd: &extcmd_runner::CommandSpec, _: Option<&str>, _, _| {
            let path = PathBuf::from(cmd.args.last().unwrap());
            fs::write(&path, "rewritten by tool").unwrap();
            Ok(ProcessOutput::new(
                "progress chatter".into(),
                String::new(),
                Some(0),
            ))
        });

        let req = InvocationRequest::builder(["tool"])
            .mode(DeliveryMode::TemporaryFile)
            .input("original")
            .read_back_file(true)
            .build()
            .unwrap();
        let result = run_temp_file(&runner, &req, Some(scratch.path())).unwrap();

        assert_eq!(result.effective_stdout, "rewritten by tool");
        // The raw stdout stays distinct from the effective result.
        assert_eq!(result.raw.stdout, "progress chatter");
    }

    #[test]
    fn test_temp_file_cleanup_when_runner_fails() {
        let scratch = tempfile::tempdir().unwrap();
        let runner = FnRunner(|cmd: &extcmd_runner::CommandSpec, _: Option<&str>, _, _| {
            Err(RunnerError::Launch {
                program: cmd.display_name(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });

        let req = request(DeliveryMode::TemporaryFile, "payload");
        let result = run_temp_file(&runner, &req, Some(scratch.path()));

        assert!(result.is_err());
        let leftovers: Vec<_> = fs::read_dir(scratch.path()).unwrap().collect();
        assert!(
            leftovers.is_empty(),
            "scratch dir must be empty after a failed run"
        );
    }
}
