//! End-to-end invocation behavior against real executables.

use extcmd::{DeliveryMode, InvocationRequest, InvokeError, Invoker};
use std::time::Duration;

#[cfg(unix)]
fn shell(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

#[cfg(windows)]
fn shell(script: &str) -> Vec<String> {
    vec!["cmd".to_string(), "/C".to_string(), script.to_string()]
}

/// Exactly one of exit code and error kind is present, and stderr is always
/// a string.
fn assert_outcome_invariants(outcome: &extcmd::InvocationOutcome) {
    assert_ne!(
        outcome.exit_code.is_some(),
        outcome.error.is_some(),
        "exit_code and error must be mutually exclusive and exhaustive"
    );
    let _always_a_string: &str = &outcome.stderr;
}

#[test]
fn unknown_mode_is_rejected_without_spawning() {
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(["definitely-not-run"])
        .mode_token("quantum_entanglement")
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert_outcome_invariants(&outcome);
    assert_eq!(
        outcome.error,
        Some(InvokeError::UnsupportedMode {
            token: "quantum_entanglement".to_string()
        })
    );
    assert!(outcome.stdout.is_none());
    assert_eq!(outcome.stderr, "");
}

#[test]
fn launch_failure_is_structured() {
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(["this_command_definitely_does_not_exist_12345"])
        .mode(DeliveryMode::Nothing)
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert_outcome_invariants(&outcome);
    match outcome.error {
        Some(InvokeError::LaunchFailed { program, .. }) => {
            assert_eq!(program, "this_command_definitely_does_not_exist_12345");
        }
        other => panic!("Expected LaunchFailed, got {other:?}"),
    }
    assert!(outcome.stdout.is_none());
    assert!(outcome.exit_code.is_none());
    assert_eq!(outcome.stderr, "");
}

#[test]
fn nonzero_exit_code_is_a_result_not_an_error() {
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(shell("exit 3"))
        .mode(DeliveryMode::Nothing)
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert_outcome_invariants(&outcome);
    assert!(outcome.ran());
    assert!(!outcome.success());
    assert_eq!(outcome.exit_code, Some(3));
    assert!(outcome.error.is_none());
}

#[test]
fn stderr_is_surfaced_alongside_the_result() {
    #[cfg(unix)]
    let script = "echo 'warning: deprecated flag' >&2; echo result";
    #[cfg(windows)]
    let script = "echo warning: deprecated flag 1>&2 & echo result";

    let invoker = Invoker::new();
    let request = InvocationRequest::builder(shell(script))
        .mode(DeliveryMode::Nothing)
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert_outcome_invariants(&outcome);
    assert!(outcome.success());
    assert!(outcome.stdout.unwrap().contains("result"));
    assert!(outcome.stderr.contains("warning: deprecated flag"));
}

#[cfg(unix)]
#[test]
fn stdin_round_trip() {
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(["cat"])
        .mode(DeliveryMode::Stdin)
        .input("hello")
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert_outcome_invariants(&outcome);
    assert_eq!(outcome.exit_code, Some(0));
    assert_eq!(outcome.stdout.as_deref(), Some("hello"));
    assert_eq!(outcome.stderr, "");
}

#[cfg(unix)]
#[test]
fn single_argument_delivery() {
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(shell(r#"printf '%s' "$0""#))
        .mode(DeliveryMode::SingleArgument)
        .input("selected text")
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert!(outcome.success());
    assert_eq!(outcome.stdout.as_deref(), Some("selected text"));
}

#[cfg(unix)]
#[test]
fn timeout_kills_and_preserves_partial_stderr() {
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(shell("echo 'stuck on lock' >&2; sleep 10"))
        .mode(DeliveryMode::Nothing)
        .timeout(Duration::from_secs(1))
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert_outcome_invariants(&outcome);
    match outcome.error {
        Some(InvokeError::Timeout { timeout_secs, .. }) => assert_eq!(timeout_secs, 1),
        other => panic!("Expected Timeout, got {other:?}"),
    }
    assert!(outcome.exit_code.is_none());
    assert!(outcome.stdout.is_none(), "timed-out stdout cannot be trusted");
    assert!(outcome.stderr.contains("stuck on lock"));
}

#[cfg(unix)]
#[test]
fn timeout_with_silent_process_yields_empty_stderr() {
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(["sleep", "10"])
        .mode(DeliveryMode::Nothing)
        .timeout(Duration::from_secs(1))
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert_outcome_invariants(&outcome);
    assert!(matches!(outcome.error, Some(InvokeError::Timeout { .. })));
    assert_eq!(outcome.stderr, "");
}

#[cfg(unix)]
#[test]
fn non_capturing_launch_returns_without_waiting() {
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(["sleep", "5"])
        .mode(DeliveryMode::Nothing)
        .capture_output(false)
        .timeout(Duration::from_secs(1))
        .build()
        .unwrap();

    let started = std::time::Instant::now();
    let outcome = invoker.invoke(&request);
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "detached launch must not wait for the child"
    );
    assert_outcome_invariants(&outcome);
    assert_eq!(outcome.exit_code, Some(0));
    assert_eq!(outcome.stdout.unwrap_or_default(), "");
    assert_eq!(outcome.stderr, "");
}

#[cfg(unix)]
#[test]
fn trailing_newline_stripped_when_replacing_selection() {
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(shell("printf 'ABC\\n'"))
        .mode(DeliveryMode::Nothing)
        .input("abc")
        .replaces_selection(true)
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert_eq!(outcome.stdout.as_deref(), Some("ABC"));
}

#[cfg(unix)]
#[test]
fn trailing_newline_kept_when_input_had_one() {
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(shell("printf 'ABC\\n'"))
        .mode(DeliveryMode::Nothing)
        .input("abc\n")
        .replaces_selection(true)
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert_eq!(outcome.stdout.as_deref(), Some("ABC\n"));
}

#[cfg(unix)]
#[test]
fn working_directory_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let invoker = Invoker::new();
    let request = InvocationRequest::builder(["pwd"])
        .mode(DeliveryMode::Nothing)
        .working_dir(dir.path())
        .build()
        .unwrap();

    let outcome = invoker.invoke(&request);
    assert!(outcome.success());
    let reported = outcome.stdout.unwrap();
    let reported = reported.trim_end();
    let expected = dir.path().canonicalize().unwrap();
    assert_eq!(
        std::path::Path::new(reported).canonicalize().unwrap(),
        expected
    );
}
