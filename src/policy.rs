//! Mode-to-strategy dispatch.
//!
//! A pure lookup: every [`DeliveryMode`] maps to exactly one strategy, and
//! the match is exhaustive, so adding a mode without a strategy fails to
//! compile.

use std::path::Path;

use extcmd_runner::{ProcessRunner, RunnerError};

use crate::mode::DeliveryMode;
use crate::request::InvocationRequest;
use crate::strategy::{self, StrategyOutput};

/// Execute the strategy selected by `mode`.
pub(crate) fn execute<R: ProcessRunner>(
    mode: DeliveryMode,
    runner: &R,
    request: &InvocationRequest,
    scratch_dir: Option<&Path>,
) -> Result<StrategyOutput, RunnerError> {
    match mode {
        DeliveryMode::Stdin => strategy::run_stdin(runner, request),
        DeliveryMode::SingleArgument => strategy::run_single_argument(runner, request),
        DeliveryMode::TemporaryFile => strategy::run_temp_file(runner, request, scratch_dir),
        DeliveryMode::Nothing => strategy::run_nothing(runner, request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::FnRunner;
    use extcmd_runner::ProcessOutput;
    use std::sync::Mutex;

    #[test]
    fn test_every_mode_reaches_the_runner() {
        for mode in [
            DeliveryMode::Stdin,
            DeliveryMode::SingleArgument,
            DeliveryMode::TemporaryFile,
            DeliveryMode::Nothing,
        ] {
            let calls = Mutex::new(0u32);
            let runner = FnRunner(|_: &extcmd_runner::CommandSpec, _: Option<&str>, _, _| {
                *calls.lock().unwrap() += 1;
                Ok(ProcessOutput::new(String::new(), String::new(), Some(0)))
            });

            let request = crate::InvocationRequest::builder(["tool"])
                .mode(mode)
                .input("x")
                .build()
                .unwrap();
            execute(mode, &runner, &request, None).unwrap();
            assert_eq!(*calls.lock().unwrap(), 1, "mode {mode} must dispatch once");
        }
    }
}
