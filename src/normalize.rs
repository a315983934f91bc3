//! Trailing-newline correction for tool output.
//!
//! Many line-oriented tools unconditionally terminate their output with a
//! newline. When the invocation replaces a selection that did not end with
//! one, writing the tool's output back verbatim would grow the buffer by a
//! newline on every run.

/// Strip one spurious trailing newline from `stdout`.
///
/// Applies only when all three hold: the original `input` does not end with
/// a newline, `stdout` does, and the result replaces an actual non-empty
/// selection (not a whole-buffer fallback). Otherwise `stdout` is returned
/// unchanged. At most one newline is removed.
#[must_use]
pub fn trim_trailing_newline(input: &str, stdout: String, replaces_selection: bool) -> String {
    if replaces_selection && !input.ends_with('\n') && stdout.ends_with('\n') {
        let mut trimmed = stdout;
        trimmed.pop();
        trimmed
    } else {
        stdout
    }
}
