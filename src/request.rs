use std::path::PathBuf;
use std::time::Duration;

use extcmd_runner::CommandSpec;
use thiserror::Error;

/// Errors detected while constructing an [`InvocationRequest`].
///
/// These are programming errors in the host integration, caught before an
/// invocation ever starts; they are distinct from the runtime taxonomy in
/// [`InvokeError`](crate::InvokeError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("executable must have at least one token")]
    EmptyExecutable,

    #[error("timeout must be positive")]
    ZeroTimeout,
}

/// One external-program invocation, described in full.
///
/// Construct with [`InvocationRequest::builder`]; the builder validates the
/// executable tokens and timeout. A request is immutable once built and used
/// for exactly one invocation.
///
/// # Example
///
/// ```rust
/// use extcmd::{DeliveryMode, InvocationRequest};
/// use std::time::Duration;
///
/// let request = InvocationRequest::builder(["sort", "--reverse"])
///     .mode(DeliveryMode::Stdin)
///     .input("b\na\nc\n")
///     .timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
/// assert!(request.capture_output);
/// ```
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    /// Program plus pre-bound arguments, host variable expansion already
    /// applied upstream.
    pub command: CommandSpec,
    /// Input-delivery mode token (`stdin`, `single_argument`,
    /// `temporary_file`, `nothing`). Kept as the host-supplied token so an
    /// unrecognized value surfaces as a structured `UnsupportedMode` outcome
    /// rather than a construction panic.
    pub mode: String,
    /// Text to deliver to the program (ignored in `nothing` mode).
    pub input: String,
    /// Duration after which a captured invocation is forcibly terminated.
    pub timeout: Duration,
    /// When false, the subprocess keeps the host's streams and the call
    /// returns a synthesized success as soon as the child is launched.
    pub capture_output: bool,
    /// In `temporary_file` mode, re-read the scratch file after the run and
    /// use its contents as the result (for tools that rewrite their input
    /// file in place). Ignored in other modes.
    pub read_back_file: bool,
    /// Whether the result will replace an actual non-empty selection; gates
    /// trailing-newline normalization.
    pub replaces_selection: bool,
}

impl InvocationRequest {
    /// Start building a request for the given executable tokens.
    #[must_use]
    pub fn builder<I, S>(executable: I) -> InvocationRequestBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InvocationRequestBuilder::new(executable)
    }
}

/// Builder for [`InvocationRequest`].
#[derive(Debug, Clone)]
pub struct InvocationRequestBuilder {
    executable: Vec<String>,
    working_dir: Option<PathBuf>,
    mode: String,
    input: String,
    timeout: Duration,
    capture_output: bool,
    read_back_file: bool,
    replaces_selection: bool,
}

impl InvocationRequestBuilder {
    fn new<I, S>(executable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            executable: executable.into_iter().map(Into::into).collect(),
            working_dir: None,
            mode: crate::DeliveryMode::Nothing.to_string(),
            input: String::new(),
            timeout: Duration::from_secs(extcmd_config::DEFAULT_TIMEOUT_DELAY_SECS),
            capture_output: true,
            read_back_file: false,
            replaces_selection: false,
        }
    }

    /// Take timeout and capture defaults from host configuration.
    ///
    /// Later builder calls still override these; the config only supplies
    /// defaults.
    #[must_use]
    pub fn defaults_from(mut self, config: &extcmd_config::Config) -> Self {
        self.timeout = config.timeout();
        self.capture_output = config.capture_output();
        self
    }

    /// Set the delivery mode from the typed enum.
    #[must_use]
    pub fn mode(mut self, mode: crate::DeliveryMode) -> Self {
        self.mode = mode.to_string();
        self
    }

    /// Set the delivery mode from a host-supplied token, validated at
    /// invocation time.
    #[must_use]
    pub fn mode_token(mut self, token: impl Into<String>) -> Self {
        self.mode = token.into();
        self
    }

    /// Set the input text to deliver.
    #[must_use]
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the subprocess working directory.
    ///
    /// When unset, the subprocess inherits the caller's working directory.
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set the timeout (defaults to 3 seconds).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable output capture (defaults to enabled).
    #[must_use]
    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    /// Enable read-back of the scratch file in `temporary_file` mode.
    #[must_use]
    pub fn read_back_file(mut self, read_back: bool) -> Self {
        self.read_back_file = read_back;
        self
    }

    /// Mark the invocation as replacing an actual non-empty selection.
    #[must_use]
    pub fn replaces_selection(mut self, replaces: bool) -> Self {
        self.replaces_selection = replaces;
        self
    }

    /// Validate and build the request.
    pub fn build(self) -> Result<InvocationRequest, RequestError> {
        if self.timeout.is_zero() {
            return Err(RequestError::ZeroTimeout);
        }

        let mut command =
            CommandSpec::from_tokens(self.executable).ok_or(RequestError::EmptyExecutable)?;
        if let Some(dir) = self.working_dir {
            command = command.cwd(dir);
        }

        Ok(InvocationRequest {
            command,
            mode: self.mode,
            input: self.input,
            timeout: self.timeout,
            capture_output: self.capture_output,
            read_back_file: self.read_back_file,
            replaces_selection: self.replaces_selection,
        })
    }
}
