use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::process::Command;

/// Specification for a command to execute.
///
/// All process execution goes through this type to ensure argv-style
/// invocation. Arguments cross the process boundary as discrete elements,
/// never as a shell string, so shell metacharacters in editor text cannot be
/// interpreted.
///
/// The program plus any pre-bound arguments typically arrive from the host as
/// a token vector (a command binding like `["column", "-t"]`); strategies may
/// append one more argument (the payload or a scratch-file path) before
/// execution.
///
/// # Example
///
/// ```rust
/// use extcmd_runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("sort")
///     .arg("--reverse")
///     .cwd("/tmp");
///
/// assert_eq!(cmd.program, OsString::from("sort"));
/// assert_eq!(cmd.args.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements (NOT shell strings)
    pub args: Vec<OsString>,
    /// Optional working directory
    pub cwd: Option<PathBuf>,
    /// Optional environment overrides
    pub env: Option<HashMap<OsString, OsString>>,
}

impl CommandSpec {
    /// Create a new `CommandSpec` with the given program.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: None,
        }
    }

    /// Build a spec from a host-supplied token vector.
    ///
    /// The first token is the program, the rest are pre-bound arguments.
    /// Returns `None` for an empty vector.
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut iter = tokens.into_iter();
        let program = iter.next()?;
        Some(Self::new(program).args(iter))
    }

    /// Add a single argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments to the command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the command.
    ///
    /// When unset, the child inherits the caller's working directory.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set an environment variable for the command.
    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set multiple environment variables for the command.
    #[must_use]
    pub fn envs<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let env_map = self.env.get_or_insert_with(HashMap::new);
        for (key, value) in envs {
            env_map.insert(key.into(), value.into());
        }
        self
    }

    /// The program name as display text, for diagnostics.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Convert this `CommandSpec` into a `tokio::process::Command`.
    ///
    /// The resulting `Command` uses argv-style argument passing; no shell
    /// interpretation occurs.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        if let Some(ref env) = self.env {
            for (key, value) in env {
                cmd.env(key, value);
            }
        }

        cmd
    }
}
