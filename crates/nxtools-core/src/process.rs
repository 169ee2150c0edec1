//! External command execution.
//!
//! Commands are argument vectors, never shell strings. Every invocation is
//! synchronous, inherits the caller's stdio, and only its exit status is
//! inspected.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{FailureSite, NxError, Result};

/// Executable specification of one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; the caller's when `None`
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Build from an argument vector whose first element is the program.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            cwd: None,
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        if let Some(cwd) = &self.cwd {
            write!(f, " (in {})", cwd.display())?;
        }
        Ok(())
    }
}

/// Outcome of a finished command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub success: bool,
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }
}

/// Runs external commands to completion.
pub trait CommandRunner {
    fn run(&self, command: &CommandSpec) -> std::io::Result<CommandStatus>;
}

/// Runs commands as child processes of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> std::io::Result<CommandStatus> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(cwd) = &command.cwd {
            cmd.current_dir(cwd);
        }
        let status = cmd.status()?;
        Ok(CommandStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}

/// Run `command` and map any failure to `site`.
pub fn run_checked(
    runner: &dyn CommandRunner,
    command: &CommandSpec,
    site: FailureSite,
) -> Result<()> {
    debug!("running: {}", command);
    let status = runner.run(command).map_err(|source| NxError::CommandSpawn {
        site,
        command: command.to_string(),
        source,
    })?;

    if status.success {
        Ok(())
    } else {
        Err(NxError::CommandFailed {
            site,
            command: command.to_string(),
            status: status.code,
        })
    }
}

/// Values substituted into a [`CommandTemplate`]
#[derive(Debug, Clone, Copy)]
pub struct Placeholders<'a> {
    /// `%file`
    pub file: &'a Path,
    /// `%dir`
    pub dir: &'a Path,
    /// `%name`
    pub name: &'a str,
}

/// An argument vector with `%file`, `%dir` and `%name` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    argv: Vec<String>,
}

impl CommandTemplate {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    /// Substitute placeholders in every argument.
    ///
    /// Substituted values are never rescanned, and arguments are not split,
    /// so paths containing spaces or `%` stay intact.
    pub fn render(&self, values: &Placeholders<'_>) -> Option<CommandSpec> {
        let file = values.file.to_string_lossy();
        let dir = values.dir.to_string_lossy();
        let table: [(&str, &str); 3] = [
            ("%file", file.as_ref()),
            ("%dir", dir.as_ref()),
            ("%name", values.name),
        ];

        let argv: Vec<String> = self
            .argv
            .iter()
            .map(|arg| substitute(arg, &table))
            .collect();
        CommandSpec::from_argv(&argv)
    }
}

fn substitute(arg: &str, table: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(arg.len());
    let mut rest = arg;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match table.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
