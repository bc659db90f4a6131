use std::fmt;
use std::fmt::Formatter;
use std::path::PathBuf;
use std::process::Command;

use log::debug;

use crate::build_error::BuildError;

/// One external tool invocation: program, arguments, and an optional working
/// directory scoped to the child process only (the parent's directory is
/// never changed, so there is nothing to restore on any exit path).
#[derive(Debug, Clone)]
pub struct CommandSpec {
    stage: &'static str,
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(stage: &'static str, program: impl Into<String>) -> CommandSpec {
        CommandSpec {
            stage,
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> CommandSpec {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for arg in args {
            self.args.push(arg.into());
        }
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> CommandSpec {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn stage(&self) -> &'static str {
        self.stage
    }

    /// Shell-like rendering of the command, used for the pre-execution echo
    /// and for failure diagnostics
    pub fn to_command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_command_line())
    }
}

/// Runs external commands. The build stages only depend on this trait, so
/// tests can observe the composed commands and script failures without
/// spawning real tools.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<(), BuildError>;
}

/// The real runner: spawns the process with inherited stdio and blocks
/// until it exits.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<(), BuildError> {
        debug!("Running {}: {}", spec.stage(), spec);

        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .map_err(|e| BuildError::CommandStart(spec.stage(), spec.to_command_line(), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildError::CommandFailed(
                spec.stage(),
                spec.to_command_line(),
                status.code(),
            ))
        }
    }
}
