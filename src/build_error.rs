use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum BuildError {
    /// A listed constant-definition file is missing or unreadable.
    /// The combined constants file depends on every source being present,
    /// so this aborts the whole run.
    ReadConstantSource(PathBuf, io::Error),
    ReadArtifact(PathBuf, io::Error),
    WriteArtifact(PathBuf, io::Error),
    RemoveCmakeCache(PathBuf, io::Error),
    CommandStart(&'static str, String, io::Error),
    CommandFailed(&'static str, String, Option<i32>),
    EmscriptenNotSet,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::ReadConstantSource(path, e) => {
                write!(f, "Failed to read constant file \"{}\": {}", path.display(), e)
            }
            BuildError::ReadArtifact(path, e) => {
                write!(f, "Failed to read \"{}\": {}", path.display(), e)
            }
            BuildError::WriteArtifact(path, e) => {
                write!(f, "Failed to write \"{}\": {}", path.display(), e)
            }
            BuildError::RemoveCmakeCache(path, e) => {
                write!(f, "Failed to remove \"{}\": {}", path.display(), e)
            }
            BuildError::CommandStart(stage, command, e) => {
                write!(f, "{} failed to start ({}): {}", stage, command, e)
            }
            BuildError::CommandFailed(stage, command, Some(code)) => {
                write!(f, "{} errored with status {} ({})", stage, code, command)
            }
            BuildError::CommandFailed(stage, command, None) => {
                write!(f, "{} was terminated by a signal ({})", stage, command)
            }
            BuildError::EmscriptenNotSet => {
                write!(f, "The EMSCRIPTEN environment variable must point at the Emscripten SDK")
            }
        }
    }
}

impl Error for BuildError {}
