use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while reading, splitting or running a command.
///
/// Only [`ShellError::Allocation`] is fatal to the interpreter; every other
/// variant is reported on the error stream and the loop carries on.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A line or token buffer could not grow.
    #[error("lsh: allocation error")]
    Allocation,
    /// A builtin was invoked without an argument it requires.
    #[error("lsh: expected argument to \"{0}\"")]
    MissingArgument(&'static str),
    /// `cd` target rejected by the OS.
    #[error("lsh: cd: {}: {source}", .path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The child process could not be created.
    #[error("lsh: {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The program name did not resolve to anything runnable.
    #[error("lsh: {0}: command not found")]
    NotFound(String),
    /// The program was found but its image could not be loaded.
    #[error("lsh: {program}: cannot execute: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
    /// Reading input or writing the prompt failed.
    #[error("lsh: {0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_allocation_is_fatal() {
        assert!(ShellError::Allocation.is_fatal());
        assert!(!ShellError::MissingArgument("cd").is_fatal());
        assert!(!ShellError::NotFound("x".into()).is_fatal());
        assert!(!ShellError::Io(io::Error::other("boom")).is_fatal());
    }

    #[test]
    fn messages_carry_shell_prefix() {
        assert_eq!(
            ShellError::MissingArgument("cd").to_string(),
            "lsh: expected argument to \"cd\""
        );
        assert_eq!(
            ShellError::NotFound("doesnotexist123".into()).to_string(),
            "lsh: doesnotexist123: command not found"
        );
        let err = ShellError::ChangeDir {
            path: PathBuf::from("/nope"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "lsh: cd: /nope: No such file or directory");
    }
}
