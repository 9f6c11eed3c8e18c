use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that the interpreter reports to the user as a single line.
///
/// The `Display` form of every variant is exactly the text written through the
/// active [`OutputSink`](crate::sink::OutputSink).
#[derive(Debug, Error)]
pub enum ShellError {
    /// Neither a builtin nor a program on the search path.
    #[error("{0}: command not found")]
    CommandNotFound(String),

    /// `cd` to `~` (or with no argument) while `HOME` is unset.
    #[error("cd: HOME not set")]
    HomeNotSet,

    /// `cd` target does not exist.
    #[error("cd: {}: No such file or directory", .0.display())]
    NoSuchDirectory(PathBuf),

    /// `cd` target exists but is not a directory.
    #[error("cd: {}: Not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The external program could not be spawned or waited on.
    #[error("{command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The redirection target could not be created.
    #[error("{path}: {source}", path = path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ShellError::CommandNotFound("foo".into()).to_string(),
            "foo: command not found"
        );
        assert_eq!(
            ShellError::NoSuchDirectory(PathBuf::from("/does/not/exist")).to_string(),
            "cd: /does/not/exist: No such file or directory"
        );
        assert_eq!(
            ShellError::NotADirectory(PathBuf::from("/etc/hostname")).to_string(),
            "cd: /etc/hostname: Not a directory"
        );
    }

    #[test]
    fn test_spawn_message_includes_source() {
        let err = ShellError::Spawn {
            command: "prog".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        };
        assert_eq!(err.to_string(), "prog: Permission denied");
    }
}
