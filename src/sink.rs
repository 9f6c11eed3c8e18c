//! Output routing for a single command invocation.

use crate::error::ShellError;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// One of the two logical output streams of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// How a redirection target is opened on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>`: overwrite from byte 0.
    Truncate,
    /// `>>`: write at the end of the existing content.
    Append,
}

/// Where a command's output goes for exactly one invocation.
///
/// A `RedirectFile` sink only captures its own `stream`; writes for the other
/// stream still reach the terminal, so redirecting stdout never silences stderr
/// and vice versa. The sink keeps no file handle open between writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Standard,
    RedirectFile {
        stream: Stream,
        mode: RedirectMode,
        path: PathBuf,
    },
}

impl OutputSink {
    /// Create the redirection target if it does not exist yet. Never truncates.
    pub fn touch(&self) -> Result<(), ShellError> {
        match self {
            OutputSink::Standard => Ok(()),
            OutputSink::RedirectFile { path, .. } => OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map(drop)
                .map_err(|source| ShellError::Redirect {
                    path: path.clone(),
                    source,
                }),
        }
    }

    /// Route one line of output for `stream`.
    pub fn write(&self, terminal: &mut Terminal, stream: Stream, line: &str) -> Result<()> {
        match self {
            OutputSink::RedirectFile {
                stream: target,
                mode,
                path,
            } if *target == stream => write_to_file(path, *mode, line)
                .with_context(|| format!("can't write to {}", path.display())),
            _ => Ok(terminal.write_line(stream, line)?),
        }
    }
}

/// Writes `line` verbatim, without a trailing newline. In append mode a newline
/// is inserted first when the existing content does not already end with one.
fn write_to_file(path: &Path, mode: RedirectMode, line: &str) -> io::Result<()> {
    let mut line = Cow::Borrowed(line);
    if mode == RedirectMode::Append {
        let existing = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };
        if !existing.is_empty() && !existing.ends_with(b"\n") {
            line = Cow::Owned(format!("\n{line}"));
        }
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(mode == RedirectMode::Append)
        .truncate(mode == RedirectMode::Truncate)
        .open(path)?;
    file.write_all(line.as_bytes())
}

/// The real stdout/stderr pair of the interpreter.
///
/// Held by [`ShellContext`](crate::ShellContext) so nothing reaches for the
/// process streams directly; tests swap in in-memory writers.
pub struct Terminal {
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl Terminal {
    pub fn new(stdout: impl Write + 'static, stderr: impl Write + 'static) -> Self {
        Self {
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
        }
    }

    /// The process's own standard output and standard error.
    pub fn inherit() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    pub fn stream(&mut self, stream: Stream) -> &mut dyn Write {
        match stream {
            Stream::Stdout => self.stdout.as_mut(),
            Stream::Stderr => self.stderr.as_mut(),
        }
    }

    /// Empty lines print nothing at all; anything else is terminated by exactly
    /// one newline.
    pub fn write_line(&mut self, stream: Stream, line: &str) -> io::Result<()> {
        if line.is_empty() {
            return Ok(());
        }
        let out = self.stream(stream);
        out.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        out.flush()
    }
}
