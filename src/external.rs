use crate::command::ExitCode;
use crate::context::ShellContext;
use crate::error::ShellError;
use crate::sink::{OutputSink, Stream};
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// Command that is not a builtin.
pub struct ExternalCommand {
    name: String,
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalCommand {
    /// `dir` is the search path entry the command was resolved in.
    pub fn new(dir: &Path, name: &str, args: &[String]) -> Self {
        Self {
            name: name.to_owned(),
            program: dir.join(name),
            args: args.to_vec(),
        }
    }

    /// Run the program to completion, then forward everything it wrote: stderr
    /// first, then stdout.
    ///
    /// A program that cannot be started is reported on the stderr stream of the
    /// sink and yields 126 (permission denied) or 127, like POSIX shells.
    pub fn execute(self, ctx: &mut ShellContext, sink: &OutputSink) -> Result<ExitCode> {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.args)
            .envs(&ctx.vars)
            .current_dir(&ctx.current_dir)
            .stdin(Stdio::inherit());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(&self.name);
        }

        let output = match cmd.output() {
            Ok(output) => output,
            Err(source) => {
                let code = if source.kind() == io::ErrorKind::PermissionDenied {
                    126
                } else {
                    127
                };
                let err = ShellError::Spawn {
                    command: self.name,
                    source,
                };
                log::warn!("{err}");
                sink.write(&mut ctx.terminal, Stream::Stderr, &err.to_string())?;
                return Ok(code);
            }
        };

        sink.write(
            &mut ctx.terminal,
            Stream::Stderr,
            &String::from_utf8_lossy(&output.stderr),
        )?;
        sink.write(
            &mut ctx.terminal,
            Stream::Stdout,
            &String::from_utf8_lossy(&output.stdout),
        )?;

        Ok(match output.status.code() {
            Some(x) => x,
            None => terminated_by_signal(output.status),
        })
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Find the first directory in `search_paths` with an entry named `name`.
///
/// Only existence is checked, not the execute permission.
pub fn find_command_dir<'a>(search_paths: &'a [PathBuf], name: &str) -> Option<&'a Path> {
    if name.is_empty() {
        return None;
    }
    search_paths
        .iter()
        .map(PathBuf::as_path)
        .find(|dir| dir.join(name).exists())
}
