use crate::command::{BuiltinCommand, Resolution};
use crate::context::ShellContext;
use crate::error::ShellError;
use crate::sink::{OutputSink, Stream};
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Every builtin known to the interpreter, looked up by exact, case-sensitive name.
static BUILTINS: [&dyn BuiltinCommand; 5] = [&Cd, &Echo, &Exit, &Pwd, &Type];

pub(crate) fn lookup(name: &str) -> Option<&'static dyn BuiltinCommand> {
    BUILTINS.iter().copied().find(|cmd| cmd.name() == name)
}

pub(crate) fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|cmd| cmd.name())
}

/// Change the current working directory.
///
/// An argument starting with `~` is replaced as a whole by `$HOME`; no argument
/// at all also means `$HOME`. Relative paths are taken from the context's
/// working directory. Failures are reported through the sink and never stop
/// the interpreter.
pub struct Cd;

impl BuiltinCommand for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(&self, args: &[String], ctx: &mut ShellContext, sink: &OutputSink) -> Result<()> {
        let target = match args.first() {
            Some(arg) if !arg.starts_with('~') => PathBuf::from(arg),
            _ => match ctx.get_var("HOME") {
                Some(home) => PathBuf::from(home),
                None => return report(ctx, sink, ShellError::HomeNotSet),
            },
        };

        let new_dir = ctx.current_dir.join(&target);
        if !new_dir.exists() {
            return report(ctx, sink, ShellError::NoSuchDirectory(target));
        }
        if !new_dir.is_dir() {
            return report(ctx, sink, ShellError::NotADirectory(target));
        }

        let canonical = fs::canonicalize(&new_dir)
            .with_context(|| format!("cd: can't canonicalize {}", new_dir.display()))?;
        env::set_current_dir(&canonical)
            .with_context(|| format!("cd: can't chdir to {}", canonical.display()))?;
        log::debug!("working directory is now {}", canonical.display());
        ctx.current_dir = canonical;
        Ok(())
    }
}

fn report(ctx: &mut ShellContext, sink: &OutputSink, err: ShellError) -> Result<()> {
    sink.write(&mut ctx.terminal, Stream::Stdout, &err.to_string())
}

/// Write the arguments separated by single spaces, with ASCII whitespace and NUL
/// trimmed at both ends.
pub struct Echo;

impl BuiltinCommand for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn execute(&self, args: &[String], ctx: &mut ShellContext, sink: &OutputSink) -> Result<()> {
        let is_blank = |c: char| c.is_ascii_whitespace() || c == '\0';
        let line = args.join(" ");
        let line = line.trim_matches(is_blank);
        sink.write(&mut ctx.terminal, Stream::Stdout, line)
    }
}

/// Stop the interpreter once the current line is done. Arguments are ignored
/// and the exit code is left as it is.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, _args: &[String], ctx: &mut ShellContext, _sink: &OutputSink) -> Result<()> {
        ctx.exit_repl();
        Ok(())
    }
}

pub struct Pwd;

impl BuiltinCommand for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn execute(&self, _args: &[String], ctx: &mut ShellContext, sink: &OutputSink) -> Result<()> {
        let line = ctx.current_dir.to_string_lossy().into_owned();
        sink.write(&mut ctx.terminal, Stream::Stdout, &line)
    }
}

/// Tell how a name would be interpreted as a command: builtin first, then the
/// search path.
pub struct Type;

impl BuiltinCommand for Type {
    fn name(&self) -> &'static str {
        "type"
    }

    fn execute(&self, args: &[String], ctx: &mut ShellContext, sink: &OutputSink) -> Result<()> {
        let Some(name) = args.first() else {
            return Ok(());
        };
        let line = match Resolution::resolve(name, ctx) {
            Resolution::Builtin(_) => format!("{name} is a shell builtin"),
            Resolution::External(dir) => format!("{name} is {}/{name}", dir.display()),
            Resolution::NotFound => format!("{name}: not found"),
        };
        sink.write(&mut ctx.terminal, Stream::Stdout, &line)
    }
}
