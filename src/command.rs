use crate::builtin;
use crate::context::ShellContext;
use crate::external::find_command_dir;
use crate::sink::OutputSink;
use anyhow::Result;
use std::path::PathBuf;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// A command implemented inside the interpreter.
///
/// Builtins are stateless; every invocation receives the arguments that follow
/// the command name, the shared context and the sink of that one invocation.
pub trait BuiltinCommand: Sync {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name(&self) -> &'static str;

    fn execute(&self, args: &[String], ctx: &mut ShellContext, sink: &OutputSink) -> Result<()>;
}

/// What a command name refers to, in priority order.
pub enum Resolution {
    Builtin(&'static dyn BuiltinCommand),
    /// Directory on the search path containing the program.
    External(PathBuf),
    NotFound,
}

impl Resolution {
    /// Builtins win over programs; programs are looked up in search path order.
    /// Computed fresh on every call.
    pub fn resolve(name: &str, ctx: &ShellContext) -> Self {
        if let Some(cmd) = builtin::lookup(name) {
            return Resolution::Builtin(cmd);
        }
        match find_command_dir(ctx.search_paths(), name) {
            Some(dir) => Resolution::External(dir.to_path_buf()),
            None => Resolution::NotFound,
        }
    }
}
