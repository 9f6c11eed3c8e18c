use crate::command::{ExitCode, Resolution};
use crate::context::ShellContext;
use crate::error::ShellError;
use crate::external::ExternalCommand;
use crate::lexer;
use crate::reader::LineSource;
use crate::redirect;
use crate::sink::{OutputSink, Stream};

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// The interpreter owns a [`ShellContext`] and runs one line at a time:
/// tokenize, peel off a trailing redirection, then dispatch.
///
/// Example
/// ```
/// use minishell::{Interpreter, ShellContext};
/// use minishell::io_adapters::{MemWriter, captured};
/// use minishell::sink::Terminal;
///
/// let (out, handle) = MemWriter::with_handle();
/// let terminal = Terminal::new(out, MemWriter::new());
/// let ctx = ShellContext::new(Default::default(), ".".into(), terminal);
/// let mut sh = Interpreter::new(ctx);
/// sh.execute_line("echo 'hello   world'").unwrap();
/// assert_eq!(captured(&handle), "hello   world\n");
/// ```
pub struct Interpreter {
    ctx: ShellContext,
}

impl Interpreter {
    pub fn new(ctx: ShellContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// The redirection target is created first, whatever the command turns out
    /// to be. Builtins take priority over programs on the search path; a name
    /// that is neither is reported on the stdout stream of `sink`.
    pub fn run(
        &mut self,
        command: &str,
        args: &[String],
        sink: &OutputSink,
    ) -> anyhow::Result<()> {
        if let Err(err) = sink.touch() {
            let message = err.to_string();
            log::error!("{message}");
            self.ctx.terminal.write_line(Stream::Stderr, &message)?;
            return Ok(());
        }

        match Resolution::resolve(command, &self.ctx) {
            Resolution::Builtin(builtin) => {
                log::debug!("{command}: builtin");
                builtin.execute(args, &mut self.ctx, sink)
            }
            Resolution::External(dir) => {
                log::debug!("{command}: found in {}", dir.display());
                let code = ExternalCommand::new(&dir, command, args)
                    .execute(&mut self.ctx, sink)?;
                log::debug!("{command}: exited with {code}");
                Ok(())
            }
            Resolution::NotFound => {
                log::debug!("{command}: not found");
                let message = ShellError::CommandNotFound(command.to_owned()).to_string();
                sink.write(&mut self.ctx.terminal, Stream::Stdout, &message)
            }
        }
    }

    /// Tokenize, redirect and dispatch one raw input line. Blank lines do nothing.
    pub fn execute_line(&mut self, line: &str) -> anyhow::Result<()> {
        let parsed = lexer::tokenize(line);
        if parsed.command.is_empty() {
            return Ok(());
        }
        log::debug!("command {:?} args {:?}", parsed.command, parsed.args);

        let (args, sink) = redirect::parse_redirection(parsed.args);
        self.run(&parsed.command, &args, &sink)
    }

    /// Read and run lines until `exit` or end of input, then return the exit code.
    ///
    /// Errors from a single line are reported on stderr and do not stop the loop;
    /// only a failing line source does.
    pub fn repl(&mut self, source: &mut dyn LineSource) -> anyhow::Result<ExitCode> {
        while self.ctx.should_continue {
            let Some(line) = source.read_line()? else {
                log::debug!("end of input");
                self.ctx.exit_repl();
                break;
            };
            if let Err(err) = self.execute_line(&line) {
                let message = format!("{err:#}");
                log::error!("{message}");
                self.ctx.terminal.write_line(Stream::Stderr, &message)?;
            }
        }
        Ok(self.ctx.exit_code)
    }
}

impl Default for Interpreter {
    /// An interpreter over the current process environment and terminal.
    fn default() -> Self {
        Self::new(ShellContext::from_process())
    }
}
