use anyhow::Result;
use argh::FromArgs;
use env_logger::Env;
use minishell::Interpreter;
use minishell::LineSource;
use minishell::reader::{BufLines, Prompt};

#[derive(FromArgs)]
/// A small interactive command interpreter with builtins, quoting and output redirection.
struct Options {
    #[argh(option, default = "String::from(\"$ \")")]
    /// prompt shown before each line in interactive mode.
    prompt: String,

    #[argh(switch)]
    /// read lines from standard input without line editing or a prompt.
    plain: bool,

    #[argh(switch, short = 'v')]
    /// log what the interpreter does (RUST_LOG takes precedence).
    verbose: bool,
}

fn main() -> Result<()> {
    let options: Options = argh::from_env();

    let default_filter = if options.verbose { "debug" } else { "warn" };
    let env = Env::default().default_filter_or(default_filter);
    env_logger::Builder::from_env(env).init();

    let mut source: Box<dyn LineSource> = if options.plain {
        Box::new(BufLines::new(std::io::stdin().lock()))
    } else {
        Box::new(Prompt::new(options.prompt)?)
    };

    let mut sh = Interpreter::default();
    let code = sh.repl(source.as_mut())?;
    std::process::exit(code)
}
