//! A small line-oriented command interpreter.
//!
//! Each input line is split into a command name and arguments honoring POSIX-like
//! quoting and escaping, an optional trailing redirection (`>`, `>>`, `1>`, `1>>`,
//! `2>`, `2>>`) is peeled off, and the command is dispatched either to a builtin
//! (`cd`, `echo`, `exit`, `pwd`, `type`) or to an external program found on the
//! search path.
//!
//! The main entry point is [`Interpreter`], which owns a [`ShellContext`] and runs
//! lines read from any [`LineSource`].

mod builtin;
pub mod command;
mod completion;
pub mod context;
pub mod error;
mod external;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod reader;
pub mod redirect;
pub mod sink;

pub use completion::BuiltinCompleter;
pub use context::ShellContext;
pub use interpreter::Interpreter;
pub use reader::LineSource;
