//! Sources of input lines for [`Interpreter::repl`](crate::Interpreter::repl).

use crate::completion::BuiltinCompleter;
use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::io::BufRead;

/// Supplies one raw command line per call.
pub trait LineSource {
    /// `Ok(None)` means end of input.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Interactive line editor with history and builtin-name completion.
pub struct Prompt {
    editor: Editor<BuiltinCompleter, DefaultHistory>,
    prompt: String,
}

impl Prompt {
    pub fn new(prompt: impl Into<String>) -> Result<Self> {
        let mut editor: Editor<BuiltinCompleter, DefaultHistory> = Editor::new()?;
        editor.set_helper(Some(BuiltinCompleter));
        Ok(Self {
            editor,
            prompt: prompt.into(),
        })
    }
}

impl LineSource for Prompt {
    fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            // Ctrl-C abandons the current line only.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Lines from any buffered reader, without prompting or editing.
pub struct BufLines<R> {
    reader: R,
}

impl<R: BufRead> BufLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufLines<R> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
