//! A module implementing lexical analysis (tokenization) of a single command line.
//!
//! Quoting follows POSIX shells closely enough for everyday use:
//! - outside quotes a backslash escapes any following character;
//! - inside single quotes everything is literal;
//! - inside double quotes a backslash only escapes `\`, `$` and `"`.
//!
//! Quoted and unquoted fragments with no space between them form one word.
//! Unterminated quotes and a trailing backslash are accepted silently.

/// A tokenized command line: the command name and its arguments in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// First word of the line; empty when the line has no words.
    pub command: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn is_empty(&self) -> bool {
        self.command.is_empty() && self.args.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Unquoted,
    SingleQuoted,
    DoubleQuoted,
}

struct LexingFSM {
    state: LexingState,
    /// A backslash was seen and the next character is taken literally.
    /// Never set while single-quoted.
    escape: bool,
    words: Vec<String>,
    buffer: String,
}

impl LexingFSM {
    fn new() -> Self {
        LexingFSM {
            state: LexingState::Unquoted,
            escape: false,
            words: Vec::new(),
            buffer: String::new(),
        }
    }

    /// Feeds every character of `line` through the machine once, left to right.
    fn make_words(mut self, line: &str) -> Vec<String> {
        for ch in line.chars() {
            match self.state {
                LexingState::Unquoted => self.handle_unquoted(ch),
                LexingState::SingleQuoted => self.handle_single_quote(ch),
                LexingState::DoubleQuoted => self.handle_double_quote(ch),
            }
        }

        self.flush_word();
        self.words
    }

    fn handle_unquoted(&mut self, ch: char) {
        if self.escape {
            self.buffer.push(ch);
            self.escape = false;
            return;
        }
        match ch {
            ' ' => self.flush_word(),
            '\'' => self.state = LexingState::SingleQuoted,
            '"' => self.state = LexingState::DoubleQuoted,
            '\\' => self.escape = true,
            c => self.buffer.push(c),
        }
    }

    fn handle_single_quote(&mut self, ch: char) {
        match ch {
            '\'' => self.state = LexingState::Unquoted,
            c => self.buffer.push(c),
        }
    }

    fn handle_double_quote(&mut self, ch: char) {
        if self.escape {
            if !matches!(ch, '\\' | '$' | '"') {
                self.buffer.push('\\');
            }
            self.buffer.push(ch);
            self.escape = false;
            return;
        }
        match ch {
            '"' => self.state = LexingState::Unquoted,
            '\\' => self.escape = true,
            c => self.buffer.push(c),
        }
    }

    fn flush_word(&mut self) {
        if !self.buffer.is_empty() {
            self.words.push(std::mem::take(&mut self.buffer));
        }
    }
}

/// Strip one trailing line terminator (`\n`, `\r\n` or `\r`).
fn chomp(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// Split a raw input line into the command name and its arguments.
pub fn tokenize(line: &str) -> CommandLine {
    let mut words = LexingFSM::new().make_words(chomp(line)).into_iter();
    CommandLine {
        command: words.next().unwrap_or_default(),
        args: words.collect(),
    }
}
