use crate::builtin;
use rustyline::completion::Completer;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Tab completion of builtin names in command position.
///
/// Each candidate carries a trailing space so the user can go straight on to
/// the arguments. Words after the command name are not completed.
pub struct BuiltinCompleter;

impl BuiltinCompleter {
    fn candidates(line: &str, pos: usize) -> (usize, Vec<String>) {
        let Some(typed) = line.get(..pos) else {
            return (pos, Vec::new());
        };
        let start = typed.len() - typed.trim_start().len();
        let word = &typed[start..];
        if word.contains(' ') {
            return (pos, Vec::new());
        }
        let mut matches: Vec<String> = builtin::names()
            .filter(|name| name.starts_with(word))
            .map(|name| format!("{name} "))
            .collect();
        matches.sort();
        (start, matches)
    }
}

impl Completer for BuiltinCompleter {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        Ok(Self::candidates(line, pos))
    }
}

impl Hinter for BuiltinCompleter {
    type Hint = String;
}

impl Highlighter for BuiltinCompleter {}

impl Validator for BuiltinCompleter {}

impl Helper for BuiltinCompleter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_prefix() {
        assert_eq!(
            BuiltinCompleter::candidates("ec", 2),
            (0, vec!["echo ".to_string()])
        );
        assert_eq!(
            BuiltinCompleter::candidates("  ex", 4),
            (2, vec!["exit ".to_string()])
        );
    }

    #[test]
    fn test_empty_prefix_lists_all() {
        let (start, all) = BuiltinCompleter::candidates("", 0);
        assert_eq!(start, 0);
        assert_eq!(all, vec!["cd ", "echo ", "exit ", "pwd ", "type "]);
    }

    #[test]
    fn test_no_completion_for_arguments_or_unknown() {
        assert!(BuiltinCompleter::candidates("echo ex", 7).1.is_empty());
        assert!(BuiltinCompleter::candidates("zz", 2).1.is_empty());
    }
}
