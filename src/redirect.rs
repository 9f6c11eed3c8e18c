//! Recognition of a trailing output redirection.
//!
//! Only the last two arguments are ever considered, and only when there are at
//! least three of them: `<operator> <path>`. The operator must be one of `>`,
//! `>>`, `1>`, `1>>`, `2>` or `2>>`; anything else leaves the arguments alone.

use crate::sink::{OutputSink, RedirectMode, Stream};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static REDIRECT_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[12]?>>?$").expect("valid regex"));

pub fn is_redirect_operator(token: &str) -> bool {
    REDIRECT_OPERATOR.is_match(token)
}

/// Split `args` into the arguments passed on to the command and the sink its
/// output goes to.
///
/// When a redirection is recognized exactly the operator and the path are
/// removed; otherwise `args` is returned unchanged with [`OutputSink::Standard`].
pub fn parse_redirection(mut args: Vec<String>) -> (Vec<String>, OutputSink) {
    let n = args.len();
    if n < 3 || !is_redirect_operator(&args[n - 2]) {
        return (args, OutputSink::Standard);
    }

    let path = PathBuf::from(args.pop().unwrap_or_default());
    let operator = args.pop().unwrap_or_default();

    let stream = if operator.starts_with('2') {
        Stream::Stderr
    } else {
        Stream::Stdout
    };
    let mode = if operator.ends_with(">>") {
        RedirectMode::Append
    } else {
        RedirectMode::Truncate
    };

    log::debug!("redirecting {stream:?} to {} ({mode:?})", path.display());
    (args, OutputSink::RedirectFile { stream, mode, path })
}
