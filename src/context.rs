use crate::command::ExitCode;
use crate::sink::Terminal;
use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Process-wide run state of the interpreter.
///
/// Everything the commands would otherwise read from ambient process globals
/// (environment variables, working directory, the terminal streams) is captured
/// here once and threaded through explicitly.
///
/// The search path is split out of `PATH` when the context is built and stays
/// fixed for the lifetime of the context, even if `PATH` in `vars` changes later.
pub struct ShellContext {
    /// Variables visible to the interpreter and forwarded to external programs.
    pub vars: HashMap<String, String>,
    /// Working directory; kept in sync with the process working directory by `cd`.
    pub current_dir: PathBuf,
    /// Cleared by `exit` and by end of input.
    pub should_continue: bool,
    /// Status the process exits with. Nothing in the interpreter changes it.
    pub exit_code: ExitCode,
    /// Where command output ends up unless redirected.
    pub terminal: Terminal,
    search_paths: Vec<PathBuf>,
}

impl ShellContext {
    pub fn new(vars: HashMap<String, String>, current_dir: PathBuf, terminal: Terminal) -> Self {
        let search_paths = vars
            .get("PATH")
            .map(|paths| split_search_paths(paths))
            .unwrap_or_default();
        Self {
            vars,
            current_dir,
            should_continue: true,
            exit_code: 0,
            terminal,
            search_paths,
        }
    }

    /// Capture the current process state: environment, working directory and
    /// the real stdout/stderr.
    pub fn from_process() -> Self {
        let vars = stdenv::vars().collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(vars, current_dir, Terminal::inherit())
    }

    pub fn get_var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Directories to search for external commands, in `PATH` order.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Stop the read loop after the current line.
    pub fn exit_repl(&mut self) {
        self.should_continue = false;
    }
}

fn split_search_paths(paths: &str) -> Vec<PathBuf> {
    stdenv::split_paths(OsStr::new(paths))
        .filter(|dir| !dir.as_os_str().is_empty())
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::io_adapters::MemWriter;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Mutex, MutexGuard};

    pub type Handle = Rc<RefCell<Vec<u8>>>;

    /// Serializes tests that change the process working directory.
    pub fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: Mutex<()> = Mutex::new(());
        MUTEX
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A context over `vars` whose stdout and stderr are captured in memory.
    pub fn captured_context(vars: &[(&str, &str)]) -> (ShellContext, Handle, Handle) {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let (out, out_rc) = MemWriter::with_handle();
        let (err, err_rc) = MemWriter::with_handle();
        let ctx = ShellContext::new(
            vars,
            stdenv::current_dir().unwrap(),
            Terminal::new(out, err),
        );
        (ctx, out_rc, err_rc)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::captured_context;
    use super::*;

    fn context_with(vars: &[(&str, &str)]) -> ShellContext {
        captured_context(vars).0
    }

    #[test]
    fn test_initial_state() {
        let ctx = context_with(&[]);
        assert!(ctx.should_continue);
        assert_eq!(ctx.exit_code, 0);
        assert!(ctx.search_paths().is_empty());
    }

    #[test]
    fn test_search_paths_keep_order_and_skip_empty() {
        let ctx = context_with(&[("PATH", "/usr/local/bin::/usr/bin:/bin")]);
        assert_eq!(
            ctx.search_paths(),
            &[
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin"),
            ]
        );
    }

    #[test]
    fn test_search_paths_fixed_at_construction() {
        let mut ctx = context_with(&[("PATH", "/bin")]);
        ctx.vars.insert("PATH".into(), "/somewhere/else".into());
        assert_eq!(ctx.search_paths(), &[PathBuf::from("/bin")]);
        assert_eq!(ctx.get_var("PATH"), Some("/somewhere/else"));
    }

    #[test]
    fn test_exit_repl() {
        let mut ctx = context_with(&[]);
        ctx.exit_repl();
        assert!(!ctx.should_continue);
        assert_eq!(ctx.exit_code, 0);
    }

    #[test]
    fn test_reads_from_process_env() {
        let ctx = ShellContext::from_process();
        assert_eq!(ctx.get_var("PATH").is_some(), stdenv::var("PATH").is_ok());
    }
}
