use minishell::io_adapters::{MemWriter, captured};
use minishell::reader::BufLines;
use minishell::sink::Terminal;
use minishell::{Interpreter, ShellContext};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;

type Handle = Rc<RefCell<Vec<u8>>>;

fn interpreter(vars: &[(&str, &str)], dir: &Path) -> (Interpreter, Handle, Handle) {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let (out, out_rc) = MemWriter::with_handle();
    let (err, err_rc) = MemWriter::with_handle();
    let ctx = ShellContext::new(vars, dir.to_path_buf(), Terminal::new(out, err));
    (Interpreter::new(ctx), out_rc, err_rc)
}

fn run_session(sh: &mut Interpreter, script: &str) -> i32 {
    let mut input = BufLines::new(Cursor::new(script.to_string()));
    sh.repl(&mut input).expect("line source never fails")
}

#[test]
fn builtins_and_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (mut sh, out, err) = interpreter(&[("PATH", "/definitely/not/here")], dir.path());

    let code = run_session(
        &mut sh,
        "echo 'hello    world'\n\
         echo \"it's a test\"\n\
         echo hello\\ world\n\
         type echo\n\
         type nonexistent\n\
         nonexistent\n\
         exit\n\
         echo never\n",
    );

    assert_eq!(code, 0);
    assert_eq!(
        captured(&out),
        "hello    world\n\
         it's a test\n\
         hello world\n\
         echo is a shell builtin\n\
         nonexistent: not found\n\
         nonexistent: command not found\n"
    );
    assert_eq!(captured(&err), "");
}

#[test]
fn redirections_write_files() {
    let dir = tempfile::tempdir().unwrap();
    let out_file = dir.path().join("out.txt");
    let err_file = dir.path().join("err.txt");
    let (mut sh, out, _) = interpreter(&[], dir.path());

    let script = format!(
        "echo one > {o}\n\
         echo two >> {o}\n\
         echo three 2> {e}\n\
         echo four 3> {o}\n",
        o = out_file.display(),
        e = err_file.display(),
    );
    run_session(&mut sh, &script);

    assert_eq!(fs::read_to_string(&out_file).unwrap(), "one\ntwo");
    assert_eq!(fs::read_to_string(&err_file).unwrap(), "");
    assert_eq!(
        captured(&out),
        format!("three\nfour 3> {}\n", out_file.display())
    );
}

#[test]
#[cfg(unix)]
fn external_stderr_stays_on_terminal_when_stdout_redirected() {
    let dir = tempfile::tempdir().unwrap();
    let out_file = dir.path().join("listing.txt");
    let (mut sh, out, err) = interpreter(&[("PATH", "/usr/bin:/bin")], dir.path());

    let script = format!(
        "sh -c 'echo found; echo missing >&2' 1> {}\n",
        out_file.display()
    );
    run_session(&mut sh, &script);

    assert_eq!(fs::read_to_string(&out_file).unwrap(), "found\n");
    assert_eq!(captured(&out), "");
    assert_eq!(captured(&err), "missing\n");
}

#[test]
#[cfg(unix)]
fn external_stderr_redirected_in_append_mode() {
    let dir = tempfile::tempdir().unwrap();
    let err_file = dir.path().join("errors.log");
    fs::write(&err_file, "earlier").unwrap();
    let (mut sh, out, err) = interpreter(&[("PATH", "/usr/bin:/bin")], dir.path());

    let script = format!(
        "sh -c 'echo fine; echo broken >&2' 2>> {}\n",
        err_file.display()
    );
    run_session(&mut sh, &script);

    assert_eq!(fs::read_to_string(&err_file).unwrap(), "earlier\nbroken\n");
    assert_eq!(captured(&out), "fine\n");
    assert_eq!(captured(&err), "");
}
