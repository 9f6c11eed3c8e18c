use std::cell::RefCell;
use std::io::{Result as IoResult, Write};
use std::rc::Rc;

/// Memory-backed writer for capturing what would otherwise reach the terminal.
///
/// Cloning the handle returned by [`MemWriter::with_handle`] lets the caller
/// inspect collected bytes after the writer has been moved into a
/// [`Terminal`](crate::sink::Terminal).
#[derive(Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: create writer and return (writer, rc_handle).
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let mw = MemWriter::new();
        let rc = mw.buf.clone();
        (mw, rc)
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

/// Lossily decode everything captured behind a [`MemWriter`] handle.
pub fn captured(handle: &Rc<RefCell<Vec<u8>>>) -> String {
    String::from_utf8_lossy(&handle.borrow()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_sees_writes() {
        let (mut w, handle) = MemWriter::with_handle();
        write!(w, "abc").unwrap();
        writeln!(w, "def").unwrap();
        assert_eq!(captured(&handle), "abcdef\n");
    }
}
