//! Clipboard access through the terminal.

use std::io::{self, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Somewhere to put copied text.
pub trait Clipboard {
    /// Copy text. Failures are reported but never fatal.
    fn copy(&mut self, text: &str) -> io::Result<()>;
}

/// Build the OSC 52 escape sequence that sets the system clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Sets the clipboard by writing OSC 52 to the terminal.
///
/// Works over SSH and inside most multiplexers; terminals that ignore the
/// sequence simply leave the clipboard alone.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    /// Write to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    /// Write sequences to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()
    }
}

/// Records copies in memory.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingClipboard {
    pub(crate) copied: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

#[cfg(test)]
impl Clipboard for RecordingClipboard {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_layout() {
        assert_eq!(osc52_sequence("17"), "\x1b]52;c;MTc=\x07");
    }

    #[test]
    fn writes_sequence() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.copy("-3").unwrap();
        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(written, osc52_sequence("-3"));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_reported() {
        assert!(Osc52Clipboard::new(Broken).copy("1").is_err());
    }
}
