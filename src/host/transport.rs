//! The link to the target.
//!
//! The host only needs to send lines and, for `#words`, read back the target's dictionary. Serial port access
//! and newline flow control live behind this trait; the crate ships a writer-backed transport that prints the
//! upload stream (to stdout, a capture file, or a buffer in tests).

use std::io::{self, Write};

pub trait Transport {
    /// Send one line. Implementations add the line terminator.
    fn send_line(&mut self, line: &str) -> io::Result<()>;

    /// Ask the target for its `words` listing.
    ///
    /// ## Returns
    /// - `Ok(None)` when the transport cannot read from the target.
    fn fetch_words(&mut self) -> io::Result<Option<String>> {
        Ok(None)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        (**self).send_line(line)
    }

    fn fetch_words(&mut self) -> io::Result<Option<String>> {
        (**self).fetch_words()
    }
}

/// Writes each line, newline terminated, to any [`Write`].
#[derive(Debug)]
pub struct LineTransport<W: Write> {
    writer: W,
    lines_sent: usize,
}

impl<W: Write> LineTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines_sent: 0 }
    }

    pub fn lines_sent(&self) -> usize {
        self.lines_sent
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for LineTransport<W> {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        self.lines_sent += 1;
        Ok(())
    }
}
