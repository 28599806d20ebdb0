use std::io::{BufRead, Cursor, Read, Result as IoResult};
use std::process::Stdio;

/// Memory-backed line source for driving the interpreter without a terminal.
///
/// Children launched while reading from it get an empty standard input.
pub struct MemReader {
    cursor: Cursor<Vec<u8>>,
}

impl MemReader {
    /// Create a MemReader that will read from the provided buffer.
    pub fn new(buf: impl Into<Vec<u8>>) -> Self {
        Self {
            cursor: Cursor::new(buf.into()),
        }
    }

    /// Script of lines, each terminated with a newline.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut buf = Vec::new();
        for line in lines {
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        Self::new(buf)
    }
}

impl Read for MemReader {
    fn read(&mut self, out: &mut [u8]) -> IoResult<usize> {
        self.cursor.read(out)
    }
}

impl BufRead for MemReader {
    fn fill_buf(&mut self) -> IoResult<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

impl crate::command::Stdin for MemReader {
    fn stdio(&self) -> IoResult<Stdio> {
        Ok(Stdio::null())
    }
}

/// Captures builtin output in memory. External programs cannot write into a
/// `Vec`, so their output is discarded.
impl crate::command::Stdout for Vec<u8> {
    fn stdio(&self) -> IoResult<Stdio> {
        Ok(Stdio::null())
    }
}
