//! Line acquisition from the interpreter's input stream.

use crate::error::ShellError;
use std::io::{BufRead, ErrorKind};

const INITIAL_CAPACITY: usize = 1024;

/// One line of input without its trailing newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLine {
    text: String,
    eof: bool,
}

impl RawLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            eof: false,
        }
    }

    /// The empty line returned once the input stream is exhausted.
    pub fn end_of_input() -> Self {
        Self {
            text: String::new(),
            eof: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the stream ended before a single character was read.
    pub fn is_end_of_input(&self) -> bool {
        self.eof && self.text.is_empty()
    }
}

/// Read bytes up to a newline or the end of the stream.
///
/// The newline is consumed but not stored. Invalid UTF-8 is replaced rather
/// than rejected.
pub fn read_line<R: BufRead + ?Sized>(input: &mut R) -> Result<RawLine, ShellError> {
    let mut buf: Vec<u8> = Vec::new();
    reserve_doubling(&mut buf, INITIAL_CAPACITY)?;

    let mut eof = false;
    loop {
        let available = match input.fill_buf() {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if available.is_empty() {
            eof = true;
            break;
        }

        let newline = available.iter().position(|&b| b == b'\n');
        let chunk = match newline {
            Some(at) => &available[..at],
            None => available,
        };
        let needed = buf.len() + chunk.len();
        reserve_doubling(&mut buf, needed)?;
        buf.extend_from_slice(chunk);

        match newline {
            Some(at) => {
                input.consume(at + 1);
                break;
            }
            None => {
                let used = chunk.len();
                input.consume(used);
            }
        }
    }

    Ok(RawLine {
        text: String::from_utf8_lossy(&buf).into_owned(),
        eof,
    })
}

/// Make room for at least `needed` elements, at least doubling the capacity
/// whenever it has to grow.
pub(crate) fn reserve_doubling<T>(buf: &mut Vec<T>, needed: usize) -> Result<(), ShellError> {
    if needed <= buf.capacity() {
        return Ok(());
    }
    let target = needed.max(buf.capacity().saturating_mul(2));
    buf.try_reserve_exact(target - buf.len())
        .map_err(|_| ShellError::Allocation)
}
