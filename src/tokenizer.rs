//! Splitting a raw line into an argument vector.

use crate::error::ShellError;
use crate::reader::reserve_doubling;

/// Characters that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x07'];

const INITIAL_CAPACITY: usize = 64;

/// Ordered tokens of one input line, borrowed from that line.
///
/// Element 0, when present, is the command name. An empty vector stands for a
/// blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector<'a> {
    args: Vec<&'a str>,
}

impl<'a> ArgumentVector<'a> {
    pub fn command(&self) -> Option<&'a str> {
        self.args.first().copied()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Split `line` on runs of [`DELIMITERS`]; empty tokens are never produced.
pub fn split_line(line: &str) -> Result<ArgumentVector<'_>, ShellError> {
    let mut args = Vec::new();
    reserve_doubling(&mut args, INITIAL_CAPACITY)?;
    for token in line.split(DELIMITERS).filter(|t| !t.is_empty()) {
        let needed = args.len() + 1;
        reserve_doubling(&mut args, needed)?;
        args.push(token);
    }
    Ok(ArgumentVector { args })
}
