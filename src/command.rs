use std::fs::File;
use std::io::{self, BufRead, StdinLock, Write};
use std::process::Stdio;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Children killed by a signal are reported as `128 + signal`, the way POSIX
/// shells do.
pub type ExitCode = i32;

/// Outcome of running one command: keep reading input or stop the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Terminate,
}

/// Abstraction over the interpreter's line source that can also be handed to
/// a spawned child as its standard input.
///
/// The real terminal maps to [`Stdio::inherit`]; in-memory sources used to
/// script the loop map to [`Stdio::null`].
pub trait Stdin: BufRead {
    /// Produce a [`Stdio`] handle suitable for `std::process::Command`.
    fn stdio(&self) -> io::Result<Stdio>;
}

impl Stdin for StdinLock<'_> {
    fn stdio(&self) -> io::Result<Stdio> {
        Ok(Stdio::inherit())
    }
}

/// Abstraction over a writable output stream that can also be handed to a
/// spawned child.
///
/// Builtins write through it directly; external programs receive the
/// [`Stdio`] it produces, so both end up in the same place.
pub trait Stdout: Write {
    /// Produce a [`Stdio`] handle suitable for `std::process::Command`.
    fn stdio(&self) -> io::Result<Stdio>;
}

impl Stdout for io::Stdout {
    fn stdio(&self) -> io::Result<Stdio> {
        Ok(Stdio::inherit())
    }
}

impl Stdout for io::Stderr {
    fn stdio(&self) -> io::Result<Stdio> {
        Ok(Stdio::inherit())
    }
}

impl Stdout for File {
    fn stdio(&self) -> io::Result<Stdio> {
        Ok(self.try_clone()?.into())
    }
}

/// The three streams one loop iteration reads from and writes to.
pub struct Streams<'a> {
    pub stdin: &'a mut dyn Stdin,
    pub stdout: &'a mut dyn Stdout,
    pub stderr: &'a mut dyn Stdout,
}
