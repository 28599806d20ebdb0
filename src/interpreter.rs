use crate::builtin::Builtin;
use crate::command::{ExitCode, Signal, Streams};
use crate::env::Environment;
use crate::error::ShellError;
use crate::external::{LaunchOutcome, launch_and_wait};
use crate::reader::{RawLine, read_line};
use crate::tokenizer::{ArgumentVector, split_line};

const PROMPT: &str = "> ";

/// Whether the loop keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

impl LoopState {
    /// The state after a command returned `signal`. `Stopped` is terminal.
    pub fn after(self, signal: Signal) -> LoopState {
        match (self, signal) {
            (LoopState::Running, Signal::Continue) => LoopState::Running,
            _ => LoopState::Stopped,
        }
    }
}

/// A read-eval loop over one input stream.
///
/// Every line is split on whitespace; the first token either names a builtin
/// (`cd`, `help`, `exit`) or an external program to launch and wait for.
///
/// Example
/// ```
/// use lsh::command::Streams;
/// use lsh::io_adapters::MemReader;
/// use lsh::{Interpreter, LoopState};
///
/// let mut stdin = MemReader::from_lines(["help", "exit"]);
/// let (mut stdout, mut stderr) = (Vec::<u8>::new(), Vec::<u8>::new());
/// let mut sh = Interpreter::default();
/// sh.repl(&mut Streams { stdin: &mut stdin, stdout: &mut stdout, stderr: &mut stderr })
///     .unwrap();
/// assert_eq!(sh.state(), LoopState::Stopped);
/// ```
pub struct Interpreter {
    env: Environment,
    state: LoopState,
    last_status: Option<ExitCode>,
}

impl Interpreter {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            state: LoopState::Running,
            last_status: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Exit status of the most recently completed external program.
    pub fn last_status(&self) -> Option<ExitCode> {
        self.last_status
    }

    /// Prompt, read and run lines until a command or the end of input stops the loop.
    ///
    /// Only fatal errors are returned; everything else is reported on
    /// `streams.stderr` and the loop goes on.
    pub fn repl(&mut self, streams: &mut Streams<'_>) -> Result<(), ShellError> {
        while self.state == LoopState::Running {
            if let Err(e) = write_prompt(streams) {
                tracing::warn!(error = %e, "failed to write prompt");
            }
            let line = match read_line(&mut *streams.stdin) {
                Ok(line) => line,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    report(streams, &e);
                    RawLine::end_of_input()
                }
            };
            self.step(&line, streams)?;
        }
        Ok(())
    }

    /// Run one already-read line and return the resulting state.
    pub fn step(&mut self, line: &RawLine, streams: &mut Streams<'_>) -> Result<LoopState, ShellError> {
        if self.state == LoopState::Stopped {
            return Ok(self.state);
        }
        if line.is_end_of_input() {
            tracing::debug!("end of input");
            self.state = LoopState::Stopped;
            return Ok(self.state);
        }
        let argv = split_line(line.as_str())?;
        if !argv.is_empty() {
            let signal = self.execute(&argv, streams);
            self.state = self.state.after(signal);
        }
        Ok(self.state)
    }

    /// Dispatch a non-empty argument vector to a builtin or an external program.
    pub fn execute(&mut self, argv: &ArgumentVector<'_>, streams: &mut Streams<'_>) -> Signal {
        let Some(name) = argv.command() else {
            return Signal::Continue;
        };
        if let Some(builtin) = Builtin::lookup(name) {
            tracing::debug!(builtin = name, "running builtin");
            return builtin.run(argv.as_slice(), streams, &mut self.env);
        }
        match launch_and_wait(argv.as_slice(), streams, &self.env) {
            LaunchOutcome::Completed { status } => self.last_status = Some(status),
            LaunchOutcome::Failed(e) => {
                self.last_status = None;
                report(streams, &e);
            }
        }
        Signal::Continue
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Environment::new())
    }
}

fn write_prompt(streams: &mut Streams<'_>) -> std::io::Result<()> {
    streams.stdout.write_all(PROMPT.as_bytes())?;
    streams.stdout.flush()
}

fn report(streams: &mut Streams<'_>, error: &ShellError) {
    tracing::debug!(error = ?error, "command failed");
    if let Err(e) = writeln!(streams.stderr, "{error}") {
        tracing::warn!(error = %e, "failed to report error");
    }
}
