//! A tiny interactive command interpreter.
//!
//! Each iteration prints a prompt, reads one line, splits it into an argument
//! vector and either runs one of the built-in commands (`cd`, `help`, `exit`)
//! in-process or launches an external program and waits for it to finish.
//!
//! The main entry point is [`Interpreter`]. The public modules [`command`],
//! [`io_adapters`] and [`error`] expose the stream traits, in-memory adapters
//! and error types needed to drive the loop without a terminal.

mod builtin;
pub mod command;
pub mod env;
pub mod error;
mod external;
mod interpreter;
pub mod io_adapters;
mod reader;
mod tokenizer;

pub use builtin::Builtin;
pub use external::{LaunchOutcome, find_command_path, launch_and_wait};
pub use interpreter::{Interpreter, LoopState};
pub use reader::{RawLine, read_line};
pub use tokenizer::{ArgumentVector, DELIMITERS, split_line};
