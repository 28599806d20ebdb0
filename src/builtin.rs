use crate::command::{Signal, Stdout, Streams};
use crate::env::Environment;
use crate::error::ShellError;
use anyhow::Result;
use std::env;
use std::path::Path;

/// Built-in commands known to the shell at compile time.
///
/// Builtins receive the raw argument vector and run in-process without
/// spawning a child. Arguments are never interpreted as options, so
/// `cd -x` enters a directory named `-x`.
pub(crate) trait BuiltinCommand {
    /// Canonical name of the command, e.g. "cd" or "exit".
    fn name() -> &'static str;

    /// Executes the command with `argv[0]` being its own name. Errors are
    /// reported by the caller and the loop continues.
    fn execute(argv: &[&str], stdout: &mut dyn Stdout, env: &mut Environment) -> Result<Signal>;
}

/// The registry of builtins, in the order `help` lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Help,
    Exit,
}

impl Builtin {
    pub const ALL: [Builtin; 3] = [Builtin::Cd, Builtin::Help, Builtin::Exit];

    /// Exact, case-sensitive match on the command name.
    pub fn lookup(name: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd => Cd::name(),
            Builtin::Help => Help::name(),
            Builtin::Exit => Exit::name(),
        }
    }

    /// Run the builtin with the full argument vector, name included at index 0.
    pub fn run(self, argv: &[&str], streams: &mut Streams<'_>, env: &mut Environment) -> Signal {
        match self {
            Builtin::Cd => run_command::<Cd>(argv, streams, env),
            Builtin::Help => run_command::<Help>(argv, streams, env),
            Builtin::Exit => run_command::<Exit>(argv, streams, env),
        }
    }
}

fn run_command<T: BuiltinCommand>(
    argv: &[&str],
    streams: &mut Streams<'_>,
    env: &mut Environment,
) -> Signal {
    match T::execute(argv, streams.stdout, env) {
        Ok(signal) => signal,
        Err(e) => {
            tracing::debug!(builtin = T::name(), error = %e, "builtin failed");
            if let Err(e) = writeln!(streams.stderr, "{e}") {
                tracing::warn!(error = %e, "failed to report builtin error");
            }
            Signal::Continue
        }
    }
}

/// Change the current working directory to `argv[1]`; further arguments are ignored.
pub struct Cd;

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(argv: &[&str], _stdout: &mut dyn Stdout, _env: &mut Environment) -> Result<Signal> {
        let target = argv.get(1).ok_or(ShellError::MissingArgument("cd"))?;
        let path = Path::new(target);
        env::set_current_dir(path).map_err(|source| ShellError::ChangeDir {
            path: path.to_path_buf(),
            source,
        })?;
        if let Ok(dir) = env::current_dir() {
            tracing::debug!(dir = %dir.display(), "changed directory");
        }
        Ok(Signal::Continue)
    }
}

/// Print a short banner and the list of built-in commands. Arguments are ignored.
pub struct Help;

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(_argv: &[&str], stdout: &mut dyn Stdout, _env: &mut Environment) -> Result<Signal> {
        writeln!(stdout, "lsh: a tiny command interpreter")?;
        writeln!(stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(stdout, "The following are built in:")?;
        for builtin in Builtin::ALL {
            writeln!(stdout, "  {}", builtin.name())?;
        }
        writeln!(stdout, "Use the man command for information on other programs.")?;
        Ok(Signal::Continue)
    }
}

/// Leave the interpreter. Arguments are ignored.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(_argv: &[&str], _stdout: &mut dyn Stdout, _env: &mut Environment) -> Result<Signal> {
        Ok(Signal::Terminate)
    }
}
