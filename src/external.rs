use crate::command::{ExitCode, Streams};
use crate::env::Environment;
use crate::error::ShellError;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// What happened to one launched program.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// The child ran and terminated, normally or by a signal.
    Completed { status: ExitCode },
    /// No child ran to completion; the error says why.
    Failed(ShellError),
}

/// Start `argv[0]` with the rest of `argv` as its arguments and block until it
/// terminates.
///
/// The program is resolved with [`find_command_path`] against the environment's
/// search path. The child shares the interpreter's working directory and streams.
///
/// `Child::wait` does not report stopped children, so a child suspended by a
/// signal keeps the interpreter blocked until it is resumed and exits. Job
/// control is not supported.
pub fn launch_and_wait(argv: &[&str], streams: &mut Streams<'_>, env: &Environment) -> LaunchOutcome {
    match spawn_and_wait(argv, streams, env) {
        Ok(status) => LaunchOutcome::Completed { status },
        Err(e) => LaunchOutcome::Failed(e),
    }
}

fn spawn_and_wait(argv: &[&str], streams: &mut Streams<'_>, env: &Environment) -> Result<ExitCode, ShellError> {
    let (&name, args) = argv
        .split_first()
        .ok_or_else(|| ShellError::NotFound(String::new()))?;
    let program = find_command_path(env.search_path(), Path::new(name))
        .ok_or_else(|| ShellError::NotFound(name.to_string()))?;

    let launch_error = |source: io::Error| ShellError::Launch {
        program: name.to_string(),
        source,
    };

    // Builtin output written so far must reach the terminal before the child's.
    streams.stdout.flush().map_err(launch_error)?;
    streams.stderr.flush().map_err(launch_error)?;

    let mut command = Command::new(&*program);
    command
        .args(args)
        .stdin(streams.stdin.stdio().map_err(launch_error)?)
        .stdout(streams.stdout.stdio().map_err(launch_error)?)
        .stderr(streams.stderr.stdio().map_err(launch_error)?);
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.arg0(name);
    }

    let mut child = command.spawn().map_err(|source| spawn_error(name, source))?;
    tracing::debug!(program = %program.display(), pid = child.id(), "launched");

    let exit_status = child.wait().map_err(launch_error)?;
    let status = match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    };
    tracing::debug!(program = name, status, "child terminated");
    Ok(status)
}

/// The program was resolved, so the OS refusing to start it means its image
/// could not be loaded rather than that process creation itself failed.
fn spawn_error(name: &str, source: io::Error) -> ShellError {
    match source.kind() {
        io::ErrorKind::PermissionDenied | io::ErrorKind::NotFound => ShellError::Exec {
            program: name.to_string(),
            source,
        },
        _ => match source.raw_os_error() {
            #[cfg(unix)]
            Some(ENOEXEC) => ShellError::Exec {
                program: name.to_string(),
                source,
            },
            _ => ShellError::Launch {
                program: name.to_string(),
                source,
            },
        },
    }
}

#[cfg(unix)]
const ENOEXEC: i32 = 8;

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Resolve a command path the way a typical shell would.
///
/// Behavior:
/// - Absolute path: returns it if it exists.
/// - Relative with multiple components (e.g., `bin/sh`): returns it if it exists.
/// - `./foo` on Unix or any `./`-prefixed path on other platforms: returns it if it exists.
/// - Single path component (no separators): search each directory in `search_paths` (PATH)
///   and return the first executable file.
/// - Any separator makes the name a direct path, as with `execvp`: `foo/` is
///   checked relative to the current dir and never searched in PATH.
/// - Empty path: returns `None`.
///
/// Direct paths only need to exist; if they are not executable, launching them
/// reports the OS error instead of "command not found".
pub fn find_command_path<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.is_absolute() {
        return find_by_path(path).map(Cow::Borrowed);
    }

    let search_in_current_dir = cfg!(not(unix)) || path.starts_with("./");
    if search_in_current_dir && path.exists() {
        return Some(Cow::Borrowed(path));
    }

    let mut components = path.components();
    match (components.next(), components.next()) {
        (None, None) => None,
        (Some(x), None) if !has_separator(path) => {
            find_in_path(search_paths, x.as_os_str()).map(Cow::Owned)
        }
        _ => find_by_path(path).map(Cow::Borrowed),
    }
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(cmd))
        .find(|candidate| is_executable(candidate))
}

fn has_separator(path: &Path) -> bool {
    path.as_os_str()
        .as_encoded_bytes()
        .iter()
        .any(|&b| std::path::is_separator(b as char))
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if path.exists() { Some(path) } else { None }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
