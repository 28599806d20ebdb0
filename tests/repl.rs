//! End-to-end tests driving the interpreter loop with scripted input.

use lsh::command::Streams;
use lsh::io_adapters::MemReader;
use lsh::{Interpreter, LoopState, RawLine};
use std::fs;
use std::io::{Read, Seek, Write};
use std::process::{Command, Stdio};
use std::sync::{Mutex, MutexGuard, OnceLock};

fn lock_current_dir() -> MutexGuard<'static, ()> {
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run `lines` through a fresh interpreter with stdout going to a temporary
/// file, so output of launched programs is captured too.
fn run_script(lines: &[&str]) -> (Interpreter, String, String) {
    let mut sh = Interpreter::default();
    let mut stdin = MemReader::from_lines(lines.iter().copied());
    let mut stdout = tempfile::tempfile().unwrap();
    let mut stderr: Vec<u8> = Vec::new();
    {
        let mut streams = Streams {
            stdin: &mut stdin,
            stdout: &mut stdout,
            stderr: &mut stderr,
        };
        sh.repl(&mut streams).expect("no fatal error");
    }
    let mut out = String::new();
    stdout.rewind().unwrap();
    stdout.read_to_string(&mut out).unwrap();
    (sh, out, String::from_utf8(stderr).unwrap())
}

#[test]
fn cd_help_exit_runs_to_completion() {
    let _lock = lock_current_dir();
    let orig = std::env::current_dir().unwrap();

    let mut sh = Interpreter::default();
    let mut stdin = MemReader::new("");
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();
    let mut streams = Streams {
        stdin: &mut stdin,
        stdout: &mut stdout,
        stderr: &mut stderr,
    };

    let states: Vec<LoopState> = ["cd /", "help", "exit"]
        .into_iter()
        .map(|line| sh.step(&RawLine::new(line), &mut streams).unwrap())
        .collect();

    assert_eq!(
        states,
        [LoopState::Running, LoopState::Running, LoopState::Stopped]
    );
    assert_eq!(std::env::current_dir().unwrap(), std::path::Path::new("/"));
    assert!(stderr.is_empty());

    std::env::set_current_dir(orig).unwrap();
}

#[test]
#[cfg(unix)]
fn cd_is_visible_to_launched_programs() {
    let _lock = lock_current_dir();
    let orig = std::env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let base = fs::canonicalize(tmp.path()).unwrap();
    fs::create_dir(base.join("inner")).unwrap();

    let enter = format!("cd {}", base.join("inner").display());
    let (sh, out, err) = run_script(&[enter.as_str(), "pwd", "cd ..", "pwd", "exit"]);
    std::env::set_current_dir(&orig).unwrap();

    assert_eq!(sh.state(), LoopState::Stopped);
    assert!(err.is_empty(), "unexpected errors: {err}");
    let reported: Vec<&str> = out
        .split("> ")
        .map(str::trim_end)
        .filter(|s| !s.is_empty())
        .collect();
    assert_eq!(
        reported,
        [
            base.join("inner").display().to_string(),
            base.display().to_string()
        ]
    );
}

#[test]
fn cd_without_argument_keeps_running() {
    let _lock = lock_current_dir();
    let before = std::env::current_dir().unwrap();
    let (sh, _, err) = run_script(&["cd", "cd"]);
    assert_eq!(sh.state(), LoopState::Stopped);
    assert_eq!(err.lines().count(), 2);
    assert!(err.lines().all(|l| l == "lsh: expected argument to \"cd\""));
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
fn unknown_command_is_reported_not_swallowed() {
    let (sh, out, err) = run_script(&["doesnotexist123", "help", "exit"]);
    assert_eq!(sh.state(), LoopState::Stopped);
    assert_eq!(err, "lsh: doesnotexist123: command not found\n");
    assert!(out.contains("The following are built in:"));
}

#[test]
fn help_output_is_stable_across_calls() {
    let (_, out, _) = run_script(&["help", "help", "exit"]);
    let listings: Vec<&str> = out.split("> ").filter(|s| !s.is_empty()).collect();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0], listings[1]);
    for name in ["cd", "help", "exit"] {
        let needle = format!("  {name}\n");
        assert_eq!(listings[0].matches(&needle).count(), 1, "{name}");
    }
}

#[test]
#[cfg(unix)]
fn binary_exits_successfully_even_after_failures() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lsh"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"doesnotexist123\nfalse\ncd\necho hi\nexit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("> "));
    assert!(stdout.contains("hi\n"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lsh: doesnotexist123: command not found"));
    assert!(stderr.contains("lsh: expected argument to \"cd\""));
}

#[test]
#[cfg(unix)]
fn binary_treats_end_of_input_as_exit() {
    let output = Command::new(env!("CARGO_BIN_EXE_lsh"))
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"> ");
}
