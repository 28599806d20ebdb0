use std::env as stdenv;
use std::ffi::{OsStr, OsString};

/// The interpreter's view of the process it runs in.
///
/// Only the `PATH` value used to resolve external program names is kept,
/// captured once when the interpreter starts. The working directory lives in
/// the process itself; `cd` changes it and children inherit it from the OS.
#[derive(Debug, Clone)]
pub struct Environment {
    pub search_path: Option<OsString>,
}

impl Environment {
    /// Capture `PATH` of the current process.
    pub fn new() -> Self {
        Self {
            search_path: stdenv::var_os("PATH"),
        }
    }

    /// Same as [`Environment::new`] but with an explicit program search path.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    pub fn search_path(&self) -> &OsStr {
        self.search_path.as_deref().unwrap_or_else(|| OsStr::new(""))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes unit tests that touch the process-wide working directory.
#[cfg(test)]
pub(crate) fn lock_current_dir() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
