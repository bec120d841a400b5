//! Environment abstraction over the filesystem, PATH, and subprocess
//! execution.
//!
//! The detector core only ever talks to [`Environment`]; production code uses
//! [`SystemEnvironment`], tests substitute a mock. Command timeouts live here,
//! in the collaborator, not in the detector.

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;

/// Default timeout for candidate command execution.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from running a candidate executable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommandError {
    /// The command did not finish within the configured timeout.
    #[error("command timed out")]
    Timeout,

    /// The command ran but exited non-zero.
    #[error("command exited with {exit_code:?}")]
    NonZeroExit {
        /// Exit code, when the process terminated normally.
        exit_code: Option<i32>,
        /// Trimmed stderr, kept for diagnostics.
        output: String,
    },

    /// The command could not be started.
    #[error("failed to run command: {0}")]
    Io(#[from] std::io::Error),

    /// The command produced output that is not valid UTF-8.
    #[error("command output is not valid UTF-8")]
    InvalidOutput,
}

/// What the detector needs from the outside world.
///
/// All methods are read-only probes except [`run_command`], which spawns one
/// blocking subprocess. Paths handed to `file_content` may be relative to the
/// working directory.
///
/// [`run_command`]: Environment::run_command
pub trait Environment {
    /// Current working directory of the prompt.
    fn pwd(&self) -> PathBuf;

    /// The user's home directory.
    fn home(&self) -> PathBuf;

    /// Value of an environment variable, `None` when unset.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Whether any file in the working directory matches the glob pattern.
    fn has_files(&self, pattern: &str) -> bool;

    /// Whether the working directory contains a folder with this name.
    fn has_folder(&self, name: &str) -> bool;

    /// Walk the working directory and its ancestors looking for an entry
    /// with this name; returns the full path of the first hit.
    fn find_ancestor_file(&self, name: &str) -> Option<PathBuf>;

    /// Contents of a file, `None` when missing or unreadable.
    fn file_content(&self, path: &Path) -> Option<String>;

    /// Whether an executable with this name exists on the search path.
    fn has_command(&self, name: &str) -> bool;

    /// Run an executable and return its trimmed output (stdout preferred,
    /// stderr as fallback since several tools print versions there).
    fn run_command(&self, executable: &str, args: &[String]) -> Result<String, CommandError>;
}

/// Production [`Environment`] backed by the real system.
///
/// Owns a current-thread tokio runtime so command execution can be wrapped
/// in a timeout; everything else is plain blocking I/O.
pub struct SystemEnvironment {
    pwd: PathBuf,
    home: PathBuf,
    command_timeout: Duration,
    runtime: tokio::runtime::Runtime,
}

impl SystemEnvironment {
    /// Build an environment rooted at the current working directory.
    pub fn new() -> std::io::Result<Self> {
        let pwd = std::env::current_dir()?;
        Self::at(pwd)
    }

    /// Build an environment rooted at an explicit working directory.
    pub fn at(pwd: impl Into<PathBuf>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            pwd: pwd.into(),
            home: dirs::home_dir().unwrap_or_default(),
            command_timeout: COMMAND_TIMEOUT,
            runtime,
        })
    }

    /// Override the subprocess timeout.
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.pwd.join(path)
        }
    }
}

impl Environment for SystemEnvironment {
    fn pwd(&self) -> PathBuf {
        self.pwd.clone()
    }

    fn home(&self) -> PathBuf {
        self.home.clone()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn has_files(&self, pattern: &str) -> bool {
        let Ok(pattern) = glob::Pattern::new(pattern) else {
            tracing::debug!(pattern, "invalid file pattern");
            return false;
        };

        let Ok(entries) = std::fs::read_dir(&self.pwd) else {
            return false;
        };

        entries.flatten().any(|entry| {
            entry.file_type().map(|t| t.is_file()).unwrap_or(false)
                && pattern.matches(&entry.file_name().to_string_lossy())
        })
    }

    fn has_folder(&self, name: &str) -> bool {
        self.pwd.join(name).is_dir()
    }

    fn find_ancestor_file(&self, name: &str) -> Option<PathBuf> {
        self.pwd
            .ancestors()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.exists())
    }

    fn file_content(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(self.resolve(path)).ok()
    }

    fn has_command(&self, name: &str) -> bool {
        which::which(name).is_ok()
    }

    fn run_command(&self, executable: &str, args: &[String]) -> Result<String, CommandError> {
        let result = self.runtime.block_on(async {
            timeout(
                self.command_timeout,
                Command::new(executable).args(args).output(),
            )
            .await
        });

        let output = match result {
            Err(_) => return Err(CommandError::Timeout),
            Ok(io) => io?,
        };

        if !output.status.success() {
            return Err(CommandError::NonZeroExit {
                exit_code: output.status.code(),
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let out = if !output.stdout.is_empty() {
            output.stdout
        } else {
            output.stderr
        };

        String::from_utf8(out)
            .map(|s| s.trim().to_string())
            .map_err(|_| CommandError::InvalidOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_has_files_glob() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.go"), "package main").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let env = SystemEnvironment::at(dir.path()).unwrap();
        assert!(env.has_files("*.go"));
        assert!(env.has_files("main.go"));
        assert!(!env.has_files("*.rs"));
    }

    #[test]
    fn test_has_files_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src.go")).unwrap();

        let env = SystemEnvironment::at(dir.path()).unwrap();
        assert!(!env.has_files("*.go"));
    }

    #[test]
    fn test_has_folder() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".venv")).unwrap();

        let env = SystemEnvironment::at(dir.path()).unwrap();
        assert!(env.has_folder(".venv"));
        assert!(!env.has_folder("node_modules"));
    }

    #[test]
    fn test_find_ancestor_file_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("go.mod"), "module demo\n\ngo 1.21\n").unwrap();
        let nested = dir.path().join("internal").join("api");
        fs::create_dir_all(&nested).unwrap();

        let env = SystemEnvironment::at(&nested).unwrap();
        let found = env.find_ancestor_file("go.mod").unwrap();
        assert_eq!(found, dir.path().join("go.mod"));
        assert!(env.find_ancestor_file(".nvmrc").is_none());
    }

    #[test]
    fn test_file_content_relative_to_pwd() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".nvmrc"), "v16.3.0\n").unwrap();

        let env = SystemEnvironment::at(dir.path()).unwrap();
        let content = env.file_content(Path::new(".nvmrc")).unwrap();
        assert_eq!(content, "v16.3.0\n");
        assert!(env.file_content(Path::new("absent")).is_none());
    }

    #[test]
    fn test_has_command_nonexistent() {
        let env = SystemEnvironment::at("/tmp").unwrap();
        assert!(!env.has_command("definitely_not_a_real_tool_xyz123"));
    }

    #[test]
    fn test_run_command_captures_stdout() {
        let env = SystemEnvironment::at("/tmp").unwrap();
        let out = env
            .run_command("echo", &["hello".to_string()])
            .expect("echo should run");
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_run_command_nonexistent_is_io_error() {
        let env = SystemEnvironment::at("/tmp").unwrap();
        let err = env
            .run_command("/nonexistent/path/to/tool", &[])
            .unwrap_err();
        assert!(matches!(err, CommandError::Io(_)));
    }
}
