//! Shared mock environment for integration tests.

#![allow(dead_code)]

use prompt_lang_discovery::{CommandError, Environment};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Scripted [`Environment`] recording every command invocation, so tests can
/// assert which candidates were (not) attempted.
pub struct MockEnvironment {
    pub pwd: PathBuf,
    pub home: PathBuf,
    pub env_vars: HashMap<String, String>,
    /// Glob patterns that "match a file" in the working directory.
    pub files: Vec<String>,
    pub folders: Vec<String>,
    pub ancestor_files: HashMap<String, PathBuf>,
    pub file_contents: HashMap<PathBuf, String>,
    /// Executables on the path and the output they produce.
    pub command_output: HashMap<String, String>,
    /// Executables on the path that fail with this exit code.
    pub command_failures: HashMap<String, i32>,
    invocations: RefCell<Vec<String>>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self {
            pwd: PathBuf::from("/usr/home/project"),
            home: PathBuf::from("/usr/home"),
            env_vars: HashMap::new(),
            files: Vec::new(),
            folders: Vec::new(),
            ancestor_files: HashMap::new(),
            file_contents: HashMap::new(),
            command_output: HashMap::new(),
            command_failures: HashMap::new(),
            invocations: RefCell::new(Vec::new()),
        }
    }
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, pattern: &str) -> Self {
        self.files.push(pattern.to_string());
        self
    }

    pub fn with_folder(mut self, name: &str) -> Self {
        self.folders.push(name.to_string());
        self
    }

    pub fn with_command(mut self, name: &str, output: &str) -> Self {
        self.command_output.insert(name.to_string(), output.to_string());
        self
    }

    pub fn with_failing_command(mut self, name: &str, exit_code: i32) -> Self {
        self.command_failures.insert(name.to_string(), exit_code);
        self
    }

    pub fn with_env_var(mut self, name: &str, value: &str) -> Self {
        self.env_vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_file_content(mut self, path: &str, content: &str) -> Self {
        self.file_contents
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn with_ancestor_file(mut self, name: &str, path: &str) -> Self {
        self.ancestor_files
            .insert(name.to_string(), PathBuf::from(path));
        self
    }

    pub fn in_home_dir(mut self) -> Self {
        self.pwd = self.home.clone();
        self
    }

    /// Names of every executable that was actually run, in order.
    pub fn invoked(&self) -> Vec<String> {
        self.invocations.borrow().clone()
    }
}

impl Environment for MockEnvironment {
    fn pwd(&self) -> PathBuf {
        self.pwd.clone()
    }

    fn home(&self) -> PathBuf {
        self.home.clone()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env_vars.get(name).cloned()
    }

    fn has_files(&self, pattern: &str) -> bool {
        self.files.iter().any(|f| f == pattern)
    }

    fn has_folder(&self, name: &str) -> bool {
        self.folders.iter().any(|f| f == name)
    }

    fn find_ancestor_file(&self, name: &str) -> Option<PathBuf> {
        self.ancestor_files.get(name).cloned()
    }

    fn file_content(&self, path: &Path) -> Option<String> {
        self.file_contents.get(path).cloned()
    }

    fn has_command(&self, name: &str) -> bool {
        self.command_output.contains_key(name) || self.command_failures.contains_key(name)
    }

    fn run_command(&self, executable: &str, _args: &[String]) -> Result<String, CommandError> {
        self.invocations.borrow_mut().push(executable.to_string());

        if let Some(exit_code) = self.command_failures.get(executable) {
            return Err(CommandError::NonZeroExit {
                exit_code: Some(*exit_code),
                output: String::new(),
            });
        }

        self.command_output
            .get(executable)
            .cloned()
            .ok_or_else(|| CommandError::Io(std::io::Error::from(std::io::ErrorKind::NotFound)))
    }
}
