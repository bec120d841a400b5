//! Declarative per-segment configuration.

use crate::{DisplayMode, Environment, ResolveError};
use std::fmt;

/// How a candidate obtains its raw version string.
///
/// Either run the candidate executable with fixed arguments, or call a
/// custom function (used for things like reading a `go.mod` pin or asking a
/// version manager). Both paths feed the same regex afterwards.
pub enum VersionSource {
    /// Execute the candidate's binary with these arguments.
    Executable {
        /// Arguments passed to the executable (e.g. `["--version"]`).
        args: Vec<String>,
    },
    /// Obtain the raw string through a caller-supplied function. An empty
    /// result or error moves resolution on to the next candidate.
    Custom(Box<dyn Fn(&dyn Environment) -> Result<String, ResolveError> + Send + Sync>),
}

impl fmt::Debug for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Executable { args } => f.debug_struct("Executable").field("args", args).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One ordered way of obtaining a version string.
///
/// Candidates are tried in declared order; the first whose source succeeds
/// and whose regex matches wins, and no later candidate is attempted.
#[derive(Debug)]
pub struct CommandSpec {
    /// Executable name; also the cache key and the `executable` reported in
    /// [`VersionInfo`](crate::VersionInfo), even for custom sources.
    pub executable: String,

    /// Where the raw version string comes from.
    pub source: VersionSource,

    /// Named-group regex applied to the raw string. Recognized groups:
    /// `version`, `major`, `minor`, `patch`, `prerelease`, `buildmetadata`.
    pub regex: String,

    /// Candidate-specific URL template, overriding the segment default.
    pub version_url_template: Option<String>,
}

impl CommandSpec {
    /// Candidate that runs `executable` with `args` and parses its output.
    pub fn new(executable: &str, args: &[&str], regex: &str) -> Self {
        Self {
            executable: executable.to_string(),
            source: VersionSource::Executable {
                args: args.iter().map(|a| a.to_string()).collect(),
            },
            regex: regex.to_string(),
            version_url_template: None,
        }
    }

    /// Candidate backed by a custom fetch function. `name` is reported as
    /// the winning executable and used for cache keys.
    pub fn custom(
        name: &str,
        regex: &str,
        source: impl Fn(&dyn Environment) -> Result<String, ResolveError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            executable: name.to_string(),
            source: VersionSource::Custom(Box::new(source)),
            regex: regex.to_string(),
            version_url_template: None,
        }
    }

    /// Attach a candidate-specific URL template.
    pub fn with_version_url_template(mut self, template: &str) -> Self {
        self.version_url_template = Some(template.to_string());
        self
    }
}

/// Per-segment detection configuration, immutable after construction.
///
/// A segment builds one of these with a struct literal and
/// `..Default::default()`:
///
/// ```rust
/// use prompt_lang_discovery::{CommandSpec, LanguageSpec};
///
/// let spec = LanguageSpec {
///     name: "go".to_string(),
///     extensions: vec!["*.go".to_string(), "go.mod".to_string()],
///     commands: vec![CommandSpec::new(
///         "go",
///         &["version"],
///         r"go(?P<version>(?P<major>\d+)\.(?P<minor>\d+)(\.(?P<patch>\d+))?)",
///     )],
///     ..Default::default()
/// };
/// assert_eq!(spec.name, "go");
/// ```
#[derive(Debug, Default)]
pub struct LanguageSpec {
    /// Segment name, used in log lines.
    pub name: String,

    /// Glob patterns identifying relevant files in the working directory.
    pub extensions: Vec<String>,

    /// Folder names identifying relevant directories.
    pub folders: Vec<String>,

    /// Filenames that mark a project root when found in an ancestor
    /// directory; finding one forces activation.
    pub project_files: Vec<String>,

    /// Ordered candidates; order is the only precedence signal.
    pub commands: Vec<CommandSpec>,

    /// Activation policy when no project file is found.
    pub display_mode: DisplayMode,

    /// Whether the segment may activate when pwd equals the home directory.
    pub home_enabled: bool,

    /// Segment-level default URL template (liquid syntax over
    /// [`VersionInfo`](crate::VersionInfo) fields).
    pub version_url_template: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec() {
        let spec = LanguageSpec::default();
        assert_eq!(spec.display_mode, DisplayMode::Context);
        assert!(!spec.home_enabled);
        assert!(spec.commands.is_empty());
    }

    #[test]
    fn test_command_spec_new() {
        let cmd = CommandSpec::new("node", &["--version"], r"v(?P<version>.+)");
        assert_eq!(cmd.executable, "node");
        assert!(cmd.version_url_template.is_none());
        match cmd.source {
            VersionSource::Executable { ref args } => assert_eq!(args, &["--version"]),
            VersionSource::Custom(_) => panic!("expected executable source"),
        }
    }

    #[test]
    fn test_command_spec_custom() {
        let cmd = CommandSpec::custom("gomod", r"(?P<version>.+)", |_env| Ok("1.21".to_string()))
            .with_version_url_template("https://golang.org/doc/go{{ Major }}.{{ Minor }}");
        assert_eq!(cmd.executable, "gomod");
        assert!(cmd.version_url_template.is_some());
        assert!(matches!(cmd.source, VersionSource::Custom(_)));
    }
}
