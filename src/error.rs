//! Error types for version resolution.
//!
//! Resolution failures never abort a prompt render: the detector absorbs
//! them into a display string and the segment stays enabled with an empty
//! version. The `Display` impls here are those display strings.

use thiserror::Error;

/// Ways a single resolution attempt (or the whole candidate chain) can fail.
///
/// The detector tries candidates in declared order and keeps the most recent
/// error; only when every candidate fails does one of these surface.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new failure modes
/// in future versions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// The candidate executable was not found on the search path.
    ///
    /// Displays as the historical `NO VERSION` marker so templates can match
    /// on it.
    #[error("NO VERSION")]
    CommandNotFound {
        /// Executable that was looked up.
        executable: String,
    },

    /// The executable ran but exited non-zero.
    ///
    /// The exit code is preserved so a segment can special-case known codes
    /// (e.g. a tool reporting "unsupported version" with a specific status).
    #[error("error executing {executable} with {args:?}")]
    CommandFailed {
        /// Executable that was invoked.
        executable: String,
        /// Arguments it was invoked with.
        args: Vec<String>,
        /// Exit code, when the process terminated normally.
        exit_code: Option<i32>,
    },

    /// The regex produced zero matches against the raw output.
    ///
    /// The raw output is kept in the message; it is the one clue when a tool
    /// changes its CLI output format.
    #[error("error parsing version from {executable} with {output}")]
    ParseFailed {
        /// Executable whose output failed to parse.
        executable: String,
        /// The raw output that did not match.
        output: String,
    },

    /// A custom version source returned an empty string.
    #[error("no version found")]
    EmptyVersion {
        /// Name of the candidate whose source came up empty.
        executable: String,
    },

    /// No candidates were configured; the text is caller-supplied.
    #[error("{0}")]
    MissingCommand(String),
}

impl ResolveError {
    /// Exit code of a failed execution, when that is what went wrong.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}
