//! Optional per-segment context capabilities.
//!
//! Segments that need more than file sniffing implement [`LanguageHooks`];
//! every method has a no-op default, so a segment only writes the hooks it
//! actually uses and the detector never nil-checks anything.

use crate::{Environment, VersionInfo};

/// Outcome of comparing a resolved version against a project version file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFileMatch {
    /// The version the project pins (e.g. the `.nvmrc` content).
    pub expected: String,

    /// Whether the resolved version satisfies the pin.
    pub matches: bool,
}

/// Optional capabilities a segment can plug into the detector.
///
/// `load_context` runs once per render before the display-mode policy is
/// evaluated; `in_context` answers the `Environment`/`Context` display modes;
/// `matches_version_file` runs after successful resolution. Hooks are passed
/// by reference so the segment can read any state they accumulated (a
/// virtualenv name, a package-manager icon) after `enabled()` returns.
pub trait LanguageHooks {
    /// Gather whatever context `in_context` (or the segment's template)
    /// needs. Called before activation is decided.
    fn load_context(&mut self, _env: &dyn Environment) {}

    /// Whether the language's environment is active here (virtualenv,
    /// manifest dependency, ...). Default: not in context.
    fn in_context(&self, _env: &dyn Environment) -> bool {
        false
    }

    /// Compare the resolved version against a project version file.
    /// `None` means no version file applies here.
    fn matches_version_file(
        &self,
        _env: &dyn Environment,
        _version: &VersionInfo,
    ) -> Option<VersionFileMatch> {
        None
    }
}

/// Zero-sized hooks for segments that need none.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl LanguageHooks for NoHooks {}
