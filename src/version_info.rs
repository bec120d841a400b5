//! Resolved version value exposed to prompt templates.

use serde::{Deserialize, Serialize};

/// The version a segment resolved, broken into semantic fields.
///
/// Every field is a string on purpose: prerelease and build-metadata parts
/// are frequently non-numeric (`rc1`, `21.3+b2`), and prompt templates only
/// ever concatenate these values. A regex with just a `version` group leaves
/// the component fields empty.
///
/// The struct is rebuilt from scratch on every [`enabled`] call; nothing
/// survives across prompt renders except what the cache layer persists.
///
/// [`enabled`]: crate::VersionDetector::enabled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// The complete matched version string (the `version` capture group).
    pub full: String,

    /// Major component, empty when the regex has no `major` group.
    pub major: String,

    /// Minor component, empty when the regex has no `minor` group.
    pub minor: String,

    /// Patch component, empty when the regex has no `patch` group.
    pub patch: String,

    /// Prerelease tag (`rc1`, `beta.2`), usually empty.
    pub prerelease: String,

    /// Build metadata after `+`, usually empty.
    pub build_metadata: String,

    /// Changelog/release-notes URL rendered from the winning template,
    /// empty when no template applied or rendering failed.
    pub url: String,

    /// Name of the candidate executable that produced the version.
    pub executable: String,

    /// Version pinned by a project version file (e.g. `.nvmrc`) when a
    /// version-file hook reported a mismatch.
    pub expected: String,
}

impl VersionInfo {
    /// Whether any version was resolved at all.
    pub fn is_resolved(&self) -> bool {
        !self.full.is_empty()
    }
}
