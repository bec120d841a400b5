//! Detection options configuration.
//!
//! This module provides the [`DetectOptions`] struct for caller-level
//! overrides layered on top of a segment's [`LanguageSpec`](crate::LanguageSpec):
//! version fetching, cache duration, URL-template override, and the
//! activation knobs a user may change in their prompt configuration.

use crate::DisplayMode;
use std::time::Duration;

/// Caller overrides applied on top of a segment's declarative spec.
///
/// # Default Behavior
///
/// Versions are fetched (`fetch_version: true`), nothing is cached
/// (`cache_duration: None`), and the segment's own display mode, home
/// setting, extensions, and folders apply unchanged.
///
/// # Example
///
/// ```rust
/// use prompt_lang_discovery::{DetectOptions, DisplayMode};
/// use std::time::Duration;
///
/// // Defaults: fetch versions, no caching
/// let opts = DetectOptions::default();
///
/// // Cache raw versions for an hour and force files-only activation
/// let opts = DetectOptions {
///     cache_duration: Some(Duration::from_secs(3600)),
///     display_mode: Some(DisplayMode::Files),
///     ..Default::default()
/// };
/// # let _ = opts;
/// ```
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Resolve a version at all. When `false`, an active segment reports
    /// enabled with no version populated.
    ///
    /// Default: `true`
    pub fetch_version: bool,

    /// How long resolved raw versions (and rendered URLs) stay cached.
    /// `None` disables cache writes entirely.
    ///
    /// Default: `None`
    pub cache_duration: Option<Duration>,

    /// Text surfaced as the segment error when no candidates are configured.
    ///
    /// Default: empty string
    pub missing_command_text: String,

    /// Global URL-template override. Takes precedence over both the winning
    /// candidate's template and the segment default.
    pub version_url_template: Option<String>,

    /// Override the segment's declared display mode.
    pub display_mode: Option<DisplayMode>,

    /// Override whether the segment activates in the home directory.
    pub home_enabled: Option<bool>,

    /// Replace the segment's declared extension patterns.
    pub extensions: Option<Vec<String>>,

    /// Replace the segment's declared folder names.
    pub folders: Option<Vec<String>>,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            fetch_version: true,
            cache_duration: None,
            missing_command_text: String::new(),
            version_url_template: None,
            display_mode: None,
            home_enabled: None,
            extensions: None,
            folders: None,
        }
    }
}
