//! Display mode enum governing segment activation.

use serde::{Deserialize, Serialize};

/// Policy deciding which signals activate a segment when no project file
/// forces it on.
///
/// A segment declares a default mode; callers can override it through
/// [`DetectOptions`](crate::DetectOptions). The string forms (`"always"`,
/// `"files"`, `"environment"`, `"context"`) are what configuration files use.
///
/// # Example
///
/// ```rust
/// use std::str::FromStr;
/// use prompt_lang_discovery::DisplayMode;
///
/// assert_eq!(DisplayMode::from_str("files").unwrap(), DisplayMode::Files);
/// assert_eq!(DisplayMode::default(), DisplayMode::Context);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum DisplayMode {
    /// Activate unconditionally.
    Always,
    /// Activate when a declared extension matches a file in the working
    /// directory, or a declared folder exists.
    Files,
    /// Activate when the segment's `in_context` hook reports an active
    /// environment (virtualenv, declared dependency, ...).
    Environment,
    /// Activate when either the file signals or the environment hook fire,
    /// or a project file was found. The default.
    #[default]
    Context,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_is_context() {
        assert_eq!(DisplayMode::default(), DisplayMode::Context);
    }

    #[test]
    fn test_from_str_all_modes() {
        assert_eq!(DisplayMode::from_str("always").unwrap(), DisplayMode::Always);
        assert_eq!(DisplayMode::from_str("files").unwrap(), DisplayMode::Files);
        assert_eq!(
            DisplayMode::from_str("environment").unwrap(),
            DisplayMode::Environment
        );
        assert_eq!(DisplayMode::from_str("context").unwrap(), DisplayMode::Context);
        assert!(DisplayMode::from_str("never").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for mode in DisplayMode::iter() {
            let text = mode.to_string();
            assert_eq!(DisplayMode::from_str(&text).unwrap(), mode);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DisplayMode::Environment).unwrap();
        assert_eq!(json, "\"environment\"");
        let back: DisplayMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DisplayMode::Environment);
    }
}
