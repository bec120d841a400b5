//! Ruby segment.

use crate::segments::Segment;
use crate::{
    CommandSpec, DetectOptions, Environment, LanguageSpec, VersionCache, VersionDetector,
};

/// asdf prints this placeholder in the version column when no ruby version
/// is set. Specific to asdf's output, so handled here and not in the core.
const ASDF_UNSET: &str = "______";

/// Ruby version segment.
///
/// Version managers are asked before the interpreter itself: rbenv,
/// rvm-prompt, chruby, and asdf all win over `ruby --version` when present.
pub struct Ruby {
    detector: VersionDetector,
}

impl Ruby {
    /// Segment with default options.
    pub fn new() -> Self {
        Self::with_options(DetectOptions::default())
    }

    /// Segment with caller overrides.
    pub fn with_options(options: DetectOptions) -> Self {
        let spec = LanguageSpec {
            name: "ruby".to_string(),
            extensions: vec![
                "*.rb".to_string(),
                "Rakefile".to_string(),
                "Gemfile".to_string(),
            ],
            commands: vec![
                CommandSpec::new("rbenv", &["version-name"], r"(?P<version>.+)"),
                CommandSpec::new("rvm-prompt", &["i", "v", "g"], r"(?P<version>.+)"),
                CommandSpec::new("chruby", &[], r"\* (?P<version>.+)\n"),
                CommandSpec::new("asdf", &["current", "ruby"], r"ruby\s+(?P<version>[^\s]+)\s+"),
                CommandSpec::new(
                    "ruby",
                    &["--version"],
                    r"ruby\s+(?P<version>(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+))",
                ),
            ],
            ..Default::default()
        };

        Self {
            detector: VersionDetector::with_options(spec, options),
        }
    }

    /// The underlying detector.
    pub fn detector(&self) -> &VersionDetector {
        &self.detector
    }
}

impl Default for Ruby {
    fn default() -> Self {
        Self::new()
    }
}

impl Segment for Ruby {
    fn enabled(&mut self, env: &dyn Environment, cache: &dyn VersionCache) -> bool {
        let enabled = self.detector.enabled(env, cache);

        if self.detector.version().full == ASDF_UNSET {
            self.detector.clear_version();
        }

        enabled
    }

    fn template(&self) -> &'static str {
        " {% if Error != \"\" %}{{ Error }}{% else %}{{ Full }}{% endif %} "
    }

    fn context(&self) -> liquid::Object {
        self.detector.template_context()
    }
}
