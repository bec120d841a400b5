//! Go segment.

use crate::segments::Segment;
use crate::{
    CommandSpec, DetectOptions, Environment, LanguageSpec, VersionCache, VersionDetector,
};

const GO_VERSION_REGEX: &str =
    r"go(?P<version>(?P<major>\d+)\.(?P<minor>\d+)(\.(?P<patch>\d+))?)";
const GO_MOD_REGEX: &str =
    r"(?m)^go (?P<version>(?P<major>\d+)(\.(?P<minor>\d+))?(\.(?P<patch>\d+))?)";

/// Go version segment.
///
/// Activates on `*.go` files or a `go.mod`. With
/// [`with_mod_file_parsing`](Self::with_mod_file_parsing) the pinned version
/// from the nearest `go.mod` takes precedence, falling back to `go version`
/// when no usable mod file is found.
pub struct Golang {
    detector: VersionDetector,
}

impl Golang {
    /// Segment with default options, reading `go version`.
    pub fn new() -> Self {
        Self::with_options(DetectOptions::default())
    }

    /// Segment with caller overrides.
    pub fn with_options(options: DetectOptions) -> Self {
        Self {
            detector: VersionDetector::with_options(Self::spec(false), options),
        }
    }

    /// Segment that prefers the `go` directive of the nearest `go.mod`.
    pub fn with_mod_file_parsing(options: DetectOptions) -> Self {
        Self {
            detector: VersionDetector::with_options(Self::spec(true), options),
        }
    }

    fn spec(parse_mod_file: bool) -> LanguageSpec {
        let mut commands = Vec::new();

        if parse_mod_file {
            // empty or missing go.mod falls through to `go version`
            commands.push(CommandSpec::custom("go.mod", GO_MOD_REGEX, |env| {
                let Some(marker) = env.find_ancestor_file("go.mod") else {
                    return Ok(String::new());
                };
                Ok(env.file_content(&marker).unwrap_or_default())
            }));
        }

        commands.push(CommandSpec::new("go", &["version"], GO_VERSION_REGEX));

        LanguageSpec {
            name: "go".to_string(),
            extensions: vec!["*.go".to_string(), "go.mod".to_string()],
            commands,
            version_url_template: Some(
                "https://golang.org/doc/go{{ Major }}.{{ Minor }}".to_string(),
            ),
            ..Default::default()
        }
    }

    /// The underlying detector, for reading version, error, and URL state.
    pub fn detector(&self) -> &VersionDetector {
        &self.detector
    }
}

impl Default for Golang {
    fn default() -> Self {
        Self::new()
    }
}

impl Segment for Golang {
    fn enabled(&mut self, env: &dyn Environment, cache: &dyn VersionCache) -> bool {
        self.detector.enabled(env, cache)
    }

    fn template(&self) -> &'static str {
        " {% if Error != \"\" %}{{ Error }}{% else %}{{ Full }}{% endif %} "
    }

    fn context(&self) -> liquid::Object {
        self.detector.template_context()
    }
}
