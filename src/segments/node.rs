//! Node.js segment.

use crate::segments::Segment;
use crate::{
    CommandSpec, DetectOptions, Environment, LanguageHooks, LanguageSpec, VersionCache,
    VersionDetector, VersionFileMatch, VersionInfo,
};
use liquid::model::Value;
use regex::Regex;
use std::path::Path;

const NODE_VERSION_REGEX: &str =
    r"v(?P<version>(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+))";

const YARN_ICON: &str = "\u{f61a}";
const NPM_ICON: &str = "\u{e71e}";
const PNPM_ICON: &str = "\u{f02c1}";

/// Node.js version segment.
///
/// Activates on the usual JavaScript project files, reports the
/// package-manager in use when asked to, and flags a mismatch when the
/// running node disagrees with the `.nvmrc` pin.
pub struct Node {
    detector: VersionDetector,
    hooks: NodeHooks,
}

#[derive(Default)]
struct NodeHooks {
    fetch_package_manager: bool,
    package_manager_icon: Option<&'static str>,
}

impl Node {
    /// Segment with default options.
    pub fn new() -> Self {
        Self::with_options(DetectOptions::default())
    }

    /// Segment with caller overrides.
    pub fn with_options(options: DetectOptions) -> Self {
        let spec = LanguageSpec {
            name: "node".to_string(),
            extensions: vec![
                "*.js".to_string(),
                "*.ts".to_string(),
                "package.json".to_string(),
                ".nvmrc".to_string(),
                "pnpm-workspace.yaml".to_string(),
                ".pnpmfile.cjs".to_string(),
                ".npmrc".to_string(),
                "*.vue".to_string(),
            ],
            commands: vec![CommandSpec::new("node", &["--version"], NODE_VERSION_REGEX)],
            version_url_template: Some(
                "https://github.com/nodejs/node/blob/main/doc/changelogs/CHANGELOG_V{{ Major }}.md#{{ Full }}"
                    .to_string(),
            ),
            ..Default::default()
        };

        Self {
            detector: VersionDetector::with_options(spec, options),
            hooks: NodeHooks::default(),
        }
    }

    /// Also report which package manager the project uses (yarn, pnpm, npm).
    pub fn fetch_package_manager(mut self) -> Self {
        self.hooks.fetch_package_manager = true;
        self
    }

    /// Icon for the detected package manager, when fetching was requested.
    pub fn package_manager_icon(&self) -> Option<&'static str> {
        self.hooks.package_manager_icon
    }

    /// The underlying detector.
    pub fn detector(&self) -> &VersionDetector {
        &self.detector
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Segment for Node {
    fn enabled(&mut self, env: &dyn Environment, cache: &dyn VersionCache) -> bool {
        self.detector.enabled_with_hooks(env, cache, &mut self.hooks)
    }

    fn template(&self) -> &'static str {
        " {% if PackageManagerIcon != \"\" %}{{ PackageManagerIcon }} {% endif %}{{ Full }} "
    }

    fn context(&self) -> liquid::Object {
        let mut object = self.detector.template_context();
        object.insert(
            "PackageManagerIcon".into(),
            Value::scalar(self.hooks.package_manager_icon.unwrap_or("").to_string()),
        );
        object
    }
}

impl LanguageHooks for NodeHooks {
    fn load_context(&mut self, env: &dyn Environment) {
        if !self.fetch_package_manager {
            return;
        }

        // an explicit packageManager field beats lockfile sniffing
        if let Some(manager) = declared_package_manager(env) {
            self.package_manager_icon = Some(manager);
            return;
        }

        if env.has_files("yarn.lock") {
            self.package_manager_icon = Some(YARN_ICON);
            return;
        }
        if env.has_files("pnpm-lock.yaml") {
            self.package_manager_icon = Some(PNPM_ICON);
            return;
        }
        if env.has_files("package-lock.json") || env.has_files("package.json") {
            self.package_manager_icon = Some(NPM_ICON);
        }
    }

    fn matches_version_file(
        &self,
        env: &dyn Environment,
        version: &VersionInfo,
    ) -> Option<VersionFileMatch> {
        let content = env.file_content(Path::new(".nvmrc"))?;
        let expected = content.trim().to_string();
        if expected.is_empty() {
            return None;
        }

        let pin = format!(
            r"(?im)^v?{}(\.?{})?(\.?{})?$",
            version.major, version.minor, version.patch
        );
        let matches = Regex::new(&pin)
            .map(|re| re.is_match(&content))
            .unwrap_or(false);

        Some(VersionFileMatch { expected, matches })
    }
}

/// Package manager icon from the `packageManager` field of `package.json`,
/// e.g. `"packageManager": "pnpm@8.6.0"`.
fn declared_package_manager(env: &dyn Environment) -> Option<&'static str> {
    let content = env.file_content(Path::new("package.json"))?;
    let data: serde_json::Value = serde_json::from_str(&content).ok()?;
    let manager = data.get("packageManager")?.as_str()?;

    if manager.starts_with("yarn") {
        Some(YARN_ICON)
    } else if manager.starts_with("pnpm") {
        Some(PNPM_ICON)
    } else if manager.starts_with("npm") {
        Some(NPM_ICON)
    } else {
        None
    }
}

/// Whether the working directory's `package.json` declares a dependency.
///
/// Used by framework segments (React, Angular, ...) to activate only inside
/// projects that actually pull the framework in.
pub fn has_node_package(env: &dyn Environment, name: &str) -> bool {
    let Some(content) = env.file_content(Path::new("package.json")) else {
        return false;
    };
    let Ok(data) = serde_json::from_str::<serde_json::Value>(&content) else {
        return false;
    };

    data.get("dependencies")
        .and_then(|deps| deps.get(name))
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_version_regex() {
        let info = crate::detection::parse_version(NODE_VERSION_REGEX, "v16.3.0").unwrap();
        assert_eq!(info.full, "16.3.0");
        assert_eq!(info.major, "16");
        assert_eq!(info.minor, "3");
        assert_eq!(info.patch, "0");
    }

    #[test]
    fn test_nvmrc_pin_regex_accepts_partial_pins() {
        // the generated pin accepts "16", "v16", "16.3" and "16.3.0"
        let pin = r"(?im)^v?16(\.?3)?(\.?0)?$";
        let re = Regex::new(pin).unwrap();
        assert!(re.is_match("16"));
        assert!(re.is_match("v16"));
        assert!(re.is_match("16.3"));
        assert!(re.is_match("16.3.0\n"));
        assert!(!re.is_match("14.19.0"));
    }
}
