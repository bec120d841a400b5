//! Python segment.

use crate::segments::Segment;
use crate::{
    CommandSpec, DetectOptions, DisplayMode, Environment, LanguageHooks, LanguageSpec,
    VersionCache, VersionDetector,
};
use liquid::model::Value;
use std::path::Path;

const PYTHON_VERSION_REGEX: &str =
    r"Python (?P<version>(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+))";

/// Environment variables that point at an active virtual environment.
const VENV_VARS: [&str; 3] = ["VIRTUAL_ENV", "CONDA_ENV_PATH", "CONDA_DEFAULT_ENV"];

/// Python version segment.
///
/// Defaults to `Environment` display mode: it shows up when a virtualenv or
/// conda environment is active, not merely because a `.py` file exists.
/// `python` is tried before `python3`.
pub struct Python {
    detector: VersionDetector,
    hooks: PythonHooks,
}

struct PythonHooks {
    fetch_virtual_env: bool,
    display_default: bool,
    venv: Option<String>,
}

impl Python {
    /// Segment with default options.
    pub fn new() -> Self {
        Self::with_options(DetectOptions::default())
    }

    /// Segment with caller overrides.
    pub fn with_options(options: DetectOptions) -> Self {
        let spec = LanguageSpec {
            name: "python".to_string(),
            extensions: vec![
                "*.py".to_string(),
                "*.ipynb".to_string(),
                "pyproject.toml".to_string(),
                "venv.bak".to_string(),
            ],
            folders: vec![
                ".venv".to_string(),
                "venv".to_string(),
                "virtualenv".to_string(),
                "env".to_string(),
                "venv-win".to_string(),
                "pyenv-win".to_string(),
            ],
            commands: vec![
                CommandSpec::new("python", &["--version"], PYTHON_VERSION_REGEX),
                CommandSpec::new("python3", &["--version"], PYTHON_VERSION_REGEX),
            ],
            display_mode: DisplayMode::Environment,
            home_enabled: true,
            version_url_template: Some(
                "https://docs.python.org/release/{{ Major }}.{{ Minor }}.{{ Patch }}/whatsnew/changelog.html"
                    .to_string(),
            ),
            ..Default::default()
        };

        Self {
            detector: VersionDetector::with_options(spec, options),
            hooks: PythonHooks {
                fetch_virtual_env: true,
                display_default: true,
                venv: None,
            },
        }
    }

    /// Skip virtualenv lookup; the segment then only activates on files.
    pub fn without_virtual_env(mut self) -> Self {
        self.hooks.fetch_virtual_env = false;
        self
    }

    /// Hide the `system`/`base` environments conda activates by default.
    pub fn hide_default_env(mut self) -> Self {
        self.hooks.display_default = false;
        self
    }

    /// Name of the active virtual environment, when one was found.
    pub fn venv(&self) -> Option<&str> {
        self.hooks.venv.as_deref()
    }

    /// The underlying detector.
    pub fn detector(&self) -> &VersionDetector {
        &self.detector
    }
}

impl Default for Python {
    fn default() -> Self {
        Self::new()
    }
}

impl Segment for Python {
    fn enabled(&mut self, env: &dyn Environment, cache: &dyn VersionCache) -> bool {
        self.detector.enabled_with_hooks(env, cache, &mut self.hooks)
    }

    fn template(&self) -> &'static str {
        " {% if Error != \"\" %}{{ Error }}{% else %}{% if Venv != \"\" %}{{ Venv }} {% endif %}{{ Full }}{% endif %} "
    }

    fn context(&self) -> liquid::Object {
        let mut object = self.detector.template_context();
        object.insert(
            "Venv".into(),
            Value::scalar(self.hooks.venv.clone().unwrap_or_default()),
        );
        object
    }
}

impl PythonHooks {
    fn usable_venv_name(&self, name: &str) -> bool {
        if name.is_empty() || name == "." {
            return false;
        }
        if self.display_default {
            return true;
        }
        name != "system" && name != "base"
    }
}

impl LanguageHooks for PythonHooks {
    fn load_context(&mut self, env: &dyn Environment) {
        if !self.fetch_virtual_env {
            return;
        }

        for var in VENV_VARS {
            let Some(value) = env.env_var(var) else {
                continue;
            };
            let name = Path::new(&value)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if self.usable_venv_name(&name) {
                self.venv = Some(name);
                break;
            }
        }
    }

    fn in_context(&self, _env: &dyn Environment) -> bool {
        self.venv.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_version_regex() {
        let info =
            crate::detection::parse_version(PYTHON_VERSION_REGEX, "Python 3.11.4").unwrap();
        assert_eq!(info.full, "3.11.4");
        assert_eq!(info.major, "3");
        assert_eq!(info.minor, "11");
        assert_eq!(info.patch, "4");
    }

    #[test]
    fn test_usable_venv_name() {
        let hooks = PythonHooks {
            fetch_virtual_env: true,
            display_default: true,
            venv: None,
        };
        assert!(hooks.usable_venv_name("myenv"));
        assert!(hooks.usable_venv_name("base"));
        assert!(!hooks.usable_venv_name(""));
        assert!(!hooks.usable_venv_name("."));

        let hooks = PythonHooks {
            display_default: false,
            ..hooks
        };
        assert!(hooks.usable_venv_name("myenv"));
        assert!(!hooks.usable_venv_name("base"));
        assert!(!hooks.usable_venv_name("system"));
    }
}
