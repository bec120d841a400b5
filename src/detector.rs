//! The version-detection engine shared by language segments.

use crate::cache::{version_key, version_url_key, VersionCache};
use crate::detection::{parse_version, render_version_url, version_object};
use crate::environment::CommandError;
use crate::hooks::{LanguageHooks, NoHooks};
use crate::spec::{CommandSpec, VersionSource};
use crate::{DetectOptions, DisplayMode, Environment, LanguageSpec, ResolveError, VersionInfo};
use liquid::model::Value;
use std::path::{Path, PathBuf};

/// Ordered-fallback version detector driven by a [`LanguageSpec`].
///
/// A segment owns one detector per render pass: configure it, call
/// [`enabled`](Self::enabled), then read the resolved [`VersionInfo`], error
/// text, and mismatch state for template rendering. `false` means "not
/// applicable here"; `true` with an error means "applicable, version
/// unknown" — a failing tool never disables its segment.
///
/// The detector performs blocking filesystem probes and at most one
/// subprocess execution per failed candidate, sequentially. The injected
/// cache is the only state that survives the render.
pub struct VersionDetector {
    spec: LanguageSpec,
    options: DetectOptions,
    info: VersionInfo,
    error: Option<String>,
    mismatch: bool,
    project_root: Option<PathBuf>,
    exit_code: Option<i32>,
}

impl VersionDetector {
    /// Detector with default options.
    pub fn new(spec: LanguageSpec) -> Self {
        Self::with_options(spec, DetectOptions::default())
    }

    /// Detector with caller overrides applied on top of the segment spec.
    pub fn with_options(spec: LanguageSpec, options: DetectOptions) -> Self {
        Self {
            spec,
            options,
            info: VersionInfo::default(),
            error: None,
            mismatch: false,
            project_root: None,
            exit_code: None,
        }
    }

    /// Decide activation and resolve a version, without hooks.
    pub fn enabled(&mut self, env: &dyn Environment, cache: &dyn VersionCache) -> bool {
        self.enabled_with_hooks(env, cache, &mut NoHooks)
    }

    /// Decide activation and resolve a version.
    ///
    /// Order of checks:
    /// 1. home-directory gate (nothing is probed when it fails);
    /// 2. project-file ancestor walk, which forces activation and records
    ///    the project root;
    /// 3. the display-mode policy, with `load_context` run first;
    /// 4. version resolution, unless `fetch_version` is off;
    /// 5. version-file comparison through the hook.
    pub fn enabled_with_hooks(
        &mut self,
        env: &dyn Environment,
        cache: &dyn VersionCache,
        hooks: &mut dyn LanguageHooks,
    ) -> bool {
        self.reset();

        let home_enabled = self.options.home_enabled.unwrap_or(self.spec.home_enabled);
        if env.pwd() == env.home() && !home_enabled {
            return false;
        }

        let mut enabled = !self.spec.project_files.is_empty() && self.has_project_files(env);

        if !enabled {
            hooks.load_context(env);

            let mode = self.options.display_mode.unwrap_or(self.spec.display_mode);
            enabled = match mode {
                DisplayMode::Always => true,
                DisplayMode::Environment => hooks.in_context(env),
                DisplayMode::Files => {
                    self.has_language_files(env) || self.has_language_folders(env)
                }
                DisplayMode::Context => {
                    self.has_language_files(env)
                        || self.has_language_folders(env)
                        || hooks.in_context(env)
                }
            };
        }

        if !enabled {
            return false;
        }

        if !self.options.fetch_version {
            return true;
        }

        if let Err(err) = self.resolve_version(env, cache) {
            tracing::debug!(segment = %self.spec.name, %err, "version resolution failed");
            self.error = Some(err.to_string());
        }

        if let Some(check) = hooks.matches_version_file(env, &self.info) {
            if !check.matches {
                self.mismatch = true;
                self.info.expected = check.expected;
            }
        }

        enabled
    }

    /// The version resolved by the last `enabled` call.
    pub fn version(&self) -> &VersionInfo {
        &self.info
    }

    /// Display-friendly resolution error, when every candidate failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the resolved version disagrees with the project's pin.
    pub fn mismatch(&self) -> bool {
        self.mismatch
    }

    /// Directory of the nearest ancestor that held a project file.
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Exit code of the most recent failed candidate execution, for
    /// segment-specific interpretation of known codes.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Clear the resolved version. For segment-local sentinel handling
    /// (a tool reporting "no version set" through otherwise valid output).
    pub fn clear_version(&mut self) {
        self.info = VersionInfo {
            executable: std::mem::take(&mut self.info.executable),
            expected: std::mem::take(&mut self.info.expected),
            ..Default::default()
        };
    }

    /// Liquid context for rendering the segment template: every
    /// [`VersionInfo`] field plus `Error` and `Mismatch`.
    pub fn template_context(&self) -> liquid::Object {
        let mut object = version_object(&self.info);
        object.insert(
            "Error".into(),
            Value::scalar(self.error.clone().unwrap_or_default()),
        );
        object.insert("Mismatch".into(), Value::scalar(self.mismatch));
        object
    }

    fn reset(&mut self) {
        self.info = VersionInfo::default();
        self.error = None;
        self.mismatch = false;
        self.project_root = None;
        self.exit_code = None;
    }

    fn effective_extensions(&self) -> &[String] {
        self.options
            .extensions
            .as_deref()
            .unwrap_or(&self.spec.extensions)
    }

    fn effective_folders(&self) -> &[String] {
        self.options.folders.as_deref().unwrap_or(&self.spec.folders)
    }

    fn has_language_files(&self, env: &dyn Environment) -> bool {
        self.effective_extensions()
            .iter()
            .any(|pattern| env.has_files(pattern))
    }

    fn has_language_folders(&self, env: &dyn Environment) -> bool {
        self.effective_folders()
            .iter()
            .any(|folder| env.has_folder(folder))
    }

    fn has_project_files(&mut self, env: &dyn Environment) -> bool {
        for file in &self.spec.project_files {
            if let Some(marker) = env.find_ancestor_file(file) {
                self.project_root = marker.parent().map(Path::to_path_buf);
                return true;
            }
        }
        false
    }

    /// Try candidates in declared order; first success wins and stops the
    /// chain. Returns the most recent failure when all candidates fail.
    fn resolve_version(
        &mut self,
        env: &dyn Environment,
        cache: &dyn VersionCache,
    ) -> Result<(), ResolveError> {
        if self.spec.commands.is_empty() {
            return Err(ResolveError::MissingCommand(
                self.options.missing_command_text.clone(),
            ));
        }

        let mut last_error: Option<ResolveError> = None;

        for command in &self.spec.commands {
            // A live cache entry short-circuits the whole chain. The regex
            // still runs against the cached raw string, so a stale entry
            // that no longer parses surfaces the same error the live path
            // would.
            if let Some(raw) = cache.get(&version_key(&command.executable)) {
                tracing::debug!(executable = %command.executable, "version cache hit");
                let mut info = parse_version(&command.regex, &raw).ok_or_else(|| {
                    ResolveError::ParseFailed {
                        executable: command.executable.clone(),
                        output: raw.clone(),
                    }
                })?;
                info.executable = command.executable.clone();
                info.url = cache
                    .get(&version_url_key(&command.executable))
                    .unwrap_or_default();
                self.info = info;
                return Ok(());
            }

            let raw = match run_candidate(command, env) {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::debug!(executable = %command.executable, %err, "candidate failed");
                    if let Some(code) = err.exit_code() {
                        self.exit_code = Some(code);
                    }
                    last_error = Some(err);
                    continue;
                }
            };

            let mut info = match parse_version(&command.regex, &raw) {
                Some(info) => info,
                None => {
                    let err = ResolveError::ParseFailed {
                        executable: command.executable.clone(),
                        output: raw.clone(),
                    };
                    tracing::debug!(%err, "candidate output did not parse");
                    last_error = Some(err);
                    continue;
                }
            };
            info.executable = command.executable.clone();

            // precedence: global override > candidate template > segment default
            let template = self
                .options
                .version_url_template
                .as_deref()
                .or(command.version_url_template.as_deref())
                .or(self.spec.version_url_template.as_deref());
            if let Some(template) = template {
                if let Some(url) = render_version_url(template, &info) {
                    info.url = url;
                }
            }

            if let Some(ttl) = self.options.cache_duration {
                cache.set(&version_key(&command.executable), raw, ttl);
                cache.set(&version_url_key(&command.executable), info.url.clone(), ttl);
            }

            self.info = info;
            return Ok(());
        }

        Err(last_error.unwrap_or_else(|| {
            ResolveError::MissingCommand(self.options.missing_command_text.clone())
        }))
    }
}

fn run_candidate(command: &CommandSpec, env: &dyn Environment) -> Result<String, ResolveError> {
    match &command.source {
        VersionSource::Custom(fetch) => {
            let raw = fetch(env)?;
            if raw.is_empty() {
                return Err(ResolveError::EmptyVersion {
                    executable: command.executable.clone(),
                });
            }
            Ok(raw)
        }
        VersionSource::Executable { args } => {
            if !env.has_command(&command.executable) {
                return Err(ResolveError::CommandNotFound {
                    executable: command.executable.clone(),
                });
            }

            env.run_command(&command.executable, args).map_err(|err| {
                let exit_code = match &err {
                    CommandError::NonZeroExit { exit_code, .. } => *exit_code,
                    _ => None,
                };
                ResolveError::CommandFailed {
                    executable: command.executable.clone(),
                    args: args.clone(),
                    exit_code,
                }
            })
        }
    }
}
