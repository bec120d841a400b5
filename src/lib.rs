//! # prompt-lang-discovery
//!
//! Language version discovery for shell prompt segments.
//!
//! This crate provides the shared detection framework that language segments
//! (Go, Node, Python, Ruby, ...) build on: file/folder/project-file sniffing,
//! ordered fallback across candidate version commands, named-group regex
//! extraction of semantic-version fields, raw-version caching with TTL, and
//! changelog-URL template rendering.
//!
//! ## Features
//!
//! - [`LanguageSpec`]/[`CommandSpec`] declarative per-segment configuration
//! - [`VersionDetector`] implementing the activation and fallback pipeline
//! - [`Environment`] abstraction so everything is testable without a shell
//! - [`VersionCache`] injected TTL cache (no ambient singletons)
//! - Ready-made segments for Go, Node, Python, and Ruby
//!
//! ## Example
//!
//! ```rust,no_run
//! use prompt_lang_discovery::{MemoryCache, SystemEnvironment};
//! use prompt_lang_discovery::segments::{Golang, Segment};
//!
//! fn main() -> std::io::Result<()> {
//!     let env = SystemEnvironment::new()?;
//!     let cache = MemoryCache::new();
//!
//!     let mut golang = Golang::new();
//!     if golang.enabled(&env, &cache) {
//!         println!("go {}", golang.detector().version().full);
//!     }
//!     Ok(())
//! }
//! ```

mod cache;
mod detection;
mod detector;
mod display_mode;
mod environment;
mod error;
mod hooks;
mod options;
mod spec;
mod version_info;

pub mod segments;

pub use cache::{version_key, version_url_key, MemoryCache, NoCache, VersionCache};
pub use detector::VersionDetector;
pub use display_mode::DisplayMode;
pub use environment::{CommandError, Environment, SystemEnvironment};
pub use error::ResolveError;
pub use hooks::{LanguageHooks, NoHooks, VersionFileMatch};
pub use options::DetectOptions;
pub use spec::{CommandSpec, LanguageSpec, VersionSource};
pub use version_info::VersionInfo;
