//! Ready-made language segments built on [`VersionDetector`].
//!
//! Each segment owns a detector configured with its language's extensions,
//! candidate commands, and hooks, and exposes the uniform segment contract:
//! `enabled`, `template`, `context`. They double as reference material for
//! writing new segments.
//!
//! [`VersionDetector`]: crate::VersionDetector

mod golang;
mod node;
mod python;
mod ruby;

pub use golang::Golang;
pub use node::{has_node_package, Node};
pub use python::Python;
pub use ruby::Ruby;

use crate::{Environment, VersionCache};

/// The uniform contract every prompt segment follows.
///
/// `enabled` decides activation and gathers state; `template` is the default
/// liquid template; `context` is the object that template renders against.
pub trait Segment {
    /// Probe the environment, resolve a version, report activation.
    fn enabled(&mut self, env: &dyn Environment, cache: &dyn VersionCache) -> bool;

    /// Default liquid template for this segment.
    fn template(&self) -> &'static str;

    /// Liquid context for template rendering.
    fn context(&self) -> liquid::Object;
}
