//! Detection implementation submodule.
//!
//! Leaf helpers the detector core builds on:
//!
//! - `parse_version`: named-group regex extraction from raw command output
//! - `render_version_url`: liquid rendering of changelog-URL templates

mod parser;
mod url;

pub(crate) use parser::parse_version;
pub(crate) use url::{render_version_url, version_object};
