//! Version output parsing with named-group regex extraction.

use crate::VersionInfo;
use regex::Regex;

/// Apply a candidate's regex to raw command output.
///
/// A single match is taken; groups absent from the pattern (or unmatched)
/// yield empty strings for their field, but zero matches overall is a hard
/// failure for the candidate. A pattern with only a `version` group is
/// therefore valid and leaves the component fields empty.
///
/// Returns `None` on zero matches or an invalid pattern; the caller turns
/// that into a parse error naming the executable and raw output.
pub(crate) fn parse_version(pattern: &str, output: &str) -> Option<VersionInfo> {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => {
            tracing::error!(pattern, %err, "invalid version regex");
            return None;
        }
    };

    let caps = re.captures(output)?;
    // a group can be declared in the pattern yet not participate in the
    // match; either way the field stays empty
    let group = |name: &str| -> String {
        caps.name(name)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    Some(VersionInfo {
        full: group("version"),
        major: group("major"),
        minor: group("minor"),
        patch: group("patch"),
        prerelease: group("prerelease"),
        build_metadata: group("buildmetadata"),
        ..Default::default()
    })
}
