//! Liquid rendering of version-URL templates.

use crate::VersionInfo;
use liquid::model::Value;
use liquid::{Object, ParserBuilder};

/// Build the liquid context exposed to URL templates and segment templates.
///
/// Field names are capitalized the way prompt templates traditionally write
/// them: `{{ Full }}`, `{{ Major }}`, `{{ Minor }}` and so on.
pub(crate) fn version_object(info: &VersionInfo) -> Object {
    let mut object = Object::new();
    object.insert("Full".into(), Value::scalar(info.full.clone()));
    object.insert("Major".into(), Value::scalar(info.major.clone()));
    object.insert("Minor".into(), Value::scalar(info.minor.clone()));
    object.insert("Patch".into(), Value::scalar(info.patch.clone()));
    object.insert("Prerelease".into(), Value::scalar(info.prerelease.clone()));
    object.insert(
        "BuildMetadata".into(),
        Value::scalar(info.build_metadata.clone()),
    );
    object.insert("URL".into(), Value::scalar(info.url.clone()));
    object.insert("Executable".into(), Value::scalar(info.executable.clone()));
    object.insert("Expected".into(), Value::scalar(info.expected.clone()));
    object
}

/// Render a URL template against a resolved version.
///
/// Any parse or render failure is swallowed into `None`; a broken template
/// costs the segment its link, never its activation.
pub(crate) fn render_version_url(template: &str, info: &VersionInfo) -> Option<String> {
    let parser = ParserBuilder::with_stdlib().build().ok()?;
    let template = match parser.parse(template) {
        Ok(t) => t,
        Err(err) => {
            tracing::debug!(%err, "version URL template failed to parse");
            return None;
        }
    };

    match template.render(&version_object(info)) {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::debug!(%err, "version URL template failed to render");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go_1_21_3() -> VersionInfo {
        VersionInfo {
            full: "1.21.3".to_string(),
            major: "1".to_string(),
            minor: "21".to_string(),
            patch: "3".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_golang_url() {
        let url = render_version_url("https://golang.org/doc/go{{ Major }}.{{ Minor }}", &go_1_21_3());
        assert_eq!(url.as_deref(), Some("https://golang.org/doc/go1.21"));
    }

    #[test]
    fn test_render_full_field() {
        let url = render_version_url("https://example.com/v{{ Full }}", &go_1_21_3());
        assert_eq!(url.as_deref(), Some("https://example.com/v1.21.3"));
    }

    #[test]
    fn test_render_empty_fields_stay_empty() {
        let info = VersionInfo {
            full: "1.16".to_string(),
            major: "1".to_string(),
            minor: "16".to_string(),
            ..Default::default()
        };
        let url = render_version_url("go{{ Major }}.{{ Minor }}.{{ Patch }}", &info);
        assert_eq!(url.as_deref(), Some("go1.16."));
    }

    #[test]
    fn test_broken_template_is_swallowed() {
        let url = render_version_url("https://example.com/{{ unclosed", &go_1_21_3());
        assert!(url.is_none());
    }

    #[test]
    fn test_version_object_field_names() {
        let object = version_object(&go_1_21_3());
        assert!(object.contains_key("Full"));
        assert!(object.contains_key("BuildMetadata"));
        assert!(object.contains_key("Executable"));
    }
}
