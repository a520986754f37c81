//! Endpoint path templates
//!
//! Each backend endpoint is described by a [`PathTemplate`]: an ordered list
//! of literal and placeholder segments parsed once at client construction
//! and rendered with per-field percent-encoding. Rendering joins segments
//! with single separators, so repeated `/` runs in field values never reach
//! the wire.

use dmart_domain::normalize_subpath;

/// One segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `:name` placeholder, substituted at render time.
    Placeholder(String),
}

/// A parsed URL path template.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template of the form `/user/login` or
    /// `/:scope/entry/:resource/:space/:subpath/:shortname`.
    pub fn parse(template: &str) -> Self {
        let segments = template
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| match part.strip_prefix(':') {
                Some(name) => Segment::Placeholder(name.to_string()),
                None => Segment::Literal(part.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Substitute placeholders and return the rendered path (leading `/`).
    ///
    /// Placeholder values are percent-encoded per path segment; values may
    /// themselves contain `/` (subpaths) and each piece is encoded
    /// independently. A placeholder with no supplied value is kept verbatim
    /// as `:name` — a caller error the backend will reject, not one the
    /// client validates.
    pub fn render(&self, fields: &[(&str, &str)]) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    path.push('/');
                    path.push_str(literal);
                }
                Segment::Placeholder(name) => {
                    match fields.iter().find(|(key, _)| key == name) {
                        Some((_, value)) => push_encoded(&mut path, value),
                        None => {
                            path.push_str("/:");
                            path.push_str(name);
                        }
                    }
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }
}

/// Append a field value as one or more encoded path segments, skipping the
/// empty pieces produced by duplicate or trailing separators.
fn push_encoded(path: &mut String, value: &str) {
    for piece in normalize_subpath(value).split('/') {
        if piece.is_empty() {
            continue;
        }
        path.push('/');
        path.push_str(&urlencoding::encode(piece));
    }
}

/// Parsed templates for every backend endpoint, built once per client.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub login: PathTemplate,
    pub logout: PathTemplate,
    pub profile: PathTemplate,
    pub check_existing: PathTemplate,
    pub create_user: PathTemplate,
    pub query: PathTemplate,
    pub csv: PathTemplate,
    pub entry: PathTemplate,
    pub resource_with_payload: PathTemplate,
    pub payload: PathTemplate,
    pub request: PathTemplate,
    pub submit: PathTemplate,
    pub progress_ticket: PathTemplate,
    pub space: PathTemplate,
    pub health: PathTemplate,
    pub manifest: PathTemplate,
    pub settings: PathTemplate,
    pub data_asset: PathTemplate,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: PathTemplate::parse("/user/login"),
            logout: PathTemplate::parse("/user/logout"),
            profile: PathTemplate::parse("/user/profile"),
            check_existing: PathTemplate::parse("/user/check-existing"),
            create_user: PathTemplate::parse("/user/create"),
            query: PathTemplate::parse("/:scope/query"),
            csv: PathTemplate::parse("/managed/csv"),
            entry: PathTemplate::parse("/:scope/entry/:resource/:space/:subpath/:shortname"),
            resource_with_payload: PathTemplate::parse("/:scope/resource_with_payload"),
            payload: PathTemplate::parse("/:scope/payload/:resource/:space/:subpath/:filename"),
            request: PathTemplate::parse("/managed/request"),
            submit: PathTemplate::parse("/public/submit/:space/:path"),
            progress_ticket: PathTemplate::parse(
                "/managed/progress-ticket/:space/:subpath/:shortname/:action",
            ),
            space: PathTemplate::parse("/managed/space"),
            health: PathTemplate::parse("/managed/health/:space"),
            manifest: PathTemplate::parse("/info/manifest"),
            settings: PathTemplate::parse("/info/settings"),
            data_asset: PathTemplate::parse("/managed/data-asset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_literals_and_placeholders() {
        let template = PathTemplate::parse("/:scope/entry/:resource/:space/:subpath/:shortname");
        let path = template.render(&[
            ("scope", "managed"),
            ("resource", "content"),
            ("space", "demo"),
            ("subpath", "posts/2024"),
            ("shortname", "p1"),
        ]);
        assert_eq!(path, "/managed/entry/content/demo/posts/2024/p1");
    }

    #[test]
    fn collapses_duplicate_separators_in_values() {
        let template = PathTemplate::parse("/:scope/entry/:resource/:space/:subpath/:shortname");
        let path = template.render(&[
            ("scope", "managed"),
            ("resource", "content"),
            ("space", "demo"),
            ("subpath", "a//b///c/"),
            ("shortname", "p1"),
        ]);
        assert_eq!(path, "/managed/entry/content/demo/a/b/c/p1");
    }

    #[test]
    fn missing_field_keeps_placeholder() {
        let template = PathTemplate::parse("/managed/health/:space");
        assert_eq!(template.render(&[]), "/managed/health/:space");
    }

    #[test]
    fn encodes_each_segment() {
        let template = PathTemplate::parse("/managed/health/:space");
        assert_eq!(template.render(&[("space", "my space")]), "/managed/health/my%20space");
    }

    #[test]
    fn empty_template_renders_root() {
        let template = PathTemplate::parse("/");
        assert_eq!(template.render(&[]), "/");
    }
}
