//! HTML and XML helper functions

use super::url::url_for;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Generate an anchor tag for a site path
///
/// # Examples
/// ```ignore
/// link_to("/blog", "/about", "About") // -> <a href="/blog/about">About</a>
/// ```
pub fn link_to(base_url: &str, path: &str, text: &str) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        html_escape(&url_for(base_url, path)),
        html_escape(text)
    )
}

/// Generate a `<meta name=...>` tag
pub fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        name,
        html_escape(content)
    )
}

/// Generate a `<meta property=...>` tag (Open Graph)
pub fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}">"#,
        property,
        html_escape(content)
    )
}
