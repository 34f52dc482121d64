//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/');

/// Prefix a site path with the base URL, percent-encoding its segments
///
/// # Examples
/// ```ignore
/// url_for("/blog", "/posts/hello") // -> "/blog/posts/hello"
/// url_for("", "/")                 // -> "/"
/// ```
pub fn url_for(base_url: &str, path: &str) -> String {
    let root = base_url.trim_end_matches('/');
    format!("{}{}", root, encode_path(path))
}

/// Generate an absolute URL from the site origin, the deployment root and a
/// route path. Path segments are percent-encoded.
///
/// # Examples
/// ```ignore
/// full_url_for("https://example.com", "/blog", "/posts/hello")
/// // -> "https://example.com/blog/posts/hello"
/// ```
pub fn full_url_for(url: &str, root: &str, path: &str) -> String {
    let origin = url.trim_end_matches('/');
    let root = root.trim_matches('/');
    let encoded = encode_path(path);

    if root.is_empty() {
        format!("{}{}", origin, encoded)
    } else {
        format!("{}/{}{}", origin, root, encoded)
    }
}

/// Percent-encode each segment of a path, keeping the slashes
pub fn encode_path(path: &str) -> String {
    let encoded: Vec<String> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect();
    format!("/{}", encoded.join("/"))
}

/// Extract the host name from a URL, without scheme, port, or path
///
/// # Examples
/// ```ignore
/// host_of("https://user.github.io/blog") // -> "user.github.io"
/// host_of("http://localhost:4000")       // -> "localhost"
/// ```
pub fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let authority = authority.rsplit('@').next().unwrap_or(authority);
    authority.split(':').next().unwrap_or(authority)
}
