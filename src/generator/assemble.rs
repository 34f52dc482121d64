//! Page assembly - injects title, meta tags, build info and page content
//! into the base HTML document

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

use crate::error::BuildError;
use crate::helpers::{html_escape, meta_name, meta_property};

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r"(?is)<title\b[^>]*>.*?</title\s*>").unwrap();
    static ref HEAD_CLOSE_RE: Regex = Regex::new(r"(?i)</head\s*>").unwrap();
    /// Meta tags owned by the assembler; any copies in the base document are dropped
    static ref MANAGED_META_RE: Regex = Regex::new(
        r#"(?i)[ \t]*<meta\b[^>]*?\s(?:name|property)\s*=\s*["'](?:description|og:title|og:description|og:url|og:type|twitter:card)["'][^>]*>[ \t]*(?:\r?\n)?"#
    )
    .unwrap();
}

/// Per-page metadata
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Absolute URL of the page
    pub url: String,
    /// `article` for posts, `website` otherwise
    pub og_type: &'static str,
}

/// Values identifying one build, embedded in every page
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub timestamp: String,
    pub base_url: String,
}

impl BuildInfo {
    pub fn now(base_url: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            base_url: base_url.into(),
        }
    }

    /// Single-line script tag exposing the build info to page scripts
    pub fn script_tag(&self) -> String {
        let json = serde_json::json!({
            "timestamp": self.timestamp,
            "baseUrl": self.base_url,
        });
        // Keep `</script>` out of the inline script
        let json = json.to_string().replace('<', "\\u003c");
        format!("<script>window.__BUILD__ = {};</script>", json)
    }
}

/// Base document split around its content-mount element
#[derive(Debug, Clone)]
pub struct PageAssembler {
    /// Everything up to and including the mount element's opening tag
    head: String,
    /// The mount element's closing tag and everything after it
    tail: String,
    build_script: String,
}

impl PageAssembler {
    /// Prepare the base document, failing if it has no `</head>` or no element
    /// with id `mount_id`
    pub fn new(base_html: &str, mount_id: &str, build: &BuildInfo) -> Result<Self, BuildError> {
        let missing_mount = || BuildError::MissingMount(mount_id.to_string());

        let pattern = format!(
            r#"<([A-Za-z][A-Za-z0-9-]*)\b[^>]*?\s(?i:id)\s*=\s*["']{}["'][^>]*>"#,
            regex::escape(mount_id)
        );
        let mount_re = Regex::new(&pattern).map_err(|_| missing_mount())?;
        let caps = mount_re.captures(base_html).ok_or_else(missing_mount)?;
        let open = caps.get(0).ok_or_else(missing_mount)?;
        let tag = caps[1].to_ascii_lowercase();

        let (head, tail) = if open.as_str().ends_with("/>") {
            // <div id="app" /> becomes <div id="app"></div>
            let open_tag = open.as_str().trim_end_matches("/>").trim_end();
            (
                format!("{}{}>", &base_html[..open.start()], open_tag),
                format!("</{}>{}", tag, &base_html[open.end()..]),
            )
        } else {
            let close = find_closing_tag(&base_html[open.end()..], &tag)
                .ok_or_else(missing_mount)?;
            (
                base_html[..open.end()].to_string(),
                base_html[open.end() + close..].to_string(),
            )
        };

        if !HEAD_CLOSE_RE.is_match(&head) {
            return Err(BuildError::MissingHead);
        }

        Ok(Self {
            head,
            tail,
            build_script: build.script_tag(),
        })
    }

    /// Assemble one page
    pub fn assemble(&self, meta: &PageMeta, fragment: &str) -> String {
        let head = MANAGED_META_RE.replace_all(&self.head, "");

        let title_tag = format!("<title>{}</title>", html_escape(&meta.title));
        let head = if TITLE_RE.is_match(&head) {
            TITLE_RE.replacen(&head, 1, NoExpand(&title_tag)).into_owned()
        } else {
            insert_before_head_close(&head, &format!("{}\n", title_tag))
        };

        let tags = [
            meta_name("description", &meta.description),
            meta_property("og:title", &meta.title),
            meta_property("og:description", &meta.description),
            meta_property("og:url", &meta.url),
            meta_property("og:type", meta.og_type),
            meta_name("twitter:card", "summary"),
            self.build_script.clone(),
        ];
        let mut block = String::new();
        for tag in &tags {
            block.push_str(tag);
            block.push('\n');
        }
        let head = insert_before_head_close(&head, &block);

        let mut page = String::with_capacity(head.len() + fragment.len() + self.tail.len());
        page.push_str(&head);
        page.push_str(fragment);
        page.push_str(&self.tail);
        page
    }
}

/// Assemble a single page from a base document
pub fn assemble(
    base_html: &str,
    mount_id: &str,
    build: &BuildInfo,
    meta: &PageMeta,
    fragment: &str,
) -> Result<String, BuildError> {
    Ok(PageAssembler::new(base_html, mount_id, build)?.assemble(meta, fragment))
}

fn insert_before_head_close(html: &str, insert: &str) -> String {
    match HEAD_CLOSE_RE.find(html) {
        Some(m) => format!("{}{}{}", &html[..m.start()], insert, &html[m.start()..]),
        None => html.to_string(),
    }
}

/// Byte offset of the `</tag>` closing the element whose content starts `html`,
/// counting nested elements of the same name
fn find_closing_tag(html: &str, tag: &str) -> Option<usize> {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{}", tag);
    let close = format!("</{}", tag);
    let mut depth = 1usize;
    let mut pos = 0;

    while pos < lower.len() {
        let next = lower[pos..].find('<')? + pos;
        let rest = &lower[next..];

        if rest.starts_with(&close) && is_tag_boundary(rest, close.len()) {
            depth -= 1;
            if depth == 0 {
                return Some(next);
            }
        } else if rest.starts_with(&open) && is_tag_boundary(rest, open.len()) {
            let end = rest.find('>')?;
            if !rest[..end].ends_with('/') {
                depth += 1;
            }
        }
        pos = next + 1;
    }
    None
}

fn is_tag_boundary(s: &str, at: usize) -> bool {
    s[at..]
        .chars()
        .next()
        .map(|c| c.is_ascii_whitespace() || c == '>' || c == '/')
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Placeholder</title>
  <meta name="description" content="old">
</head>
<body>
  <div id="app"><p>Loading...</p></div>
  <script src="/main.js"></script>
</body>
</html>
"#;

    fn build() -> BuildInfo {
        BuildInfo {
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            base_url: "/blog".to_string(),
        }
    }

    fn meta() -> PageMeta {
        PageMeta {
            title: "Hello - Site".to_string(),
            description: "A post".to_string(),
            url: "https://example.com/blog/posts/hello".to_string(),
            og_type: "article",
        }
    }

    #[test]
    fn test_assemble_full_page() {
        let page = assemble(BASE, "app", &build(), &meta(), "<h1>Hi</h1>").unwrap();
        assert!(page.contains("<title>Hello - Site</title>"));
        assert!(!page.contains("Placeholder"));
        assert!(page.contains(r#"<div id="app"><h1>Hi</h1></div>"#));
        assert!(!page.contains("Loading..."));
        assert!(page.contains(r#"<meta name="description" content="A post">"#));
        assert!(!page.contains(r#"content="old""#));
        assert!(page.contains(r#"<meta property="og:title" content="Hello - Site">"#));
        assert!(page.contains(r#"<meta property="og:description" content="A post">"#));
        assert!(page.contains(
            r#"<meta property="og:url" content="https://example.com/blog/posts/hello">"#
        ));
        assert!(page.contains(r#"<meta property="og:type" content="article">"#));
        assert!(page.contains(r#"<meta name="twitter:card" content="summary">"#));
        assert!(page.contains(
            r#"<script>window.__BUILD__ = {"timestamp":"2024-01-01T00:00:00Z","baseUrl":"/blog"};</script>"#
        ));
        assert!(page.contains(r#"<script src="/main.js"></script>"#));
        assert_eq!(page.matches("name=\"description\"").count(), 1);
    }

    #[test]
    fn test_managed_meta_removed_regardless_of_attribute_order() {
        let base = r#"<html><head><meta content="old" name="description"><meta data-x="1" content="x" property='og:title'><meta content="keep" name="keywords"></head><body><div id="app"></div></body></html>"#;
        let page = assemble(base, "app", &build(), &meta(), "").unwrap();
        assert_eq!(page.matches(r#"name="description""#).count(), 1);
        assert_eq!(page.matches("og:title").count(), 1);
        assert!(!page.contains(r#"content="old""#));
        assert!(page.contains(r#"<meta content="keep" name="keywords">"#));
    }

    #[test]
    fn test_data_attribute_meta_kept() {
        let base = r#"<html><head><meta data-name="description" content="custom"></head><body><div id="app"></div></body></html>"#;
        let page = assemble(base, "app", &build(), &meta(), "").unwrap();
        assert!(page.contains(r#"<meta data-name="description" content="custom">"#));
    }

    #[test]
    fn test_meta_inserted_in_head() {
        let page = assemble(BASE, "app", &build(), &meta(), "").unwrap();
        let head_end = page.find("</head>").unwrap();
        assert!(page.find("og:type").unwrap() < head_end);
        assert!(page.find("__BUILD__").unwrap() < head_end);
    }

    #[test]
    fn test_title_inserted_when_missing() {
        let base = "<html><head></head><body><main id=\"app\"></main></body></html>";
        let page = assemble(base, "app", &build(), &meta(), "x").unwrap();
        assert!(page.contains("<title>Hello - Site</title>\n"));
        assert!(page.contains(r#"<main id="app">x</main>"#));
    }

    #[test]
    fn test_title_is_escaped() {
        let mut m = meta();
        m.title = "Q&A <draft>".to_string();
        let page = assemble(BASE, "app", &build(), &m, "").unwrap();
        assert!(page.contains("<title>Q&amp;A &lt;draft&gt;</title>"));
    }

    #[test]
    fn test_nested_mount_content_replaced() {
        let base = r#"<html><head></head><body><div id="app"><div class="inner"><div></div></div></div><div id="after"></div></body></html>"#;
        let page = assemble(base, "app", &build(), &meta(), "NEW").unwrap();
        assert!(page.contains(r#"<div id="app">NEW</div><div id="after"></div>"#));
    }

    #[test]
    fn test_self_closing_mount() {
        let base = r#"<html><head></head><body><div id='app' /></body></html>"#;
        let page = assemble(base, "app", &build(), &meta(), "NEW").unwrap();
        assert!(page.contains("<div id='app'>NEW</div></body>"));
    }

    #[test]
    fn test_missing_mount_is_fatal() {
        let base = "<html><head></head><body><div id=\"root\"></div></body></html>";
        let err = assemble(base, "app", &build(), &meta(), "").unwrap_err();
        assert!(matches!(err, BuildError::MissingMount(id) if id == "app"));
    }

    #[test]
    fn test_data_attribute_is_not_mount() {
        let base = "<html><head></head><body><div data-id=\"app\"></div></body></html>";
        assert!(assemble(base, "app", &build(), &meta(), "").is_err());
    }

    #[test]
    fn test_missing_head_is_fatal() {
        let base = "<html><body><div id=\"app\"></div></body></html>";
        let err = assemble(base, "app", &build(), &meta(), "").unwrap_err();
        assert!(matches!(err, BuildError::MissingHead));
    }

    #[test]
    fn test_fragment_dollar_signs_kept() {
        let mut m = meta();
        m.title = "Costs $1".to_string();
        let page = assemble(BASE, "app", &build(), &m, "<p>$0 and $1</p>").unwrap();
        assert!(page.contains("<title>Costs $1</title>"));
        assert!(page.contains("<p>$0 and $1</p>"));
    }

    #[test]
    fn test_script_tag_escapes_closing_script() {
        let info = BuildInfo {
            timestamp: "t".to_string(),
            base_url: "</script>".to_string(),
        };
        assert!(!info.script_tag().contains("</script>\""));
        assert!(info.script_tag().contains("\\u003c/script>"));
    }
}
