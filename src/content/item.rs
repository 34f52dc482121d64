//! Content item model

use chrono::{DateTime, Local};

use super::FrontMatter;

/// One Markdown file after parsing and rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    /// File name without extension
    pub slug: String,

    /// Front-matter fields
    pub metadata: FrontMatter,

    /// Rendered HTML body
    pub content_html: String,
}

impl ContentItem {
    pub fn new(slug: impl Into<String>, metadata: FrontMatter, content_html: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            metadata,
            content_html: content_html.into(),
        }
    }

    /// Title from front-matter
    pub fn title(&self) -> Option<String> {
        self.metadata.title()
    }

    /// Title from front-matter, falling back to the slug
    pub fn display_title(&self) -> String {
        self.title().unwrap_or_else(|| self.slug.clone())
    }

    pub fn description(&self) -> Option<String> {
        self.metadata.description()
    }

    pub fn subtitle(&self) -> Option<String> {
        self.metadata.subtitle()
    }

    pub fn date(&self) -> Option<DateTime<Local>> {
        self.metadata.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_falls_back_to_slug() {
        let item = ContentItem::new("my-post", FrontMatter::default(), "");
        assert_eq!(item.display_title(), "my-post");

        let mut fm = FrontMatter::default();
        fm.insert("title", "My Post");
        let item = ContentItem::new("my-post", fm, "");
        assert_eq!(item.display_title(), "My Post");
    }
}
