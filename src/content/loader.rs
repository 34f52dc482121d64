//! Content loader - loads posts and pages from the content directory

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentItem, FrontMatter, MarkdownRenderer};
use crate::error::BuildError;
use crate::Site;

/// Loads content items from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::with_config(&site.config.highlight);
        Self { site, renderer }
    }

    /// Load all posts from `<content>/posts`
    pub fn load_posts(&self) -> Result<Vec<ContentItem>, BuildError> {
        self.load_dir(&self.site.posts_dir())
    }

    /// Load all pages from `<content>/pages`
    pub fn load_pages(&self) -> Result<Vec<ContentItem>, BuildError> {
        self.load_dir(&self.site.pages_dir())
    }

    /// Load every `.md` file directly inside `dir`, sorted by file name
    ///
    /// Subdirectories are not descended into. Any unreadable file or invalid
    /// front-matter fails the whole load.
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<ContentItem>, BuildError> {
        if !dir.is_dir() {
            return Err(BuildError::MissingDirectory(dir.to_path_buf()));
        }

        let mut items = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file() && is_markdown_file(path) {
                items.push(self.load_item(path)?);
            }
        }

        tracing::debug!("Loaded {} items from {:?}", items.len(), dir);
        Ok(items)
    }

    /// Load a single content item from a file
    fn load_item(&self, path: &Path) -> Result<ContentItem, BuildError> {
        let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (metadata, body) =
            FrontMatter::parse(&content).map_err(|source| BuildError::FrontMatter {
                path: path.to_path_buf(),
                source,
            })?;

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content_html = self.renderer.render(body);

        Ok(ContentItem::new(slug, metadata, content_html))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}
