//! Content module - handles front-matter, markdown, and loading content items

mod frontmatter;
mod item;
pub mod loader;
mod markdown;

pub use frontmatter::FrontMatter;
pub use item::ContentItem;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
