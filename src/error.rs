//! Error types
//!
//! Two families: [`BuildError`] aborts the whole build, [`PageError`] only
//! affects a single page and is replaced by an in-page error fragment.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::helpers::html_escape;

/// Fatal errors that abort the build
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid front-matter in {}: {source}", .path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Base template has no element with id \"{0}\"")]
    MissingMount(String),

    #[error("Base template has no </head> tag")]
    MissingHead,

    #[error("Refusing to clear output directory {}: it overlaps the site sources", .0.display())]
    UnsafeOutput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Recoverable errors raised while rendering one page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Post route has no post data")]
    MissingPostData,

    #[error("No page with slug \"about\"")]
    MissingAbout,
}

impl PageError {
    /// Visible HTML fragment shown in place of the page content
    pub fn fragment(&self) -> String {
        match self {
            PageError::UnknownTemplate(name) => format!(
                r#"<section class="render-error"><h1>Rendering error</h1><p>Unknown template: <code>{}</code></p></section>"#,
                html_escape(name)
            ),
            PageError::MissingPostData => r#"<section class="not-found"><h1>Post not found</h1><p>The requested post could not be found.</p></section>"#.to_string(),
            PageError::MissingAbout => r#"<section class="not-found"><h1>About page not found</h1><p>Add <code>pages/about.md</code> to fill this page.</p></section>"#.to_string(),
        }
    }
}
