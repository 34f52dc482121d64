//! mdpress: build a static site from Markdown posts and pages
//!
//! Content files with YAML front-matter are rendered into a fixed set of
//! page templates, mounted into a base HTML document with title and meta
//! tags, and written to an output directory together with a sitemap,
//! robots.txt and mirrored assets.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod routes;
pub mod server;
pub mod templates;

pub use error::{BuildError, PageError};

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// A site on disk: its configuration and resolved directories
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory holding posts and pages
    pub content_dir: PathBuf,
    /// Output directory
    pub public_dir: PathBuf,
    /// Images directory, mirrored into the output when present
    pub images_dir: PathBuf,
    /// Base HTML document
    pub template_path: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from a directory and an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let images_dir = base_dir.join(&config.images_dir);
        let template_path = base_dir.join(&config.template);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            images_dir,
            template_path,
        }
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.content_dir.join(&self.config.posts_dir)
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.content_dir.join(&self.config.pages_dir)
    }

    /// Build the site for `host`, or for the host of the configured URL
    pub fn build(&self, host: Option<&str>) -> Result<()> {
        commands::build::run(self, host)
    }

    /// Remove the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
