//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::helpers::host_of;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    /// Origin the site is deployed to, e.g. `https://user.github.io`
    pub url: String,
    /// Deployment sub-path, e.g. `/blog`. Empty when served from the origin root.
    pub root: String,
    /// Host names treated as local development, where the base URL is empty
    pub dev_hosts: Vec<String>,

    // Directory
    pub content_dir: String,
    pub posts_dir: String,
    pub pages_dir: String,
    pub public_dir: String,
    pub images_dir: String,

    // Base document
    pub template: String,
    pub mount_id: String,

    // Sitemap
    pub changefreq: String,

    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            description: String::new(),
            author: String::new(),

            url: "http://localhost:4000".to_string(),
            root: String::new(),
            dev_hosts: vec!["localhost".to_string(), "127.0.0.1".to_string()],

            content_dir: "content".to_string(),
            posts_dir: "posts".to_string(),
            pages_dir: "pages".to_string(),
            public_dir: "docs".to_string(),
            images_dir: "images".to_string(),

            template: "index.html".to_string(),
            mount_id: "app".to_string(),

            changefreq: "weekly".to_string(),

            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Host name of the configured deployment URL
    pub fn default_host(&self) -> &str {
        host_of(&self.url)
    }

    /// Whether `host` is a local development host
    pub fn is_dev_host(&self, host: &str) -> bool {
        self.dev_hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }

    /// Base URL prefixed to every internal link when building for `host`
    ///
    /// Empty for development hosts, otherwise the deployment root without a
    /// trailing slash.
    pub fn base_url_for(&self, host: &str) -> String {
        if self.is_dev_host(host) {
            String::new()
        } else {
            let root = self.root.trim_matches('/');
            if root.is_empty() {
                String::new()
            } else {
                format!("/{}", root)
            }
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub line_number: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            line_number: false,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.public_dir, "docs");
        assert_eq!(config.mount_id, "app");
        assert_eq!(config.changefreq, "weekly");
        assert!(config.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
url: https://user.github.io
root: /blog/
highlight:
  line_number: true
github_username: someone
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.root, "/blog/");
        assert_eq!(config.content_dir, "content");
        assert!(config.highlight.line_number);
        assert!(config.highlight.enable);
        assert!(config.extra.contains_key("github_username"));
    }

    #[test]
    fn test_base_url_for_dev_and_deploy_hosts() {
        let config = SiteConfig {
            url: "https://user.github.io".to_string(),
            root: "/blog/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.default_host(), "user.github.io");
        assert_eq!(config.base_url_for("user.github.io"), "/blog");
        assert_eq!(config.base_url_for("localhost"), "");
        assert_eq!(config.base_url_for("LOCALHOST"), "");
        assert_eq!(config.base_url_for("127.0.0.1"), "");
    }

    #[test]
    fn test_base_url_empty_root() {
        let config = SiteConfig {
            url: "https://example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url_for("example.com"), "");
    }
}
