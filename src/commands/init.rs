//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# mdpress configuration

# Site
title: My Site
description: Notes and writing
author: ''

# URL
## Origin the site is deployed to, and the sub-path under it
url: https://example.github.io
root: /my-site
## Hosts that build with an empty base URL
dev_hosts:
  - localhost
  - 127.0.0.1

# Directory
content_dir: content
posts_dir: posts
pages_dir: pages
public_dir: docs
images_dir: images

# Base document and the element the page content is mounted into
template: index.html
mount_id: app

# Sitemap
changefreq: weekly

# Code highlighting
highlight:
  enable: true
  line_number: false
  theme: base16-ocean.dark
"#;

const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>My Site</title>
</head>
<body>
  <div id="app"></div>
</body>
</html>
"#;

const ABOUT_PAGE: &str = r#"---
title: About
subtitle: Who writes here
description: About this site
---

This site is built with mdpress. Edit `content/pages/about.md` to change this page.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/pages"))?;
    fs::create_dir_all(target_dir.join("images"))?;

    fs::write(target_dir.join(CONFIG_FILE), CONFIG_TEMPLATE)?;
    fs::write(target_dir.join("index.html"), BASE_TEMPLATE)?;
    fs::write(target_dir.join("content/pages/about.md"), ABOUT_PAGE)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
description: The first post
date: {}
---

Welcome! This is your very first post.

## Quick Start

```bash
$ mdpress new "My New Post"
$ mdpress build
$ mdpress serve
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("content/posts/hello-world.md"), sample_post)?;

    Ok(())
}
