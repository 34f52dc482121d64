//! Create a new post or page

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::FrontMatter;
use crate::Site;

/// Create a new post or page file with title and date front-matter
///
/// Returns the path of the created file.
pub fn create(site: &Site, title: &str, kind: &str) -> Result<PathBuf> {
    let target_dir = match kind {
        "post" => site.posts_dir(),
        "page" => site.pages_dir(),
        _ => anyhow::bail!("Unknown kind: {}. Available: post, page", kind),
    };

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} has no usable characters for a file name", title);
    }

    fs::create_dir_all(&target_dir)?;
    let file_path = target_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let mut front_matter = FrontMatter::default();
    front_matter.insert("title", title);
    front_matter.insert("date", now.format("%Y-%m-%d %H:%M:%S").to_string());

    let content = format!("---\n{}---\n", front_matter.to_yaml()?);
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_post() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        let path = create(&site, "My New: Post", "post").unwrap();
        assert_eq!(path, site.posts_dir().join("my-new-post.md"));

        let text = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&text).unwrap();
        assert_eq!(fm.title(), Some("My New: Post".to_string()));
        assert!(fm.date().is_some());
        assert_eq!(body, "");
    }

    #[test]
    fn test_create_page_and_refuse_duplicate() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        let path = create(&site, "About", "page").unwrap();
        assert_eq!(path, site.pages_dir().join("about.md"));
        assert!(create(&site, "About", "page").is_err());
    }

    #[test]
    fn test_unknown_kind() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert!(create(&site, "x", "draft").is_err());
    }
}
