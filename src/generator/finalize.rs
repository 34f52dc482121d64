//! Build finalization - mirrors, sitemap.xml, robots.txt and the host marker

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::BuildError;
use crate::helpers::escape_xml;

/// Marker file that turns off the static host's own site processing
pub const NOJEKYLL: &str = ".nojekyll";

/// Copy a directory tree into `dest`, returning the number of files copied
pub fn copy_dir(src: &Path, dest: &Path) -> Result<usize, BuildError> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        let relative = path.strip_prefix(src).unwrap_or(path);
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)?;
            copied += 1;
        }
    }

    tracing::debug!("Copied {} files: {:?} -> {:?}", copied, src, dest);
    Ok(copied)
}

/// Render sitemap.xml for the given absolute URLs
pub fn sitemap_xml<S: AsRef<str>>(urls: &[S], changefreq: &str) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');
    for url in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(url.as_ref())));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            escape_xml(changefreq)
        ));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Render robots.txt allowing all crawlers and pointing at the sitemap
pub fn robots_txt(sitemap_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {}\n", sitemap_url)
}

/// Write sitemap.xml, robots.txt and the marker file into `public_dir`
pub fn write_site_files<S: AsRef<str>>(
    public_dir: &Path,
    urls: &[S],
    changefreq: &str,
    sitemap_url: &str,
) -> Result<(), BuildError> {
    fs::write(public_dir.join("sitemap.xml"), sitemap_xml(urls, changefreq))?;
    tracing::debug!("Generated sitemap.xml with {} urls", urls.len());

    fs::write(public_dir.join("robots.txt"), robots_txt(sitemap_url))?;
    tracing::debug!("Generated robots.txt");

    fs::write(public_dir.join(NOJEKYLL), "")?;
    Ok(())
}
