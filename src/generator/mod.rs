//! Generator module - builds every route into the output directory

mod assemble;
pub mod finalize;

pub use assemble::{assemble, BuildInfo, PageAssembler, PageMeta};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::content::{ContentItem, ContentLoader};
use crate::error::BuildError;
use crate::helpers::full_url_for;
use crate::routes::{build_routes, Route};
use crate::templates::{Template, TemplateRenderer};
use crate::Site;

/// Static site generator for one build
pub struct Generator<'a> {
    site: &'a Site,
    build: BuildInfo,
}

impl<'a> Generator<'a> {
    /// Create a generator building for `host`; development hosts get an
    /// empty base URL
    pub fn new(site: &'a Site, host: &str) -> Self {
        let build = BuildInfo::now(site.config.base_url_for(host));
        Self { site, build }
    }

    /// Create a generator with explicit build info
    pub fn with_build_info(site: &'a Site, build: BuildInfo) -> Self {
        Self { site, build }
    }

    pub fn build_info(&self) -> &BuildInfo {
        &self.build
    }

    /// Generate the entire site, returning the routes written
    ///
    /// The output directory is removed and recreated. The first fatal error
    /// stops the build; files already written are left in place.
    pub fn generate(&self) -> Result<Vec<Route>, BuildError> {
        let start = Instant::now();
        let config = &self.site.config;

        self.prepare_output()?;

        let base_html = read_file(&self.site.template_path)?;
        let assembler = PageAssembler::new(&base_html, &config.mount_id, &self.build)?;

        let loader = ContentLoader::new(self.site);
        let posts = loader.load_posts()?;
        let pages = loader.load_pages()?;
        tracing::info!("Loaded {} posts and {} pages", posts.len(), pages.len());

        let routes = build_routes(&posts, &pages, &config.title);
        let renderer = TemplateRenderer::new(
            &config.title,
            &config.description,
            &self.build.base_url,
            &posts,
        );

        for route in &routes {
            let fragment = renderer.render_or_fallback(&route.view);
            let html = assembler.assemble(&self.page_meta(route), &fragment);
            self.write_route(route, &html)?;
        }
        tracing::info!("Generated {} pages", routes.len());

        self.finalize(&routes)?;

        tracing::info!("Built in {:.2}s", start.elapsed().as_secs_f64());
        Ok(routes)
    }

    /// Remove and recreate the output directory, refusing when it overlaps
    /// any site source
    fn prepare_output(&self) -> Result<(), BuildError> {
        let site = self.site;
        let public_dir = &site.public_dir;
        let output = resolve(public_dir);

        let inside_output = [
            &site.base_dir,
            &site.content_dir,
            &site.images_dir,
            &site.template_path,
        ]
        .into_iter()
        .any(|source| resolve(source).starts_with(&output));
        let inside_source = [&site.content_dir, &site.images_dir]
            .into_iter()
            .any(|source| output.starts_with(resolve(source)));

        if inside_output || inside_source {
            return Err(BuildError::UnsafeOutput(public_dir.clone()));
        }
        if public_dir.exists() {
            fs::remove_dir_all(public_dir)?;
            tracing::debug!("Deleted: {:?}", public_dir);
        }
        fs::create_dir_all(public_dir)?;
        Ok(())
    }

    /// Metadata for a route's head tags
    fn page_meta(&self, route: &Route) -> PageMeta {
        let config = &self.site.config;
        let description = route
            .content()
            .and_then(ContentItem::description)
            .unwrap_or_else(|| config.description.clone());

        PageMeta {
            title: route.title.clone(),
            description,
            url: full_url_for(&config.url, &config.root, &route.path),
            og_type: match route.template() {
                Template::Post => "article",
                _ => "website",
            },
        }
    }

    fn write_route(&self, route: &Route, html: &str) -> Result<(), BuildError> {
        let output_path = self.site.public_dir.join(route.output_file());
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy mirrors and write sitemap.xml, robots.txt and the marker file
    fn finalize(&self, routes: &[Route]) -> Result<(), BuildError> {
        let config = &self.site.config;
        let public_dir = &self.site.public_dir;

        finalize::copy_dir(
            &self.site.content_dir,
            &public_dir.join(dir_name(&self.site.content_dir)),
        )?;

        if self.site.images_dir.is_dir() {
            finalize::copy_dir(
                &self.site.images_dir,
                &public_dir.join(dir_name(&self.site.images_dir)),
            )?;
        } else {
            tracing::debug!("No images directory at {:?}", self.site.images_dir);
        }

        let urls: Vec<String> = routes
            .iter()
            .map(|r| full_url_for(&config.url, &config.root, &r.path))
            .collect();
        let sitemap_url = full_url_for(&config.url, &config.root, "/sitemap.xml");
        finalize::write_site_files(public_dir, &urls, &config.changefreq, &sitemap_url)?;

        tracing::info!("Generated sitemap.xml and robots.txt");
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Absolute `path` with links and `..` resolved; components that do not
/// exist yet are appended to their nearest existing ancestor
fn resolve(path: &Path) -> PathBuf {
    let mut existing = path.to_path_buf();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.file_name(), existing.parent()) {
            (Some(name), Some(parent)) => {
                missing.push(name.to_os_string());
                existing = parent.to_path_buf();
            }
            _ => break,
        }
    }

    let mut resolved = fs::canonicalize(&existing).unwrap_or(existing);
    for name in missing.iter().rev() {
        resolved.push(name);
    }
    resolved
}

fn dir_name(path: &Path) -> &std::ffi::OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}
