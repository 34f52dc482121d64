//! List site content

use anyhow::Result;

use crate::content::ContentLoader;
use crate::routes::build_routes;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(site);

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let date = post
                    .date()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "----------".to_string());
                println!("  {} - {} [{}.md]", date, post.display_title(), post.slug);
            }
        }
        "page" | "pages" => {
            let pages = loader.load_pages()?;
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {} [{}.md]", page.display_title(), page.slug);
            }
        }
        "route" | "routes" => {
            let posts = loader.load_posts()?;
            let pages = loader.load_pages()?;
            let routes = build_routes(&posts, &pages, &site.config.title);
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {:<30} {:<6} {}", route.path, route.template().name(), route.title);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, route",
                content_type
            );
        }
    }

    Ok(())
}
