//! Route building
//!
//! Static routes come first in a fixed order (`/`, `/posts`, `/about`), then
//! one route per post at `/posts/<slug>` in load order.

use crate::content::ContentItem;
use crate::templates::{post_path, Template};

/// Slug of the page shown on `/about`
pub const ABOUT_SLUG: &str = "about";

/// What a route renders, with the data it needs
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Home,
    Posts,
    /// The page with slug `about`, resolved when routes are built
    About(Option<ContentItem>),
    Post(ContentItem),
}

impl View {
    pub fn template(&self) -> Template {
        match self {
            View::Home => Template::Home,
            View::Posts => Template::Posts,
            View::About(_) => Template::About,
            View::Post(_) => Template::Post,
        }
    }
}

/// One output page
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// URL path with a leading slash
    pub path: String,
    pub title: String,
    pub view: View,
}

impl Route {
    pub fn template(&self) -> Template {
        self.view.template()
    }

    /// Post data; present exactly for post routes
    pub fn data(&self) -> Option<&ContentItem> {
        match &self.view {
            View::Post(post) => Some(post),
            _ => None,
        }
    }

    /// Item whose metadata describes this page (post or about page)
    pub fn content(&self) -> Option<&ContentItem> {
        match &self.view {
            View::Post(item) | View::About(Some(item)) => Some(item),
            _ => None,
        }
    }

    /// Output file path relative to the output directory
    pub fn output_file(&self) -> String {
        let dir = self.path.trim_matches('/');
        if dir.is_empty() {
            "index.html".to_string()
        } else {
            format!("{}/index.html", dir)
        }
    }
}

/// Build every route for the site
pub fn build_routes(posts: &[ContentItem], pages: &[ContentItem], site_title: &str) -> Vec<Route> {
    let about = pages.iter().find(|p| p.slug == ABOUT_SLUG).cloned();
    let about_title = about
        .as_ref()
        .and_then(|p| p.title())
        .unwrap_or_else(|| "About".to_string());

    let mut routes = vec![
        Route {
            path: "/".to_string(),
            title: site_title.to_string(),
            view: View::Home,
        },
        Route {
            path: "/posts".to_string(),
            title: format!("Posts - {}", site_title),
            view: View::Posts,
        },
        Route {
            path: "/about".to_string(),
            title: format!("{} - {}", about_title, site_title),
            view: View::About(about),
        },
    ];

    routes.extend(posts.iter().map(|post| Route {
        path: post_path(post),
        title: format!("{} - {}", post.display_title(), site_title),
        view: View::Post(post.clone()),
    }));

    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    fn item(slug: &str, title: Option<&str>) -> ContentItem {
        let mut fm = FrontMatter::default();
        if let Some(t) = title {
            fm.insert("title", t);
        }
        ContentItem::new(slug, fm, "")
    }

    #[test]
    fn test_static_routes_only_without_posts() {
        let routes = build_routes(&[], &[], "Site");
        let paths: Vec<_> = routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/posts", "/about"]);
        assert_eq!(routes[0].title, "Site");
        assert_eq!(routes[1].title, "Posts - Site");
        assert_eq!(routes[2].title, "About - Site");
        assert!(routes.iter().all(|r| r.data().is_none()));
    }

    #[test]
    fn test_one_post_route_per_post() {
        let posts = vec![item("b-post", Some("Bee")), item("a-post", None)];
        let routes = build_routes(&posts, &[], "Site");
        assert_eq!(routes.len(), 5);

        for post in &posts {
            let matching: Vec<_> = routes
                .iter()
                .filter(|r| r.path == format!("/posts/{}", post.slug))
                .collect();
            assert_eq!(matching.len(), 1);
            assert_eq!(matching[0].template(), Template::Post);
            assert_eq!(matching[0].data(), Some(post));
        }

        // Load order is kept
        assert_eq!(routes[3].path, "/posts/b-post");
        assert_eq!(routes[3].title, "Bee - Site");
        assert_eq!(routes[4].title, "a-post - Site");
    }

    #[test]
    fn test_data_present_only_for_post_routes() {
        let posts = vec![item("p", None)];
        let pages = vec![item("about", Some("Me"))];
        for route in build_routes(&posts, &pages, "Site") {
            assert_eq!(route.data().is_some(), route.template() == Template::Post);
        }
    }

    #[test]
    fn test_about_page_resolved() {
        let pages = vec![item("contact", None), item("about", Some("Who am I"))];
        let routes = build_routes(&[], &pages, "Site");
        assert_eq!(routes[2].title, "Who am I - Site");
        assert_eq!(routes[2].view, View::About(Some(pages[1].clone())));
        assert_eq!(routes[2].content(), Some(&pages[1]));
    }

    #[test]
    fn test_output_file() {
        let routes = build_routes(&[item("hello", None)], &[], "Site");
        assert_eq!(routes[0].output_file(), "index.html");
        assert_eq!(routes[1].output_file(), "posts/index.html");
        assert_eq!(routes[3].output_file(), "posts/hello/index.html");
    }
}
