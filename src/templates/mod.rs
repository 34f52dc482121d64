//! Built-in page templates
//!
//! Each template turns a route's view into an HTML fragment that the page
//! assembler mounts into the base document. Dispatch is an exhaustive match
//! over [`View`]; the only string lookup is [`TemplateRenderer::render_named`].

use std::fmt;
use std::str::FromStr;

use crate::content::ContentItem;
use crate::error::PageError;
use crate::helpers::{html_escape, link_to, url_for};
use crate::routes::View;

/// The closed set of page templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Home,
    Posts,
    About,
    Post,
}

impl Template {
    pub const ALL: [Template; 4] = [Template::Home, Template::Posts, Template::About, Template::Post];

    pub fn name(&self) -> &'static str {
        match self {
            Template::Home => "home",
            Template::Posts => "posts",
            Template::About => "about",
            Template::Post => "post",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Template {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| PageError::UnknownTemplate(s.to_string()))
    }
}

/// Renders template fragments for one build
pub struct TemplateRenderer<'a> {
    site_title: &'a str,
    site_description: &'a str,
    base_url: &'a str,
    posts: &'a [ContentItem],
}

impl<'a> TemplateRenderer<'a> {
    /// Create a renderer; `base_url` prefixes every internal link
    pub fn new(
        site_title: &'a str,
        site_description: &'a str,
        base_url: &'a str,
        posts: &'a [ContentItem],
    ) -> Self {
        Self {
            site_title,
            site_description,
            base_url,
            posts,
        }
    }

    /// Render the fragment for a view
    pub fn render(&self, view: &View) -> Result<String, PageError> {
        match view {
            View::Home => Ok(self.home()),
            View::Posts => Ok(self.posts()),
            View::About(Some(page)) => Ok(self.about(page)),
            View::About(None) => Err(PageError::MissingAbout),
            View::Post(post) => Ok(self.post(post)),
        }
    }

    /// Render by template name with optional page data
    pub fn render_named(
        &self,
        name: &str,
        data: Option<&ContentItem>,
    ) -> Result<String, PageError> {
        let view = match name.parse::<Template>()? {
            Template::Home => View::Home,
            Template::Posts => View::Posts,
            Template::About => View::About(data.cloned()),
            Template::Post => View::Post(data.cloned().ok_or(PageError::MissingPostData)?),
        };
        self.render(&view)
    }

    /// Render a view, substituting the error fragment on a page error
    pub fn render_or_fallback(&self, view: &View) -> String {
        self.render(view).unwrap_or_else(|e| fallback(view.template().name(), e))
    }

    /// Render by name, substituting the error fragment on a page error
    pub fn render_named_or_fallback(&self, name: &str, data: Option<&ContentItem>) -> String {
        self.render_named(name, data)
            .unwrap_or_else(|e| fallback(name, e))
    }

    fn home(&self) -> String {
        let mut html = String::from(r#"<section class="home">"#);
        html.push_str(&format!(
            r#"<header class="hero"><h1>{}</h1>"#,
            html_escape(self.site_title)
        ));
        if !self.site_description.is_empty() {
            html.push_str(&format!(
                r#"<p class="tagline">{}</p>"#,
                html_escape(self.site_description)
            ));
        }
        html.push_str("</header>");
        html.push_str(&self.nav());
        html.push_str("<h2>Posts</h2>");
        html.push_str(&self.post_list());
        html.push_str("</section>");
        html
    }

    fn posts(&self) -> String {
        let mut html = String::from(r#"<section class="posts"><h1>Posts</h1>"#);
        if self.posts.is_empty() {
            html.push_str(r#"<p class="empty">No posts yet.</p>"#);
        }
        for post in self.posts {
            html.push_str(r#"<article class="post-card">"#);
            html.push_str(&format!(
                "<h2>{}</h2>",
                link_to(self.base_url, &post_path(post), &post.display_title())
            ));
            html.push_str(&time_tag(post));
            if let Some(description) = post.description() {
                html.push_str(&format!("<p>{}</p>", html_escape(&description)));
            }
            html.push_str("</article>");
        }
        html.push_str("</section>");
        html
    }

    fn about(&self, page: &ContentItem) -> String {
        let title = page.title().unwrap_or_else(|| "About".to_string());
        let mut html = String::from(r#"<article class="page about"><header>"#);
        html.push_str(&format!("<h1>{}</h1>", html_escape(&title)));
        if let Some(subtitle) = page.subtitle() {
            html.push_str(&format!(
                r#"<p class="subtitle">{}</p>"#,
                html_escape(&subtitle)
            ));
        }
        html.push_str("</header>");
        html.push_str(&format!(
            r#"<div class="page-content">{}</div></article>"#,
            page.content_html
        ));
        html
    }

    fn post(&self, post: &ContentItem) -> String {
        let mut html = String::from(r#"<article class="post"><header>"#);
        html.push_str(&format!(
            "<h1>{}</h1>",
            html_escape(&post.display_title())
        ));
        if let Some(subtitle) = post.subtitle() {
            html.push_str(&format!(
                r#"<p class="subtitle">{}</p>"#,
                html_escape(&subtitle)
            ));
        }
        html.push_str(&time_tag(post));
        html.push_str("</header>");
        html.push_str(&format!(
            r#"<div class="post-content">{}</div>"#,
            post.content_html
        ));
        html.push_str(&format!(
            r#"<footer><a class="back" href="{}">&larr; All posts</a></footer></article>"#,
            html_escape(&url_for(self.base_url, "/posts"))
        ));
        html
    }

    fn nav(&self) -> String {
        format!(
            r#"<nav class="site-nav">{} {}</nav>"#,
            link_to(self.base_url, "/posts", "Posts"),
            link_to(self.base_url, "/about", "About")
        )
    }

    fn post_list(&self) -> String {
        if self.posts.is_empty() {
            return r#"<p class="empty">No posts yet.</p>"#.to_string();
        }
        let items: String = self
            .posts
            .iter()
            .map(|post| {
                format!(
                    "<li>{}{}</li>",
                    link_to(self.base_url, &post_path(post), &post.display_title()),
                    time_tag(post)
                )
            })
            .collect();
        format!(r#"<ul class="post-list">{}</ul>"#, items)
    }
}

/// Route path of a post
pub fn post_path(post: &ContentItem) -> String {
    format!("/posts/{}", post.slug)
}

fn time_tag(item: &ContentItem) -> String {
    item.date()
        .map(|d| {
            format!(
                r#"<time datetime="{}">{}</time>"#,
                d.format("%Y-%m-%d"),
                d.format("%B %-d, %Y")
            )
        })
        .unwrap_or_default()
}

fn fallback(name: &str, error: PageError) -> String {
    tracing::warn!("Template '{}' could not render: {}", name, error);
    error.fragment()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    fn item(slug: &str, fields: &[(&str, &str)], html: &str) -> ContentItem {
        let mut fm = FrontMatter::default();
        for (k, v) in fields {
            fm.insert(*k, *v);
        }
        ContentItem::new(slug, fm, html)
    }

    fn renderer<'a>(posts: &'a [ContentItem]) -> TemplateRenderer<'a> {
        TemplateRenderer::new("My Site", "Notes & things", "/blog", posts)
    }

    #[test]
    fn test_template_names_roundtrip() {
        for t in Template::ALL {
            assert_eq!(t.name().parse::<Template>().unwrap(), t);
        }
        assert_eq!(
            "gallery".parse::<Template>(),
            Err(PageError::UnknownTemplate("gallery".to_string()))
        );
    }

    #[test]
    fn test_home_lists_posts_with_base_url() {
        let posts = vec![item("hello", &[("title", "Hello")], "")];
        let html = renderer(&posts).render(&View::Home).unwrap();
        assert!(html.contains("<h1>My Site</h1>"));
        assert!(html.contains("Notes &amp; things"));
        assert!(html.contains(r#"<a href="/blog/posts/hello">Hello</a>"#));
        assert!(html.contains(r#"<a href="/blog/about">About</a>"#));
    }

    #[test]
    fn test_post_links_encode_slug() {
        let posts = vec![item("q&a? #1", &[("title", "Q")], "")];
        let html = renderer(&posts).render(&View::Home).unwrap();
        assert!(html.contains(r#"<a href="/blog/posts/q&amp;a%3F%20%231">Q</a>"#));
    }

    #[test]
    fn test_posts_empty_state() {
        let html = renderer(&[]).render(&View::Posts).unwrap();
        assert!(html.contains("No posts yet."));
    }

    #[test]
    fn test_posts_cards_in_given_order() {
        let posts = vec![
            item("b", &[("title", "Bee"), ("date", "2024-02-01")], ""),
            item("a", &[("description", "Ay <desc>")], ""),
        ];
        let html = renderer(&posts).render(&View::Posts).unwrap();
        let bee = html.find("Bee").unwrap();
        let a = html.find(r#"/blog/posts/a""#).unwrap();
        assert!(bee < a);
        assert!(html.contains(r#"<time datetime="2024-02-01">February 1, 2024</time>"#));
        assert!(html.contains("Ay &lt;desc&gt;"));
    }

    #[test]
    fn test_post_renders_content_raw() {
        let post = item("hello", &[("title", "Hello"), ("subtitle", "Sub")], "<h1>Hi</h1>");
        let html = renderer(&[]).render(&View::Post(post)).unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains(r#"<p class="subtitle">Sub</p>"#));
        assert!(html.contains(r#"<div class="post-content"><h1>Hi</h1></div>"#));
        assert!(html.contains(r#"href="/blog/posts""#));
    }

    #[test]
    fn test_about_with_and_without_page() {
        let page = item("about", &[("title", "Who")], "<p>Me</p>");
        let r = renderer(&[]);
        let html = r.render(&View::About(Some(page))).unwrap();
        assert!(html.contains("<h1>Who</h1>"));
        assert!(html.contains("<p>Me</p>"));

        assert_eq!(r.render(&View::About(None)), Err(PageError::MissingAbout));
        assert!(r.render_or_fallback(&View::About(None)).contains("About page not found"));
    }

    #[test]
    fn test_render_named_post_without_data_falls_back() {
        let r = renderer(&[]);
        assert_eq!(r.render_named("post", None), Err(PageError::MissingPostData));
        let html = r.render_named_or_fallback("post", None);
        assert!(html.contains("not found"));
    }

    #[test]
    fn test_render_named_unknown_template_falls_back() {
        let r = renderer(&[]);
        let html = r.render_named_or_fallback("gallery", None);
        assert!(html.contains("gallery"));
    }

    #[test]
    fn test_render_named_dispatches() {
        let post = item("x", &[("title", "Named")], "");
        let r = renderer(&[]);
        assert!(r.render_named("post", Some(&post)).unwrap().contains("Named"));
        assert!(r.render_named("home", None).unwrap().contains("My Site"));
        assert!(r.render_named("posts", None).unwrap().contains("<h1>Posts</h1>"));
    }
}
