//! Show a single post, or parse an arbitrary document

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::{Document, MetaValue, Post};
use crate::helpers::Helpers;
use crate::Blog;

/// Load a post from the pages directory and print it
pub fn run(blog: &Blog, file: &str, json: bool) -> Result<()> {
    let post = blog.load_post(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", render(&Helpers::new(&blog.config), &post));
    }

    Ok(())
}

/// Parse any file as a front-matter document and print it as JSON
pub fn parse_file(path: &Path) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let document = Document::parse(&content);
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

/// Plain-text view of a post: header lines, a blank line, then the body
fn render(helpers: &Helpers<'_>, post: &Post) -> String {
    let mut out = String::new();

    out.push_str(&helpers.page_title(post.title()));
    out.push('\n');

    let date = helpers.post_date(post.date());
    if !date.is_empty() {
        out.push_str(&format!("date: {}\n", date));
    }
    if let Some(category) = post.category() {
        out.push_str(&format!("category: {}\n", category));
    }
    if !post.tags().is_empty() {
        out.push_str(&format!("tags: {}\n", post.tags().join(", ")));
    }

    // Remaining fields as they were written
    for (key, value) in &post.document.metadata {
        if matches!(key.as_str(), "title" | "date" | "category" | "tags") {
            continue;
        }
        let value = match value {
            MetaValue::Text(s) => s.clone(),
            MetaValue::List(items) => items.join(", "),
        };
        out.push_str(&format!("{}: {}\n", key, value));
    }

    out.push_str(&format!("url: {}\n", helpers.post_url(&post.file)));
    out.push('\n');
    out.push_str(post.body());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_render() {
        let config = SiteConfig::default();
        let helpers = Helpers::new(&config);
        let post = Post::new(
            "hello.md",
            Document::parse(
                "---\ntitle: Hello\ndate: 2024-01-15\ncategory: Notes\ntags: [a, b]\nauthor: me\n---\n# Hi\n",
            ),
        );

        assert_eq!(
            render(&helpers, &post),
            "Hello - Blog\ndate: 2024년 01월 15일\ncategory: Notes\ntags: a, b\nauthor: me\nurl: /post.html?file=hello.md\n\n# Hi\n"
        );
    }

    #[test]
    fn test_render_untitled() {
        let config = SiteConfig::default();
        let helpers = Helpers::new(&config);
        let post = Post::new("x.md", Document::parse("body only"));
        assert_eq!(
            render(&helpers, &post),
            "Blog\nurl: /post.html?file=x.md\n\nbody only"
        );
    }
}
