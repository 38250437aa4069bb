//! List posts from the index

use anyhow::Result;

use crate::content::{search_needle, PostIndex, PostSummary};
use crate::helpers::Helpers;
use crate::Blog;

/// List posts, optionally narrowed by tag and search query
pub fn run(blog: &Blog, tag: Option<&str>, query: Option<&str>) -> Result<()> {
    let index = blog.load_index()?;
    let posts = select(&index, tag, query);

    tracing::info!(
        "Filter: tag={} query={:?} - {} of {} posts",
        tag.unwrap_or("(all)"),
        query.unwrap_or(""),
        posts.len(),
        index.len()
    );

    if posts.is_empty() {
        println!("No posts.");
        return Ok(());
    }

    let helpers = Helpers::new(&blog.config);
    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("  {}", format_line(&helpers, post));
    }

    Ok(())
}

/// Apply the tag filter, then the search query
pub fn select<'a>(
    index: &'a PostIndex,
    tag: Option<&str>,
    query: Option<&str>,
) -> Vec<&'a PostSummary> {
    let by_tag = index.filter_by_tag(tag);
    match query.and_then(search_needle) {
        Some(needle) => by_tag.into_iter().filter(|p| p.matches(&needle)).collect(),
        None => by_tag,
    }
}

fn format_line(helpers: &Helpers<'_>, post: &PostSummary) -> String {
    let mut line = format!("{} - {}", helpers.card_date(&post.date), post.title);
    if let Some(category) = &post.category {
        line.push_str(&format!(" ({})", category));
    }
    if !post.tags.is_empty() {
        line.push_str(&format!(" #{}", post.tags.join(" #")));
    }
    line.push_str(&format!(" [{}]", post.file));
    line
}
