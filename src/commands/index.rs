//! Rebuild the post index from the pages directory

use anyhow::Result;

use crate::Blog;

/// Scan the pages directory and write a fresh index; returns the post count
pub fn run(blog: &Blog) -> Result<usize> {
    let start = std::time::Instant::now();
    let loader = blog.loader();

    let index = loader.scan_pages()?;
    loader.write_index(&index)?;

    tracing::info!(
        "Indexed {} posts in {:.2}s",
        index.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(index.len())
}
