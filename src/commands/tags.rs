//! List tags used across the index

use anyhow::Result;

use crate::Blog;

pub fn run(blog: &Blog) -> Result<()> {
    let index = blog.load_index()?;
    let counts = index.tag_counts();

    println!("Tags ({}):", counts.len());
    for (tag, count) in counts {
        println!("  {} ({})", tag, count);
    }

    Ok(())
}
