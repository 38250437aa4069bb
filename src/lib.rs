//! postdeck: front-matter parsing and post index tooling for static blogs
//!
//! The core is [`content::parse`], which splits a `---` fenced front-matter
//! block from a Markdown document without ever failing. Around it sit the
//! post index (`posts.json`) with tag and search filtering, and a loader for
//! a site directory laid out as:
//!
//! ```text
//! _config.yml   optional site configuration
//! posts.json    post index
//! pages/        post documents
//! ```

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentLoader, Post, PostIndex};

/// A blog site directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Directory holding post documents
    pub pages_dir: PathBuf,
    /// Post index file
    pub index_path: PathBuf,
}

impl Blog {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let pages_dir = base_dir.join(&config.pages_dir);
        let index_path = base_dir.join(&config.index_file);

        Ok(Self {
            config,
            pages_dir,
            index_path,
        })
    }

    pub fn loader(&self) -> ContentLoader<'_> {
        ContentLoader::new(self)
    }

    /// Load the post index
    pub fn load_index(&self) -> Result<PostIndex> {
        Ok(self.loader().load_index()?)
    }

    /// Load one post by file name
    pub fn load_post(&self, file: &str) -> Result<Post> {
        Ok(self.loader().load_post(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_blog_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.pages_dir, dir.path().join("pages"));
        assert_eq!(blog.index_path, dir.path().join("posts.json"));
    }

    #[test]
    fn test_blog_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "title: Notes\npages_dir: posts\nindex_file: data/index.json\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.title, "Notes");
        assert_eq!(blog.pages_dir, dir.path().join("posts"));
        assert_eq!(blog.index_path, dir.path().join("data/index.json"));
    }

    #[test]
    fn test_blog_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: [").unwrap();
        assert!(Blog::new(dir.path()).is_err());
    }
}
