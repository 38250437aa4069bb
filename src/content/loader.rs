//! Content loader - loads the post index and post documents from a site
//! directory

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{Document, Post, PostIndex};
use crate::Blog;

/// Errors raised while reading site content
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Invalid post file name: {0:?}")]
    InvalidFileName(String),

    #[error("Invalid post index: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl LoadError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Loads content from the site directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
}

impl<'a> ContentLoader<'a> {
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Load the post index
    pub fn load_index(&self) -> Result<PostIndex, LoadError> {
        let path = &self.blog.index_path;
        let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let index = PostIndex::from_json(&content)?;
        tracing::debug!("Loaded {} posts from {:?}", index.len(), path);
        Ok(index)
    }

    /// Load a single post by its file name under the pages directory
    pub fn load_post(&self, file: &str) -> Result<Post, LoadError> {
        let path = self.resolve(file)?;
        let content = fs::read_to_string(&path).map_err(|e| LoadError::io(&path, e))?;
        let document = Document::parse(&content);
        tracing::debug!(
            "Loaded post {:?} ({} metadata fields)",
            file,
            document.metadata.len()
        );
        Ok(Post::new(file, document))
    }

    /// Build an index from the front-matter of every markdown file in the
    /// pages directory, newest first
    pub fn scan_pages(&self) -> Result<PostIndex, LoadError> {
        let pages_dir = &self.blog.pages_dir;
        if !pages_dir.exists() {
            tracing::warn!("Pages directory {:?} does not exist", pages_dir);
            return Ok(PostIndex::default());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(pages_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let file = relative_name(pages_dir, path);
            match fs::read_to_string(path) {
                Ok(content) => posts.push(Post::new(file, Document::parse(&content)).summary()),
                Err(e) => {
                    tracing::warn!("Failed to read post {:?}: {}", path, e);
                }
            }
        }

        let mut index = PostIndex::new(posts);
        index.sort_by_date();
        Ok(index)
    }

    /// Write the index as pretty-printed JSON
    pub fn write_index(&self, index: &PostIndex) -> Result<(), LoadError> {
        let path = &self.blog.index_path;
        let json = index.to_json_pretty()?;
        fs::write(path, json + "\n").map_err(|e| LoadError::io(path, e))?;
        tracing::info!("Wrote {} posts to {:?}", index.len(), path);
        Ok(())
    }

    /// Map a post file name to a path inside the pages directory
    fn resolve(&self, file: &str) -> Result<PathBuf, LoadError> {
        let relative = Path::new(file);
        let is_safe = !file.trim().is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if !is_safe {
            return Err(LoadError::InvalidFileName(file.to_string()));
        }

        Ok(self.blog.pages_dir.join(relative))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// File name relative to `base`, always `/`-separated
fn relative_name(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
