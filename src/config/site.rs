//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::LoadError;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,

    // URL
    pub root: String,
    /// Page that displays a single post, addressed by `?file=`
    pub post_page: String,

    // Content
    /// Post index, relative to the site directory
    pub index_file: String,
    /// Directory holding post documents, relative to the site directory
    pub pages_dir: String,

    // Date format (Moment.js tokens)
    pub date_format: String,
    pub post_date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),

            root: "/".to_string(),
            post_page: "post.html".to_string(),

            index_file: "posts.json".to_string(),
            pages_dir: "pages".to_string(),

            date_format: "YYYY. MM. DD".to_string(),
            post_date_format: "YYYY년 MM월 DD일".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        // An empty file deserializes to unit, not a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Blog");
        assert_eq!(config.index_file, "posts.json");
        assert_eq!(config.pages_dir, "pages");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
pages_dir: content
giscus_repo: someone/blog
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert!(config.extra.contains_key("author"));
        assert_eq!(config.pages_dir, "content");
        assert_eq!(config.index_file, "posts.json");
        assert!(config.extra.contains_key("giscus_repo"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");

        fs::write(&path, "").unwrap();
        assert_eq!(SiteConfig::load(&path).unwrap().title, "Blog");

        fs::write(&path, "title: [unclosed").unwrap();
        assert!(matches!(SiteConfig::load(&path), Err(LoadError::Config(_))));
    }
}
