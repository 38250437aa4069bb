//! Post model

use serde::Serialize;
use std::path::Path;

use super::{Document, MetaValue, PostSummary, RESERVED_LIST_KEY};

/// A post document loaded from the pages directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// File name relative to the pages directory
    pub file: String,

    /// Parsed front-matter and body
    #[serde(flatten)]
    pub document: Document,
}

impl Post {
    pub fn new(file: impl Into<String>, document: Document) -> Self {
        Self {
            file: file.into(),
            document,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.document.title()
    }

    pub fn date(&self) -> Option<&str> {
        self.document.get_str("date")
    }

    pub fn category(&self) -> Option<&str> {
        self.document.category()
    }

    pub fn tags(&self) -> &[String] {
        self.document.tags()
    }

    pub fn body(&self) -> &str {
        &self.document.body
    }

    /// Build an index entry from the front-matter
    ///
    /// The title falls back to the file stem. A plain string `tags` value
    /// becomes a single tag.
    pub fn summary(&self) -> PostSummary {
        let doc = &self.document;
        let owned = |key: &str| doc.get_str(key).map(str::to_string);

        let title = match self.title() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => Path::new(&self.file)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string(),
        };

        let tags = match doc.get(RESERVED_LIST_KEY) {
            Some(MetaValue::List(items)) => items.clone(),
            Some(MetaValue::Text(tag)) if !tag.is_empty() => vec![tag.clone()],
            _ => Vec::new(),
        };

        PostSummary {
            file: self.file.clone(),
            title,
            date: self.date().unwrap_or_default().to_string(),
            excerpt: owned("excerpt"),
            description: owned("description"),
            category: owned("category"),
            tags,
        }
    }
}
