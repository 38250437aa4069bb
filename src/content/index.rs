//! Post index (`posts.json`) - the list of post summaries shown on the
//! front page, plus tag and search filtering over it.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::LoadError;
use crate::helpers::parse_date_string;

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Custom deserializer that handles null, a single string, or a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if value.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(vec![value.to_string()])
            }
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut tags = Vec::new();
            while let Some(tag) = seq.next_element::<String>()? {
                tags.push(tag);
            }
            Ok(tags)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// One entry of the post index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// File name under the pages directory
    pub file: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
}

impl PostSummary {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match; `needle` must already be lowercase
    pub(crate) fn matches(&self, needle: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(needle);

        contains(&self.title)
            || self.description.as_deref().is_some_and(contains)
            || self.excerpt.as_deref().is_some_and(contains)
            || self.tags.iter().any(|t| contains(t.as_str()))
            || self.category.as_deref().is_some_and(contains)
    }
}

/// Ordered list of post summaries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostIndex {
    posts: Vec<PostSummary>,
}

impl PostIndex {
    pub fn new(posts: Vec<PostSummary>) -> Self {
        Self { posts }
    }

    /// Parse an index from a JSON array of summaries
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Every distinct tag, sorted
    pub fn all_tags(&self) -> Vec<String> {
        self.posts
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Tags with the number of posts carrying them, most used first
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for post in &self.posts {
            for tag in &post.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut counts: Vec<_> = counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// Posts carrying `tag`; `None` selects every post
    pub fn filter_by_tag(&self, tag: Option<&str>) -> Vec<&PostSummary> {
        match tag {
            Some(tag) => self.posts.iter().filter(|p| p.has_tag(tag)).collect(),
            None => self.posts.iter().collect(),
        }
    }

    /// Posts whose title, description, excerpt, tags or category contain
    /// `query`, ignoring case. A blank query selects every post.
    pub fn search(&self, query: &str) -> Vec<&PostSummary> {
        match search_needle(query) {
            Some(needle) => self.posts.iter().filter(|p| p.matches(&needle)).collect(),
            None => self.posts.iter().collect(),
        }
    }

    /// Sort newest first; undated posts go last, ties by file name
    pub fn sort_by_date(&mut self) {
        self.posts.sort_by(|a, b| {
            let da = parse_date_string(&a.date);
            let db = parse_date_string(&b.date);
            db.cmp(&da).then_with(|| a.file.cmp(&b.file))
        });
    }
}

/// Trimmed, lowercased search term; `None` for a blank query
pub(crate) fn search_needle(query: &str) -> Option<String> {
    let needle = query.trim().to_lowercase();
    (!needle.is_empty()).then_some(needle)
}

impl<'a> IntoIterator for &'a PostIndex {
    type Item = &'a PostSummary;
    type IntoIter = std::slice::Iter<'a, PostSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}
