//! Front-matter parsing
//!
//! A document optionally starts with a `---` fenced block of `key: value`
//! lines. Everything after the closing fence is the body and is left
//! untouched. Parsing never fails: input without a well-formed block simply
//! has no metadata.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The only key whose bracketed value is parsed as a list.
///
/// Other list-shaped values (`categories: [a, b]`) stay plain strings.
pub const RESERVED_LIST_KEY: &str = "tags";

const BOM: char = '\u{feff}';

lazy_static! {
    static ref FRONT_MATTER_RE: Regex =
        Regex::new(r"\A---\r?\n((?s:.*?))\r?\n---\r?\n((?s:.*))\z")
            .expect("front-matter pattern is valid");
}

/// A single metadata value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
}

impl MetaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            MetaValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetaValue::Text(_) => None,
            MetaValue::List(items) => Some(items),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<Vec<&str>> for MetaValue {
    fn from(items: Vec<&str>) -> Self {
        MetaValue::List(items.into_iter().map(String::from).collect())
    }
}

/// Metadata keys in the order they first appeared
pub type Metadata = IndexMap<String, MetaValue>;

/// A parsed document: front-matter metadata plus the untouched body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: Metadata,
    pub body: String,
}

impl Document {
    /// Parse a raw document. See [`parse`].
    pub fn parse(input: &str) -> Self {
        parse(input)
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }

    /// Get a metadata value if it is a plain string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn category(&self) -> Option<&str> {
        self.get_str("category")
    }

    /// Tags, when the `tags` value was parsed as a list
    ///
    /// A plain string `tags` value (e.g. `tags: a, b`) yields no tags here.
    pub fn tags(&self) -> &[String] {
        self.get(RESERVED_LIST_KEY)
            .and_then(MetaValue::as_list)
            .unwrap_or(&[])
    }
}

/// Split `input` into front-matter metadata and body.
///
/// A leading byte-order mark is dropped. Without a `---` fenced block at the
/// very start, the metadata is empty and the body is the whole input.
pub fn parse(input: &str) -> Document {
    let input = input.strip_prefix(BOM).unwrap_or(input);

    let Some(caps) = FRONT_MATTER_RE.captures(input) else {
        return Document {
            metadata: Metadata::new(),
            body: input.to_string(),
        };
    };

    let block = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    let mut metadata = Metadata::new();
    for line in block.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some((key, value)) = parse_line(line) {
            metadata.insert(key, value);
        }
    }

    Document {
        metadata,
        body: body.to_string(),
    }
}

fn parse_line(line: &str) -> Option<(String, MetaValue)> {
    // A colon in the first column has no key in front of it
    let colon = line.find(':').filter(|&pos| pos > 0)?;

    let key = trim(&line[..colon]);
    let value = unquote(trim(&line[colon + 1..]));

    let value = if key == RESERVED_LIST_KEY && value.starts_with('[') && value.ends_with(']') {
        MetaValue::List(parse_list(value))
    } else {
        MetaValue::Text(value.to_string())
    };

    Some((key.to_string(), value))
}

/// Parse a bracketed list, preferring strict JSON and falling back to a
/// plain comma split.
fn parse_list(value: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(value) {
        Ok(items) => items,
        Err(e) => {
            tracing::debug!("Tag list {:?} is not a JSON array ({}), splitting on commas", value, e);
            value[1..value.len() - 1]
                .split(',')
                .map(|item| strip_quote_ends(trim(item)).to_string())
                .collect()
        }
    }
}

/// Strip one layer of matching `"` or `'` quotes
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.starts_with(quote) && value.ends_with(quote) {
            return value.get(1..value.len() - 1).unwrap_or("");
        }
    }
    value
}

/// Strip one leading and one trailing quote character, independently
fn strip_quote_ends(item: &str) -> &str {
    let is_quote = |c: char| c == '"' || c == '\'';
    let item = item.strip_prefix(is_quote).unwrap_or(item);
    item.strip_suffix(is_quote).unwrap_or(item)
}

fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> MetaValue {
        MetaValue::from(s)
    }

    #[test]
    fn test_parse_full_document() {
        let content = "---\ntitle: \"Hello World\"\ndate: 2024-01-15\ntags: [intro, \"getting started\"]\n---\n# Body text\n";

        let doc = parse(content);
        assert_eq!(doc.metadata.len(), 3);
        assert_eq!(doc.get("title"), Some(&text("Hello World")));
        assert_eq!(doc.get("date"), Some(&text("2024-01-15")));
        assert_eq!(
            doc.get("tags"),
            Some(&MetaValue::from(vec!["intro", "getting started"]))
        );
        assert_eq!(doc.body, "# Body text\n");
    }

    #[test]
    fn test_no_front_matter() {
        for content in [
            "",
            "just some text",
            "# Heading\n\n---\ntitle: x\n---\n",
            "---\ntitle: unterminated\n",
            "---\ntitle: no newline after fence\n---",
            " ---\ntitle: indented\n---\nbody",
        ] {
            let doc = parse(content);
            assert!(doc.metadata.is_empty(), "unexpected metadata for {:?}", content);
            assert_eq!(doc.body, content);
        }
    }

    #[test]
    fn test_bom_is_stripped() {
        let plain = "---\ntitle: x\n---\nbody";
        let with_bom = format!("\u{feff}{}", plain);
        assert_eq!(parse(&with_bom), parse(plain));

        let doc = parse("\u{feff}no front matter");
        assert_eq!(doc.body, "no front matter");
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = parse("---\r\ntitle: Windows\r\nauthor: me\r\n---\r\nline one\r\nline two\r\n");
        assert_eq!(doc.title(), Some("Windows"));
        assert_eq!(doc.get_str("author"), Some("me"));
        assert_eq!(doc.body, "line one\r\nline two\r\n");
    }

    #[test]
    fn test_value_trimmed() {
        let doc = parse("---\n  layout  :   post   \n---\n");
        assert_eq!(doc.get_str("layout"), Some("post"));
        assert_eq!(doc.body, "");
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let doc = parse("---\nlink: https://example.com:8080/a\n---\n");
        assert_eq!(doc.get_str("link"), Some("https://example.com:8080/a"));
    }

    #[test]
    fn test_quotes_stripped_once() {
        let doc = parse("---\na: \"v a l\"\nb: 'single'\nc: \"'nested'\"\nd: \"stray\ne: 'mixed\"\nf: \"\"\n---\n");
        assert_eq!(doc.get_str("a"), Some("v a l"));
        assert_eq!(doc.get_str("b"), Some("single"));
        assert_eq!(doc.get_str("c"), Some("'nested'"));
        assert_eq!(doc.get_str("d"), Some("\"stray"));
        assert_eq!(doc.get_str("e"), Some("'mixed\""));
        assert_eq!(doc.get_str("f"), Some(""));
    }

    #[test]
    fn test_lone_quote_value_becomes_empty() {
        let doc = parse("---\nq: \"\n---\n");
        assert_eq!(doc.get_str("q"), Some(""));
    }

    #[test]
    fn test_json_tags() {
        let doc = parse("---\ntags: [\"x\", \"y\"]\n---\n");
        assert_eq!(doc.tags(), ["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_quoted_tag_list_is_unquoted_first() {
        let doc = parse("---\ntags: '[\"rust\"]'\n---\n");
        assert_eq!(doc.tags(), ["rust".to_string()]);
    }

    #[test]
    fn test_malformed_tags_fall_back_to_split() {
        let doc = parse("---\ntags: [x, \"y]\n---\nbody");
        assert_eq!(doc.get("tags"), Some(&MetaValue::from(vec!["x", "y"])));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_fallback_split_trims_and_strips_each_item() {
        let doc = parse("---\ntags: [ 'a' ,  b ,\"c\", 'd\"]\n---\n");
        assert_eq!(doc.get("tags"), Some(&MetaValue::from(vec!["a", "b", "c", "d"])));
    }

    #[test]
    fn test_non_string_json_tags_fall_back_to_split() {
        let doc = parse("---\ntags: [\"a\", 1]\n---\n");
        assert_eq!(doc.get("tags"), Some(&MetaValue::from(vec!["a", "1"])));
    }

    #[test]
    fn test_empty_tag_list() {
        let doc = parse("---\ntags: []\n---\n");
        assert_eq!(doc.get("tags"), Some(&MetaValue::List(Vec::new())));
    }

    #[test]
    fn test_plain_tags_stay_text() {
        let doc = parse("---\ntags: rust, cli\n---\n");
        assert_eq!(doc.get_str("tags"), Some("rust, cli"));
        assert!(doc.tags().is_empty());
    }

    #[test]
    fn test_only_tags_key_gets_list_parsing() {
        let doc = parse("---\ncategories: [\"a\", \"b\"]\ncount: 42\n---\n");
        assert_eq!(doc.get_str("categories"), Some("[\"a\", \"b\"]"));
        assert_eq!(doc.get_str("count"), Some("42"));
    }

    #[test]
    fn test_leading_colon_line_ignored() {
        let doc = parse("---\n: novalue\ntitle: kept\n---\n");
        assert_eq!(doc.metadata.len(), 1);
        assert_eq!(doc.title(), Some("kept"));
        assert!(doc.get("").is_none());
    }

    #[test]
    fn test_lines_without_colon_ignored() {
        let doc = parse("---\n\nnot a pair\n# comment\ntitle: x\n---\n");
        assert_eq!(doc.metadata.len(), 1);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let doc = parse("---\na: 1\na: 2\n---\n");
        assert_eq!(doc.get_str("a"), Some("2"));
        assert_eq!(doc.metadata.len(), 1);
    }

    #[test]
    fn test_body_after_first_closing_fence() {
        let doc = parse("---\ntitle: x\n---\nintro\n---\nmore\n");
        assert_eq!(doc.title(), Some("x"));
        assert_eq!(doc.body, "intro\n---\nmore\n");
    }

    #[test]
    fn test_empty_block_line() {
        let doc = parse("---\n\n---\nbody");
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_document_serializes_as_plain_json() {
        let doc = parse("---\ntitle: x\ntags: [a]\n---\nbody");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "metadata": { "title": "x", "tags": ["a"] }, "body": "body" })
        );
    }
}
