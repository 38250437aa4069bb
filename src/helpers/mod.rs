//! Helper functions for post listings and post pages
//!
//! Formatting and URL helpers shared by the commands.

mod date;
mod url;

pub use date::*;
pub use url::*;

use crate::config::SiteConfig;

/// Helpers bound to a site configuration
pub struct Helpers<'a> {
    config: &'a SiteConfig,
}

impl<'a> Helpers<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Date as shown on a post card, falling back to the raw string
    pub fn card_date(&self, date: &str) -> String {
        format_date_str(date, &self.config.date_format).unwrap_or_else(|| date.to_string())
    }

    /// Date as shown in a post header; empty when there is no date
    pub fn post_date(&self, date: Option<&str>) -> String {
        match date {
            Some(d) if !d.trim().is_empty() => {
                format_date_str(d, &self.config.post_date_format).unwrap_or_else(|| d.to_string())
            }
            _ => String::new(),
        }
    }

    pub fn post_url(&self, file: &str) -> String {
        post_url(self.config, file)
    }

    pub fn page_title(&self, title: Option<&str>) -> String {
        page_title(&self.config.title, title)
    }
}

/// Browser title for a post page: `"<title> - <site>"`, or just the site
/// title when the post has none
pub fn page_title(site_title: &str, title: Option<&str>) -> String {
    match title {
        Some(t) if !t.is_empty() => format!("{} - {}", t, site_title),
        _ => site_title.to_string(),
    }
}
