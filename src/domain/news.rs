use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::Language;

/// A single entry in the news list. `url` doubles as the read-state key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub date: Option<DateTime<Utc>>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            url: url.into(),
            date: None,
        }
    }

    /// Build a stable key for entries that carry no link.
    pub fn synthetic_url(feed_url: &str, entry_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(feed_url.as_bytes());
        hasher.update(entry_id.as_bytes());
        format!("urn:sha256:{}", hex::encode(hasher.finalize()))
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Whether the link can be handed to a browser.
    pub fn has_web_link(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }

    pub fn formatted_time(&self, now: &DateTime<Local>, language: Language) -> String {
        match self.date {
            Some(date) => format_time(&date.with_timezone(&Local), now, language),
            None => String::new(),
        }
    }
}

/// Format a publication time relative to `now`.
///
/// Same calendar day renders as `Today - HH:MM`, otherwise `DD/MM - HH:MM`.
pub fn format_time<Tz>(date: &DateTime<Tz>, now: &DateTime<Tz>, language: Language) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let clock = date.format("%H:%M");
    if date.date_naive() == now.date_naive() {
        format!("{} - {}", language.today_label(), clock)
    } else {
        format!("{} - {}", date.format("%d/%m"), clock)
    }
}
