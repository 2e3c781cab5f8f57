use chrono::Utc;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{Result, TidingsError};
use crate::domain::NewsItem;

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse an RSS/Atom/JSON feed body into news items, in feed order.
    pub fn normalize(&self, feed_url: &str, body: &[u8]) -> Result<Vec<NewsItem>> {
        let feed = parser::parse(body).map_err(|e| TidingsError::FeedParse(e.to_string()))?;

        let items = feed
            .entries
            .into_iter()
            .map(|entry| {
                let link = entry.links.first().map(|l| l.href.clone());
                let url = match link {
                    Some(href) if !href.trim().is_empty() => href,
                    _ => NewsItem::synthetic_url(feed_url, &entry.id),
                };

                let description = entry
                    .summary
                    .map(|s| s.content)
                    .or_else(|| entry.content.and_then(|c| c.body))
                    .map(|text| plain_text(&text))
                    .unwrap_or_default();

                NewsItem {
                    title: entry
                        .title
                        .map(|t| plain_text(&t.content))
                        .unwrap_or_default(),
                    description,
                    url,
                    date: entry
                        .published
                        .or(entry.updated)
                        .map(|dt| dt.with_timezone(&Utc)),
                }
            })
            .collect();

        Ok(items)
    }
}

/// Drop markup and decode entities, collapsing whitespace.
fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    decode_html_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <description>A test feed</description>
    <item>
      <title>Rates &amp; markets</title>
      <link>https://example.com/item1</link>
      <guid>item-1</guid>
      <pubDate>Mon, 01 Jan 2024 08:30:00 GMT</pubDate>
      <description>&lt;p&gt;Central banks &lt;b&gt;hold&lt;/b&gt; rates.&lt;/p&gt;</description>
    </item>
    <item>
      <title>No link here</title>
      <guid>item-2</guid>
      <description>Second item</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Test Feed</title>
  <entry>
    <title>Atom Entry 1</title>
    <link href="https://example.com/atom1"/>
    <id>atom-entry-1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>This is Atom entry 1</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let items = Normalizer::new()
            .normalize("https://example.com/feed.xml", RSS_SAMPLE.as_bytes())
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Rates & markets");
        assert_eq!(items[0].url, "https://example.com/item1");
        assert_eq!(items[0].description, "Central banks hold rates.");
        assert_eq!(
            items[0].date.map(|d| d.to_rfc3339()),
            Some("2024-01-01T08:30:00+00:00".to_string())
        );
    }

    #[test]
    fn test_missing_link_gets_stable_key() {
        let normalizer = Normalizer::new();
        let first = normalizer
            .normalize("https://example.com/feed.xml", RSS_SAMPLE.as_bytes())
            .unwrap();
        let second = normalizer
            .normalize("https://example.com/feed.xml", RSS_SAMPLE.as_bytes())
            .unwrap();

        assert!(first[1].url.starts_with("urn:sha256:"));
        assert_eq!(first[1].url, second[1].url);
        assert_eq!(first[1].date, None);
    }

    #[test]
    fn test_parse_atom() {
        let items = Normalizer::new()
            .normalize("https://example.com/feed.atom", ATOM_SAMPLE.as_bytes())
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Atom Entry 1");
        assert_eq!(items[0].url, "https://example.com/atom1");
        assert_eq!(items[0].description, "This is Atom entry 1");
    }

    #[test]
    fn test_invalid_body_is_parse_error() {
        let result = Normalizer::new().normalize("https://example.com/feed.xml", b"not a feed");
        assert!(matches!(result, Err(TidingsError::FeedParse(_))));
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("<p>a <i>b</i></p>\n  c"), "a b c");
        assert_eq!(plain_text("Tom &amp; Jerry"), "Tom & Jerry");
    }
}
