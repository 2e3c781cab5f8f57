use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use futures::future::join_all;
use reqwest::Client;

use crate::app::{Result, TidingsError};
use crate::config::NewsConfig;
use crate::domain::{Language, NewsItem};
use crate::fetcher::NewsSource;
use crate::normalizer::Normalizer;

/// Fetches every configured feed for a language and merges them.
pub struct HttpFetcher {
    client: Client,
    config: NewsConfig,
    normalizer: Normalizer,
}

impl HttpFetcher {
    pub fn new(config: NewsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("tidings/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            normalizer: Normalizer::new(),
        })
    }

    async fn fetch_feed(&self, url: &str) -> Result<Vec<NewsItem>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        let items = self.normalizer.normalize(url, &body)?;
        tracing::debug!("Fetched {} items from {}", items.len(), url);
        Ok(items)
    }
}

#[async_trait]
impl NewsSource for HttpFetcher {
    async fn fetch(&self, language: Language) -> Result<Vec<NewsItem>> {
        let urls = self.config.feeds_for(language);
        if urls.is_empty() {
            return Err(TidingsError::Config(format!(
                "No feeds configured for language '{}'",
                language
            )));
        }

        let results = join_all(urls.iter().map(|url| self.fetch_feed(url))).await;

        let mut batches = Vec::new();
        let mut first_error = None;
        for (url, result) in urls.iter().zip(results) {
            match result {
                Ok(items) => batches.push(items),
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}", url, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        if batches.is_empty() {
            if let Some(e) = first_error {
                return Err(e);
            }
        }

        let cutoff = age_cutoff(Utc::now(), self.config.max_age_hours);
        let items = merge_batches(batches, cutoff);
        tracing::info!("Loaded {} {} news items", items.len(), language);
        Ok(items)
    }
}

/// Oldest publication time still shown. `None` when the window reaches past the
/// representable range, in which case nothing is too old.
pub fn age_cutoff(now: DateTime<Utc>, max_age_hours: u64) -> Option<DateTime<Utc>> {
    i64::try_from(max_age_hours)
        .ok()
        .and_then(TimeDelta::try_hours)
        .and_then(|age| now.checked_sub_signed(age))
}

/// Merge per-feed batches: drop repeats and stale items, newest first.
///
/// Undated items are kept and sort after dated ones; ties keep feed order.
pub fn merge_batches(
    batches: Vec<Vec<NewsItem>>,
    cutoff: Option<DateTime<Utc>>,
) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    let mut items: Vec<NewsItem> = batches
        .into_iter()
        .flatten()
        .filter(|item| match (item.date, cutoff) {
            (Some(date), Some(cutoff)) => date >= cutoff,
            _ => true,
        })
        .filter(|item| seen.insert(item.url.clone()))
        .collect();

    items.sort_by(|a, b| b.date.cmp(&a.date));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(url: &str, date: Option<&str>) -> NewsItem {
        let mut item = NewsItem::new(url, url);
        item.date = date.map(|d| DateTime::parse_from_rfc3339(d).unwrap().with_timezone(&Utc));
        item
    }

    fn cutoff() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_merge_sorts_newest_first() {
        let merged = merge_batches(
            vec![
                vec![item("a", Some("2024-01-01T08:00:00Z"))],
                vec![
                    item("b", Some("2024-01-01T10:00:00Z")),
                    item("c", None),
                ],
            ],
            Some(cutoff()),
        );
        let urls: Vec<&str> = merged.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_merge_drops_duplicates_and_stale() {
        let merged = merge_batches(
            vec![
                vec![item("a", Some("2024-01-01T08:00:00Z"))],
                vec![
                    item("a", Some("2024-01-01T09:00:00Z")),
                    item("old", Some("2023-12-31T23:00:00Z")),
                ],
            ],
            Some(cutoff()),
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].url, "a");
        assert_eq!(merged[0].date, item("a", Some("2024-01-01T08:00:00Z")).date);
    }

    #[test]
    fn test_age_cutoff_subtracts_hours() {
        let now = cutoff();
        let expected = DateTime::parse_from_rfc3339("2023-12-31T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(age_cutoff(now, 24), Some(expected));
        assert_eq!(age_cutoff(now, 0), Some(now));
    }

    #[test]
    fn test_huge_max_age_disables_cutoff() {
        let now = cutoff();
        assert_eq!(age_cutoff(now, u64::MAX), None);
        assert_eq!(age_cutoff(now, 1_000_000_000_000), None);

        let merged = merge_batches(
            vec![vec![item("ancient", Some("1970-01-01T00:00:00Z"))]],
            age_cutoff(now, u64::MAX),
        );
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_no_feeds_is_config_error() {
        let config = NewsConfig {
            feeds_it: Vec::new(),
            ..Default::default()
        };
        let fetcher = HttpFetcher::new(config).unwrap();
        let result = tokio_test::block_on(fetcher.fetch(Language::Italian));
        assert!(matches!(result, Err(TidingsError::Config(_))));
    }
}
