use chrono::{DateTime, Local, Utc};

use crate::app::{AppContext, Result};
use crate::clock::{Clock, SystemClock};
use crate::domain::{Language, NewsItem, ReadRecord};
use crate::read_state::READ_WINDOW_MS;

/// Fetch the news for the context language and print it, unread first-marked.
pub async fn list_news(ctx: &AppContext) -> Result<()> {
    let items = ctx.source.fetch(ctx.language).await?;

    if items.is_empty() {
        println!("{}", ctx.language.no_news_label());
        return Ok(());
    }

    let mut read_state = ctx.read_state();
    read_state.load();
    let now = Local::now();

    for item in &items {
        println!(
            "{}",
            format_news_line(item, read_state.is_read(&item.url), &now, ctx.language)
        );
    }

    Ok(())
}

pub fn mark_read(ctx: &AppContext, url: &str) -> Result<()> {
    let mut read_state = ctx.read_state();
    read_state.load();

    if read_state.mark_read(url) {
        println!("Marked as read: {}", url);
    } else {
        println!("Already read: {}", url);
    }
    Ok(())
}

pub fn show_read_state(ctx: &AppContext) -> Result<()> {
    let mut read_state = ctx.read_state();
    read_state.load();

    let records = read_state.records();
    if records.is_empty() {
        println!("Nothing read in the last 24 hours");
        return Ok(());
    }

    let now = SystemClock.now_millis();
    for record in records {
        println!("{}", format_record_line(record, now));
    }
    Ok(())
}

pub fn format_news_line(
    item: &NewsItem,
    is_read: bool,
    now: &DateTime<Local>,
    language: Language,
) -> String {
    let read_marker = if is_read { " " } else { "●" };
    let time = item.formatted_time(now, language);
    format!("{} {:<16} {}\n  {}", read_marker, time, item.display_title(), item.url)
}

pub fn format_record_line(record: &ReadRecord, now_ms: i64) -> String {
    let read_at = DateTime::<Utc>::from_timestamp_millis(record.read_at_ms)
        .map(|d| d.with_timezone(&Local).format("%d/%m %H:%M").to_string())
        .unwrap_or_else(|| "?".to_string());
    let remaining_min = (READ_WINDOW_MS - record.age_ms(now_ms)).max(0) / 60_000;

    format!(
        "{}  read {} (expires in {}h{:02}m)",
        record.id,
        read_at,
        remaining_min / 60,
        remaining_min % 60
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::TimeZone;

    use super::*;
    use crate::app::SharedStore;
    use crate::config::Config;
    use crate::fetcher::NewsSource;
    use crate::read_state::SEEN_NEWS_KEY;
    use crate::store::{KeyValueStore, MemoryStore};

    struct FixedSource(Vec<NewsItem>);

    #[async_trait]
    impl NewsSource for FixedSource {
        async fn fetch(&self, _language: Language) -> Result<Vec<NewsItem>> {
            Ok(self.0.clone())
        }
    }

    fn context(store: SharedStore, items: Vec<NewsItem>) -> AppContext {
        let mut ctx =
            AppContext::with_store(Config::default(), store, Some(Language::English)).unwrap();
        ctx.source = Arc::new(FixedSource(items));
        ctx
    }

    #[test]
    fn test_news_line_marks_unread() {
        let now = Local.with_ymd_and_hms(2024, 3, 5, 18, 0, 0).unwrap();
        let mut item = NewsItem::new("Headline", "https://example.com/a");
        item.date = Some(
            Local
                .with_ymd_and_hms(2024, 3, 5, 9, 15, 0)
                .unwrap()
                .with_timezone(&Utc),
        );

        let unread = format_news_line(&item, false, &now, Language::English);
        assert!(unread.starts_with("● Today - 09:15"));
        assert!(unread.contains("Headline"));

        let read = format_news_line(&item, true, &now, Language::Italian);
        assert!(read.starts_with("  Oggi - 09:15"));
    }

    #[test]
    fn test_record_line_shows_remaining_time() {
        let record = ReadRecord::new("https://example.com/a", 0);
        let line = format_record_line(&record, 90 * 60_000);
        assert!(line.starts_with("https://example.com/a"));
        assert!(line.ends_with("(expires in 22h30m)"));
    }

    #[test]
    fn test_mark_read_persists() {
        let store = Arc::new(MemoryStore::new());
        let ctx = context(store.clone(), Vec::new());

        mark_read(&ctx, "https://example.com/a").unwrap();
        mark_read(&ctx, "https://example.com/a").unwrap();

        let raw = store.get(SEEN_NEWS_KEY).unwrap().unwrap();
        let records: Vec<ReadRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "https://example.com/a");
    }

    #[test]
    fn test_list_and_show_succeed() {
        let store = Arc::new(MemoryStore::new());
        let ctx = context(
            store,
            vec![NewsItem::new("One", "https://example.com/1")],
        );

        tokio_test::block_on(list_news(&ctx)).unwrap();
        mark_read(&ctx, "https://example.com/1").unwrap();
        show_read_state(&ctx).unwrap();
    }
}
