pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Language, NewsItem};

pub use http_fetcher::HttpFetcher;

/// Produces the news list for a language, newest first.
#[async_trait]
pub trait NewsSource {
    async fn fetch(&self, language: Language) -> Result<Vec<NewsItem>>;
}
