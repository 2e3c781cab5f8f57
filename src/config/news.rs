use serde::Deserialize;

use super::ConfigError;
use crate::domain::Language;

/// Where the news comes from and which language to show.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// `"auto"` follows the terminal locale, otherwise `"en"` or `"it"`.
    pub language: String,

    /// Items older than this are not shown (default: 24)
    pub max_age_hours: u64,

    pub feeds_en: Vec<String>,
    pub feeds_it: Vec<String>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            max_age_hours: 24,
            feeds_en: vec![
                "https://feeds.bbci.co.uk/news/world/rss.xml".to_string(),
                "https://www.theguardian.com/world/rss".to_string(),
            ],
            feeds_it: vec![
                "https://www.ansa.it/sito/notizie/topnews/topnews_rss.xml".to_string(),
                "https://www.rainews.it/rss/tutti".to_string(),
            ],
        }
    }
}

impl NewsConfig {
    pub fn feeds_for(&self, language: Language) -> &[String] {
        match language {
            Language::English => &self.feeds_en,
            Language::Italian => &self.feeds_it,
        }
    }

    /// Resolve the configured language, honouring an explicit override first.
    pub fn resolve_language(&self, override_lang: Option<Language>) -> Language {
        override_lang.unwrap_or_else(|| Language::resolve(&self.language))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for language in [Language::English, Language::Italian] {
            for url in self.feeds_for(language) {
                url::Url::parse(url).map_err(|source| ConfigError::InvalidFeedUrl {
                    language,
                    url: url.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }
}
