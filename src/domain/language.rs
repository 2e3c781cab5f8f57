use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Languages the news list and labels are available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    #[value(name = "en")]
    English,
    #[serde(rename = "it")]
    #[value(name = "it")]
    Italian,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Italian => "it",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "it" | "italian" | "italiano" => Some(Language::Italian),
            _ => None,
        }
    }

    /// Map a locale string such as `it_IT.UTF-8` or `en-US` to a language.
    ///
    /// Anything that does not start with `it` falls back to English.
    pub fn from_locale(locale: &str) -> Self {
        if locale.trim().to_lowercase().starts_with("it") {
            Language::Italian
        } else {
            Language::English
        }
    }

    /// Detect the language from the process locale (`LC_ALL`, `LC_MESSAGES`, `LANG`).
    pub fn detect() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|locale| Self::from_locale(&locale))
            .unwrap_or_default()
    }

    /// Resolve a configured preference: `"auto"` detects, anything else must be a code.
    pub fn resolve(preference: &str) -> Self {
        if preference.trim().eq_ignore_ascii_case("auto") {
            return Self::detect();
        }
        Self::from_code(preference).unwrap_or_else(|| {
            tracing::warn!("Unknown language {:?}, detecting from locale", preference);
            Self::detect()
        })
    }

    pub fn next(self) -> Self {
        match self {
            Language::English => Language::Italian,
            Language::Italian => Language::English,
        }
    }

    pub fn today_label(self) -> &'static str {
        match self {
            Language::English => "Today",
            Language::Italian => "Oggi",
        }
    }

    pub fn no_news_label(self) -> &'static str {
        match self {
            Language::English => "No news in the last 24 hours.",
            Language::Italian => "Nessuna notizia nelle ultime 24 ore.",
        }
    }

    pub fn loading_label(self) -> &'static str {
        match self {
            Language::English => "Loading news...",
            Language::Italian => "Caricamento notizie...",
        }
    }

    pub fn pull_hint(self) -> &'static str {
        match self {
            Language::English => "Pull to refresh",
            Language::Italian => "Trascina per aggiornare",
        }
    }

    pub fn release_hint(self) -> &'static str {
        match self {
            Language::English => "Release to refresh",
            Language::Italian => "Rilascia per aggiornare",
        }
    }

    pub fn refreshing_label(self) -> &'static str {
        match self {
            Language::English => "Refreshing...",
            Language::Italian => "Aggiornamento...",
        }
    }

    pub fn disclaimer_title(self) -> &'static str {
        match self {
            Language::English => "Our Mission",
            Language::Italian => "La nostra missione",
        }
    }

    pub fn disclaimer_paragraphs(self) -> [&'static str; 2] {
        match self {
            Language::English => [
                "We believe news should be fast, fair, and focused. Tidings streamlines your \
                 daily briefing by delivering unbiased content in a refined, minimalist format.",
                "Your data is not our business. Read state never leaves this machine and fades \
                 on its own after 24 hours, so you can focus on what matters: the facts.",
            ],
            Language::Italian => [
                "Crediamo che l'informazione debba essere rapida, equa e focalizzata. Tidings \
                 ottimizza i tuoi aggiornamenti quotidiani offrendo contenuti imparziali in un \
                 formato raffinato e minimale.",
                "I tuoi dati non sono affare nostro. Lo stato di lettura resta su questo \
                 computer e svanisce da solo dopo 24 ore, così puoi concentrarti su \
                 ciò che conta: i fatti.",
            ],
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
