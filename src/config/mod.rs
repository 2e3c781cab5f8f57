//! Configuration for tidings.
//!
//! Read from `~/.config/tidings/config.toml` at startup. A commented default
//! file is written on first run; missing fields fall back to their defaults.

pub mod colors;
pub mod keybindings;
pub mod news;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;
pub use news::NewsConfig;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::Language;
use crate::gesture::GestureConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
    pub gesture: GestureConfig,
    pub news: NewsConfig,
}

impl Config {
    /// Load from the default path, creating it if absent.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load and validate a specific file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.gesture.validate()?;
        config.news.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// `~/.config/tidings/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tidings").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| ConfigError::Io { path, source }
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        fs::write(path, Self::default_config_content()).map_err(io_error(path))?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# tidings configuration
#
# Colors can be named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB" / "#RGB").
#
# Keys can be single characters ("a", "R", "?"), special keys (Enter, Tab,
# Backspace, Delete, Home, End, PageUp, PageDown, Up, Down, Left, Right, Esc,
# Space, F1-F12) or combined with modifiers ("Ctrl+c", "Alt+Enter").

[news]
# "auto" follows LANG / LC_ALL, otherwise "en" or "it"
language = "auto"

# Hide items published longer ago than this
max_age_hours = 24

feeds_en = [
    "https://feeds.bbci.co.uk/news/world/rss.xml",
    "https://www.theguardian.com/world/rss",
]
feeds_it = [
    "https://www.ansa.it/sito/notizie/topnews/topnews_rss.xml",
    "https://www.rainews.it/rss/tutti",
]

[gesture]
# Drag the list down with the mouse while it is scrolled to the top,
# then release past the threshold to refresh.
damping = 0.5
max_distance = 200.0
trigger_threshold = 60.0
refreshing_offset = 60.0
cooldown_ms = 1500

# Ring the terminal bell when a refresh fires
haptics = true
haptic_pulse_ms = 50

# Gesture units per terminal row dragged
units_per_row = 16.0

[colors]
header = "White"
border = "DarkGray"
selection_bg = "DarkGray"
selection_fg = "White"
read_item = "DarkGray"
unread_item = "White"
time = "Gray"
description = "Gray"
indicator = "DarkGray"
indicator_armed = "Cyan"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
toggle = ["Enter", "Space"]
open_in_browser = ["o"]
refresh = ["R"]
switch_language = ["l"]
disclaimer = ["?", "i"]
close = ["Esc"]
"##
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid gesture setting {field}: {reason}")]
    InvalidGesture { field: &'static str, reason: String },

    #[error("Invalid {language} feed URL {url:?}: {source}")]
    InvalidFeedUrl {
        language: Language,
        url: String,
        source: url::ParseError,
    },
}
