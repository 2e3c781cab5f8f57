use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, TidingsError};
use crate::config::Config;
use crate::domain::Language;
use crate::fetcher::{HttpFetcher, NewsSource};
use crate::read_state::ReadStateCache;
use crate::store::{KeyValueStore, MemoryStore, SqliteStore};

pub type SharedStore = Arc<dyn KeyValueStore + Send + Sync>;

/// Everything a command or the TUI needs: storage, news source, settings.
pub struct AppContext {
    pub store: SharedStore,
    pub source: Arc<dyn NewsSource + Send + Sync>,
    pub config: Config,
    pub language: Language,
}

impl AppContext {
    /// Open the on-disk store at `db_path`, or the default data-dir location.
    ///
    /// A store that cannot be opened is replaced by an in-memory one, so the
    /// reader still works and simply forgets what was read on exit.
    pub fn new(
        config: Config,
        db_path: Option<PathBuf>,
        language: Option<Language>,
    ) -> Result<Self> {
        let store = Self::open_store(db_path);
        Self::with_store(config, store, language)
    }

    /// Read state lives only as long as the process.
    pub fn in_memory(config: Config, language: Option<Language>) -> Result<Self> {
        let store: SharedStore = match SqliteStore::in_memory() {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!("In-memory database unavailable: {}", e);
                Arc::new(MemoryStore::new())
            }
        };
        Self::with_store(config, store, language)
    }

    pub fn with_store(
        config: Config,
        store: SharedStore,
        language: Option<Language>,
    ) -> Result<Self> {
        let source: Arc<dyn NewsSource + Send + Sync> =
            Arc::new(HttpFetcher::new(config.news.clone())?);
        let language = config.news.resolve_language(language);

        Ok(Self {
            store,
            source,
            config,
            language,
        })
    }

    fn open_store(db_path: Option<PathBuf>) -> SharedStore {
        let opened = db_path
            .map_or_else(Self::default_db_path, Ok)
            .and_then(|path| {
                tracing::debug!("Opening read state at {}", path.display());
                SqliteStore::new(&path)
            });

        match opened {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!("Read state unavailable, keeping it in memory: {}", e);
                Arc::new(MemoryStore::new())
            }
        }
    }

    /// A fresh cache over the shared store. Call `load` before querying.
    pub fn read_state(&self) -> ReadStateCache<SharedStore> {
        ReadStateCache::new(self.store.clone())
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TidingsError::Config("Could not find data directory".into()))?;
        let tidings_dir = data_dir.join("tidings");
        std::fs::create_dir_all(&tidings_dir)?;
        Ok(tidings_dir.join("tidings.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_override() {
        let ctx = AppContext::in_memory(Config::default(), Some(Language::Italian)).unwrap();
        assert_eq!(ctx.language, Language::Italian);
    }

    #[test]
    fn test_read_state_shares_store() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let ctx =
            AppContext::with_store(Config::default(), store, Some(Language::English)).unwrap();

        let mut first = ctx.read_state();
        first.load();
        assert!(first.mark_read("https://example.com/a"));

        let mut second = ctx.read_state();
        assert!(second.load().contains("https://example.com/a"));
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("tidings.db");

        {
            let ctx = AppContext::new(Config::default(), Some(db_path.clone()), None).unwrap();
            let mut cache = ctx.read_state();
            cache.mark_read("https://example.com/kept");
        }

        let ctx = AppContext::new(Config::default(), Some(db_path), None).unwrap();
        let mut cache = ctx.read_state();
        assert!(cache.load().contains("https://example.com/kept"));
    }

    #[test]
    fn test_corrupt_database_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("tidings.db");
        std::fs::write(&db_path, vec![0xA5u8; 4096]).unwrap();

        let ctx = AppContext::new(Config::default(), Some(db_path.clone()), None).unwrap();
        let mut cache = ctx.read_state();
        assert!(cache.load().is_empty());
        assert!(cache.mark_read("https://example.com/a"));
        assert!(cache.is_read("https://example.com/a"));

        // The unreadable file is left alone.
        assert_eq!(std::fs::read(&db_path).unwrap(), vec![0xA5u8; 4096]);
    }

    #[test]
    fn test_unopenable_path_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("file");
        std::fs::write(&not_a_dir, b"x").unwrap();

        let ctx = AppContext::new(Config::default(), Some(not_a_dir.join("tidings.db")), None);
        let mut cache = ctx.unwrap().read_state();
        assert!(cache.load().is_empty());
    }
}
