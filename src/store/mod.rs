pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use crate::app::Result;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// String-keyed persistence for small serialized blobs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
