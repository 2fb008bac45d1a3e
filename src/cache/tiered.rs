use crate::error::AppError;

use super::{BlobStore, MemoryStore};

/// Memory-fronted view over a durable store. Reads consult memory first
/// and promote durable hits; writes land in both layers.
pub struct TieredStore<'a> {
    memory: MemoryStore,
    durable: &'a dyn BlobStore,
}

impl<'a> TieredStore<'a> {
    pub fn new(durable: &'a dyn BlobStore) -> Self {
        TieredStore {
            memory: MemoryStore::new(),
            durable,
        }
    }
}

impl BlobStore for TieredStore<'_> {
    fn get(&self, cache: &str, key: &str) -> Option<Vec<u8>> {
        if let Some(bytes) = self.memory.get(cache, key) {
            return Some(bytes);
        }
        let bytes = self.durable.get(cache, key)?;
        let _ = self.memory.put(cache, key, &bytes);
        Some(bytes)
    }

    fn put(&self, cache: &str, key: &str, bytes: &[u8]) -> Result<(), AppError> {
        let _ = self.memory.put(cache, key, bytes);
        self.durable.put(cache, key, bytes)
    }

    fn list(&self, cache: &str, prefix: &str) -> Vec<(String, Vec<u8>)> {
        // Memory only ever holds a subset; the durable layer is complete.
        self.durable.list(cache, prefix)
    }

    fn exists(&self, cache: &str, key: &str) -> bool {
        self.memory.exists(cache, key) || self.durable.exists(cache, key)
    }
}
