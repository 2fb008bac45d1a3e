use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::AppError;

use super::BlobStore;

/// In-process store backing the fast layer of [`TieredStore`] and the
/// fixtures in tests.
///
/// [`TieredStore`]: super::TieredStore
#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, cache: &str, key: &str) -> Option<Vec<u8>> {
        let blobs = self.blobs.read().ok()?;
        blobs.get(&(cache.to_string(), key.to_string())).cloned()
    }

    fn put(&self, cache: &str, key: &str, bytes: &[u8]) -> Result<(), AppError> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| AppError::CacheError("memory store lock poisoned".to_string()))?;
        blobs.insert((cache.to_string(), key.to_string()), bytes.to_vec());
        Ok(())
    }

    fn list(&self, cache: &str, prefix: &str) -> Vec<(String, Vec<u8>)> {
        let blobs = match self.blobs.read() {
            Ok(blobs) => blobs,
            Err(_) => return Vec::new(),
        };
        let mut found: Vec<(String, Vec<u8>)> = blobs
            .iter()
            .filter(|((namespace, key), _)| namespace == cache && key.starts_with(prefix))
            .map(|((_, key), bytes)| (key.clone(), bytes.clone()))
            .collect();
        found.sort_by(|a, b| a.0.cmp(&b.0));
        found
    }

    fn exists(&self, cache: &str, key: &str) -> bool {
        self.blobs
            .read()
            .map(|blobs| blobs.contains_key(&(cache.to_string(), key.to_string())))
            .unwrap_or(false)
    }
}
