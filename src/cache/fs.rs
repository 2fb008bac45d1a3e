use std::fs;
use std::path::PathBuf;

use crate::error::AppError;

use super::BlobStore;

/// Durable file-per-key store. Each namespace becomes a subdirectory
/// (lowercased) under the root, each key a file inside it.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsStore { root: root.into() }
    }

    fn namespace_dir(&self, cache: &str) -> PathBuf {
        self.root.join(cache.to_lowercase())
    }

    fn blob_path(&self, cache: &str, key: &str) -> PathBuf {
        self.namespace_dir(cache).join(key)
    }
}

impl BlobStore for FsStore {
    fn get(&self, cache: &str, key: &str) -> Option<Vec<u8>> {
        fs::read(self.blob_path(cache, key)).ok()
    }

    fn put(&self, cache: &str, key: &str, bytes: &[u8]) -> Result<(), AppError> {
        let dir = self.namespace_dir(cache);
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::CacheError(format!("create {}: {}", dir.display(), e)))?;
        fs::write(dir.join(key), bytes)
            .map_err(|e| AppError::CacheError(format!("write {}/{}: {}", cache, key, e)))
    }

    fn list(&self, cache: &str, prefix: &str) -> Vec<(String, Vec<u8>)> {
        let entries = match fs::read_dir(self.namespace_dir(cache)) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        let mut found: Vec<(String, Vec<u8>)> = entries
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let name = entry.file_name().into_string().ok()?;
                if !name.starts_with(prefix) {
                    return None;
                }
                let bytes = fs::read(entry.path()).ok()?;
                Some((name, bytes))
            })
            .collect();
        // Directory iteration order is platform-dependent.
        found.sort_by(|a, b| a.0.cmp(&b.0));
        found
    }

    fn exists(&self, cache: &str, key: &str) -> bool {
        self.blob_path(cache, key).exists()
    }
}
