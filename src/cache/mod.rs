mod fs;
mod memory;
mod tiered;

pub use fs::FsStore;
pub use memory::MemoryStore;
pub use tiered::TieredStore;

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

// Cache namespaces. The durable store maps each to its own directory.
pub const MATCH_CACHE: &str = "MatchCache";
pub const STATS_CACHE: &str = "StatsCache";
pub const ITEM_SET_CACHE: &str = "ItemSetCache";
pub const ITEM_CACHE: &str = "ItemCache";
pub const CHAMPION_CACHE: &str = "ChampionCache";
pub const MATCHES: &str = "matches";

/// Namespaced key/blob storage. Reads never fail: any problem on the
/// read path is a cache miss. Writes are best-effort and overwrite
/// unconditionally.
pub trait BlobStore {
    fn get(&self, cache: &str, key: &str) -> Option<Vec<u8>>;
    fn put(&self, cache: &str, key: &str, bytes: &[u8]) -> Result<(), AppError>;
    fn list(&self, cache: &str, prefix: &str) -> Vec<(String, Vec<u8>)>;
    fn exists(&self, cache: &str, key: &str) -> bool;
}

/// Key for entities cached per region and id (matches, champions, items).
pub fn region_key(region: &str, id: i64) -> String {
    format!("{}_{}.json", region, id)
}

/// Key for one stats snapshot. `label` tags custom runs and is empty for
/// the standard pipeline.
pub fn stats_key(region: &str, label: &str, champion_id: i64, lane: &str, item_id: i64) -> String {
    format!("{}{}_{}_{}_{}.json", region, label, champion_id, lane, item_id)
}

/// Prefix matching every stats snapshot for one (champion, lane). The
/// trailing separator keeps champion id 1 from matching id 11.
pub fn stats_prefix(region: &str, champion_id: i64, lane: &str) -> String {
    format!("{}_{}_{}_", region, champion_id, lane)
}

pub fn item_set_key(region: &str, champion_id: i64, lane: &str) -> String {
    format!("{}_{}_{}.json", region, champion_id, lane)
}

pub fn get_json<T: DeserializeOwned>(store: &dyn BlobStore, cache: &str, key: &str) -> Option<T> {
    let bytes = store.get(cache, key)?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding unreadable cache entry {}/{}: {}", cache, key, e);
            None
        }
    }
}

pub fn put_json<T: Serialize>(
    store: &dyn BlobStore,
    cache: &str,
    key: &str,
    value: &T,
) -> Result<(), AppError> {
    let bytes = serde_json::to_vec(value).map_err(|e| AppError::JsonError(e.to_string()))?;
    store.put(cache, key, &bytes)
}

pub fn list_json<T: DeserializeOwned>(store: &dyn BlobStore, cache: &str, prefix: &str) -> Vec<T> {
    store
        .list(cache, prefix)
        .into_iter()
        .filter_map(|(key, bytes)| match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping unreadable cache entry {}/{}: {}", cache, key, e);
                None
            }
        })
        .collect()
}
