use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::api::models::MatchDetail;
use crate::api::RiotApi;
use crate::cache::{self, BlobStore, MATCH_CACHE};
use crate::config::Config;
use crate::error::AppError;

/// Loads single matches, cache first. A rate-limited call backs off
/// once for `2 × ms_between_api_calls` and yields the unloaded match;
/// callers filter those downstream.
pub struct MatchFetcher<'a> {
    api: &'a dyn RiotApi,
    store: &'a dyn BlobStore,
    config: &'a Config,
}

impl<'a> MatchFetcher<'a> {
    pub fn new(api: &'a dyn RiotApi, store: &'a dyn BlobStore, config: &'a Config) -> Self {
        MatchFetcher { api, store, config }
    }

    /// Never fails: any fetch problem degrades to the zero-id match,
    /// which is returned uncached.
    pub fn fetch(&self, region: &str, match_id: i64) -> MatchDetail {
        debug!("Loading match {}", match_id);

        let key = cache::region_key(region, match_id);

        // A cached zero-id entry would mask a fetch that never worked,
        // so only loaded matches count as hits.
        if let Some(mut cached) = cache::get_json::<MatchDetail>(self.store, MATCH_CACHE, &key) {
            if cached.is_loaded() {
                debug!("Match {} served from cache", match_id);
                cached.from_cache = true;
                return cached;
            }
        }

        let mut detail = match self.api.match_detail(region, match_id) {
            Ok(detail) => detail,
            Err(AppError::RateLimited) => {
                warn!("Too many calls, briefly pausing");
                thread::sleep(Duration::from_millis(self.config.ms_between_api_calls * 2));
                MatchDetail::default()
            }
            Err(e) => {
                warn!("Request for match {} failed: {}", match_id, e);
                MatchDetail::default()
            }
        };
        detail.from_cache = false;

        if detail.is_loaded() {
            if let Err(e) = cache::put_json(self.store, MATCH_CACHE, &key, &detail) {
                warn!("Failed to cache match {}: {}", match_id, e);
            }
        } else {
            warn!("Did not correctly load match {}", match_id);
        }

        detail
    }
}
