use std::thread;
use std::time::Duration;

use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::api::models::MatchDetail;
use crate::api::RiotApi;
use crate::cache::{self, BlobStore};
use crate::config::Config;
use crate::error::AppError;

/// Blob holding scraped match ids, one per line.
const MATCH_ID_FILE: &str = "matchIds.txt";

/// Sequences match fetches over one region, pacing calls to stay
/// inside the API budget.
pub struct BatchLoader<'a> {
    fetcher: super::MatchFetcher<'a>,
    config: &'a Config,
}

impl<'a> BatchLoader<'a> {
    pub fn new(api: &'a dyn RiotApi, store: &'a dyn BlobStore, config: &'a Config) -> Self {
        BatchLoader {
            fetcher: super::MatchFetcher::new(api, store, config),
            config,
        }
    }

    /// Fetches every id in order, sleeping `ms_between_api_calls` after
    /// each call that actually went to the API. Matches that never
    /// loaded are dropped from the result.
    pub fn fetch_all(
        &self,
        region: &str,
        match_ids: &[i64],
        progress: Option<&ProgressBar>,
    ) -> Vec<MatchDetail> {
        let total = match_ids.len();
        info!("Loading {} matches", total);

        let mut matches = Vec::new();
        let mut completed = 0;

        for &match_id in match_ids {
            let detail = self.fetcher.fetch(region, match_id);
            let from_cache = detail.from_cache;
            matches.push(detail);

            completed += 1;
            if completed % 10 == 0 {
                info!(
                    "Progress: {}/{}   {:.0}%",
                    completed,
                    total,
                    completed as f64 / total as f64 * 100.0
                );
            }
            if let Some(bar) = progress {
                bar.inc(1);
            }

            if !from_cache {
                thread::sleep(Duration::from_millis(self.config.ms_between_api_calls));
            }
        }

        matches.retain(|detail| detail.is_loaded());
        matches
    }
}

/// Match ids from a JSON int-array blob in the `matches` namespace.
/// An absent or unreadable matchset yields an empty list, never an
/// error.
pub fn load_matchset(store: &dyn BlobStore, filename: &str) -> Vec<i64> {
    let bytes = match store.get(cache::MATCHES, filename) {
        Some(bytes) => bytes,
        None => {
            warn!("Matchset {} not found", filename);
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<i64>>(&bytes) {
        Ok(ids) => {
            info!("Matchset loaded from {}", filename);
            ids
        }
        Err(e) => {
            warn!("Could not parse matchset {}: {}", filename, e);
            Vec::new()
        }
    }
}

/// Scrapes the currently featured games and appends ranked Summoner's
/// Rift ids to the shared id file. Returns how many ids were appended.
pub fn scrape_featured(
    api: &dyn RiotApi,
    store: &dyn BlobStore,
    region: &str,
    config: &Config,
) -> Result<usize, AppError> {
    info!("Scraping current featured games");

    let games = match api.featured_games(region) {
        Ok(games) => games,
        Err(AppError::RateLimited) => {
            warn!("Too many calls, briefly pausing");
            thread::sleep(Duration::from_millis(config.ms_between_api_calls * 2));
            return Ok(0);
        }
        Err(e) => return Err(e),
    };

    let mut contents = store.get(cache::MATCHES, MATCH_ID_FILE).unwrap_or_default();
    let mut appended = 0;

    for game in &games.game_list {
        // Only ranked games on Summoner's Rift.
        if (game.game_queue_config_id == 4 || game.game_queue_config_id == 42) && game.map_id == 11
        {
            contents.extend_from_slice(format!("{}\n", game.game_id).as_bytes());
            appended += 1;
        }
    }

    if appended > 0 {
        store.put(cache::MATCHES, MATCH_ID_FILE, &contents)?;
    }

    info!("Scrape complete, {} games scanned", games.game_list.len());
    Ok(appended)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    use super::*;
    use crate::api::models::{Champion, ChampionList, FeaturedGameInfo, FeaturedGames, Item, Team};
    use crate::cache::{MemoryStore, MATCH_CACHE};

    struct StubBatchApi {
        matches: HashMap<i64, MatchDetail>,
        featured: Vec<FeaturedGameInfo>,
        featured_rate_limited: bool,
        calls: AtomicUsize,
    }

    impl StubBatchApi {
        fn serving(ids: &[i64]) -> Self {
            let matches = ids
                .iter()
                .map(|&id| {
                    (
                        id,
                        MatchDetail {
                            match_id: id,
                            teams: vec![Team {
                                team_id: 100,
                                winner: true,
                            }],
                            ..Default::default()
                        },
                    )
                })
                .collect();
            StubBatchApi {
                matches,
                featured: Vec::new(),
                featured_rate_limited: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RiotApi for StubBatchApi {
        fn match_detail(&self, _region: &str, match_id: i64) -> Result<MatchDetail, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.matches
                .get(&match_id)
                .cloned()
                .ok_or_else(|| AppError::HttpError("404".to_string()))
        }

        fn featured_games(&self, _region: &str) -> Result<FeaturedGames, AppError> {
            if self.featured_rate_limited {
                return Err(AppError::RateLimited);
            }
            Ok(FeaturedGames {
                client_refresh_interval: 300,
                game_list: self.featured.clone(),
            })
        }

        fn champion(&self, _region: &str, _champion_id: i64) -> Result<Champion, AppError> {
            Err(AppError::HttpError("not stubbed".to_string()))
        }

        fn item(&self, _region: &str, _item_id: i64) -> Result<Item, AppError> {
            Err(AppError::HttpError("not stubbed".to_string()))
        }

        fn all_champions(&self, _region: &str) -> Result<ChampionList, AppError> {
            Err(AppError::HttpError("not stubbed".to_string()))
        }
    }

    fn config(ms_between_api_calls: u64) -> Config {
        Config {
            api_key: "test".to_string(),
            region: "na".to_string(),
            cache_dir: PathBuf::from("/tmp"),
            ms_between_api_calls,
            item_minimum_wins_required: 5,
            items_per_section: 6,
            early_game_length: 10,
            mid_game_length: 25,
        }
    }

    fn featured_game(game_id: i64, queue: i64, map: i64) -> FeaturedGameInfo {
        FeaturedGameInfo {
            game_id,
            game_queue_config_id: queue,
            map_id: map,
        }
    }

    #[test]
    fn failed_fetches_are_dropped_and_order_kept() {
        let api = StubBatchApi::serving(&[1, 3]);
        let store = MemoryStore::new();
        let cfg = config(0);

        let loader = BatchLoader::new(&api, &store, &cfg);
        let matches = loader.fetch_all("na", &[1, 2, 3], None);

        let ids: Vec<i64> = matches.iter().map(|m| m.match_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn uncached_fetches_are_paced() {
        let api = StubBatchApi::serving(&[1, 2, 3]);
        let store = MemoryStore::new();
        let cfg = config(50);

        let loader = BatchLoader::new(&api, &store, &cfg);
        let started = Instant::now();
        loader.fetch_all("na", &[1, 2, 3], None);

        assert!(started.elapsed() >= Duration::from_millis(150));
    }

    #[test]
    fn cached_fetches_incur_no_sleep() {
        let api = StubBatchApi::serving(&[]);
        let store = MemoryStore::new();
        for id in [1i64, 2, 3] {
            let detail = MatchDetail {
                match_id: id,
                ..Default::default()
            };
            cache::put_json(&store, MATCH_CACHE, &cache::region_key("na", id), &detail).unwrap();
        }
        let cfg = config(5_000);

        let loader = BatchLoader::new(&api, &store, &cfg);
        let started = Instant::now();
        let matches = loader.fetch_all("na", &[1, 2, 3], None);

        assert!(started.elapsed() < Duration::from_millis(1_000));
        assert_eq!(matches.len(), 3);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn matchset_roundtrip_and_failure_modes() {
        let store = MemoryStore::new();
        store
            .put(cache::MATCHES, "na.json", b"[2252997200, 2252997201]")
            .unwrap();
        store.put(cache::MATCHES, "bad.json", b"not json").unwrap();

        assert_eq!(
            load_matchset(&store, "na.json"),
            vec![2252997200, 2252997201]
        );
        assert!(load_matchset(&store, "missing.json").is_empty());
        assert!(load_matchset(&store, "bad.json").is_empty());
    }

    #[test]
    fn scrape_keeps_only_ranked_rift_games() {
        let mut api = StubBatchApi::serving(&[]);
        api.featured = vec![
            featured_game(100, 4, 11),   // ranked solo, rift
            featured_game(101, 2, 11),   // normal, rift
            featured_game(102, 42, 11),  // ranked 5s, rift
            featured_game(103, 4, 12),   // ranked but not rift
        ];
        let store = MemoryStore::new();
        let cfg = config(0);

        let appended = scrape_featured(&api, &store, "na", &cfg).unwrap();
        assert_eq!(appended, 2);

        let contents = store.get(cache::MATCHES, "matchIds.txt").unwrap();
        assert_eq!(String::from_utf8(contents).unwrap(), "100\n102\n");
    }

    #[test]
    fn scrape_appends_to_existing_ids() {
        let mut api = StubBatchApi::serving(&[]);
        api.featured = vec![featured_game(200, 4, 11)];
        let store = MemoryStore::new();
        store.put(cache::MATCHES, "matchIds.txt", b"100\n").unwrap();
        let cfg = config(0);

        scrape_featured(&api, &store, "na", &cfg).unwrap();

        let contents = store.get(cache::MATCHES, "matchIds.txt").unwrap();
        assert_eq!(String::from_utf8(contents).unwrap(), "100\n200\n");
    }

    #[test]
    fn rate_limited_scrape_backs_off_and_appends_nothing() {
        let mut api = StubBatchApi::serving(&[]);
        api.featured_rate_limited = true;
        let store = MemoryStore::new();
        let cfg = config(30);

        let started = Instant::now();
        let appended = scrape_featured(&api, &store, "na", &cfg).unwrap();

        assert_eq!(appended, 0);
        assert!(started.elapsed() >= Duration::from_millis(60));
        assert!(store.get(cache::MATCHES, "matchIds.txt").is_none());
    }
}
