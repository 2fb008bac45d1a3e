use tracing::warn;

use crate::api::models::{Champion, Item};
use crate::api::RiotApi;
use crate::cache::{self, BlobStore, TieredStore, CHAMPION_CACHE, ITEM_CACHE};

/// Champion and item reference data behind a memory-fronted cache.
/// Lookups degrade to `None` on any failure; reference data is never
/// allowed to abort the pipeline.
pub struct StaticData<'a> {
    api: &'a dyn RiotApi,
    store: TieredStore<'a>,
}

impl<'a> StaticData<'a> {
    pub fn new(api: &'a dyn RiotApi, durable: &'a dyn BlobStore) -> Self {
        StaticData {
            api,
            store: TieredStore::new(durable),
        }
    }

    pub fn champion(&self, region: &str, champion_id: i64) -> Option<Champion> {
        let key = cache::region_key(region, champion_id);

        if let Some(champion) = cache::get_json::<Champion>(&self.store, CHAMPION_CACHE, &key) {
            return Some(champion);
        }

        match self.api.champion(region, champion_id) {
            Ok(champion) => {
                self.cache_champion(region, &champion);
                Some(champion)
            }
            Err(e) => {
                warn!("Could not load champion {}: {}", champion_id, e);
                None
            }
        }
    }

    pub fn item(&self, region: &str, item_id: i64) -> Option<Item> {
        let key = cache::region_key(region, item_id);

        if let Some(item) = cache::get_json::<Item>(&self.store, ITEM_CACHE, &key) {
            return Some(item);
        }

        match self.api.item(region, item_id) {
            Ok(item) => {
                if let Err(e) = cache::put_json(&self.store, ITEM_CACHE, &key, &item) {
                    warn!("Failed to cache item {}: {}", item_id, e);
                }
                Some(item)
            }
            Err(e) => {
                warn!("Could not load item {}: {}", item_id, e);
                None
            }
        }
    }

    /// Full roster for a region, sorted by id. Champions are cached
    /// individually so later single lookups stay local.
    pub fn all_champions(&self, region: &str) -> Vec<Champion> {
        let list = match self.api.all_champions(region) {
            Ok(list) => list,
            Err(e) => {
                warn!("Could not load champion list: {}", e);
                return Vec::new();
            }
        };

        let mut champions: Vec<Champion> = list.data.into_values().collect();
        champions.sort_by_key(|champion| champion.id);

        for champion in &champions {
            self.cache_champion(region, champion);
        }

        champions
    }

    fn cache_champion(&self, region: &str, champion: &Champion) {
        let key = cache::region_key(region, champion.id);
        if let Err(e) = cache::put_json(&self.store, CHAMPION_CACHE, &key, champion) {
            warn!("Failed to cache champion {}: {}", champion.id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::api::models::{ChampionList, FeaturedGames, MatchDetail};
    use crate::cache::MemoryStore;
    use crate::error::AppError;

    struct StubStaticApi {
        champions: HashMap<i64, Champion>,
        champion_calls: AtomicUsize,
    }

    impl StubStaticApi {
        fn with_champion(champion: Champion) -> Self {
            let mut champions = HashMap::new();
            champions.insert(champion.id, champion);
            StubStaticApi {
                champions,
                champion_calls: AtomicUsize::new(0),
            }
        }
    }

    impl RiotApi for StubStaticApi {
        fn match_detail(&self, _region: &str, _match_id: i64) -> Result<MatchDetail, AppError> {
            Err(AppError::HttpError("not stubbed".to_string()))
        }

        fn featured_games(&self, _region: &str) -> Result<FeaturedGames, AppError> {
            Err(AppError::HttpError("not stubbed".to_string()))
        }

        fn champion(&self, _region: &str, champion_id: i64) -> Result<Champion, AppError> {
            self.champion_calls.fetch_add(1, Ordering::SeqCst);
            self.champions
                .get(&champion_id)
                .cloned()
                .ok_or_else(|| AppError::HttpError("404".to_string()))
        }

        fn item(&self, _region: &str, _item_id: i64) -> Result<Item, AppError> {
            Err(AppError::HttpError("404".to_string()))
        }

        fn all_champions(&self, _region: &str) -> Result<ChampionList, AppError> {
            let data = self
                .champions
                .iter()
                .map(|(id, champion)| (id.to_string(), champion.clone()))
                .collect();
            Ok(ChampionList { data })
        }
    }

    fn teemo() -> Champion {
        Champion {
            id: 17,
            name: "Teemo".to_string(),
            title: "the Swift Scout".to_string(),
            key: "Teemo".to_string(),
        }
    }

    #[test]
    fn champion_lookup_is_cached_after_first_fetch() {
        let api = StubStaticApi::with_champion(teemo());
        let durable = MemoryStore::new();
        let static_data = StaticData::new(&api, &durable);

        assert_eq!(static_data.champion("na", 17), Some(teemo()));
        assert_eq!(static_data.champion("na", 17), Some(teemo()));
        assert_eq!(api.champion_calls.load(Ordering::SeqCst), 1);

        // The durable layer holds the entry for the next process too.
        assert!(durable.exists(CHAMPION_CACHE, "na_17.json"));
    }

    #[test]
    fn failed_lookups_degrade_to_none() {
        let api = StubStaticApi::with_champion(teemo());
        let durable = MemoryStore::new();
        let static_data = StaticData::new(&api, &durable);

        assert_eq!(static_data.champion("na", 999), None);
        assert_eq!(static_data.item("na", 3078), None);
    }

    #[test]
    fn all_champions_sorts_by_id_and_caches_each() {
        let mut api = StubStaticApi::with_champion(teemo());
        api.champions.insert(
            1,
            Champion {
                id: 1,
                name: "Annie".to_string(),
                title: "the Dark Child".to_string(),
                key: "Annie".to_string(),
            },
        );

        let durable = MemoryStore::new();
        let static_data = StaticData::new(&api, &durable);

        let champions = static_data.all_champions("na");
        let ids: Vec<i64> = champions.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 17]);

        // Single lookups now come from cache, not the API.
        assert_eq!(static_data.champion("na", 1).unwrap().name, "Annie");
        assert_eq!(api.champion_calls.load(Ordering::SeqCst), 0);
    }
}
