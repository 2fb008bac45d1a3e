use tracing::{debug, info, warn};

use crate::analysis::item_set::ItemSet;
use crate::analysis::item_stats::{ItemStats, ItemStatsTable};
use crate::cache::{self, BlobStore, ITEM_SET_CACHE, STATS_CACHE};
use crate::config::Config;
use crate::static_data::StaticData;

/// Stats persistence and item-set retrieval over the blob store.
pub struct ItemSetService<'a> {
    store: &'a dyn BlobStore,
    static_data: &'a StaticData<'a>,
    config: &'a Config,
}

impl<'a> ItemSetService<'a> {
    pub fn new(
        store: &'a dyn BlobStore,
        static_data: &'a StaticData<'a>,
        config: &'a Config,
    ) -> Self {
        ItemSetService {
            store,
            static_data,
            config,
        }
    }

    /// Serves the cached set when one exists; sets never expire on
    /// their own, a pipeline re-run replaces them. Otherwise builds
    /// from the persisted stats for this (champion, lane) and caches
    /// the result.
    pub fn get_or_build(&self, region: &str, champion_id: i64, role: &str) -> ItemSet {
        let lane = role.to_uppercase();
        let key = cache::item_set_key(region, champion_id, &lane);

        if let Some(set) = cache::get_json::<ItemSet>(self.store, ITEM_SET_CACHE, &key) {
            debug!("Item set {} served from cache", key);
            return set;
        }

        let prefix = cache::stats_prefix(region, champion_id, &lane);
        let stats: Vec<ItemStats> = cache::list_json(self.store, STATS_CACHE, &prefix);

        let set = ItemSet::from_stats(region, &stats, self.static_data, self.config);
        info!("Built {} for champion {} {}", set, champion_id, lane);

        if let Err(e) = cache::put_json(self.store, ITEM_SET_CACHE, &key, &set) {
            warn!("Failed to cache item set {}: {}", key, e);
        }

        set
    }

    /// Writes one blob per stats entry. Entries go out ordered by
    /// champion id, then win rate, purely to keep the write log
    /// readable. An empty table writes nothing.
    pub fn write_stats(&self, region: &str, table: &ItemStatsTable, run_label: &str) {
        let mut stats = table.all();
        if stats.is_empty() {
            return;
        }

        stats.sort_by(|a, b| {
            a.champion_id.cmp(&b.champion_id).then(
                a.win_rate()
                    .partial_cmp(&b.win_rate())
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });

        for stat in &stats {
            let key = cache::stats_key(region, run_label, stat.champion_id, &stat.lane, stat.item_id);
            debug!("Writing stats {}", key);
            if let Err(e) = cache::put_json(self.store, STATS_CACHE, &key, stat) {
                warn!("Failed to write stats {}: {}", key, e);
            }
        }

        info!("Wrote {} stats entries", stats.len());
    }
}
