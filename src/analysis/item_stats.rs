use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::models::MatchDetail;

/// Purchase statistics for one item, tracked per champion and lane.
/// Persisted as an immutable snapshot once a run finishes; win rate is
/// always derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStats {
    pub item_id: i64,
    pub champion_id: i64,
    pub lane: String,
    pub uses: u32,
    pub wins: u32,
    /// Running mean of purchase timestamps, in milliseconds.
    pub average_time_bought: f64,
}

/// Game phase an item lands in, from its average buy time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Early,
    Mid,
    Late,
}

impl ItemStats {
    pub fn new(item_id: i64, champion_id: i64, lane: &str) -> Self {
        ItemStats {
            item_id,
            champion_id,
            lane: lane.to_string(),
            uses: 0,
            wins: 0,
            average_time_bought: 0.0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.uses == 0 {
            0.0
        } else {
            self.wins as f64 / self.uses as f64
        }
    }

    /// Buckets by average buy time against the two minute thresholds.
    /// Comparisons are strict, so an average landing exactly on a
    /// threshold belongs to the later phase.
    pub fn phase(&self, early_game_mins: u32, mid_game_mins: u32) -> Phase {
        if self.average_time_bought < f64::from(early_game_mins) * 60_000.0 {
            return Phase::Early;
        }
        if self.average_time_bought < f64::from(mid_game_mins) * 60_000.0 {
            return Phase::Mid;
        }
        Phase::Late
    }

    /// Average buy time as `m:ss`, e.g. `4:23`.
    pub fn average_buy_time(&self) -> String {
        let total_seconds = (self.average_time_bought / 1000.0) as i64;
        format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
    }
}

/// Running statistics table for one aggregation run, keyed by
/// (champion id, lane, item id). Each run owns its table outright, so
/// independent runs never share state.
#[derive(Debug, Default)]
pub struct ItemStatsTable {
    stats: HashMap<(i64, String, i64), ItemStats>,
}

impl ItemStatsTable {
    pub fn new() -> Self {
        ItemStatsTable {
            stats: HashMap::new(),
        }
    }

    /// Folds every purchase event from the given matches into the table.
    /// Unloaded and participant-less matches are skipped with a warning,
    /// never an error.
    pub fn ingest(&mut self, matches: &[MatchDetail]) {
        let total = matches.len();

        for (processed, detail) in matches.iter().enumerate() {
            debug!(
                "Loading stats from match {}   progress: {:.0}%",
                detail.match_id,
                (processed + 1) as f64 / total as f64 * 100.0
            );

            if !detail.is_loaded() {
                warn!("Skipping match that never loaded");
                continue;
            }
            if detail.participants.is_empty() {
                warn!("No participants found in match {}", detail.match_id);
                continue;
            }

            let all_purchases = detail.all_item_purchases();

            for player in &detail.participants {
                let won = detail.participant_won(player);

                for purchase in &all_purchases {
                    if purchase.participant_id != player.participant_id {
                        continue;
                    }
                    self.record_purchase(
                        purchase.item_id,
                        purchase.timestamp,
                        player.champion_id,
                        &player.timeline.lane,
                        won,
                    );
                }
            }
        }
    }

    /// Applies a single purchase: bump `uses`, fold the timestamp into
    /// the running mean, then count the win.
    fn record_purchase(&mut self, item_id: i64, timestamp: i64, champion_id: i64, lane: &str, won: bool) {
        let key = (champion_id, lane.to_string(), item_id);
        let stats = self
            .stats
            .entry(key)
            .or_insert_with(|| ItemStats::new(item_id, champion_id, lane));

        stats.uses += 1;
        stats.average_time_bought +=
            (timestamp as f64 - stats.average_time_bought) / f64::from(stats.uses);

        if won {
            stats.wins += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn get(&self, champion_id: i64, lane: &str, item_id: i64) -> Option<&ItemStats> {
        self.stats.get(&(champion_id, lane.to_string(), item_id))
    }

    /// Snapshot of every entry, in no particular order.
    pub fn all(&self) -> Vec<ItemStats> {
        self.stats.values().cloned().collect()
    }
}
