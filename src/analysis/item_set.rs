use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::models::Champion;
use crate::config::Config;
use crate::static_data::StaticData;

use super::item_stats::{ItemStats, Phase};

/// Ranked, phase-bucketed item recommendation for one champion and lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSet {
    pub champion: Option<Champion>,
    pub lane: Option<String>,
    pub early_items: Vec<ItemStats>,
    pub midgame_items: Vec<ItemStats>,
    pub lategame_items: Vec<ItemStats>,
    pub generated_at: DateTime<Utc>,
}

impl ItemSet {
    /// Builds the ranked set from one (champion, lane) slice of stats:
    /// dedup by item id, drop entries at or below the minimum-wins
    /// threshold, rank by win rate, bucket by phase, then cap each
    /// bucket. Mid and late buckets only keep final items.
    ///
    /// Short buckets are returned as-is; the calling layer decides
    /// whether the result carries enough data to present.
    pub fn from_stats(
        region: &str,
        item_stats: &[ItemStats],
        static_data: &StaticData<'_>,
        config: &Config,
    ) -> ItemSet {
        let mut champion = None;
        let mut lane = None;
        let mut early_items = Vec::new();
        let mut midgame_items = Vec::new();
        let mut lategame_items = Vec::new();

        let mut seen = HashSet::new();
        let mut ranked: Vec<&ItemStats> = item_stats
            .iter()
            .filter(|stat| seen.insert(stat.item_id))
            .collect();
        ranked.retain(|stat| stat.wins > config.item_minimum_wins_required);
        ranked.sort_by(|a, b| {
            b.win_rate()
                .partial_cmp(&a.win_rate())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for stat in ranked {
            if champion.is_none() {
                champion = static_data.champion(region, stat.champion_id);
            }
            if lane.is_none() {
                lane = Some(stat.lane.clone());
            }

            match stat.phase(config.early_game_length, config.mid_game_length) {
                Phase::Early => early_items.push(stat.clone()),
                Phase::Mid => midgame_items.push(stat.clone()),
                Phase::Late => lategame_items.push(stat.clone()),
            }
        }

        early_items.truncate(config.items_per_section);

        midgame_items.retain(|stat| is_final_item(region, stat.item_id, static_data));
        midgame_items.truncate(config.items_per_section);

        lategame_items.retain(|stat| is_final_item(region, stat.item_id, static_data));
        lategame_items.truncate(config.items_per_section);

        ItemSet {
            champion,
            lane,
            early_items,
            midgame_items,
            lategame_items,
            generated_at: Utc::now(),
        }
    }
}

/// Items whose metadata cannot be resolved are treated as not final.
fn is_final_item(region: &str, item_id: i64, static_data: &StaticData<'_>) -> bool {
    static_data
        .item(region, item_id)
        .map(|item| item.is_final())
        .unwrap_or(false)
}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ItemSet [ EarlyGame: {}, MidGame: {}, LateGame: {} ]",
            self.early_items.len(),
            self.midgame_items.len(),
            self.lategame_items.len()
        )
    }
}
