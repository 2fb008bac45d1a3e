use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// Match v2.2 response. Every field defaults so that an error body
// deserializes to the zero-id match instead of failing; the fetch path
// treats that as "not loaded".
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    #[serde(default)]
    pub match_id: i64,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub timeline: Option<MatchTimeline>,
    #[serde(skip)]
    pub from_cache: bool,
}

impl MatchDetail {
    /// A zero id marks a match that never loaded.
    pub fn is_loaded(&self) -> bool {
        self.match_id != 0
    }

    /// Every ITEM_PURCHASED event across all frames, stamped with the
    /// enclosing frame's timestamp, in frame order.
    pub fn all_item_purchases(&self) -> Vec<ItemPurchase> {
        let mut purchases = Vec::new();

        let timeline = match &self.timeline {
            Some(timeline) => timeline,
            None => return purchases,
        };

        for frame in &timeline.frames {
            for event in &frame.events {
                if event.event_type == "ITEM_PURCHASED" {
                    purchases.push(ItemPurchase {
                        timestamp: frame.timestamp,
                        item_id: event.item_id,
                        participant_id: event.participant_id,
                    });
                }
            }
        }

        purchases
    }

    /// A participant won when any winner-flagged team shares its team id.
    pub fn participant_won(&self, participant: &Participant) -> bool {
        self.teams
            .iter()
            .any(|team| team.winner && team.team_id == participant.team_id)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default)]
    pub team_id: i64,
    #[serde(default)]
    pub winner: bool,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default)]
    pub participant_id: i64,
    #[serde(default)]
    pub champion_id: i64,
    #[serde(default)]
    pub team_id: i64,
    #[serde(default)]
    pub stats: ParticipantStats,
    #[serde(default)]
    pub timeline: ParticipantTimeline,
}

/// End-of-game inventory slots; 0 marks an empty slot.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStats {
    #[serde(default)]
    pub item0: i64,
    #[serde(default)]
    pub item1: i64,
    #[serde(default)]
    pub item2: i64,
    #[serde(default)]
    pub item3: i64,
    #[serde(default)]
    pub item4: i64,
    #[serde(default)]
    pub item5: i64,
    #[serde(default)]
    pub item6: i64,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantTimeline {
    #[serde(default)]
    pub lane: String, // TOP, JUNGLE, MIDDLE, BOTTOM
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTimeline {
    #[serde(default)]
    pub frames: Vec<Frame>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub item_id: i64,
    #[serde(default)]
    pub participant_id: i64,
}

/// Purchase event joined with its frame timestamp. Derived per run,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPurchase {
    pub timestamp: i64,
    pub item_id: i64,
    pub participant_id: i64,
}

// Featured-games v1.0 response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedGames {
    #[serde(default)]
    pub client_refresh_interval: i64,
    #[serde(default)]
    pub game_list: Vec<FeaturedGameInfo>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedGameInfo {
    #[serde(default)]
    pub game_id: i64,
    #[serde(default)]
    pub game_queue_config_id: i64,
    #[serde(default)]
    pub map_id: i64,
}

// Static-data v1.2 responses
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Champion {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub consumed: bool,
    #[serde(default)]
    pub gold: ItemGold,
    /// Item ids this item builds from. Absent in the wire format for
    /// basic items.
    #[serde(rename = "from", default)]
    pub builds_from: Vec<String>,
    /// Item ids this item builds into.
    #[serde(rename = "into", default)]
    pub builds_into: Vec<String>,
}

impl Item {
    /// A final item builds into nothing further.
    pub fn is_final(&self) -> bool {
        self.builds_into.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemGold {
    #[serde(default)]
    pub base: i32,
    #[serde(default)]
    pub total: i32,
}

/// All-champions response with `dataById=true`: champions keyed by
/// numeric id string.
#[derive(Debug, Default, Deserialize)]
pub struct ChampionList {
    #[serde(default)]
    pub data: HashMap<String, Champion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_match() -> MatchDetail {
        serde_json::from_value(json!({
            "matchId": 42,
            "region": "NA",
            "teams": [
                { "teamId": 100, "winner": true },
                { "teamId": 200, "winner": false }
            ],
            "participants": [
                {
                    "participantId": 1,
                    "championId": 17,
                    "teamId": 100,
                    "stats": { "item0": 3078, "item6": 3340 },
                    "timeline": { "lane": "TOP", "role": "SOLO" }
                },
                {
                    "participantId": 2,
                    "championId": 32,
                    "teamId": 200,
                    "stats": {},
                    "timeline": { "lane": "JUNGLE", "role": "NONE" }
                }
            ],
            "timeline": {
                "frames": [
                    {
                        "timestamp": 60000,
                        "events": [
                            { "eventType": "ITEM_PURCHASED", "itemId": 1001, "participantId": 1 },
                            { "eventType": "SKILL_LEVEL_UP", "itemId": 0, "participantId": 1 }
                        ]
                    },
                    { "timestamp": 120000 },
                    {
                        "timestamp": 180000,
                        "events": [
                            { "eventType": "ITEM_PURCHASED", "itemId": 3078, "participantId": 2 }
                        ]
                    }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn purchases_take_the_enclosing_frame_timestamp() {
        let purchases = sample_match().all_item_purchases();
        assert_eq!(
            purchases,
            vec![
                ItemPurchase { timestamp: 60000, item_id: 1001, participant_id: 1 },
                ItemPurchase { timestamp: 180000, item_id: 3078, participant_id: 2 },
            ]
        );
    }

    #[test]
    fn win_follows_the_winner_flagged_team() {
        let detail = sample_match();
        assert!(detail.participant_won(&detail.participants[0]));
        assert!(!detail.participant_won(&detail.participants[1]));
    }

    #[test]
    fn error_body_parses_to_the_unloaded_match() {
        let detail: MatchDetail =
            serde_json::from_str(r#"{"status":{"message":"Not found","status_code":404}}"#)
                .unwrap();
        assert!(!detail.is_loaded());
        assert!(detail.all_item_purchases().is_empty());
    }

    #[test]
    fn inventory_slots_parse_with_empty_defaults() {
        let detail = sample_match();
        let stats = &detail.participants[0].stats;
        assert_eq!(stats.item0, 3078);
        assert_eq!(stats.item1, 0);
        assert_eq!(stats.item6, 3340);
    }

    #[test]
    fn item_finality_follows_the_upgrade_list() {
        let final_item: Item = serde_json::from_value(json!({
            "id": 3078,
            "name": "Trinity Force",
            "gold": { "base": 3, "total": 3703 },
            "from": ["3057", "3077", "3044"]
        }))
        .unwrap();
        assert!(final_item.is_final());

        let component: Item = serde_json::from_value(json!({
            "id": 1001,
            "name": "Boots of Speed",
            "gold": { "base": 325, "total": 325 },
            "into": ["3006", "3047"]
        }))
        .unwrap();
        assert!(!component.is_final());
    }
}
