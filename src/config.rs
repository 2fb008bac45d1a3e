use crate::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Riot dev keys allow roughly 500 requests every 10 minutes, so the
/// default pacing keeps a full batch just under that budget.
const DEFAULT_MS_BETWEEN_API_CALLS: u64 = 1200;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub region: String,
    /// Root directory of the durable blob cache.
    pub cache_dir: PathBuf,
    /// Pacing between non-cached API calls, in milliseconds.
    pub ms_between_api_calls: u64,
    /// An item needs strictly more wins than this to be recommended.
    pub item_minimum_wins_required: u32,
    /// Per-phase cap on recommended items.
    pub items_per_section: usize,
    /// End of the early game, in minutes.
    pub early_game_length: u32,
    /// End of the mid game, in minutes.
    pub mid_game_length: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").map_err(|_| {
            AppError::ConfigError("RIOT_API_KEY not found in .env file".to_string())
        })?;

        let region = env::var("RIOT_REGION").unwrap_or_else(|_| "na".to_string());

        let cache_dir = match env::var("CACHE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".league_itemset"),
        };

        Ok(Config {
            api_key,
            region,
            cache_dir,
            ms_between_api_calls: parse_var(
                "MS_BETWEEN_API_CALLS",
                DEFAULT_MS_BETWEEN_API_CALLS,
            )?,
            item_minimum_wins_required: parse_var("ITEM_MINIMUM_WINS_REQUIRED", 5)?,
            items_per_section: parse_var("ITEMS_PER_SECTION", 6)?,
            early_game_length: parse_var("EARLY_GAME_LENGTH", 10)?,
            mid_game_length: parse_var("MID_GAME_LENGTH", 25)?,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::ConfigError(format!("{} must be a valid number", name))),
        Err(_) => Ok(default),
    }
}
