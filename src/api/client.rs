use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use tracing::debug;

use crate::config::Config;
use crate::error::AppError;

use super::endpoints;
use super::models::*;
use super::RiotApi;

/// Blocking client for the legacy Riot endpoints. One instance owns the
/// process-wide request ceiling, so every outbound call in a run passes
/// through the same limiter.
pub struct RiotApiClient {
    api_key: String,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl RiotApiClient {
    pub fn new(config: &Config) -> Self {
        // 20 requests per second ceiling, on top of the explicit pacing
        // sleeps the batch loader applies.
        let rate_limiter = RateLimiter::direct(Quota::per_second(NonZeroU32::new(20).unwrap()));
        RiotApiClient {
            api_key: config.api_key.clone(),
            rate_limiter,
        }
    }

    /// Issues a GET with the api key appended, honoring the request
    /// ceiling. HTTP 429/503 surface as [`AppError::RateLimited`]; the
    /// caller owns the backoff.
    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        while self.rate_limiter.check().is_err() {
            thread::sleep(Duration::from_millis(50));
        }

        let separator = if url.contains('?') { '&' } else { '?' };
        let keyed_url = format!("{}{}api_key={}", url, separator, self.api_key);

        let response = ureq::get(&keyed_url)
            .set("User-Agent", "league_itemset/0.1.0")
            .call();

        match response {
            Ok(resp) => {
                debug!("GET {} -> {}", url, resp.status());
                resp.into_string()
                    .map_err(|e| AppError::HttpError(e.to_string()))
            }
            Err(ureq::Error::Status(429, _)) | Err(ureq::Error::Status(503, _)) => {
                debug!("GET {} -> rate limited", url);
                Err(AppError::RateLimited)
            }
            Err(e) => {
                debug!("GET {} -> {}", url, e);
                Err(AppError::HttpError(e.to_string()))
            }
        }
    }
}

impl RiotApi for RiotApiClient {
    fn match_detail(&self, region: &str, match_id: i64) -> Result<MatchDetail, AppError> {
        let url = format!(
            "{}?includeTimeline=true",
            endpoints::match_url(region, match_id)
        );
        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    fn featured_games(&self, region: &str) -> Result<FeaturedGames, AppError> {
        let body = self.execute_request(&endpoints::featured_url(region))?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    fn champion(&self, region: &str, champion_id: i64) -> Result<Champion, AppError> {
        let body = self.execute_request(&endpoints::champion_url(region, champion_id))?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    fn item(&self, region: &str, item_id: i64) -> Result<Item, AppError> {
        let url = format!(
            "{}?itemData=consumed,from,gold,into",
            endpoints::item_url(region, item_id)
        );
        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    fn all_champions(&self, region: &str) -> Result<ChampionList, AppError> {
        let url = format!("{}?dataById=true", endpoints::all_champions_url(region));
        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }
}
