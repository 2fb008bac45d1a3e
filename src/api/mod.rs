pub mod client;
pub mod endpoints;
pub mod models;

pub use client::RiotApiClient;

use crate::error::AppError;
use models::{Champion, ChampionList, FeaturedGames, Item, MatchDetail};

/// The slice of the Riot API this pipeline consumes. [`RiotApiClient`]
/// is the live implementation; tests plug in stubs.
pub trait RiotApi {
    /// Full match detail including the purchase timeline.
    fn match_detail(&self, region: &str, match_id: i64) -> Result<MatchDetail, AppError>;

    /// Games currently featured in a region.
    fn featured_games(&self, region: &str) -> Result<FeaturedGames, AppError>;

    fn champion(&self, region: &str, champion_id: i64) -> Result<Champion, AppError>;

    fn item(&self, region: &str, item_id: i64) -> Result<Item, AppError>;

    /// The full champion roster, keyed by id.
    fn all_champions(&self, region: &str) -> Result<ChampionList, AppError>;
}
