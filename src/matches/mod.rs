mod fetcher;
mod loader;

pub use fetcher::MatchFetcher;
pub use loader::{load_matchset, scrape_featured, BatchLoader};
