//! Match-history ingestion and item-set recommendation pipeline for
//! League of Legends: rate-limited match fetching over a durable blob
//! cache, incremental per-item purchase statistics, and ranked
//! early/mid/late item sets built from those stats.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod display;
pub mod error;
pub mod itemsets;
pub mod matches;
pub mod static_data;
