use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_itemset::analysis::item_stats::ItemStatsTable;
use league_itemset::api::RiotApiClient;
use league_itemset::cache::FsStore;
use league_itemset::config::Config;
use league_itemset::display::output::{
    display_champions, display_error, display_info, display_item_set, display_success,
};
use league_itemset::error::AppError;
use league_itemset::itemsets::ItemSetService;
use league_itemset::matches::{load_matchset, scrape_featured, BatchLoader};
use league_itemset::static_data::StaticData;

#[derive(Parser, Debug)]
#[command(name = "League Itemset")]
#[command(about = "Build statistically best item sets from ranked match history", long_about = None)]
struct Args {
    /// Region to work against (default: RIOT_REGION from .env, or "na")
    #[arg(short, long, global = true)]
    region: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a matchset, aggregate purchase stats, and persist them
    Generate {
        /// Matchset blob name (default: {REGION}.json)
        #[arg(long)]
        matchset: Option<String>,

        /// Label for this stats run, useful for experimental passes
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Show the best item set for a champion and lane
    Itemset {
        champion_id: i64,

        /// Lane: top, jungle, middle or bottom
        lane: String,
    },
    /// Scrape featured games and collect ranked match ids
    Scrape,
    /// List all champions
    Champions,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "league_itemset=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(region) = args.region {
        config.region = region;
    }
    let region = config.region.clone();

    let store = FsStore::new(config.cache_dir.clone());
    let client = RiotApiClient::new(&config);

    match args.command {
        Command::Generate { matchset, label } => {
            let filename = matchset.unwrap_or_else(|| format!("{}.json", region.to_uppercase()));
            display_info(&format!(
                "Loading matchset {} for region {}",
                filename, region
            ));

            let match_ids = load_matchset(&store, &filename);
            if match_ids.is_empty() {
                return Err(AppError::EmptyMatchset(filename).into());
            }

            display_info(&format!("Fetching {} matches...", match_ids.len()));
            let bar = ProgressBar::new(match_ids.len() as u64);
            let loader = BatchLoader::new(&client, &store, &config);
            let matches = loader.fetch_all(&region, &match_ids, Some(&bar));
            bar.finish_with_message("✓ Matches fetched");

            display_success(&format!(
                "Loaded {} of {} matches",
                matches.len(),
                match_ids.len()
            ));

            let mut table = ItemStatsTable::new();
            table.ingest(&matches);
            display_success(&format!("Aggregated {} item stats entries", table.len()));

            let static_data = StaticData::new(&client, &store);
            let service = ItemSetService::new(&store, &static_data, &config);
            service.write_stats(&region, &table, &label);
            display_success("Stats persisted");
        }
        Command::Itemset { champion_id, lane } => {
            let static_data = StaticData::new(&client, &store);
            let service = ItemSetService::new(&store, &static_data, &config);

            let set = service.get_or_build(&region, champion_id, &lane);

            if set.champion.is_none()
                || set.early_items.len() <= 2
                || set.midgame_items.len() < 2
                || set.lategame_items.len() < 2
            {
                display_info(
                    "Not enough data for this champion and lane yet. Run a larger generate pass first.",
                );
                return Ok(());
            }

            display_item_set(&set, &region, &static_data);
        }
        Command::Scrape => {
            let appended = scrape_featured(&client, &store, &region, &config)
                .context("failed to scrape featured games")?;
            display_success(&format!("Collected {} ranked match ids", appended));
        }
        Command::Champions => {
            let static_data = StaticData::new(&client, &store);
            let champions = static_data.all_champions(&region);
            if champions.is_empty() {
                display_info("No champions returned; check your API key and region");
                return Ok(());
            }
            display_champions(&champions);
        }
    }

    Ok(())
}
