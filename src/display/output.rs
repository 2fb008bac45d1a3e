use colored::*;
use tabled::{settings::Style, Table, Tabled};

use crate::analysis::item_set::ItemSet;
use crate::analysis::item_stats::ItemStats;
use crate::api::models::Champion;
use crate::static_data::StaticData;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "#")]
    rank: String,
    item: String,
    uses: String,
    wins: String,
    win_rate: String,
    bought_at: String,
}

#[derive(Tabled)]
struct ChampionRow {
    id: String,
    name: String,
    title: String,
}

pub fn display_item_set(set: &ItemSet, region: &str, static_data: &StaticData<'_>) {
    let champion_name = set
        .champion
        .as_ref()
        .map(|champion| champion.name.clone())
        .unwrap_or_else(|| "Unknown champion".to_string());
    let lane = set.lane.clone().unwrap_or_else(|| "?".to_string());

    println!(
        "\n{}",
        format!("🛒 Best items for {} ({})", champion_name, lane)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    display_phase_table("Early game", &set.early_items, region, static_data);
    display_phase_table("Mid game", &set.midgame_items, region, static_data);
    display_phase_table("Late game", &set.lategame_items, region, static_data);

    println!("{}", "Interpretation".bold().yellow());
    println!("• Win Rate: games won when this item was bought in this lane");
    println!("• Bought At: average game time of the purchase");
    println!("• Mid and late game sections only list completed items\n");
}

fn display_phase_table(title: &str, items: &[ItemStats], region: &str, static_data: &StaticData<'_>) {
    println!("{}", title.bold().yellow());

    if items.is_empty() {
        println!("{}\n", "No items with enough data".yellow());
        return;
    }

    let mut rows = vec![];
    for (idx, stat) in items.iter().enumerate() {
        let item = match static_data.item(region, stat.item_id) {
            Some(item) if !item.name.is_empty() => item.name,
            _ => stat.item_id.to_string(),
        };

        rows.push(ItemRow {
            rank: format!("#{}", idx + 1),
            item,
            uses: format!("{}", stat.uses),
            wins: format!("{}", stat.wins),
            win_rate: format!("{:.1}%", stat.win_rate() * 100.0),
            bought_at: stat.average_buy_time(),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_champions(champions: &[Champion]) {
    println!("\n{}", "🏆 Champions".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let mut rows = vec![];
    for champion in champions {
        rows.push(ChampionRow {
            id: champion.id.to_string(),
            name: champion.name.clone(),
            title: champion.title.clone(),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
