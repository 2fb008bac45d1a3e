// URL builders for the legacy pvp.net endpoints. Query parameters are
// appended by the client, which also holds the api key.

const STATIC_DATA_PATH: &str = "/api/lol/static-data";

fn regional_host(region: &str) -> String {
    format!("https://{}.api.pvp.net", region)
}

fn global_host() -> &'static str {
    "https://global.api.pvp.net"
}

pub fn match_url(region: &str, match_id: i64) -> String {
    format!("{}/api/lol/{}/v2.2/match/{}", regional_host(region), region, match_id)
}

pub fn featured_url(region: &str) -> String {
    format!("{}/observer-mode/rest/featured", regional_host(region))
}

pub fn champion_url(region: &str, champion_id: i64) -> String {
    format!(
        "{}{}/{}/v1.2/champion/{}",
        regional_host(region),
        STATIC_DATA_PATH,
        region,
        champion_id
    )
}

pub fn item_url(region: &str, item_id: i64) -> String {
    format!(
        "{}{}/{}/v1.2/item/{}",
        regional_host(region),
        STATIC_DATA_PATH,
        region,
        item_id
    )
}

// All-champions lives on the global host, unlike the per-id lookups.
pub fn all_champions_url(region: &str) -> String {
    format!("{}{}/{}/v1.2/champion", global_host(), STATIC_DATA_PATH, region)
}
