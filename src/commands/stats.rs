use agenda::endpoint::EndpointConfig;
use agenda::render;

use super::{load, print_json};

pub async fn run(endpoint: &EndpointConfig, json: bool) -> Result<(), String> {
    let agenda = load(endpoint).await?;
    let stats = agenda.view().stats;

    if json {
        return print_json(&stats);
    }

    println!("{}", render::stats_line(&stats));
    Ok(())
}
