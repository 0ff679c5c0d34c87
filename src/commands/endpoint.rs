use agenda::endpoint::EndpointConfig;
use serde_json::json;

use super::print_json;

pub fn run(endpoint: &EndpointConfig, json: bool) -> Result<(), String> {
    let base_url = endpoint.resolve();
    if json {
        return print_json(&json!({ "base_url": base_url }));
    }
    println!("{base_url}");
    Ok(())
}
