use agenda::endpoint::EndpointConfig;
use chrono::Utc;

use super::{connect, parse_date, print_json};

pub async fn run(
    endpoint: &EndpointConfig,
    title: &str,
    due: Option<&str>,
    no_due: bool,
    json: bool,
) -> Result<(), String> {
    let due_date = match (no_due, due) {
        (true, _) => None,
        (false, Some(raw)) => Some(parse_date(raw)?),
        (false, None) => Some(Utc::now().date_naive()),
    };

    let mut agenda = connect(endpoint);
    let task = agenda
        .add(title, due_date)
        .await
        .map_err(|e| format!("failed to create task: {e}"))?;

    if json {
        print_json(&task)
    } else {
        println!("Created task {}: {}", task.id, task.title);
        Ok(())
    }
}
