use agenda::endpoint::EndpointConfig;
use agenda::models::Filter;
use agenda::render;
use agenda::view::filter_tasks;

use super::{connect, parse_month, print_json};

pub async fn run(
    endpoint: &EndpointConfig,
    filter: &str,
    month: Option<&str>,
    with_calendar: bool,
    json: bool,
) -> Result<(), String> {
    let filter: Filter = filter.parse()?;
    let month = month.map(parse_month).transpose()?;

    let mut agenda = connect(endpoint);
    let loaded = agenda.list().await;

    if json {
        loaded.map_err(|e| format!("failed to load tasks: {e}"))?;
        return print_json(&filter_tasks(&agenda.state().tasks, filter));
    }

    agenda.set_filter(filter);
    if let Some(cursor) = month {
        agenda.show_month(cursor);
    }
    print!("{}", render::screen(&agenda.view(), with_calendar));

    // The error panel is already on screen; still exit non-zero.
    loaded.map_err(|e| format!("failed to load tasks: {e}"))
}
