use agenda::endpoint::EndpointConfig;
use agenda::render;
use serde_json::json;

use super::{load, parse_month, print_json};

pub async fn run(
    endpoint: &EndpointConfig,
    month: Option<&str>,
    shift: i32,
    json: bool,
) -> Result<(), String> {
    let month = month.map(parse_month).transpose()?;
    let mut agenda = load(endpoint).await?;

    if let Some(cursor) = month {
        agenda.show_month(cursor);
    }
    if shift != 0 {
        agenda.shift_month(shift);
    }

    let view = agenda.view().calendar;
    if json {
        let marked: Vec<String> = view
            .days
            .iter()
            .filter(|d| d.has_tasks)
            .map(|d| d.date.format("%Y-%m-%d").to_string())
            .collect();
        return print_json(&json!({
            "month": view.cursor.to_string(),
            "title": view.title,
            "days_with_tasks": marked,
        }));
    }

    print!("{}", render::calendar(&view));
    Ok(())
}
