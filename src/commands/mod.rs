pub mod add;
pub mod calendar;
pub mod day;
pub mod delete;
pub mod endpoint;
pub mod health;
pub mod list;
pub mod shell;
pub mod stats;
pub mod toggle;

use agenda::api::HttpTaskService;
use agenda::endpoint::EndpointConfig;
use agenda::models::TaskId;
use agenda::render;
use agenda::state::CalendarCursor;
use agenda::sync::Controller;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

pub type Agenda = Controller<HttpTaskService>;

/// Controller talking to the service `endpoint` resolves to. Nothing is
/// fetched yet.
pub fn connect(endpoint: &EndpointConfig) -> Agenda {
    let base_url = endpoint.resolve();
    debug!(%base_url, "using task service");
    Controller::new(HttpTaskService::new(base_url))
}

/// Connect and fetch the collection; a failed load is an error.
pub async fn load(endpoint: &EndpointConfig) -> Result<Agenda, String> {
    let mut agenda = connect(endpoint);
    agenda
        .list()
        .await
        .map_err(|e| format!("failed to load tasks: {e}"))?;
    Ok(agenda)
}

/// `YYYY-MM-DD`, or `today`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("today") {
        return Ok(Utc::now().date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date: {raw} (expected YYYY-MM-DD)"))
}

pub fn parse_month(raw: &str) -> Result<CalendarCursor, String> {
    raw.parse()
}

/// The id as the collection knows it, or as typed when it is not there.
pub fn task_id(agenda: &Agenda, raw: &str) -> TaskId {
    agenda
        .state()
        .resolve_id(raw)
        .unwrap_or_else(|| TaskId::parse(raw))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let j = serde_json::to_string_pretty(value).map_err(|e| format!("json error: {e}"))?;
    println!("{j}");
    Ok(())
}

/// Print the current banner, if one is showing.
pub fn print_banner(agenda: &Agenda) {
    if let Some(notice) = agenda.view().banner {
        println!("{}", render::banner(&notice));
    }
}
