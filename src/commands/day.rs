use agenda::endpoint::EndpointConfig;
use agenda::models::Task;
use agenda::render;
use agenda::view::{TaskListView, TaskRow};
use chrono::Utc;

use super::{load, parse_date, print_banner, print_json};

pub async fn run(endpoint: &EndpointConfig, date: &str, json: bool) -> Result<(), String> {
    let date = parse_date(date)?;
    let mut agenda = load(endpoint).await?;
    let count = agenda.select_date(date);
    let due: Vec<&Task> = agenda.state().tasks_due_on(date).collect();

    if json {
        return print_json(&due);
    }

    if count == 0 {
        println!("No tasks due on {date}.");
        return Ok(());
    }

    print_banner(&agenda);
    let now = Utc::now();
    let rows = due.into_iter().map(|t| TaskRow::from_task(t, now)).collect();
    print!("{}", render::task_list(&TaskListView::Rows(rows)));
    Ok(())
}
