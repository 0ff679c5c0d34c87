use agenda::endpoint::EndpointConfig;

use super::{load, print_json, task_id};

pub async fn run(endpoint: &EndpointConfig, id: &str, json: bool) -> Result<(), String> {
    let mut agenda = load(endpoint).await?;
    let id = task_id(&agenda, id);

    let task = agenda
        .toggle(&id)
        .await
        .map_err(|e| format!("failed to update task: {e}"))?;

    if json {
        print_json(&task)
    } else if task.done {
        println!("Completed task {}", task.id);
        Ok(())
    } else {
        println!("Reopened task {}", task.id);
        Ok(())
    }
}
