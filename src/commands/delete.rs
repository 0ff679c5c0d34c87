use agenda::endpoint::EndpointConfig;
use agenda::models::TaskId;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::{connect, print_json};

/// `y` or `yes`, any case.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Read one answer line; end of input or a read error counts as no.
pub async fn read_answer<R: AsyncBufRead + Unpin>(input: R) -> bool {
    let mut lines = input.lines();
    matches!(lines.next_line().await, Ok(Some(answer)) if is_yes(&answer))
}

async fn confirm_on_stdin(id: &TaskId) -> bool {
    let mut stdout = tokio::io::stdout();
    let _ = stdout
        .write_all(format!("Delete task {id}? [y/N] ").as_bytes())
        .await;
    let _ = stdout.flush().await;
    read_answer(BufReader::new(tokio::io::stdin())).await
}

pub async fn run(endpoint: &EndpointConfig, id: &str, yes: bool, json: bool) -> Result<(), String> {
    let id = TaskId::parse(id);
    let mut agenda = connect(endpoint);
    let confirmed = yes || confirm_on_stdin(&id).await;

    let deleted = agenda
        .delete(&id, |_| confirmed)
        .await
        .map_err(|e| format!("failed to delete task: {e}"))?;

    if json {
        return print_json(&json!({ "id": id, "deleted": deleted }));
    }
    if deleted {
        println!("Deleted task {id}");
    } else {
        println!("Cancelled.");
    }
    Ok(())
}
