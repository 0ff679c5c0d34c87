use agenda::endpoint::EndpointConfig;
use agenda::health::{HEALTH_POLL_INTERVAL, poller};
use agenda::render;
use agenda::state::Connection;
use serde_json::json;

use super::{Agenda, connect, print_json};

fn report(agenda: &Agenda, status: Connection, json: bool) -> Result<(), String> {
    let base_url = agenda.service().base_url();
    if json {
        let status = match status {
            Connection::Connected => "connected",
            Connection::Disconnected => "disconnected",
        };
        return print_json(&json!({ "status": status, "base_url": base_url }));
    }
    if let Some(notice) = agenda.view().connection {
        println!("{} ({base_url})", render::connection(&notice));
    }
    Ok(())
}

pub async fn run(endpoint: &EndpointConfig, watch: bool, json: bool) -> Result<(), String> {
    let mut agenda = connect(endpoint);

    if !watch {
        let status = agenda.check_health().await;
        report(&agenda, status, json)?;
        return match status {
            Connection::Connected => Ok(()),
            Connection::Disconnected => Err(format!(
                "task service unavailable at {}",
                agenda.service().base_url()
            )),
        };
    }

    let mut ticker = poller(HEALTH_POLL_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let status = agenda.check_health().await;
                report(&agenda, status, json)?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}
