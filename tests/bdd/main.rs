
use std::collections::HashMap;

use agenda::api::HttpTaskService;
use agenda::endpoint::EndpointConfig;
use agenda::error::AgendaError;
use agenda::sync::Controller;
use cucumber::World;

use crate::backend::SharedBackend;

/// Shared state carried through each scenario.
#[derive(Debug, Default, World)]
pub struct AgendaWorld {
    /// In-memory state of the fake task service.
    pub backend: SharedBackend,
    /// Base URL the fake service listens on.
    pub base_url: Option<String>,
    /// Handle for the spawned axum server task.
    pub server_handle: Option<tokio::task::JoinHandle<()>>,
    /// Client for probing the fake service directly.
    pub http_client: reqwest::Client,
    /// The raw stdout of the most recent `ag` invocation.
    pub last_stdout: String,
    /// The raw stderr of the most recent `ag` invocation.
    pub last_stderr: String,
    /// Exit code of the most recent `ag` invocation.
    pub last_exit_code: i32,
    /// Library controller driven by controller steps.
    pub agenda: Option<Controller<HttpTaskService>>,
    /// Error returned by the most recent controller call.
    pub last_error: Option<AgendaError>,
    /// Task title to server id, populated by seeding steps.
    pub task_ids: HashMap<String, String>,
    /// Startup configuration for endpoint scenarios.
    pub endpoint: EndpointConfig,
    /// Result of the most recent endpoint resolution.
    pub resolved_url: Option<String>,
}

impl Drop for AgendaWorld {
    fn drop(&mut self) {
        if let Some(handle) = self.server_handle.take() {
            handle.abort();
        }
    }
}

#[tokio::main]
async fn main() {
    AgendaWorld::run("tests/features").await;
}
