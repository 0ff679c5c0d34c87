use std::future::Future;

use reqwest::{RequestBuilder, Response, Url};
use tracing::debug;

use crate::error::{AgendaError, AgendaResult};
use crate::models::{NewTask, Task, TaskId};

mod wire;

use wire::{TaskBody, TaskListBody};

/// The five calls the remote task service offers.
///
/// Every call is a single round-trip; nothing is retried, cached, or
/// cancelled here.
pub trait TaskService {
    /// `GET /health`; any 2xx counts as healthy.
    fn health(&self) -> impl Future<Output = AgendaResult<()>> + Send;

    /// `GET /tasks`.
    fn list(&self) -> impl Future<Output = AgendaResult<Vec<Task>>> + Send;

    /// `POST /tasks`, returning the record the server stored.
    fn create(&self, task: &NewTask) -> impl Future<Output = AgendaResult<Task>> + Send;

    /// `PUT /tasks/{id}` with the full record, returning the authoritative copy.
    fn update(&self, task: &Task) -> impl Future<Output = AgendaResult<Task>> + Send;

    /// `DELETE /tasks/{id}`.
    fn delete(&self, id: &TaskId) -> impl Future<Output = AgendaResult<()>> + Send;
}

/// [`TaskService`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpTaskService {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTaskService {
    /// Create a service handle. This does not open a connection.
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpTaskService {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> AgendaResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AgendaError::RequestFailed(format!("invalid base URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AgendaError::RequestFailed(format!("invalid base URL {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> AgendaResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "service answered with an error status");
            return Err(AgendaError::status(status.as_u16()));
        }
        Ok(response)
    }
}

impl TaskService for HttpTaskService {
    async fn health(&self) -> AgendaResult<()> {
        let url = self.endpoint(&["health"])?;
        debug!(%url, "GET health");
        self.send(self.http.get(url)).await?;
        Ok(())
    }

    async fn list(&self) -> AgendaResult<Vec<Task>> {
        let url = self.endpoint(&["tasks"])?;
        debug!(%url, "GET tasks");
        let body: TaskListBody = self.send(self.http.get(url)).await?.json().await?;
        Ok(body.into_tasks())
    }

    async fn create(&self, task: &NewTask) -> AgendaResult<Task> {
        let url = self.endpoint(&["tasks"])?;
        debug!(%url, title = %task.title, "POST task");
        let body: TaskBody = self
            .send(self.http.post(url).json(task))
            .await?
            .json()
            .await?;
        Ok(body.into_task())
    }

    async fn update(&self, task: &Task) -> AgendaResult<Task> {
        let id = task.id.to_string();
        let url = self.endpoint(&["tasks", &id])?;
        debug!(%url, done = task.done, "PUT task");
        let body: TaskBody = self
            .send(self.http.put(url).json(task))
            .await?
            .json()
            .await?;
        Ok(body.into_task())
    }

    async fn delete(&self, id: &TaskId) -> AgendaResult<()> {
        let id = id.to_string();
        let url = self.endpoint(&["tasks", &id])?;
        debug!(%url, "DELETE task");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}
