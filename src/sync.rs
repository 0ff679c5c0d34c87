//! The task synchronization controller.
//!
//! Each operation makes one round-trip through a [`TaskService`] and then
//! dispatches the outcome into the reducer. Local state only changes after
//! the server has answered.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::api::TaskService;
use crate::error::{AgendaError, AgendaResult};
use crate::models::{Filter, NewTask, Task, TaskId};
use crate::state::{Action, AppState, CalendarCursor, Connection, Mutation, reduce};
use crate::view::{self, ViewModel};

#[derive(Debug)]
pub struct Controller<S> {
    service: S,
    state: AppState,
}

impl<S: TaskService> Controller<S> {
    pub fn new(service: S) -> Self {
        Controller {
            service,
            state: AppState::new(Utc::now().date_naive()),
        }
    }

    /// Start from an existing state instead of a fresh one.
    pub fn with_state(service: S, state: AppState) -> Self {
        Controller { service, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn view(&self) -> ViewModel {
        view::build(&self.state, Utc::now())
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action, Utc::now());
    }

    /// Fetch everything and replace the local collection.
    pub async fn list(&mut self) -> AgendaResult<()> {
        self.dispatch(Action::LoadStarted);
        match self.service.list().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded tasks");
                self.dispatch(Action::Loaded(tasks));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load tasks");
                self.dispatch(Action::LoadFailed(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.dispatch(Action::DraftTitleChanged(title.into()));
    }

    pub fn set_draft_due(&mut self, due_date: Option<NaiveDate>) {
        self.dispatch(Action::DraftDueChanged(due_date));
    }

    /// Submit the draft. An empty title is rejected locally.
    pub async fn create(&mut self) -> AgendaResult<Task> {
        let title = self.state.draft.title.trim().to_string();
        if title.is_empty() {
            self.dispatch(Action::DraftRejected);
            return Err(AgendaError::EmptyTitle);
        }
        let new_task = NewTask::new(title, self.state.draft.due_date);
        match self.service.create(&new_task).await {
            Ok(task) => {
                info!(id = %task.id, title = %task.title, "created task");
                self.dispatch(Action::Created(task.clone()));
                Ok(task)
            }
            Err(e) => Err(self.mutation_failed(Mutation::Create, e)),
        }
    }

    /// Fill the draft and submit it.
    pub async fn add(&mut self, title: &str, due_date: Option<NaiveDate>) -> AgendaResult<Task> {
        self.set_draft_title(title);
        self.set_draft_due(due_date);
        self.create().await
    }

    /// Send the full record with `done` flipped; keep what the server returns.
    pub async fn toggle(&mut self, id: &TaskId) -> AgendaResult<Task> {
        let Some(task) = self.state.find(id) else {
            return Err(AgendaError::TaskNotFound(id.clone()));
        };
        let flipped = task.toggled();
        match self.service.update(&flipped).await {
            Ok(updated) => {
                info!(id = %updated.id, done = updated.done, "updated task");
                self.dispatch(Action::Toggled(updated.clone()));
                Ok(updated)
            }
            Err(e) => Err(self.mutation_failed(Mutation::Update, e)),
        }
    }

    /// Delete after `confirm` agrees. Returns `false` when declined.
    pub async fn delete(
        &mut self,
        id: &TaskId,
        confirm: impl FnOnce(&TaskId) -> bool,
    ) -> AgendaResult<bool> {
        if !confirm(id) {
            return Ok(false);
        }
        match self.service.delete(id).await {
            Ok(()) => {
                info!(%id, "deleted task");
                self.dispatch(Action::Deleted(id.clone()));
                Ok(true)
            }
            Err(e) => Err(self.mutation_failed(Mutation::Delete, e)),
        }
    }

    pub async fn check_health(&mut self) -> Connection {
        let status = match self.service.health().await {
            Ok(()) => Connection::Connected,
            Err(e) => {
                warn!(error = %e, "health check failed");
                Connection::Disconnected
            }
        };
        self.dispatch(Action::HealthChecked(status));
        status
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.dispatch(Action::FilterChanged(filter));
    }

    pub fn shift_month(&mut self, delta: i32) {
        self.dispatch(Action::MonthShifted(delta));
    }

    pub fn show_month(&mut self, cursor: CalendarCursor) {
        let delta = self.state.cursor.months_until(cursor);
        self.shift_month(delta);
    }

    /// Pick a calendar day: it becomes the draft due date. Returns how many
    /// tasks are due that day.
    pub fn select_date(&mut self, date: NaiveDate) -> usize {
        self.dispatch(Action::DateSelected(date));
        self.state.tasks_due_on(date).count()
    }

    fn mutation_failed(&mut self, mutation: Mutation, e: AgendaError) -> AgendaError {
        warn!(?mutation, error = %e, "task request failed");
        self.dispatch(Action::MutationFailed {
            mutation,
            message: e.to_string(),
        });
        e
    }
}
