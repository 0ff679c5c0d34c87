//! Application state and the reducer that evolves it.
//!
//! [`reduce`] is the only place state changes. It is pure: the caller hands
//! in the current state, what happened, and the clock reading, and gets the
//! next state back.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use tracing::warn;

use crate::models::{Filter, Task, TaskId};

mod cursor;

pub use cursor::CalendarCursor;

/// How long banners and the connection indicator stay visible, in seconds.
pub const NOTICE_TTL_SECS: i64 = 3;

pub fn notice_ttl() -> TimeDelta {
    TimeDelta::seconds(NOTICE_TTL_SECS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Success,
    Error,
}

/// Transient status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    pub raised_at: DateTime<Utc>,
}

impl Banner {
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.raised_at + notice_ttl()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Connected,
    Disconnected,
}

/// Transient connection indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionNotice {
    pub status: Connection,
    pub text: String,
    pub raised_at: DateTime<Utc>,
}

impl ConnectionNotice {
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.raised_at + notice_ttl()
    }
}

/// What the task list area shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListPanel {
    #[default]
    Loading,
    Ready,
    /// Inline error with a retry action.
    Failed { message: String },
}

/// The pending new-task input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub due_date: Option<NaiveDate>,
}

/// Which mutation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn verb(&self) -> &'static str {
        match self {
            Mutation::Create => "create",
            Mutation::Update => "update",
            Mutation::Delete => "delete",
        }
    }
}

/// Everything the client knows. Nothing here survives a restart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub filter: Filter,
    pub cursor: CalendarCursor,
    pub panel: ListPanel,
    pub draft: Draft,
    pub banner: Option<Banner>,
    pub connection: Option<ConnectionNotice>,
}

impl AppState {
    /// Fresh state: calendar on `today`'s month, draft due today.
    pub fn new(today: NaiveDate) -> Self {
        AppState {
            cursor: CalendarCursor::containing(today),
            draft: Draft {
                title: String::new(),
                due_date: Some(today),
            },
            ..AppState::default()
        }
    }

    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Match user input against the identifiers in the collection.
    pub fn resolve_id(&self, raw: &str) -> Option<TaskId> {
        let raw = raw.trim();
        self.tasks
            .iter()
            .find(|t| t.id.to_string() == raw)
            .map(|t| t.id.clone())
    }

    pub fn tasks_due_on(&self, date: NaiveDate) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.is_due_on(date))
    }
}

/// Things that happen to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    Loaded(Vec<Task>),
    LoadFailed(String),
    DraftTitleChanged(String),
    DraftDueChanged(Option<NaiveDate>),
    /// Submit with an empty title; nothing was sent.
    DraftRejected,
    Created(Task),
    Toggled(Task),
    Deleted(TaskId),
    MutationFailed { mutation: Mutation, message: String },
    FilterChanged(Filter),
    MonthShifted(i32),
    DateSelected(NaiveDate),
    HealthChecked(Connection),
}

pub fn reduce(mut state: AppState, action: Action, now: DateTime<Utc>) -> AppState {
    match action {
        Action::LoadStarted => {
            state.panel = ListPanel::Loading;
        }
        Action::Loaded(tasks) => {
            state.tasks = dedup_by_id(tasks);
            state.panel = ListPanel::Ready;
        }
        Action::LoadFailed(message) => {
            state.panel = ListPanel::Failed {
                message: format!("Failed to load tasks: {message}"),
            };
            state.connection = Some(connection_notice(
                Connection::Disconnected,
                "Connection error",
                now,
            ));
        }
        Action::DraftTitleChanged(title) => {
            state.draft.title = title;
        }
        Action::DraftDueChanged(due_date) => {
            state.draft.due_date = due_date;
        }
        Action::DraftRejected => {
            state.banner = Some(banner(BannerKind::Error, "Please enter a task title", now));
        }
        Action::Created(task) => {
            state.tasks.retain(|t| t.id != task.id);
            state.tasks.insert(0, task);
            state.draft = Draft {
                title: String::new(),
                due_date: Some(now.date_naive()),
            };
            state.panel = ListPanel::Ready;
            state.banner = Some(banner(BannerKind::Success, "Task added", now));
        }
        Action::Toggled(task) => {
            let text = if task.done {
                "Task completed"
            } else {
                "Task marked as pending"
            };
            if let Some(slot) = state.tasks.iter_mut().find(|t| t.id == task.id) {
                *slot = task;
            }
            state.panel = ListPanel::Ready;
            state.banner = Some(banner(BannerKind::Success, text, now));
        }
        Action::Deleted(id) => {
            state.tasks.retain(|t| t.id != id);
            state.panel = ListPanel::Ready;
            state.banner = Some(banner(BannerKind::Success, "Task deleted", now));
        }
        Action::MutationFailed { mutation, message } => {
            let text = format!("Failed to {} task: {message}", mutation.verb());
            state.banner = Some(banner(BannerKind::Error, &text, now));
        }
        Action::FilterChanged(filter) => {
            state.filter = filter;
        }
        Action::MonthShifted(delta) => {
            state.cursor = state.cursor.shifted(delta);
        }
        Action::DateSelected(date) => {
            state.draft.due_date = Some(date);
            let count = state.tasks_due_on(date).count();
            if count > 0 {
                let text = format!("{count} task(s) due on this date");
                state.banner = Some(banner(BannerKind::Info, &text, now));
            }
        }
        Action::HealthChecked(status) => {
            let text = match status {
                Connection::Connected => "Backend connected",
                Connection::Disconnected => "Backend unavailable",
            };
            state.connection = Some(connection_notice(status, text, now));
        }
    }
    state
}

fn banner(kind: BannerKind, text: &str, now: DateTime<Utc>) -> Banner {
    Banner {
        kind,
        text: text.to_string(),
        raised_at: now,
    }
}

fn connection_notice(status: Connection, text: &str, now: DateTime<Utc>) -> ConnectionNotice {
    ConnectionNotice {
        status,
        text: text.to_string(),
        raised_at: now,
    }
}

/// Keep the first record for each id.
fn dedup_by_id(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = std::collections::HashSet::new();
    let before = tasks.len();
    let unique: Vec<Task> = tasks
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect();
    if unique.len() != before {
        warn!(
            dropped = before - unique.len(),
            "service returned duplicate task ids"
        );
    }
    unique
}
