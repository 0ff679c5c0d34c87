//! Pure projections from [`AppState`] to what the user sees.
//!
//! Nothing in here touches the terminal; [`crate::render`] turns a
//! [`ViewModel`] into text.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::models::{Filter, Task, TaskId};
use crate::state::{AppState, BannerKind, Connection, ListPanel};

mod calendar;

pub use calendar::{CalendarDay, CalendarView, WEEKDAY_HEADERS, month_grid};

pub const LOADING_MESSAGE: &str = "Loading tasks...";
pub const EMPTY_DETAIL: &str = "Tasks will appear here once you add them.";

/// Tasks matching `filter`, in collection order.
pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// Due before `now` (the due day taken as midnight UTC) and not done.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    match task.due_date {
        Some(due) if !task.done => due.and_time(NaiveTime::MIN).and_utc() < now,
        _ => false,
    }
}

/// Headline shown when the filtered list is empty.
pub fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "No tasks yet. Add your first task!",
        Filter::Pending => "No pending tasks.",
        Filter::Completed => "No completed tasks.",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

pub fn stats(tasks: &[Task]) -> Stats {
    let completed = tasks.iter().filter(|t| t.done).count();
    Stats {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    pub overdue: bool,
    pub due_date: Option<NaiveDate>,
    pub created_on: Option<NaiveDate>,
}

impl TaskRow {
    pub fn from_task(task: &Task, now: DateTime<Utc>) -> Self {
        TaskRow {
            id: task.id.clone(),
            title: task.title.clone(),
            done: task.done,
            overdue: is_overdue(task, now),
            due_date: task.due_date,
            created_on: task.created_at.map(|c| c.date_naive()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListView {
    Loading,
    /// Error panel; the retry action reloads the list.
    Failed { message: String },
    Empty { headline: &'static str, detail: &'static str },
    Rows(Vec<TaskRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub kind: BannerKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionView {
    pub status: Connection,
    pub text: String,
}

/// Everything a frame needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub filter: Filter,
    pub stats: Stats,
    pub list: TaskListView,
    pub calendar: CalendarView,
    pub draft_due: Option<NaiveDate>,
    pub banner: Option<NoticeView>,
    pub connection: Option<ConnectionView>,
}

pub fn task_list(state: &AppState, now: DateTime<Utc>) -> TaskListView {
    match &state.panel {
        ListPanel::Loading => TaskListView::Loading,
        ListPanel::Failed { message } => TaskListView::Failed {
            message: message.clone(),
        },
        ListPanel::Ready => {
            let rows: Vec<TaskRow> = filter_tasks(&state.tasks, state.filter)
                .into_iter()
                .map(|t| TaskRow::from_task(t, now))
                .collect();
            if rows.is_empty() {
                TaskListView::Empty {
                    headline: empty_message(state.filter),
                    detail: EMPTY_DETAIL,
                }
            } else {
                TaskListView::Rows(rows)
            }
        }
    }
}

/// Project the whole state. Expired notices are left out.
pub fn build(state: &AppState, now: DateTime<Utc>) -> ViewModel {
    ViewModel {
        filter: state.filter,
        stats: stats(&state.tasks),
        list: task_list(state, now),
        calendar: month_grid(state.cursor, &state.tasks, now.date_naive()),
        draft_due: state.draft.due_date,
        banner: state
            .banner
            .as_ref()
            .filter(|b| b.is_visible(now))
            .map(|b| NoticeView {
                kind: b.kind,
                text: b.text.clone(),
            }),
        connection: state
            .connection
            .as_ref()
            .filter(|c| c.is_visible(now))
            .map(|c| ConnectionView {
                status: c.status,
                text: c.text.clone(),
            }),
    }
}
