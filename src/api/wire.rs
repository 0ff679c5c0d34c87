use serde::Deserialize;

use crate::models::Task;

/// Body of `GET /tasks`: either a bare array or the `{"tasks": [...]}`
/// envelope some backends wrap it in.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TaskListBody {
    Bare(Vec<Task>),
    Enveloped { tasks: Vec<Task> },
}

impl TaskListBody {
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            TaskListBody::Bare(tasks) | TaskListBody::Enveloped { tasks } => tasks,
        }
    }
}

/// Body of a create or update response: a bare task or `{"task": {...}}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TaskBody {
    Enveloped { task: Task },
    Bare(Task),
}

impl TaskBody {
    pub fn into_task(self) -> Task {
        match self {
            TaskBody::Enveloped { task } | TaskBody::Bare(task) => task,
        }
    }
}
