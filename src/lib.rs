/// HTTP adapter for the remote task service.
pub mod api;
/// Base URL resolution from startup configuration.
pub mod endpoint;
/// Error type shared by the client.
pub mod error;
/// Connection health polling.
pub mod health;
/// tracing subscriber setup.
pub mod logging;
/// Data types: Task, TaskId, NewTask, Filter.
pub mod models;
/// Terminal rendering of view models.
pub mod render;
/// Application state, actions, and the reducer.
pub mod state;
/// Controller tying service calls to state updates.
pub mod sync;
/// Pure projections: filtering, overdue, stats, calendar grid.
pub mod view;
