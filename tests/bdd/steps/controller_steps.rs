use agenda::api::HttpTaskService;
use agenda::error::AgendaError;
use agenda::models::{Filter, TaskId};
use agenda::sync::Controller;
use agenda::view::TaskListView;
use chrono::NaiveDate;
use cucumber::{given, then, when};

use crate::AgendaWorld;
use crate::steps::common_steps::id_for;

/// The scenario's controller. Panics if no controller step ran.
pub fn agenda(world: &mut AgendaWorld) -> &mut Controller<HttpTaskService> {
    world
        .agenda
        .as_mut()
        .expect("no controller; add 'Given a controller for the task service'")
}

fn record(world: &mut AgendaWorld, result: Result<(), AgendaError>) {
    world.last_error = result.err();
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|e| panic!("bad date '{raw}': {e}"))
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("a controller for the task service")]
async fn a_controller_for_the_task_service(world: &mut AgendaWorld) {
    let base_url = world
        .base_url
        .clone()
        .expect("task service not set; add 'Given a task service is running'");
    world.agenda = Some(Controller::new(HttpTaskService::new(base_url)));
}

#[given("the controller has loaded the tasks")]
async fn given_the_controller_has_loaded(world: &mut AgendaWorld) {
    let result = agenda(world).list().await;
    assert!(result.is_ok(), "initial load failed: {result:?}");
    world.backend.lock().unwrap().requests.clear();
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the controller loads the tasks")]
async fn the_controller_loads_the_tasks(world: &mut AgendaWorld) {
    let result = agenda(world).list().await;
    record(world, result);
}

#[when(expr = "I add {string} due on {string} through the controller")]
async fn i_add_through_the_controller(world: &mut AgendaWorld, title: String, due: String) {
    let result = agenda(world).add(&title, Some(date(&due))).await;
    if let Ok(task) = &result {
        world.task_ids.insert(title, task.id.to_string());
    }
    record(world, result.map(|_| ()));
}

#[when("I add a task with an empty title through the controller")]
async fn i_add_an_empty_title(world: &mut AgendaWorld) {
    let result = agenda(world).add("   ", None).await;
    record(world, result.map(|_| ()));
}

#[when(expr = "I toggle {string} through the controller")]
async fn i_toggle_through_the_controller(world: &mut AgendaWorld, title: String) {
    let raw = id_for(world, &title);
    let id = agenda(world)
        .state()
        .resolve_id(&raw)
        .unwrap_or_else(|| TaskId::parse(&raw));
    let result = agenda(world).toggle(&id).await;
    record(world, result.map(|_| ()));
}

#[when(expr = "I delete {string} through the controller")]
async fn i_delete_through_the_controller(world: &mut AgendaWorld, title: String) {
    let id = TaskId::parse(&id_for(world, &title));
    let result = agenda(world).delete(&id, |_| true).await;
    record(world, result.map(|_| ()));
}

#[when(expr = "I decline to delete {string} through the controller")]
async fn i_decline_to_delete(world: &mut AgendaWorld, title: String) {
    let id = TaskId::parse(&id_for(world, &title));
    let result = agenda(world).delete(&id, |_| false).await;
    assert_eq!(result, Ok(false), "declined delete should report false");
    world.last_error = None;
}

#[when(expr = "I filter the controller by {string}")]
async fn i_filter_the_controller_by(world: &mut AgendaWorld, filter: String) {
    let filter: Filter = filter.parse().expect("valid filter");
    agenda(world).set_filter(filter);
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then(expr = "the controller holds {int} task(s)")]
async fn the_controller_holds_n_tasks(world: &mut AgendaWorld, count: usize) {
    let held = agenda(world).state().tasks.len();
    assert_eq!(held, count, "expected {count} tasks in the controller, found {held}");
}

#[then(expr = "the first task is {string}")]
async fn the_first_task_is(world: &mut AgendaWorld, title: String) {
    let first = agenda(world)
        .state()
        .tasks
        .first()
        .map(|t| t.title.clone())
        .expect("the controller holds no tasks");
    assert_eq!(first, title);
}

#[then(expr = "the listed tasks are {string}")]
async fn the_listed_tasks_are(world: &mut AgendaWorld, expected: String) {
    let titles: Vec<String> = match agenda(world).view().list {
        TaskListView::Rows(rows) => rows.into_iter().map(|r| r.title).collect(),
        other => panic!("expected task rows, got {other:?}"),
    };
    assert_eq!(titles.join(", "), expected);
}

#[then(expr = "the banner reads {string}")]
async fn the_banner_reads(world: &mut AgendaWorld, expected: String) {
    let banner = agenda(world)
        .view()
        .banner
        .expect("no banner is showing");
    assert_eq!(banner.text, expected);
}

#[then(expr = "the list shows the empty message {string}")]
async fn the_list_shows_the_empty_message(world: &mut AgendaWorld, expected: String) {
    match agenda(world).view().list {
        TaskListView::Empty { headline, .. } => assert_eq!(headline, expected),
        other => panic!("expected the empty state, got {other:?}"),
    }
}

#[then(expr = "the list panel shows an error containing {string}")]
async fn the_list_panel_shows_an_error(world: &mut AgendaWorld, expected: String) {
    match agenda(world).view().list {
        TaskListView::Failed { message } => assert!(
            message.contains(&expected),
            "expected '{expected}' in error panel '{message}'"
        ),
        other => panic!("expected the error panel, got {other:?}"),
    }
}

#[then(expr = "the task {string} is completed")]
async fn the_task_is_completed(world: &mut AgendaWorld, title: String) {
    let done = task_done(world, &title);
    assert!(done, "expected '{title}' to be completed");
}

#[then(expr = "the task {string} is pending")]
async fn the_task_is_pending(world: &mut AgendaWorld, title: String) {
    let done = task_done(world, &title);
    assert!(!done, "expected '{title}' to be pending");
}

fn task_done(world: &mut AgendaWorld, title: &str) -> bool {
    agenda(world)
        .state()
        .tasks
        .iter()
        .find(|t| t.title == title)
        .map(|t| t.done)
        .unwrap_or_else(|| panic!("no task titled '{title}' in the controller"))
}

#[then(expr = "the task {string} is flagged overdue")]
async fn the_task_is_flagged_overdue(world: &mut AgendaWorld, title: String) {
    assert!(row_overdue(world, &title), "expected '{title}' to be overdue");
}

#[then(expr = "the task {string} is not flagged overdue")]
async fn the_task_is_not_flagged_overdue(world: &mut AgendaWorld, title: String) {
    assert!(!row_overdue(world, &title), "expected '{title}' not to be overdue");
}

fn row_overdue(world: &mut AgendaWorld, title: &str) -> bool {
    match agenda(world).view().list {
        TaskListView::Rows(rows) => rows
            .into_iter()
            .find(|r| r.title == title)
            .map(|r| r.overdue)
            .unwrap_or_else(|| panic!("no row titled '{title}'")),
        other => panic!("expected task rows, got {other:?}"),
    }
}

#[then("the controller call failed")]
async fn the_controller_call_failed(world: &mut AgendaWorld) {
    assert!(world.last_error.is_some(), "expected the last call to fail");
}

#[then(expr = "the controller call failed with {string}")]
async fn the_controller_call_failed_with(world: &mut AgendaWorld, expected: String) {
    let error = world
        .last_error
        .as_ref()
        .expect("expected the last call to fail");
    assert_eq!(error.to_string(), expected);
}

#[then("the task ids are unique")]
async fn the_task_ids_are_unique(world: &mut AgendaWorld) {
    let tasks = &agenda(world).state().tasks;
    let mut ids: Vec<String> = tasks.iter().map(|t| t.id.to_string()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), tasks.len(), "duplicate ids in {tasks:?}");
}
