use agenda::state::CalendarCursor;
use chrono::NaiveDate;
use cucumber::{given, then, when};

use crate::AgendaWorld;
use crate::steps::controller_steps::agenda;

#[given(expr = "the calendar is on {string}")]
async fn the_calendar_is_on(world: &mut AgendaWorld, month: String) {
    let cursor: CalendarCursor = month.parse().expect("month as YYYY-MM");
    agenda(world).show_month(cursor);
}

#[when(expr = "I move the calendar by {int} month(s)")]
async fn i_move_the_calendar(world: &mut AgendaWorld, delta: i32) {
    agenda(world).shift_month(delta);
}

#[when(expr = "I select the date {string}")]
async fn i_select_the_date(world: &mut AgendaWorld, raw: String) {
    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").expect("date as YYYY-MM-DD");
    agenda(world).select_date(date);
}

#[then(expr = "the calendar month is {string}")]
async fn the_calendar_month_is(world: &mut AgendaWorld, expected: String) {
    assert_eq!(agenda(world).state().cursor.to_string(), expected);
}

#[then(expr = "the calendar title is {string}")]
async fn the_calendar_title_is(world: &mut AgendaWorld, expected: String) {
    assert_eq!(agenda(world).view().calendar.title, expected);
}

#[then(expr = "day {int} is marked as having tasks")]
async fn day_is_marked(world: &mut AgendaWorld, day: u32) {
    let calendar = agenda(world).view().calendar;
    let cell = calendar
        .day(day)
        .unwrap_or_else(|| panic!("day {day} is not in {}", calendar.title));
    assert!(cell.has_tasks, "expected day {day} to be marked");
}

#[then(expr = "day {int} is not marked")]
async fn day_is_not_marked(world: &mut AgendaWorld, day: u32) {
    let calendar = agenda(world).view().calendar;
    let cell = calendar
        .day(day)
        .unwrap_or_else(|| panic!("day {day} is not in {}", calendar.title));
    assert!(!cell.has_tasks, "expected day {day} not to be marked");
}

#[then(expr = "the grid starts with {int} blank cell(s)")]
async fn the_grid_starts_with_blanks(world: &mut AgendaWorld, blanks: usize) {
    assert_eq!(agenda(world).view().calendar.leading_blanks, blanks);
}

#[then(expr = "the grid has {int} weeks")]
async fn the_grid_has_weeks(world: &mut AgendaWorld, weeks: usize) {
    assert_eq!(agenda(world).view().calendar.weeks().len(), weeks);
}

#[then(expr = "the draft due date is {string}")]
async fn the_draft_due_date_is(world: &mut AgendaWorld, expected: String) {
    let due = agenda(world)
        .state()
        .draft
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    assert_eq!(due, expected);
}
