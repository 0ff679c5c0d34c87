use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::models::Task;
use crate::state::CalendarCursor;

/// Column headers, week starting on Sunday.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub today: bool,
    pub has_tasks: bool,
}

impl CalendarDay {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// One month laid out as a Sunday-first grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub cursor: CalendarCursor,
    pub title: String,
    /// Empty cells before day 1.
    pub leading_blanks: usize,
    pub days: Vec<CalendarDay>,
}

impl CalendarView {
    /// Rows of seven cells; `None` pads before day 1 and after the last day.
    pub fn weeks(&self) -> Vec<[Option<&CalendarDay>; 7]> {
        let cells: Vec<Option<&CalendarDay>> = std::iter::repeat_n(None, self.leading_blanks)
            .chain(self.days.iter().map(Some))
            .collect();
        cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }

    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.day() == day)
    }
}

/// Build the grid for `cursor`, marking `today` and every day some task is
/// due on.
pub fn month_grid(cursor: CalendarCursor, tasks: &[Task], today: NaiveDate) -> CalendarView {
    let due: HashSet<NaiveDate> = tasks.iter().filter_map(|t| t.due_date).collect();
    let first = cursor.first_day();
    let days = first
        .iter_days()
        .take(cursor.days_in_month() as usize)
        .map(|date| CalendarDay {
            date,
            today: date == today,
            has_tasks: due.contains(&date),
        })
        .collect();

    CalendarView {
        cursor,
        title: cursor.title(),
        leading_blanks: first.weekday().num_days_from_sunday() as usize,
        days,
    }
}
