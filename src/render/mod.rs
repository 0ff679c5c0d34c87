//! Terminal rendering of a [`ViewModel`].

use std::fmt::Write as _;

use chrono::NaiveDate;
use colored::Colorize;

use crate::state::{BannerKind, Connection};
use crate::view::{
    CalendarView, ConnectionView, LOADING_MESSAGE, NoticeView, Stats, TaskListView, TaskRow,
    ViewModel, WEEKDAY_HEADERS,
};

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `3 total, 1 completed, 2 pending`
pub fn stats_line(stats: &Stats) -> String {
    format!(
        "{} total, {} completed, {} pending",
        stats.total.to_string().bold(),
        stats.completed.to_string().green(),
        stats.pending.to_string().yellow(),
    )
}

fn task_row(row: &TaskRow) -> String {
    let check = if row.done { "[x]" } else { "[ ]" };
    let title = if row.title.chars().count() > 48 {
        let cut: String = row.title.chars().take(45).collect();
        format!("{cut}...")
    } else {
        row.title.clone()
    };
    let title = format!("{title:<48}");
    let title = if row.done {
        title.bright_black().strikethrough().to_string()
    } else if row.overdue {
        title.red().to_string()
    } else {
        title
    };
    let due = format!("{:<10}", format_date(row.due_date));
    let due = if row.overdue {
        format!("{} {}", due.red(), "OVERDUE".red().bold())
    } else {
        format!("{due} {:<7}", "")
    };
    format!(
        "{:<12} {} {} {} {}",
        row.id.to_string(),
        check,
        title,
        due,
        format_date(row.created_on).bright_black(),
    )
}

/// The list panel: rows, empty state, loading, or the error panel.
pub fn task_list(view: &TaskListView) -> String {
    let mut out = String::new();
    match view {
        TaskListView::Loading => {
            let _ = writeln!(out, "{LOADING_MESSAGE}");
        }
        TaskListView::Failed { message } => {
            let _ = writeln!(out, "{}", "Error".red().bold());
            let _ = writeln!(out, "{message}");
            let _ = writeln!(out, "Run `ag list` (or `reload` in the shell) to retry.");
        }
        TaskListView::Empty { headline, detail } => {
            let _ = writeln!(out, "{}", headline.bold());
            let _ = writeln!(out, "{detail}");
        }
        TaskListView::Rows(rows) => {
            let _ = writeln!(
                out,
                "{:<12} {:<3} {:<48} {:<18} CREATED",
                "ID", "", "TITLE", "DUE"
            );
            let _ = writeln!(out, "{}", "-".repeat(96));
            for row in rows {
                let _ = writeln!(out, "{}", task_row(row));
            }
        }
    }
    out
}

/// Month grid. Days with tasks carry a `*`; today is reversed.
pub fn calendar(view: &CalendarView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^28}", view.title.bold());
    for header in WEEKDAY_HEADERS {
        let _ = write!(out, "{header:>3} ");
    }
    out.push('\n');
    for week in view.weeks() {
        for cell in week {
            match cell {
                None => out.push_str("    "),
                Some(day) => {
                    let number = format!("{:>3}", day.day());
                    let number = if day.today {
                        number.reversed().to_string()
                    } else if day.has_tasks {
                        number.yellow().bold().to_string()
                    } else {
                        number
                    };
                    let marker = if day.has_tasks { "*" } else { " " };
                    out.push_str(&number);
                    out.push_str(marker);
                }
            }
        }
        out.push('\n');
    }
    out
}

pub fn banner(notice: &NoticeView) -> String {
    match notice.kind {
        BannerKind::Info => notice.text.cyan().to_string(),
        BannerKind::Success => notice.text.green().to_string(),
        BannerKind::Error => notice.text.red().bold().to_string(),
    }
}

pub fn connection(view: &ConnectionView) -> String {
    match view.status {
        Connection::Connected => format!("{} {}", "●".green(), view.text),
        Connection::Disconnected => format!("{} {}", "●".red(), view.text),
    }
}

/// A whole frame: notices, stats, list, and optionally the calendar.
pub fn screen(vm: &ViewModel, with_calendar: bool) -> String {
    let mut out = String::new();
    if let Some(c) = &vm.connection {
        let _ = writeln!(out, "{}", connection(c));
    }
    if let Some(b) = &vm.banner {
        let _ = writeln!(out, "{}", banner(b));
    }
    let _ = writeln!(out, "{}  [filter: {}]", stats_line(&vm.stats), vm.filter);
    out.push('\n');
    out.push_str(&task_list(&vm.list));
    if with_calendar {
        out.push('\n');
        out.push_str(&calendar(&vm.calendar));
        let _ = writeln!(out, "new task due: {}", format_date(vm.draft_due));
    }
    out
}
