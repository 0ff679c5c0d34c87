//! Interactive session: one controller, redrawn after every command, with the
//! health poll running alongside.

use agenda::endpoint::EndpointConfig;
use agenda::error::AgendaError;
use agenda::health::{HEALTH_POLL_INTERVAL, poller};
use agenda::models::Filter;
use agenda::render;
use agenda::state::CalendarCursor;
use chrono::NaiveDate;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use super::{Agenda, connect, parse_date, parse_month, task_id};
use crate::commands::delete::is_yes;

const HELP: &str = "\
commands:
  add <title>         create a task due on the selected date
  due <date|none>     set the due date for the next task
  toggle <id>         flip a task between pending and completed
  rm <id>             delete a task (asks first)
  filter <f>          all, pending, completed
  next | prev         move the calendar one month
  month <YYYY-MM>     jump the calendar to a month
  day <date>          select a date and count its tasks
  reload              fetch the list again
  health              check the task service now
  help                show this
  quit                leave";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Redraw,
    Add(String),
    Due(Option<NaiveDate>),
    Toggle(String),
    Delete(String),
    Filter(Filter),
    Shift(i32),
    Month(CalendarCursor),
    Day(NaiveDate),
    Reload,
    Health,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<ShellCommand, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let required = |what: &str| {
            if rest.is_empty() {
                Err(format!("usage: {word} <{what}>"))
            } else {
                Ok(rest.to_string())
            }
        };

        match word.to_lowercase().as_str() {
            "" => Ok(ShellCommand::Redraw),
            "add" | "new" => Ok(ShellCommand::Add(rest.to_string())),
            "due" => match rest {
                "" => Err("usage: due <YYYY-MM-DD|none>".to_string()),
                "none" | "-" => Ok(ShellCommand::Due(None)),
                raw => parse_date(raw).map(|d| ShellCommand::Due(Some(d))),
            },
            "toggle" | "done" | "t" => required("id").map(ShellCommand::Toggle),
            "rm" | "delete" | "del" => required("id").map(ShellCommand::Delete),
            "filter" | "f" => rest.parse().map(ShellCommand::Filter),
            "next" | "n" => Ok(ShellCommand::Shift(1)),
            "prev" | "p" => Ok(ShellCommand::Shift(-1)),
            "month" | "m" => parse_month(&required("YYYY-MM")?).map(ShellCommand::Month),
            "day" | "d" => parse_date(&required("date")?).map(ShellCommand::Day),
            "reload" | "retry" | "r" => Ok(ShellCommand::Reload),
            "health" => Ok(ShellCommand::Health),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

type Input = Lines<BufReader<Stdin>>;

async fn prompt(text: &str) {
    let mut stdout = tokio::io::stdout();
    let _ = stdout.write_all(text.as_bytes()).await;
    let _ = stdout.flush().await;
}

fn redraw(agenda: &Agenda) {
    print!("{}", render::screen(&agenda.view(), true));
}

async fn execute(agenda: &mut Agenda, command: ShellCommand, input: &mut Input) {
    // Request failures already land in the banner or the list panel.
    match command {
        ShellCommand::Redraw | ShellCommand::Quit => {}
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Add(title) => {
            agenda.set_draft_title(title);
            let _ = agenda.create().await;
        }
        ShellCommand::Due(date) => agenda.set_draft_due(date),
        ShellCommand::Toggle(raw) => {
            let id = task_id(agenda, &raw);
            if let Err(AgendaError::TaskNotFound(id)) = agenda.toggle(&id).await {
                println!("No task with id {id}");
            }
        }
        ShellCommand::Delete(raw) => {
            let id = task_id(agenda, &raw);
            prompt(&format!("Delete task {id}? [y/N] ")).await;
            let answer = input.next_line().await.ok().flatten().unwrap_or_default();
            let _ = agenda.delete(&id, |_| is_yes(&answer)).await;
        }
        ShellCommand::Filter(filter) => agenda.set_filter(filter),
        ShellCommand::Shift(delta) => agenda.shift_month(delta),
        ShellCommand::Month(cursor) => agenda.show_month(cursor),
        ShellCommand::Day(date) => {
            if agenda.select_date(date) == 0 {
                println!("No tasks due on {date}.");
            }
        }
        ShellCommand::Reload => {
            let _ = agenda.list().await;
        }
        ShellCommand::Health => {
            agenda.check_health().await;
        }
    }
}

pub async fn run(endpoint: &EndpointConfig) -> Result<(), String> {
    let mut agenda = connect(endpoint);
    let _ = agenda.list().await;
    redraw(&agenda);
    println!("Type `help` for commands.");

    let mut input: Input = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = poller(HEALTH_POLL_INTERVAL);

    loop {
        prompt("> ").await;
        tokio::select! {
            _ = ticker.tick() => {
                agenda.check_health().await;
                if let Some(notice) = agenda.view().connection {
                    println!("\n{}", render::connection(&notice));
                }
            }
            _ = tokio::signal::ctrl_c() => break,
            line = input.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => return Err(format!("failed to read input: {e}")),
                };
                match ShellCommand::parse(&line) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(command) => {
                        execute(&mut agenda, command, &mut input).await;
                        redraw(&agenda);
                    }
                    Err(e) => println!("{e}"),
                }
            }
        }
    }
    Ok(())
}
