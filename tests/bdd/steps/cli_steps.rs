#![allow(deprecated)]
use cucumber::{then, when};
use predicates::prelude::*;
use serde_json::Value;

use crate::AgendaWorld;
use crate::steps::common_steps::{id_for, value_text};

// ---------------------------------------------------------------------------
// Helpers (local to this module)
// ---------------------------------------------------------------------------

/// Run `ag` against the world's task service, feeding `stdin` if given.
/// Stores stdout, stderr, and exit code on the world.
async fn run_ag(world: &mut AgendaWorld, args: Vec<String>, stdin: Option<String>) {
    let base_url = world
        .base_url
        .clone()
        .expect("task service not set; add 'Given a task service is running'");

    // The fake service shares this runtime, so the blocking child wait moves
    // off the async workers.
    let output = tokio::task::spawn_blocking(move || {
        let mut cmd = assert_cmd::Command::cargo_bin("ag").expect("ag binary not found");
        cmd.env_remove("AGENDA_HOST")
            .env_remove("AGENDA_SERVICE_URL")
            .env_remove("RUST_LOG")
            .env("AGENDA_API_URL", &base_url)
            .env("NO_COLOR", "1")
            .args(&args);
        if let Some(input) = stdin {
            cmd.write_stdin(input);
        }
        cmd.output().expect("failed to run ag")
    })
    .await
    .expect("ag runner panicked");

    world.last_stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    world.last_stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    world.last_exit_code = output.status.code().unwrap_or(-1);
}

fn args(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn parse_stdout(world: &AgendaWorld) -> Value {
    serde_json::from_str(&world.last_stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not valid JSON: {e}\nstdout: {}",
            world.last_stdout
        )
    })
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when(expr = "I run ag {string}")]
async fn i_run_ag(world: &mut AgendaWorld, line: String) {
    let words: Vec<&str> = line.split_whitespace().collect();
    run_ag(world, args(&words), None).await;
}

#[when(expr = "I run ag add {string}")]
async fn i_run_ag_add(world: &mut AgendaWorld, title: String) {
    run_ag(world, args(&["--json", "add", &title]), None).await;
}

#[when(expr = "I run ag add {string} due {string}")]
async fn i_run_ag_add_due(world: &mut AgendaWorld, title: String, due: String) {
    run_ag(world, args(&["--json", "add", &title, "--due", &due]), None).await;
}

#[when(expr = "I run ag toggle on {string}")]
async fn i_run_ag_toggle(world: &mut AgendaWorld, title: String) {
    let id = id_for(world, &title);
    run_ag(world, args(&["toggle", &id]), None).await;
}

#[when(expr = "I run ag delete on {string} answering {string}")]
async fn i_run_ag_delete_answering(world: &mut AgendaWorld, title: String, answer: String) {
    let id = id_for(world, &title);
    run_ag(world, args(&["delete", &id]), Some(format!("{answer}\n"))).await;
}

#[when(expr = "I run ag delete on {string} without confirmation")]
async fn i_run_ag_delete_yes(world: &mut AgendaWorld, title: String) {
    let id = id_for(world, &title);
    run_ag(world, args(&["delete", &id, "--yes"]), None).await;
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the command succeeds")]
async fn the_command_succeeds(world: &mut AgendaWorld) {
    assert_eq!(
        world.last_exit_code, 0,
        "ag exited with {}\nstdout: {}\nstderr: {}",
        world.last_exit_code, world.last_stdout, world.last_stderr
    );
}

#[then("the command fails")]
async fn the_command_fails(world: &mut AgendaWorld) {
    assert_eq!(
        world.last_exit_code, 1,
        "expected exit code 1\nstdout: {}\nstderr: {}",
        world.last_stdout, world.last_stderr
    );
}

#[then(expr = "stdout contains {string}")]
async fn stdout_contains(world: &mut AgendaWorld, expected: String) {
    assert!(
        predicate::str::contains(expected.as_str()).eval(&world.last_stdout),
        "expected stdout to contain '{expected}' but got:\n{}",
        world.last_stdout
    );
}

#[then(expr = "stdout does not contain {string}")]
async fn stdout_does_not_contain(world: &mut AgendaWorld, unexpected: String) {
    assert!(
        predicate::str::contains(unexpected.as_str())
            .not()
            .eval(&world.last_stdout),
        "expected stdout not to contain '{unexpected}' but got:\n{}",
        world.last_stdout
    );
}

#[then(expr = "stderr contains {string}")]
async fn stderr_contains(world: &mut AgendaWorld, expected: String) {
    assert!(
        predicate::str::contains(expected.as_str()).eval(&world.last_stderr),
        "expected stderr to contain '{expected}' but got:\n{}",
        world.last_stderr
    );
}

#[then(expr = "the JSON output lists {int} task(s)")]
async fn the_json_output_lists_n_tasks(world: &mut AgendaWorld, count: usize) {
    let json = parse_stdout(world);
    let tasks = json.as_array().expect("JSON output is not an array");
    assert_eq!(tasks.len(), count, "unexpected task count in: {json}");
}

#[then(expr = "the JSON output has {string} set to {string}")]
async fn the_json_output_has_field(world: &mut AgendaWorld, field: String, expected: String) {
    let json = parse_stdout(world);
    assert_eq!(
        value_text(&json[field.as_str()]),
        expected,
        "unexpected '{field}' in: {json}"
    );
}
