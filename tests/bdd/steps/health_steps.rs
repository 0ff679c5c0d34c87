use agenda::state::Connection;
use cucumber::{then, when};

use crate::AgendaWorld;
use crate::steps::controller_steps::agenda;

#[when("the controller checks health")]
async fn the_controller_checks_health(world: &mut AgendaWorld) {
    agenda(world).check_health().await;
}

#[then(expr = "the connection notice reads {string}")]
async fn the_connection_notice_reads(world: &mut AgendaWorld, expected: String) {
    let notice = agenda(world)
        .view()
        .connection
        .expect("no connection notice is showing");
    assert_eq!(notice.text, expected);
}

#[then(expr = "the connection is {word}")]
async fn the_connection_is(world: &mut AgendaWorld, expected: String) {
    let status = agenda(world)
        .state()
        .connection
        .as_ref()
        .map(|c| c.status)
        .expect("no health result recorded");
    let expected = match expected.as_str() {
        "connected" => Connection::Connected,
        "disconnected" => Connection::Disconnected,
        other => panic!("unknown connection state '{other}'"),
    };
    assert_eq!(status, expected);
}
