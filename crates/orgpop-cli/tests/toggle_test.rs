#![cfg(unix)]


use fixtures::TestFixture;
use orgpop_testing::{BackgroundProcess, process::wait_until};
use predicates::prelude::*;
use std::time::Duration;

#[test]
fn test_second_invocation_closes_the_first() {
    let fixture = TestFixture::new();
    fixture
        .tree
        .write_file("a.org", "* Meeting prep\n<2024-03-05 Tue>\n")
        .unwrap();

    // Resident primary instance holding the rendezvous point.
    let mut cmd = fixture.background_command();
    cmd.args(["--toggle", "--tray", "--date", "2024-03-05"]);
    let mut primary = BackgroundProcess::spawn(cmd).expect("Failed to spawn primary");

    let socket = fixture.runtime_dir().join("orgpop.sock");
    assert!(
        wait_until(Duration::from_secs(10), || socket.exists()),
        "primary never bound its rendezvous socket"
    );

    // Second invocation: signals the holder, opens nothing, exits cleanly.
    fixture
        .command()
        .args(["--toggle", "--date", "2024-03-05"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let status = primary
        .wait_timeout(Duration::from_secs(10))
        .expect("Failed to wait for primary")
        .expect("primary did not exit after the toggle message");
    assert!(status.success(), "primary must exit cleanly: {status}");

    assert!(
        wait_until(Duration::from_secs(5), || !socket.exists()),
        "rendezvous socket must be released on exit"
    );
}

#[test]
fn test_non_toggle_invocations_do_not_coordinate() {
    let fixture = TestFixture::new();
    fixture
        .tree
        .write_file("a.org", "* Meeting prep\n<2024-03-05 Tue>\n")
        .unwrap();

    fixture
        .command()
        .args(["--date", "2024-03-05"])
        .assert()
        .success();

    assert!(
        !fixture.runtime_dir().join("orgpop.sock").exists(),
        "default mode must skip the coordinator"
    );
}
