mod common;

use httpmock::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use common::{mock_account, tally};

#[test]
fn help_lists_commands_without_signing_in() {
    let home = TempDir::new().unwrap();
    tally(&home, "http://127.0.0.1:9")
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("login"))
        .stdout(contains("summary"))
        .stdout(contains("filter"));
}

#[test]
fn protected_command_while_signed_out_points_to_login() {
    let home = TempDir::new().unwrap();
    tally(&home, "http://127.0.0.1:9")
        .write_stdin("list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Not signed in."))
        .stdout(contains("login <username>"));
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = TempDir::new().unwrap();
    tally(&home, "http://127.0.0.1:9")
        .write_stdin("lgoin\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `lgoin`"))
        .stdout(contains("Suggestion: `login`?"));
}

#[test]
fn comment_lines_are_skipped() {
    let home = TempDir::new().unwrap();
    tally(&home, "http://127.0.0.1:9")
        .write_stdin("# add Tea 2 food\nexit\n")
        .assert()
        .success()
        .stdout(contains("Not signed in.").not());
}

#[test]
fn login_persists_token_and_lists_expenses() {
    let server = MockServer::start();
    mock_account(&server);
    let home = TempDir::new().unwrap();

    tally(&home, &server.base_url())
        .write_stdin("login amara secret1\nfilter food\nsort amount\nlist\nexit\n")
        .assert()
        .success()
        .stdout(contains("Signed in as amara."))
        .stdout(contains("Loaded 3 expense(s)."))
        .stdout(contains("Groceries"))
        .stdout(contains("Dinner"))
        .stdout(contains("Bus pass").not())
        .stdout(contains("2 of 3 expense(s)"));

    let saved = std::fs::read_to_string(home.path().join("auth.json")).unwrap();
    assert!(saved.contains("\"tok\""));
}

#[test]
fn saved_token_is_reused_on_next_run() {
    let server = MockServer::start();
    mock_account(&server);
    let home = TempDir::new().unwrap();

    tally(&home, &server.base_url())
        .write_stdin("login amara secret1\nexit\n")
        .assert()
        .success();

    tally(&home, &server.base_url())
        .write_stdin("summary\nexit\n")
        .assert()
        .success()
        .stdout(contains("Budget summary"))
        .stdout(contains("$500.00"))
        .stdout(contains("$225.50"));
}

#[test]
fn rejected_login_reports_invalid_credentials() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(401);
    });
    let home = TempDir::new().unwrap();

    tally(&home, &server.base_url())
        .write_stdin("login amara wrong-pass\nexit\n")
        .assert()
        .success()
        .stdout(contains("Invalid username or password."));
    assert!(!home.path().join("auth.json").exists());
}

#[test]
fn rejected_token_ends_session() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(200).json_body(serde_json::json!({ "token": "stale" }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/data/budget");
        then.status(401);
    });
    let home = TempDir::new().unwrap();

    tally(&home, &server.base_url())
        .write_stdin("login amara secret1\nrefresh\nlist\nexit\n")
        .assert()
        .success()
        .stdout(contains("dashboard could not be loaded"))
        .stdout(contains("Not signed in."));
    assert!(!home.path().join("auth.json").exists());
}

#[test]
fn config_set_is_persisted() {
    let home = TempDir::new().unwrap();
    tally(&home, "http://127.0.0.1:9")
        .write_stdin("config set currency_symbol €\nconfig show\nexit\n")
        .assert()
        .success()
        .stdout(contains("Saved currency_symbol = €."));

    let saved = std::fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(saved.contains("€"));
    assert!(!saved.contains("127.0.0.1:9"));
}
