use assert_cmd::Command;
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// Script-mode `tally` isolated in `home` and pointed at `api`.
pub fn tally(home: &TempDir, api: &str) -> Command {
    let mut cmd = Command::cargo_bin("tally").expect("tally binary");
    cmd.env("TALLY_HOME", home.path())
        .env("TALLY_CLI_SCRIPT", "1")
        .env("TALLY_API_URL", api)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Login, budget and expense endpoints for user `amara` with token `tok`.
pub fn mock_account(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST)
            .path("/auth/login")
            .json_body(json!({ "username": "amara", "password": "secret1" }));
        then.status(200).json_body(json!({ "token": "tok" }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/data/budget")
            .header("Authorization", "Bearer tok");
        then.status(200).json_body(json!({ "budget": 500.0 }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/data/expenses")
            .header("Authorization", "Bearer tok");
        then.status(200).json_body(json!([
            { "id": 1, "name": "Groceries", "category": "food", "amount": 120.0 },
            { "id": 2, "name": "Bus pass", "category": "Transport", "amount": 45.5 },
            { "id": 3, "name": "Dinner", "category": "Food", "amount": 60.0 }
        ]));
    });
}
