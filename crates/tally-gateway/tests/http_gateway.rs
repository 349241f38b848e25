use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use tally_core::{BudgetGateway, GatewayError};
use tally_domain::{
    AuthToken, Budget, Credentials, ExpenseId, NewExpense, PasswordChange, PhotoUpload,
    ProfileUpdate,
};
use tally_gateway::HttpGateway;

fn gateway(server: &MockServer) -> HttpGateway {
    HttpGateway::new(server.base_url(), Duration::from_secs(5)).expect("client")
}

fn signed_in(server: &MockServer) -> HttpGateway {
    let mut gateway = gateway(server);
    gateway.set_token(Some(AuthToken::new("tok")));
    gateway
}

#[test]
fn login_posts_credentials_and_returns_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/login")
            .json_body(json!({ "username": "amara", "password": "secret1" }));
        then.status(200).json_body(json!({ "token": "abc.def" }));
    });

    let token = gateway(&server)
        .login(&Credentials::new("amara", "secret1"))
        .expect("login");

    mock.assert();
    assert_eq!(token.as_str(), "abc.def");
}

#[test]
fn rejected_login_maps_to_unauthorized() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(401).body("");
    });

    let err = gateway(&server)
        .login(&Credentials::new("amara", "nope"))
        .unwrap_err();
    assert_eq!(err, GatewayError::Unauthorized(401));
}

#[test]
fn protected_calls_send_bearer_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/data/budget")
            .header("Authorization", "Bearer tok");
        then.status(200).json_body(json!({ "budget": 250.0 }));
    });

    let budget = signed_in(&server).fetch_budget().expect("budget");

    mock.assert();
    assert_eq!(budget, Budget::new(250.0));
}

#[test]
fn protected_call_without_token_never_reaches_server() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/data/expenses");
        then.status(200).json_body(json!([]));
    });

    let err = gateway(&server).list_expenses().unwrap_err();

    assert_eq!(err, GatewayError::MissingToken);
    mock.assert_calls(0);
}

#[test]
fn forbidden_maps_to_unauthorized() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/profile");
        then.status(403);
    });

    let err = signed_in(&server).fetch_profile().unwrap_err();
    assert!(err.is_auth_failure());
    assert_eq!(err, GatewayError::Unauthorized(403));
}

#[test]
fn list_expenses_accepts_numeric_and_string_ids() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/expenses");
        then.status(200).json_body(json!([
            { "id": 1, "name": "Lunch", "category": "food", "amount": 12.5 },
            { "id": "b-2", "name": "Bus", "category": "Transport", "amount": 3.0 }
        ]));
    });

    let expenses = signed_in(&server).list_expenses().expect("expenses");
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].id, ExpenseId::from(1));
    assert_eq!(expenses[1].id.as_str(), "b-2");
}

#[test]
fn create_expense_returns_server_record() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/data/expenses")
            .header("Authorization", "Bearer tok")
            .json_body(json!({ "name": "Tea", "amount": 2.5, "category": "food" }));
        then.status(201)
            .json_body(json!({ "id": 42, "name": "Tea", "category": "food", "amount": 2.5 }));
    });

    let created = signed_in(&server)
        .create_expense(&NewExpense::new("Tea", 2.5, "food"))
        .expect("created");

    mock.assert();
    assert_eq!(created.id.as_str(), "42");
}

#[test]
fn delete_expense_accepts_empty_no_content() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/data/expenses/7");
        then.status(204);
    });

    signed_in(&server)
        .delete_expense(&ExpenseId::from(7))
        .expect("deleted");
    mock.assert();
}

#[test]
fn delete_expense_keeps_id_in_one_path_segment() {
    let server = MockServer::start();
    let seven = server.mock(|when, then| {
        when.method(DELETE).path("/data/expenses/7");
        then.status(204);
    });
    let gateway = signed_in(&server);

    for raw in ["7?x=1", "8/../7", "7#frag"] {
        let result = gateway.delete_expense(&ExpenseId::new(raw));
        assert!(
            matches!(result, Err(GatewayError::Http(404, _))),
            "{raw}: {result:?}"
        );
    }
    seven.assert_calls(0);
}

#[test]
fn server_error_carries_message_field() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/data/budget");
        then.status(400).json_body(json!({ "error": "Budget too large" }));
    });

    let err = signed_in(&server).save_budget(Budget::new(1e12)).unwrap_err();
    assert_eq!(err, GatewayError::Http(400, "Budget too large".into()));
}

#[test]
fn malformed_body_is_a_parse_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/budget");
        then.status(200).body("not json");
    });

    let err = signed_in(&server).fetch_budget().unwrap_err();
    assert!(matches!(err, GatewayError::Parse(_)));
}

#[test]
fn connection_failure_is_a_network_error() {
    let mut gateway =
        HttpGateway::new("http://127.0.0.1:9", Duration::from_secs(2)).expect("client");
    gateway.set_token(Some(AuthToken::new("tok")));

    let err = gateway.fetch_budget().unwrap_err();
    assert!(matches!(err, GatewayError::Network(_)));
}

#[test]
fn change_password_returns_server_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/change-password").json_body(json!({
            "currentPassword": "old-pass",
            "newPassword": "new-pass",
            "confirmationPassword": "new-pass"
        }));
        then.status(200).json_body(json!({ "message": "Password updated" }));
    });

    let change = PasswordChange {
        current_password: "old-pass".into(),
        new_password: "new-pass".into(),
        confirmation_password: "new-pass".into(),
    };
    let message = signed_in(&server).change_password(&change).expect("changed");
    assert_eq!(message, "Password updated");
}

#[test]
fn update_profile_puts_camel_case_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/profile").json_body(json!({
            "fullName": "Amara Obi",
            "email": "amara@example.com",
            "village": "Umuahia",
            "phoneNumber": ""
        }));
        then.status(200).json_body(json!({
            "username": "amara",
            "fullName": "Amara Obi",
            "email": "amara@example.com",
            "village": "Umuahia"
        }));
    });

    let update = ProfileUpdate {
        full_name: "Amara Obi".into(),
        email: "amara@example.com".into(),
        village: "Umuahia".into(),
        phone_number: String::new(),
    };
    let profile = signed_in(&server).update_profile(&update).expect("updated");

    mock.assert();
    assert_eq!(profile.display_name(), "Amara Obi");
}

#[test]
fn photo_upload_sends_multipart_file_part() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/profile/photo")
            .header("Authorization", "Bearer tok")
            .body_includes("name=\"file\"");
        then.status(200).json_body(json!({
            "fileUrl": "http://cdn.example/amara.png",
            "message": "Photo updated"
        }));
    });

    let upload = PhotoUpload {
        file_name: "amara.png".into(),
        content_type: "image/png".into(),
        bytes: b"fake-png-bytes".to_vec(),
    };
    let uploaded = signed_in(&server).upload_photo(&upload).expect("uploaded");

    mock.assert();
    assert_eq!(uploaded.file_url, "http://cdn.example/amara.png");
    assert_eq!(uploaded.message.as_deref(), Some("Photo updated"));
}
