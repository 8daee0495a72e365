//! Command handlers against a scripted transport.

use std::sync::Arc;

use futarchy_cli::{commands, CliError, OutputFormat};
use futarchy_client::{ClientConfig, Futarchy402Client, PollStatus};
use futarchy_test_utils::{
    api_error, payment_required, poll_details_json, poll_json, poll_list_json, position_json,
    requirement_json, settled, stats_json, test_keypair_base58, test_public_key,
    unsigned_transaction_for, vote_success, MockTransport,
};
use futarchy_tools::ToolFormat;
use futarchy_x402::{HttpResponse, Side, VoteError};
use serde_json::Value;

const API: &str = "https://test-api.example.com";

fn client(mock: &MockTransport, wallet: bool) -> Futarchy402Client {
    let mut config = ClientConfig::new(API);
    if wallet {
        config = config.with_wallet_private_key(test_keypair_base58());
    }
    Futarchy402Client::with_transport(config, Arc::new(mock.clone()))
}

fn ok(body: Value) -> HttpResponse {
    HttpResponse::new(200, body.to_string())
}

#[tokio::test]
async fn polls_json_output() {
    let mock = MockTransport::new().respond(ok(poll_list_json(
        vec![poll_json("p1", "open")],
        1,
        5,
        0,
    )));

    let output = commands::polls(
        &client(&mock, false),
        OutputFormat::Json,
        Some(PollStatus::Open),
        Some("treasury-1".into()),
        5,
        0,
    )
    .await
    .unwrap();

    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["polls"][0]["id"], "p1");
    assert_eq!(
        mock.requests()[0].query,
        vec![
            ("status".to_string(), "open".to_string()),
            ("treasury_id".to_string(), "treasury-1".to_string()),
            ("limit".to_string(), "5".to_string()),
            ("offset".to_string(), "0".to_string()),
        ]
    );
}

#[tokio::test]
async fn poll_human_output() {
    let mock = MockTransport::new().respond(ok(poll_details_json("p1")));
    let output = commands::poll(&client(&mock, false), OutputFormat::Human, "p1")
        .await
        .unwrap();
    assert!(output.contains("Fund the grants program"));
    assert!(output.contains("Voter2"));
}

#[tokio::test]
async fn poll_not_found_exit_code() {
    let mock = MockTransport::new().respond_with(404, "");
    let err = commands::poll(&client(&mock, false), OutputFormat::Human, "gone")
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn position_defaults_to_configured_wallet() {
    let voter = test_public_key().to_base58();
    let mock = MockTransport::new().respond(ok(position_json("p1", &voter)));

    commands::position(&client(&mock, true), OutputFormat::Json, "p1", None)
        .await
        .unwrap();

    assert_eq!(
        mock.requests()[0].query,
        vec![("voter_pubkey".to_string(), voter)]
    );
}

#[tokio::test]
async fn position_without_voter_or_wallet() {
    let mock = MockTransport::new();
    let err = commands::position(&client(&mock, false), OutputFormat::Json, "p1", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::User(_)));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn stats_human_output() {
    let mock = MockTransport::new().respond(ok(stats_json()));
    let output = commands::stats(&client(&mock, false), OutputFormat::Human)
        .await
        .unwrap();
    assert!(output.contains("27"));
}

#[test]
fn wallet_shows_public_key() {
    let mock = MockTransport::new();
    let output = commands::wallet(&client(&mock, true), OutputFormat::Json, None).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["public_key"], test_public_key().to_base58());
}

#[test]
fn wallet_check_needs_no_wallet() {
    let mock = MockTransport::new();
    let output = commands::wallet(
        &client(&mock, false),
        OutputFormat::Json,
        Some(test_public_key().to_base58()),
    )
    .unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["valid"], true);

    let err = commands::wallet(&client(&mock, false), OutputFormat::Json, None).unwrap_err();
    assert!(matches!(err, CliError::Vote(VoteError::MissingKeyMaterial)));
}

#[tokio::test]
async fn vote_end_to_end() {
    let mock = MockTransport::new()
        .respond(payment_required(&requirement_json()))
        .respond(settled(&unsigned_transaction_for(&test_public_key())))
        .respond(vote_success("v1", Some("sig1")));

    let output = commands::vote(
        &client(&mock, false),
        OutputFormat::Json,
        "p1",
        Side::Yes,
        Some(0.1),
        Some(test_keypair_base58()),
    )
    .await
    .unwrap();

    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["vote_id"], "v1");
    assert_eq!(value["payment"]["currency"], "USDC");
}

#[tokio::test]
async fn vote_duplicate_exit_code() {
    let mock = MockTransport::new().respond(api_error(403, "Already voted"));
    let err = commands::vote(
        &client(&mock, true),
        OutputFormat::Human,
        "p1",
        Side::No,
        None,
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CliError::Vote(VoteError::DuplicateVote(_))));
    assert_eq!(err.exit_code(), 4);
    assert!(err.hint().is_some());
}

#[test]
fn tools_prints_every_schema() {
    let output = commands::tools(ToolFormat::Mcp).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    let tools = value.as_array().unwrap();
    assert_eq!(tools.len(), 6);
    assert!(tools.iter().all(|t| t.get("inputSchema").is_some()));
}

#[tokio::test]
async fn call_runs_tool() {
    let mock = MockTransport::new().respond(ok(stats_json()));
    let output = commands::call(client(&mock, false), "futarchy_get_stats", "{}")
        .await
        .unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["total_projects"], 12);
}

#[tokio::test]
async fn call_rejects_bad_json() {
    let mock = MockTransport::new();
    let err = commands::call(client(&mock, false), "futarchy_get_stats", "{nope")
        .await
        .unwrap_err();
    assert_eq!(err.label(), "INVALID_ARGUMENTS");
    assert_eq!(err.exit_code(), 7);
}
