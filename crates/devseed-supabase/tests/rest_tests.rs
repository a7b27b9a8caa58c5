use httpmock::prelude::*;
use serde_json::json;

use devseed_core::config::Secret;
use devseed_core::error::Error;
use devseed_core::traits::TableWriter;
use devseed_supabase::PostgrestClient;

fn rest(server: &MockServer) -> PostgrestClient {
    PostgrestClient::with_client(reqwest::Client::new(), &server.base_url(), Secret::new("service-role"))
}

#[tokio::test]
async fn upsert_returning_rows_hands_back_server_view() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/v1/user_ventures")
                .query_param("on_conflict", "id")
                .header("Prefer", "resolution=merge-duplicates,return=representation")
                .header("Authorization", "Bearer service-role")
                .json_body(json!([{ "user_id": "u1", "title": "T", "description": "D" }]));
            then.status(201).json_body(json!([
                { "id": "v-1", "user_id": "u1", "title": "T", "description": "D" }
            ]));
        })
        .await;

    let rows = rest(&server)
        .upsert("user_ventures", "id", &[json!({ "user_id": "u1", "title": "T", "description": "D" })], true)
        .await
        .expect("upsert");

    mock.assert_hits_async(1).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "v-1");
}

#[tokio::test]
async fn minimal_upsert_ignores_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/v1/profiles")
                .query_param("on_conflict", "user_id")
                .header("Prefer", "resolution=merge-duplicates,return=minimal");
            then.status(201);
        })
        .await;

    let rows = rest(&server)
        .upsert("profiles", "user_id", &[json!({ "user_id": "u1", "name": "A" })], false)
        .await
        .expect("upsert");

    mock.assert_hits_async(1).await;
    assert!(rows.is_empty());
}

#[tokio::test]
async fn rejected_write_reports_table_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/rest/v1/user_settings");
            then.status(400).body(r#"{"message":"column \"colour\" does not exist"}"#);
        })
        .await;

    let err = rest(&server)
        .upsert("user_settings", "id", &[json!({ "colour": "red" })], false)
        .await
        .expect_err("must fail");

    let msg = err.to_string();
    assert!(matches!(err, Error::Http { status: 400, .. }));
    assert!(msg.contains("user_settings"), "{msg}");
    assert!(msg.contains("colour"), "{msg}");
}

#[tokio::test]
async fn empty_upsert_makes_no_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(201);
        })
        .await;

    rest(&server).upsert("profiles", "user_id", &[], true).await.expect("noop");
    mock.assert_hits_async(0).await;
}
