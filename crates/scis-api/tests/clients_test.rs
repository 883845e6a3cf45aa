// Integration tests for the domain clients over a real `Transport`, using wiremock.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scis_api::auth::basic_auth_header;
use scis_api::{
    ClientKeys, Credentials, HttpExecutor, InfoHubQueryClient, Transport, TransportConfig,
    UserGroupSyncClient, UserManageClient, WorkItemClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn transport() -> Arc<dyn HttpExecutor> {
    Arc::new(Transport::new(TransportConfig::default()).unwrap())
}

fn creds() -> Credentials {
    Credentials::new("testUsername", "testPassword")
}

fn keys() -> ClientKeys {
    ClientKeys::new("testClientId", "testClientSecret")
}

/// An address nothing listens on.
const DEAD_URL: &str = "http://127.0.0.1:1/unreachable";

// ── CSRF tokens ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_csrf_token_round_trip() {
    let server = MockServer::start().await;
    let token_body = r#"{"csrf_token":"abc123","expiration":7200}"#;

    Mock::given(method("POST"))
        .and(path("/bpm/system/login"))
        .and(header(
            "authorization",
            basic_auth_header("testUsername", "testPassword").as_str(),
        ))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"requested_lifetime":200}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string(token_body))
        .expect(1)
        .mount(&server)
        .await;

    let client = UserGroupSyncClient::new(transport());
    let out = client
        .csrf_token(&format!("{}/bpm/system/login", server.uri()), &creds(), 200)
        .await;

    assert_eq!(out, token_body);
}

// ── User management ─────────────────────────────────────────────────

#[tokio::test]
async fn test_add_user_sends_flags_token_and_payload() {
    let server = MockServer::start().await;
    let payload = r#"{"username":"jdoe","email":"jdoe@example.com"}"#;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(query_param("skip_email", "true"))
        .and(query_param("activate_automatically", "true"))
        .and(header("IBM-CSRF-TOKEN", "mockToken"))
        .and(body_string(payload))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":"new user added"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = UserManageClient::new(transport());
    let out = client
        .add_user(&format!("{}/users", server.uri()), &creds(), "mockToken", payload)
        .await;

    assert_eq!(out, r#"{"result":"new user added"}"#);
}

#[tokio::test]
async fn test_update_and_find_user() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/mockUserId"))
        .and(query_param("update_mode", "merge"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":"updated"}"#))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("optional_parts", "details,groups"))
        .and(query_param("search_term", "mockUserId"))
        .and(header("IBM-CSRF-TOKEN", "mockToken"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"total_size":0}"#))
        .mount(&server)
        .await;

    let client = UserManageClient::new(transport());
    let base = format!("{}/users", server.uri());

    let updated = client
        .update_user(&base, &creds(), "mockToken", "mockUserId", "{}")
        .await;
    let found = client
        .find_user(&base, &creds(), "mockToken", "mockUserId")
        .await;

    assert_eq!(updated, r#"{"result":"updated"}"#);
    assert_eq!(found, r#"{"total_size":0}"#);
}

// ── User / group sync ───────────────────────────────────────────────

#[tokio::test]
async fn test_sync_groups_uses_bpm_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sync"))
        .and(query_param("add_users_to_db", "true"))
        .and(query_param("sync_group_state", "true"))
        .and(header("bpmcsrftoken", "mockToken"))
        .respond_with(ResponseTemplate::new(202).set_body_string(r#"{"result":"submitted"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = UserGroupSyncClient::new(transport());
    let out = client
        .sync_groups(&format!("{}/sync", server.uri()), &creds(), "mockToken", r#"["g1"]"#)
        .await;

    assert_eq!(out, r#"{"result":"submitted"}"#);
}

// ── Status codes are not interpreted ────────────────────────────────

#[tokio::test]
async fn test_server_error_body_passes_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/workitems"))
        .and(header("X-IBM-Client-Id", "testClientId"))
        .and(header("X-IBM-Client-Secret", "testClientSecret"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"error":"upstream exploded"}"#),
        )
        .mount(&server)
        .await;

    let client = WorkItemClient::new(transport());
    let out = client
        .create_work_item(&format!("{}/workitems", server.uri()), &keys(), "{}")
        .await;

    assert_eq!(out, r#"{"error":"upstream exploded"}"#);
}

#[tokio::test]
async fn test_query_not_found_body_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("X-Tenant-Id", "tenant-1"))
        .and(body_string("{ shipments { id } }"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such route"))
        .mount(&server)
        .await;

    let client = InfoHubQueryClient::new(transport());
    let out = client
        .execute_query(
            &format!("{}/graphql", server.uri()),
            "{ shipments { id } }",
            &keys(),
            "tenant-1",
        )
        .await
        .unwrap();

    assert_eq!(out, "no such route");
}

// ── Transport failures ──────────────────────────────────────────────

#[tokio::test]
async fn test_no_content_response_becomes_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = UserManageClient::new(transport());
    let out = client
        .find_user(&format!("{}/users", server.uri()), &creds(), "mockToken", "mockUserId")
        .await;

    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let obj = parsed.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(obj["error"].as_str().unwrap().contains("204"));
}

#[tokio::test]
async fn test_no_content_response_propagates_from_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = InfoHubQueryClient::new(transport());
    let err = client
        .execute_query(
            &format!("{}/graphql", server.uri()),
            "{ shipments { id } }",
            &keys(),
            "tenant-1",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, scis_api::Error::ResponseBody { .. }), "got {err:?}");
    assert!(!err.is_connect());
}

#[tokio::test]
async fn test_connection_refused_becomes_envelope() {
    let client = WorkItemClient::new(transport());
    let out = client
        .update_work_item(DEAD_URL, "wi-1", &keys(), "{}")
        .await;

    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let obj = parsed.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(obj["error"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn test_connection_refused_propagates_from_query() {
    let client = InfoHubQueryClient::new(transport());
    let err = client
        .execute_query(DEAD_URL, "{}", &keys(), "tenant-1")
        .await
        .unwrap_err();

    assert!(err.is_connect(), "expected connect error, got {err:?}");
}

#[tokio::test]
async fn test_unparseable_url_becomes_envelope() {
    let client = UserManageClient::new(transport());
    let out = client.add_user("testUrl", &creds(), "t", "{}").await;

    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(parsed["error"].as_str().unwrap().starts_with("invalid URL 'testUrl"));
}
