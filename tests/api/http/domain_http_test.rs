//! Domain registry HTTP API handler tests
//!
//! Covers the bearer pipeline on `/api/domain` and the add / list / delete
//! operations, including owner scoping.

use super::mock_identity::MockIdentityServer;
use super::{
    build_test_router, delete_json, error_text, get_json, post_json, post_raw,
    post_with_content_type, TestAppState,
};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

const ALICE_TOKEN: &str = "alice-token";
const BOB_TOKEN: &str = "bob-token";

/// Alice and Bob both resolve and have local rows
async fn setup() -> (MockIdentityServer, TestAppState, i32, i32) {
    let idp = MockIdentityServer::new().await;
    idp.mock_profile(ALICE_TOKEN, "alice@example.com", "Alice").await;
    idp.mock_profile(BOB_TOKEN, "bob@example.com", "Bob").await;

    let state = TestAppState::with_mock_identity(&idp);
    let alice = state.user_repo.add_user("Alice", "alice@example.com").await;
    let bob = state.user_repo.add_user("Bob", "bob@example.com").await;
    (idp, state, alice, bob)
}

// ============================================================================
// Authentication pipeline
// ============================================================================

#[tokio::test]
async fn test_missing_token_rejected_without_identity_call() {
    let idp = MockIdentityServer::new().await;
    idp.expect_no_profile_calls().await;
    let state = TestAppState::with_mock_identity(&idp);
    let app = build_test_router(state.clone());

    let response = get_json(&app, "/api/domain", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_text(&response.body), "Unauthorized");

    let response = post_json(&app, "/api/domain", None, &json!({"name": "a", "url": "b"})).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(state.domain_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_rejected_token_is_unauthorized() {
    let idp = MockIdentityServer::new().await;
    idp.mock_profile_rejected("expired").await;
    let app = build_test_router(TestAppState::with_mock_identity(&idp));

    let response = get_json(&app, "/api/domain", Some("expired")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_text(&response.body), "Invalid or expired token");
}

#[tokio::test]
async fn test_slow_identity_provider_is_unauthorized() {
    let idp = MockIdentityServer::new().await;
    idp.mock_profile_slow("slow", std::time::Duration::from_secs(4))
        .await;
    let app = build_test_router(TestAppState::with_mock_identity(&idp));

    let response = get_json(&app, "/api/domain", Some("slow")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_text(&response.body), "Invalid or expired token");
}

#[tokio::test]
async fn test_resolved_identity_without_local_user() {
    let idp = MockIdentityServer::new().await;
    idp.mock_profile("stranger", "stranger@example.com", "Stranger")
        .await;
    let state = TestAppState::with_mock_identity(&idp);
    let app = build_test_router(state.clone());

    let response = post_json(
        &app,
        "/api/domain",
        Some("stranger"),
        &json!({"name": "a.example.com", "url": "https://a.example.com"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_text(&response.body), "User not found");
    assert!(state.domain_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_user_lookup_failure_is_server_error() {
    let (_idp, state, _, _) = setup().await;
    state.user_repo.set_unavailable(true);
    let app = build_test_router(state);

    let response = get_json(&app, "/api/domain", Some(ALICE_TOKEN)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Add / list
// ============================================================================

#[tokio::test]
async fn test_list_empty_is_empty_array() {
    let (_idp, state, _, _) = setup().await;
    let app = build_test_router(state);

    let response = get_json(&app, "/api/domain", Some(ALICE_TOKEN)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Some(json!([])));
}

#[tokio::test]
async fn test_add_then_list() {
    let (_idp, state, alice, _) = setup().await;
    let app = build_test_router(state.clone());

    let response = post_json(
        &app,
        "/api/domain",
        Some(ALICE_TOKEN),
        &json!({"name": "shop.example.com", "url": "https://shop.example.com"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.body.unwrap();
    assert_eq!(body["name"], "shop.example.com");
    assert_eq!(body["url"], "https://shop.example.com");
    assert_eq!(body["message"], "Domain added successfully");
    let id = body["id"].as_i64().unwrap();

    let stored = state.domain_repo.all().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].owner_id, alice);

    let response = get_json(&app, "/api/domain", Some(ALICE_TOKEN)).await;
    let list = response.body.unwrap();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"].as_i64().unwrap(), id);
    assert_eq!(list[0]["name"], "shop.example.com");
    assert!(list[0]["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_list_only_shows_own_domains() {
    let (_idp, state, alice, bob) = setup().await;
    state.domain_repo.add_domain(alice, "alice.example.com", "https://alice.example.com").await;
    state.domain_repo.add_domain(bob, "bob.example.com", "https://bob.example.com").await;
    let app = build_test_router(state);

    let response = get_json(&app, "/api/domain", Some(BOB_TOKEN)).await;

    let list = response.body.unwrap();
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["bob.example.com"]);
}

#[tokio::test]
async fn test_add_requires_name_and_url() {
    let (_idp, state, _, _) = setup().await;
    let app = build_test_router(state.clone());

    for body in [
        json!({"name": "", "url": "https://x"}),
        json!({"name": "x", "url": ""}),
        json!({"url": "https://x"}),
        json!({}),
    ] {
        let response = post_json(&app, "/api/domain", Some(ALICE_TOKEN), &body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(error_text(&response.body), "Name and URL are required");
    }

    assert!(state.domain_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_add_malformed_body() {
    let (_idp, state, _, _) = setup().await;
    let app = build_test_router(state);

    let response = post_raw(&app, "/api/domain", Some(ALICE_TOKEN), "{not json").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_text(&response.body), "Invalid request body");
}

#[tokio::test]
async fn test_add_accepts_body_without_json_content_type() {
    let (_idp, state, alice, _) = setup().await;
    let app = build_test_router(state.clone());
    let body = r#"{"name":"example","url":"http://example.com"}"#;

    let response = post_with_content_type(&app, "/api/domain", Some(ALICE_TOKEN), None, body).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.unwrap()["name"], "example");

    let response = post_with_content_type(
        &app,
        "/api/domain",
        Some(ALICE_TOKEN),
        Some("text/plain;charset=UTF-8"),
        body,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let stored = state.domain_repo.all().await;
    assert_eq!(stored.iter().filter(|d| d.owner_id == alice).count(), 2);
}

#[tokio::test]
async fn test_add_store_failure() {
    let (_idp, state, _, _) = setup().await;
    state.domain_repo.set_unavailable(true);
    let app = build_test_router(state);

    let response = post_json(
        &app,
        "/api/domain",
        Some(ALICE_TOKEN),
        &json!({"name": "a", "url": "b"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_own_domain() {
    let (_idp, state, alice, _) = setup().await;
    let id = state.domain_repo.add_domain(alice, "a.example.com", "https://a").await;
    let app = build_test_router(state.clone());

    let response = delete_json(&app, &format!("/api/domain?domainId={id}"), Some(ALICE_TOKEN)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({"message": "Domain deleted successfully"}))
    );
    assert!(state.domain_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_delete_other_users_domain_is_not_found() {
    let (_idp, state, alice, _) = setup().await;
    let id = state.domain_repo.add_domain(alice, "a.example.com", "https://a").await;
    let app = build_test_router(state.clone());

    let response = delete_json(&app, &format!("/api/domain?domainId={id}"), Some(BOB_TOKEN)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(error_text(&response.body), "Domain not found");
    assert_eq!(state.domain_repo.all().await.len(), 1);
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let (_idp, state, alice, _) = setup().await;
    let id = state.domain_repo.add_domain(alice, "a.example.com", "https://a").await;
    let app = build_test_router(state);
    let path = format!("/api/domain?domainId={id}");

    assert_eq!(delete_json(&app, &path, Some(ALICE_TOKEN)).await.status, StatusCode::OK);
    assert_eq!(
        delete_json(&app, &path, Some(ALICE_TOKEN)).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_domain_id_validation() {
    let (_idp, state, _, _) = setup().await;
    let app = build_test_router(state);

    let response = delete_json(&app, "/api/domain", Some(ALICE_TOKEN)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_text(&response.body), "domainId is required");

    let response = delete_json(&app, "/api/domain?domainId=", Some(ALICE_TOKEN)).await;
    assert_eq!(error_text(&response.body), "domainId is required");

    let response = delete_json(&app, "/api/domain?domainId=abc", Some(ALICE_TOKEN)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_text(&response.body), "Invalid domainId");
}

#[tokio::test]
async fn test_delete_duplicate_domain_id_is_json_bad_request() {
    let (_idp, state, alice, _) = setup().await;
    state.domain_repo.add_domain(alice, "a.example.com", "https://a").await;
    let app = build_test_router(state.clone());

    let response =
        delete_json(&app, "/api/domain?domainId=1&domainId=2", Some(ALICE_TOKEN)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_text(&response.body), "Invalid domainId");
    assert_eq!(state.domain_repo.all().await.len(), 1);
}

#[tokio::test]
async fn test_delete_store_failure_is_not_not_found() {
    let (_idp, state, alice, _) = setup().await;
    let id = state.domain_repo.add_domain(alice, "a.example.com", "https://a").await;
    state.domain_repo.set_unavailable(true);
    let app = build_test_router(state);

    let response = delete_json(&app, &format!("/api/domain?domainId={id}"), Some(ALICE_TOKEN)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_add_list_delete_round() {
    let (_idp, state, _, _) = setup().await;
    let app = build_test_router(state);

    let added = post_json(
        &app,
        "/api/domain",
        Some(ALICE_TOKEN),
        &json!({"name": "n", "url": "u"}),
    )
    .await
    .body
    .unwrap();
    let id = added["id"].as_i64().unwrap();

    let listed = get_json(&app, "/api/domain", Some(ALICE_TOKEN)).await.body.unwrap();
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .any(|d| d["id"].as_i64() == Some(id)));

    let deleted = delete_json(&app, &format!("/api/domain?domainId={id}"), Some(ALICE_TOKEN)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let listed = get_json(&app, "/api/domain", Some(ALICE_TOKEN)).await.body.unwrap();
    assert!(!listed
        .as_array()
        .unwrap()
        .iter()
        .any(|d| d["id"].as_i64() == Some(id)));
}
