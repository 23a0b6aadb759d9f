//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn create_team(server: &TestServer, owner: i64, request: &CreateTeamRequest) -> TeamResponse {
    let response = server.post_auth("/teams", owner, request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn join_team(server: &TestServer, team_id: &str, user: i64) {
    let response = server
        .post_auth(&format!("/teams/{team_id}/members/@me"), user, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_raw("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_raw("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Team Tests
// ============================================================================

#[tokio::test]
async fn test_create_team_makes_owner_member() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = unique_user_id();
    let team = create_team(&server, owner, &CreateTeamRequest::private()).await;

    assert_eq!(team.owner_id, owner.to_string());
    assert_eq!(team.visibility, "private");
    assert_eq!(team.member_count, Some(1));

    let response = server
        .get_auth(&format!("/teams/{}/members", team.id), owner)
        .await
        .unwrap();
    let members: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].role, "owner");

    let response = server.get(&format!("/teams/{}/members", team.id)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_admin_cannot_remove_owner_or_admin() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = unique_user_id();
    let admin = unique_user_id();
    let admin_2 = unique_user_id();
    let member = unique_user_id();

    let team = create_team(&server, owner, &CreateTeamRequest::public()).await;
    for user in [admin, admin_2, member] {
        join_team(&server, &team.id, user).await;
    }
    for user in [admin, admin_2] {
        let response = server
            .patch_auth(
                &format!("/teams/{}/members/{user}", team.id),
                owner,
                &json!({"role": "admin"}),
            )
            .await
            .unwrap();
        let updated: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(updated.role, "admin");
    }

    let response = server
        .delete_auth(&format!("/teams/{}/members/{owner}", team.id), admin)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "CANNOT_REMOVE_OWNER");

    let response = server
        .delete_auth(&format!("/teams/{}/members/{admin_2}", team.id), admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&format!("/teams/{}/members/{member}", team.id), admin)
        .await
        .unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Member removed");
}

// ============================================================================
// Join Request Tests
// ============================================================================

#[tokio::test]
async fn test_join_request_is_resolved_once() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = unique_user_id();
    let requester = unique_user_id();
    let team = create_team(&server, owner, &CreateTeamRequest::private()).await;

    let response = server
        .post_auth(
            &format!("/teams/{}/join-requests", team.id),
            requester,
            &json!({"message": "hello"}),
        )
        .await
        .unwrap();
    let request: JoinRequestResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(request.status, "pending");

    let path = format!("/teams/{}/join-requests/{}", team.id, request.id);
    let approve = json!({"action": "approve"});

    let response = server.patch_auth(&path, requester, &approve).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.patch_auth(&path, owner, &approve).await.unwrap();
    let decision: DecisionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(decision.status, "approved");

    let response = server.patch_auth(&path, owner, &approve).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "Join request already processed");

    let response = server
        .get_auth(&format!("/teams/{}/members", team.id), requester)
        .await
        .unwrap();
    let members: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.len(), 2);
}

// ============================================================================
// Event Tests
// ============================================================================

#[tokio::test]
async fn test_event_capacity_is_enforced() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = unique_user_id();
    let first = unique_user_id();
    let second = unique_user_id();
    let team = create_team(&server, owner, &CreateTeamRequest::public()).await;

    let response = server
        .post_auth(
            &format!("/teams/{}/events", team.id),
            owner,
            &CreateEventRequest::with_capacity(1),
        )
        .await
        .unwrap();
    let event: EventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(event.max_participants, Some(1));

    let join = format!("/teams/{}/events/{}/join", team.id, event.id);

    // Joining an event of a public team also joins the team
    let response = server.post_auth(&join, first, &json!({})).await.unwrap();
    let participant: ParticipantResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(participant.status, "confirmed");

    let response = server.post_auth(&join, second, &json!({})).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "Event is full");

    // The rejected join left no membership behind
    let response = server.get(&format!("/teams/{}/members", team.id)).await.unwrap();
    let members: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.len(), 2);

    let response = server.delete_auth(&join, first).await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Left event");

    let response = server.post_auth(&join, second, &json!({})).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
