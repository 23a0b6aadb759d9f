//! Test fixtures and data generators

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> i64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A user id not used by any earlier run against the same database
pub fn unique_user_id() -> i64 {
    chrono::Utc::now().timestamp_millis() * 1000 + unique_suffix()
}

#[derive(Debug, Serialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: Option<String>,
    pub visibility: String,
}

impl CreateTeamRequest {
    pub fn public() -> Self {
        Self::with_visibility("public")
    }

    pub fn private() -> Self {
        Self::with_visibility("private")
    }

    fn with_visibility(visibility: &str) -> Self {
        Self {
            name: format!("Test Team {}", unique_suffix()),
            description: Some("A test team".to_string()),
            visibility: visibility.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub visibility: String,
    pub member_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinRequestResponse {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct DecisionResponse {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub starts_at: String,
    pub max_participants: Option<i32>,
}

impl CreateEventRequest {
    pub fn with_capacity(max_participants: i32) -> Self {
        Self {
            title: format!("Test Event {}", unique_suffix()),
            starts_at: "2030-01-01T18:00:00Z".to_string(),
            max_participants: Some(max_participants),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventResponse {
    pub id: String,
    pub team_id: String,
    pub max_participants: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantResponse {
    pub event_id: String,
    pub user_id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
