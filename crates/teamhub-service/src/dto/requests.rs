//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those with free-form fields
//! also implement `Validate`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use teamhub_core::{AssignableRole, JoinDecision, Visibility};
use validator::Validate;

// ============================================================================
// Team Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 100, message = "Team name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub visibility: Visibility,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Role change; `owner` is not a valid value
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMemberRoleRequest {
    pub role: AssignableRole,
}

// ============================================================================
// Join Request Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateJoinRequestRequest {
    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResolveJoinRequestRequest {
    pub action: JoinDecision,
}

// ============================================================================
// Event Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub starts_at: DateTime<Utc>,

    /// Omit for an unlimited event
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub max_participants: Option<i32>,
}
