//! Team event and participant database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `team_events` table
#[derive(Debug, Clone, FromRow)]
pub struct TeamEventModel {
    pub id: i64,
    pub team_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub max_participants: Option<i32>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Row of the `event_participants` table
#[derive(Debug, Clone, FromRow)]
pub struct EventParticipantModel {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: String,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
