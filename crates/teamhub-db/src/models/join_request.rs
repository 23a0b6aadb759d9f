use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `team_join_requests` table
#[derive(Debug, Clone, FromRow)]
pub struct TeamJoinRequestModel {
    pub id: i64,
    pub team_id: i64,
    pub user_id: i64,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i64>,
}
