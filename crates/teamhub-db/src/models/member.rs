//! Team member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `team_members` table
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberModel {
    pub id: i64,
    pub team_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}
