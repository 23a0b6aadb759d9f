//! Team member entity - a (team, user) pairing with a role

use chrono::{DateTime, Utc};

use crate::value_objects::{Snowflake, TeamCapabilities, TeamRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: Snowflake,
    pub team_id: Snowflake,
    pub user_id: Snowflake,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn new(id: Snowflake, team_id: Snowflake, user_id: Snowflake, role: TeamRole) -> Self {
        Self {
            id,
            team_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }

    /// The owner row created together with its team
    pub fn owner(id: Snowflake, team_id: Snowflake, user_id: Snowflake) -> Self {
        Self::new(id, team_id, user_id, TeamRole::Owner)
    }

    #[inline]
    pub fn is_owner(&self) -> bool {
        self.role.is_owner()
    }

    #[inline]
    pub fn capabilities(&self) -> TeamCapabilities {
        self.role.capabilities()
    }
}
