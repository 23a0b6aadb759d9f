use teamhub_core::{DomainError, Snowflake, TeamMember};

use super::parse_column;
use crate::models::TeamMemberModel;

impl TryFrom<TeamMemberModel> for TeamMember {
    type Error = DomainError;

    fn try_from(model: TeamMemberModel) -> Result<Self, Self::Error> {
        Ok(TeamMember {
            id: Snowflake::new(model.id),
            team_id: Snowflake::new(model.team_id),
            user_id: Snowflake::new(model.user_id),
            role: parse_column(&model.role)?,
            joined_at: model.joined_at,
        })
    }
}
