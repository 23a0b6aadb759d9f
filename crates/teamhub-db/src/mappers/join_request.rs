use teamhub_core::{DomainError, Snowflake, TeamJoinRequest};

use super::parse_column;
use crate::models::TeamJoinRequestModel;

impl TryFrom<TeamJoinRequestModel> for TeamJoinRequest {
    type Error = DomainError;

    fn try_from(model: TeamJoinRequestModel) -> Result<Self, Self::Error> {
        Ok(TeamJoinRequest {
            id: Snowflake::new(model.id),
            team_id: Snowflake::new(model.team_id),
            user_id: Snowflake::new(model.user_id),
            message: model.message,
            status: parse_column(&model.status)?,
            created_at: model.created_at,
            processed_at: model.processed_at,
            processed_by: model.processed_by.map(Snowflake::new),
        })
    }
}
