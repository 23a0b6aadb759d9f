use teamhub_core::{DomainError, Snowflake, Team};

use super::parse_column;
use crate::models::TeamModel;

impl TryFrom<TeamModel> for Team {
    type Error = DomainError;

    fn try_from(model: TeamModel) -> Result<Self, Self::Error> {
        Ok(Team {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            owner_id: Snowflake::new(model.owner_id),
            visibility: parse_column(&model.visibility)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
