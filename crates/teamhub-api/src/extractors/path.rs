//! Path parameter extractors
//!
//! Ids travel as decimal strings; each path struct parses its own segments
//! so a malformed id is answered with 400 naming the offending parameter.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use teamhub_core::Snowflake;

use crate::response::ApiError;

/// Path parameters deserialized into `T`
#[derive(Debug, Clone)]
pub struct SnowflakePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SnowflakePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(SnowflakePath(inner))
    }
}

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// `/teams/:team_id`
#[derive(Debug, Deserialize)]
pub struct TeamPath {
    pub team_id: String,
}

impl TeamPath {
    pub fn team_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.team_id, "team_id")
    }
}

/// `/teams/:team_id/members/:user_id`
#[derive(Debug, Deserialize)]
pub struct TeamMemberPath {
    pub team_id: String,
    pub user_id: String,
}

impl TeamMemberPath {
    pub fn team_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.team_id, "team_id")
    }

    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// `/teams/:team_id/join-requests/:request_id`
#[derive(Debug, Deserialize)]
pub struct JoinRequestPath {
    pub team_id: String,
    pub request_id: String,
}

impl JoinRequestPath {
    pub fn team_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.team_id, "team_id")
    }

    pub fn request_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.request_id, "request_id")
    }
}

/// `/teams/:team_id/events/:event_id/...`
#[derive(Debug, Deserialize)]
pub struct EventPath {
    pub team_id: String,
    pub event_id: String,
}

impl EventPath {
    pub fn team_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.team_id, "team_id")
    }

    pub fn event_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.event_id, "event_id")
    }
}
