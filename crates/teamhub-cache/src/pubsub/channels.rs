//! Pub/Sub channel naming

use teamhub_core::Snowflake;

pub const TEAM_CHANNEL_PREFIX: &str = "team:";
pub const USER_CHANNEL_PREFIX: &str = "user:";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Everything that happens inside one team
    Team(Snowflake),
    /// Notifications addressed to one user
    User(Snowflake),
    Custom(String),
}

impl PubSubChannel {
    #[must_use]
    pub fn team(team_id: Snowflake) -> Self {
        Self::Team(team_id)
    }

    #[must_use]
    pub fn user(user_id: Snowflake) -> Self {
        Self::User(user_id)
    }

    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Team(id) => format!("{TEAM_CHANNEL_PREFIX}{id}"),
            Self::User(id) => format!("{USER_CHANNEL_PREFIX}{id}"),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Inverse of [`name`](Self::name); unknown shapes become `Custom`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let id = |prefix: &str| {
            name.strip_prefix(prefix)
                .and_then(|rest| Snowflake::parse(rest).ok())
        };

        if let Some(team_id) = id(TEAM_CHANNEL_PREFIX) {
            Self::Team(team_id)
        } else if let Some(user_id) = id(USER_CHANNEL_PREFIX) {
            Self::User(user_id)
        } else {
            Self::Custom(name.to_string())
        }
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
