//! Team entity

use chrono::{DateTime, Utc};

use crate::value_objects::{Snowflake, Visibility};

/// A named group with exactly one owner.
///
/// `owner_id` is fixed at creation; there is no ownership transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Snowflake,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(id: Snowflake, name: String, owner_id: Snowflake, visibility: Visibility) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description: None,
            owner_id,
            visibility,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}
