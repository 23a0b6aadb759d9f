//! Join-request and participation state values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::role::UnknownVariant;
use crate::error::DomainError;

/// Lifecycle of a join request: `pending` then exactly one terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl JoinRequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[inline]
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }

    /// Apply a decision. Only a pending request can move.
    pub fn resolve(self, decision: JoinDecision) -> Result<Self, DomainError> {
        if !self.is_pending() {
            return Err(DomainError::JoinRequestAlreadyProcessed);
        }
        Ok(decision.target_status())
    }
}

impl fmt::Display for JoinRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinRequestStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownVariant::new("join request status", other)),
        }
    }
}

/// Action an approver takes on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinDecision {
    Approve,
    Reject,
}

impl JoinDecision {
    pub fn target_status(self) -> JoinRequestStatus {
        match self {
            Self::Approve => JoinRequestStatus::Approved,
            Self::Reject => JoinRequestStatus::Rejected,
        }
    }
}

/// State of a user's participation in a team event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationStatus {
    Confirmed,
    Cancelled,
}

impl ParticipationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    #[inline]
    pub fn is_confirmed(self) -> bool {
        self == Self::Confirmed
    }
}

impl fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownVariant::new("participation status", other)),
        }
    }
}
