//! Service context - dependency container for services
//!
//! Holds the repositories, the notification dispatcher and the id generator.

use std::sync::Arc;

use teamhub_core::traits::{
    JoinRequestRepository, MemberRepository, ParticipantRepository, TeamEventRepository,
    TeamRepository,
};
use teamhub_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationDispatcher;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    team_repo: Arc<dyn TeamRepository>,
    member_repo: Arc<dyn MemberRepository>,
    join_request_repo: Arc<dyn JoinRequestRepository>,
    event_repo: Arc<dyn TeamEventRepository>,
    participant_repo: Arc<dyn ParticipantRepository>,

    // Notifications
    notifier: NotificationDispatcher,

    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn team_repo(&self) -> &dyn TeamRepository {
        self.team_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn join_request_repo(&self) -> &dyn JoinRequestRepository {
        self.join_request_repo.as_ref()
    }

    pub fn event_repo(&self) -> &dyn TeamEventRepository {
        self.event_repo.as_ref()
    }

    pub fn participant_repo(&self) -> &dyn ParticipantRepository {
        self.participant_repo.as_ref()
    }

    // === Notifications ===

    pub fn notifier(&self) -> &NotificationDispatcher {
        &self.notifier
    }

    // === Ids ===

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("notifier", &self.notifier)
            .finish()
    }
}

/// Builder for [`ServiceContext`]
#[derive(Default)]
pub struct ServiceContextBuilder {
    team_repo: Option<Arc<dyn TeamRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    join_request_repo: Option<Arc<dyn JoinRequestRepository>>,
    event_repo: Option<Arc<dyn TeamEventRepository>>,
    participant_repo: Option<Arc<dyn ParticipantRepository>>,
    notifier: Option<NotificationDispatcher>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team_repo(mut self, repo: Arc<dyn TeamRepository>) -> Self {
        self.team_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn join_request_repo(mut self, repo: Arc<dyn JoinRequestRepository>) -> Self {
        self.join_request_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn TeamEventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn participant_repo(mut self, repo: Arc<dyn ParticipantRepository>) -> Self {
        self.participant_repo = Some(repo);
        self
    }

    /// Use one value for every repository port
    pub fn repositories<R>(self, repos: R) -> Self
    where
        R: TeamRepository
            + MemberRepository
            + JoinRequestRepository
            + TeamEventRepository
            + ParticipantRepository
            + 'static,
    {
        let repos = Arc::new(repos);
        self.team_repo(repos.clone())
            .member_repo(repos.clone())
            .join_request_repo(repos.clone())
            .event_repo(repos.clone())
            .participant_repo(repos)
    }

    pub fn notifier(mut self, notifier: NotificationDispatcher) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            team_repo: required(self.team_repo, "team_repo")?,
            member_repo: required(self.member_repo, "member_repo")?,
            join_request_repo: required(self.join_request_repo, "join_request_repo")?,
            event_repo: required(self.event_repo, "event_repo")?,
            participant_repo: required(self.participant_repo, "participant_repo")?,
            notifier: required(self.notifier, "notifier")?,
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
        })
    }
}
