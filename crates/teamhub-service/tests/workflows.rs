//! Service workflows against the in-memory repositories

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use teamhub_core::{
    AssignableRole, DomainError, JoinDecision, JoinRequestStatus, ParticipationStatus, Snowflake,
    SnowflakeGenerator, TeamRole, Visibility,
};
use teamhub_db::MemoryStore;
use teamhub_service::dto::{
    CreateEventRequest, CreateJoinRequestRequest, CreateTeamRequest, ResolveJoinRequestRequest,
    UpdateMemberRoleRequest,
};
use teamhub_service::{
    EventService, JoinRequestService, MemberService, Notification, NotificationDispatcher,
    NotificationError, NotificationSink, ServiceContext, ServiceError, TeamService,
};

const OWNER: Snowflake = Snowflake::new(1);
const ADMIN: Snowflake = Snowflake::new(2);
const ADMIN_2: Snowflake = Snowflake::new(3);
const MEMBER: Snowflake = Snowflake::new(4);
const OUTSIDER: Snowflake = Snowflake::new(5);
const APPLICANT: Snowflake = Snowflake::new(6);

#[derive(Default)]
struct RecordingSink {
    delivered: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.delivered.lock().push(notification.clone());
        Ok(())
    }
}

struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    async fn deliver(&self, _notification: &Notification) -> Result<(), NotificationError> {
        Err(NotificationError::Encode(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        ))
    }
}

fn context(sink: Arc<dyn NotificationSink>) -> ServiceContext {
    ServiceContext::builder()
        .repositories(MemoryStore::new())
        .notifier(NotificationDispatcher::new(sink))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .unwrap()
}

fn domain(err: &ServiceError) -> &DomainError {
    err.as_domain().expect("domain error")
}

async fn create_team(ctx: &ServiceContext, visibility: Visibility) -> Snowflake {
    let team = TeamService::new(ctx)
        .create_team(
            OWNER,
            CreateTeamRequest {
                name: "Rovers".to_string(),
                description: None,
                visibility,
            },
        )
        .await
        .unwrap();
    sid(&team.id)
}

/// Owner, two admins and a member
async fn staffed_team(ctx: &ServiceContext) -> Snowflake {
    let team_id = create_team(ctx, Visibility::Public).await;
    let members = MemberService::new(ctx);
    for user in [ADMIN, ADMIN_2, MEMBER] {
        members.join_public_team(team_id, user).await.unwrap();
    }
    for admin in [ADMIN, ADMIN_2] {
        members
            .update_member_role(
                team_id,
                admin,
                OWNER,
                UpdateMemberRoleRequest {
                    role: AssignableRole::Admin,
                },
            )
            .await
            .unwrap();
    }
    team_id
}

fn approve() -> ResolveJoinRequestRequest {
    ResolveJoinRequestRequest {
        action: JoinDecision::Approve,
    }
}

fn sid(raw: &str) -> Snowflake {
    Snowflake::parse(raw).unwrap()
}

async fn wait_for(sink: &RecordingSink, count: usize) {
    for _ in 0..100 {
        if sink.delivered.lock().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn test_owner_membership_created_with_team() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let team_id = create_team(&ctx, Visibility::Private).await;

    let members = MemberService::new(&ctx).list_members(team_id, Some(OWNER)).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].role, TeamRole::Owner);

    let team = TeamService::new(&ctx).get_team(team_id, Some(OWNER)).await.unwrap();
    assert_eq!(team.member_count, Some(1));

    let mine = TeamService::new(&ctx).list_my_teams(OWNER).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].member_count, Some(1));
}

#[tokio::test]
async fn test_admin_removal_scenario() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let team_id = staffed_team(&ctx).await;
    let members = MemberService::new(&ctx);

    let err = members.remove_member(team_id, OWNER, ADMIN).await.unwrap_err();
    assert_eq!(err.status_code(), 403);
    assert!(matches!(domain(&err), DomainError::CannotRemoveOwner));

    let err = members.remove_member(team_id, ADMIN_2, ADMIN).await.unwrap_err();
    assert_eq!(err.status_code(), 403);

    let removed = members.remove_member(team_id, MEMBER, ADMIN).await.unwrap();
    assert_eq!(removed.message, "Member removed");

    members.join_public_team(team_id, MEMBER).await.unwrap();
    let err = members.remove_member(team_id, ADMIN, MEMBER).await.unwrap_err();
    assert_eq!(err.status_code(), 403);

    let left = members.remove_member(team_id, MEMBER, MEMBER).await.unwrap();
    assert_eq!(left.message, "Left team");
}

#[tokio::test]
async fn test_owner_role_is_immutable() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let team_id = staffed_team(&ctx).await;
    let members = MemberService::new(&ctx);

    for actor in [OWNER, ADMIN, MEMBER] {
        let err = members
            .update_member_role(
                team_id,
                OWNER,
                actor,
                UpdateMemberRoleRequest {
                    role: AssignableRole::Member,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(domain(&err), DomainError::CannotModifyOwnerRole));
    }

    let err = members
        .update_member_role(
            team_id,
            MEMBER,
            ADMIN,
            UpdateMemberRoleRequest {
                role: AssignableRole::Admin,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotTeamOwner));

    let err = members
        .update_member_role(
            team_id,
            OUTSIDER,
            OWNER,
            UpdateMemberRoleRequest {
                role: AssignableRole::Admin,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let roster = members.list_members(team_id, None).await.unwrap();
    let owners: Vec<_> = roster.iter().filter(|m| m.role == TeamRole::Owner).collect();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].user_id, OWNER.to_string());
}

#[tokio::test]
async fn test_private_team_visibility() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let team_id = create_team(&ctx, Visibility::Private).await;

    let err = MemberService::new(&ctx).list_members(team_id, None).await.unwrap_err();
    assert_eq!(err.status_code(), 403);
    let err = TeamService::new(&ctx).get_team(team_id, Some(OUTSIDER)).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::MembersHidden));

    let err = MemberService::new(&ctx)
        .join_public_team(team_id, OUTSIDER)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::JoinRequestRequired));
}

#[tokio::test]
async fn test_join_request_approval_scenario() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let team_id = create_team(&ctx, Visibility::Private).await;
    let requests = JoinRequestService::new(&ctx);

    let request = requests
        .create(
            team_id,
            APPLICANT,
            CreateJoinRequestRequest {
                message: Some("Let me in".to_string()),
            },
        )
        .await
        .unwrap();
    let request_id = sid(&request.id);
    assert_eq!(request.status, JoinRequestStatus::Pending);

    let err = requests.resolve(team_id, request_id, OUTSIDER, approve()).await.unwrap_err();
    assert_eq!(err.status_code(), 403);

    let first = requests.resolve(team_id, request_id, OWNER, approve()).await.unwrap();
    assert_eq!(first.status, JoinRequestStatus::Approved);
    assert_eq!(first.message, "Join request approved");

    let members = MemberService::new(&ctx).list_members(team_id, Some(APPLICANT)).await.unwrap();
    assert!(members.iter().any(|m| m.user_id == APPLICANT.to_string() && m.role == TeamRole::Member));

    let second = requests.resolve(team_id, request_id, OWNER, approve()).await.unwrap_err();
    assert_eq!(second.status_code(), 400);
    assert_eq!(second.to_string(), "Join request already processed");
}

#[tokio::test]
async fn test_join_request_guards() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let private_id = create_team(&ctx, Visibility::Private).await;
    let public_id = create_team(&ctx, Visibility::Public).await;
    let requests = JoinRequestService::new(&ctx);

    let err = requests
        .create(public_id, APPLICANT, CreateJoinRequestRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::TeamIsPublic));

    let err = requests
        .create(private_id, OWNER, CreateJoinRequestRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);

    let request = requests
        .create(private_id, APPLICANT, CreateJoinRequestRequest::default())
        .await
        .unwrap();
    let err = requests
        .create(private_id, APPLICANT, CreateJoinRequestRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::JoinRequestAlreadyPending));

    // wrong team in the path
    let err = requests
        .resolve(public_id, sid(&request.id), OWNER, approve())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = requests
        .resolve(private_id, Snowflake::new(424_242), OWNER, approve())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let pending = requests.list_pending(private_id, OWNER).await.unwrap();
    assert_eq!(pending.len(), 1);
    let err = requests.list_pending(private_id, APPLICANT).await.unwrap_err();
    assert_eq!(err.status_code(), 403);

    let rejected = requests
        .resolve(
            private_id,
            sid(&request.id),
            OWNER,
            ResolveJoinRequestRequest {
                action: JoinDecision::Reject,
            },
        )
        .await
        .unwrap();
    assert_eq!(rejected.status, JoinRequestStatus::Rejected);
    assert!(requests.list_pending(private_id, OWNER).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_event_capacity_scenario() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let team_id = staffed_team(&ctx).await;
    let events = EventService::new(&ctx);

    let event = events
        .create_event(
            team_id,
            ADMIN,
            CreateEventRequest {
                title: "Scrimmage".to_string(),
                description: None,
                starts_at: Utc::now(),
                max_participants: Some(2),
            },
        )
        .await
        .unwrap();
    let event_id = sid(&event.id);

    events.join(team_id, event_id, OWNER).await.unwrap();
    events.join(team_id, event_id, ADMIN).await.unwrap();

    let err = events.join(team_id, event_id, MEMBER).await.unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.to_string(), "Event is full");

    let left = events.leave(team_id, event_id, ADMIN).await.unwrap();
    assert_eq!(left.message, "Left event");

    let rejoined = events.join(team_id, event_id, ADMIN).await.unwrap();
    assert_eq!(rejoined.status, ParticipationStatus::Confirmed);

    let err = events.join(team_id, event_id, ADMIN).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::AlreadyParticipating));

    let participants = events.list_participants(team_id, event_id, None).await.unwrap();
    assert_eq!(participants.len(), 2);
}

#[tokio::test]
async fn test_removed_member_frees_event_seat() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let team_id = staffed_team(&ctx).await;
    let events = EventService::new(&ctx);
    let members = MemberService::new(&ctx);

    let event = events
        .create_event(
            team_id,
            OWNER,
            CreateEventRequest {
                title: "Finals".to_string(),
                description: None,
                starts_at: Utc::now(),
                max_participants: Some(1),
            },
        )
        .await
        .unwrap();
    let event_id = sid(&event.id);

    events.join(team_id, event_id, MEMBER).await.unwrap();
    members.remove_member(team_id, MEMBER, OWNER).await.unwrap();

    assert!(events.list_participants(team_id, event_id, None).await.unwrap().is_empty());
    events.join(team_id, event_id, ADMIN).await.unwrap();

    // leaving the team works the same way
    members.remove_member(team_id, ADMIN, ADMIN).await.unwrap();
    let participants = events.list_participants(team_id, event_id, None).await.unwrap();
    assert!(participants.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_event_joins_never_over_admit() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let team_id = create_team(&ctx, Visibility::Public).await;
    let event = EventService::new(&ctx)
        .create_event(
            team_id,
            OWNER,
            CreateEventRequest {
                title: "Tryouts".to_string(),
                description: None,
                starts_at: Utc::now(),
                max_participants: Some(3),
            },
        )
        .await
        .unwrap();
    let event_id = sid(&event.id);

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let ctx = ctx.clone();
            let user = Snowflake::new(10_000 + i);
            tokio::spawn(async move { EventService::new(&ctx).join(team_id, event_id, user).await })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => admitted += 1,
            Err(err) => assert_eq!(err.to_string(), "Event is full"),
        }
    }
    assert_eq!(admitted, 3);

    let participants = EventService::new(&ctx)
        .list_participants(team_id, event_id, None)
        .await
        .unwrap();
    assert_eq!(participants.len(), 3);

    // only admitted outsiders became members
    let members = MemberService::new(&ctx).list_members(team_id, None).await.unwrap();
    assert_eq!(members.len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_decisions_resolve_once() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let private_id = create_team(&ctx, Visibility::Private).await;
    let request = JoinRequestService::new(&ctx)
        .create(private_id, APPLICANT, CreateJoinRequestRequest::default())
        .await
        .unwrap();
    let request_id = sid(&request.id);

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let ctx = ctx.clone();
            let action = if i % 2 == 0 {
                JoinDecision::Approve
            } else {
                JoinDecision::Reject
            };
            tokio::spawn(async move {
                JoinRequestService::new(&ctx)
                    .resolve(private_id, request_id, OWNER, ResolveJoinRequestRequest { action })
                    .await
            })
        })
        .collect();

    let mut winners = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(decision) => winners.push(decision.status),
            Err(err) => {
                assert_eq!(err.status_code(), 400);
                assert!(matches!(domain(&err), DomainError::JoinRequestAlreadyProcessed));
            }
        }
    }
    assert_eq!(winners.len(), 1);

    let members = MemberService::new(&ctx)
        .list_members(private_id, Some(OWNER))
        .await
        .unwrap();
    let applicant_admitted = members.iter().any(|m| m.user_id == APPLICANT.to_string());
    assert_eq!(applicant_admitted, winners[0] == JoinRequestStatus::Approved);
}

#[tokio::test]
async fn test_event_join_membership_rules() {
    let ctx = context(Arc::new(RecordingSink::default()));
    let public_id = create_team(&ctx, Visibility::Public).await;
    let private_id = create_team(&ctx, Visibility::Private).await;
    let events = EventService::new(&ctx);

    let new_event = |title: &str| CreateEventRequest {
        title: title.to_string(),
        description: None,
        starts_at: Utc::now(),
        max_participants: None,
    };
    let open = events.create_event(public_id, OWNER, new_event("Open")).await.unwrap();
    let closed = events.create_event(private_id, OWNER, new_event("Closed")).await.unwrap();

    // outsiders of a public team become members on join
    events.join(public_id, sid(&open.id), OUTSIDER).await.unwrap();
    let members = MemberService::new(&ctx).list_members(public_id, None).await.unwrap();
    assert!(members.iter().any(|m| m.user_id == OUTSIDER.to_string()));

    let err = events.join(private_id, sid(&closed.id), OUTSIDER).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotTeamMember));

    // event exists, but under another team
    let err = events.join(public_id, sid(&closed.id), OWNER).await.unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = events.leave(public_id, sid(&open.id), OWNER).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotParticipating));

    let err = events
        .create_event(public_id, OUTSIDER, new_event("Nope"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn test_notifications_reach_recipients() {
    let sink = Arc::new(RecordingSink::default());
    let ctx = context(sink.clone());
    let team_id = create_team(&ctx, Visibility::Private).await;

    let request = JoinRequestService::new(&ctx)
        .create(team_id, APPLICANT, CreateJoinRequestRequest::default())
        .await
        .unwrap();
    JoinRequestService::new(&ctx)
        .resolve(team_id, sid(&request.id), OWNER, approve())
        .await
        .unwrap();

    wait_for(&sink, 2).await;
    let delivered = sink.delivered.lock();
    let created = delivered
        .iter()
        .find(|n| n.event.event_type() == "JOIN_REQUEST_CREATED")
        .unwrap();
    assert_eq!(created.recipients, vec![OWNER]);
    let resolved = delivered
        .iter()
        .find(|n| n.event.event_type() == "JOIN_REQUEST_RESOLVED")
        .unwrap();
    assert_eq!(resolved.recipients, vec![APPLICANT]);
}

#[tokio::test]
async fn test_notification_failure_does_not_affect_outcome() {
    let ctx = context(Arc::new(FailingSink));
    let team_id = create_team(&ctx, Visibility::Private).await;
    let requests = JoinRequestService::new(&ctx);

    let request = requests
        .create(team_id, APPLICANT, CreateJoinRequestRequest::default())
        .await
        .unwrap();
    let decision = requests
        .resolve(team_id, sid(&request.id), OWNER, approve())
        .await
        .unwrap();
    assert_eq!(decision.status, JoinRequestStatus::Approved);

    tokio::task::yield_now().await;
    let members = MemberService::new(&ctx).list_members(team_id, Some(OWNER)).await.unwrap();
    assert_eq!(members.len(), 2);
}
