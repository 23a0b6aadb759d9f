//! Role authority - who may act on whom inside a team.
//!
//! Every decision is a pure function of the team, its member list and the
//! acting user. The acting user is always passed in explicitly.

use crate::entities::{Team, TeamMember};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, TeamCapabilities, TeamRole};

/// Result of an authority check
pub type Decision = Result<(), DomainError>;

/// Snapshot of a team and its members to decide against
#[derive(Debug, Clone, Copy)]
pub struct RoleAuthority<'a> {
    team: &'a Team,
    members: &'a [TeamMember],
}

impl<'a> RoleAuthority<'a> {
    pub fn new(team: &'a Team, members: &'a [TeamMember]) -> Self {
        Self { team, members }
    }

    pub fn team(&self) -> &'a Team {
        self.team
    }

    pub fn member(&self, user_id: Snowflake) -> Option<&'a TeamMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    pub fn role_of(&self, user_id: Snowflake) -> Option<TeamRole> {
        self.member(user_id).map(|m| m.role)
    }

    pub fn is_member(&self, user_id: Snowflake) -> bool {
        self.member(user_id).is_some()
    }

    fn capabilities_of(&self, user_id: Snowflake) -> TeamCapabilities {
        self.role_of(user_id)
            .map_or(TeamCapabilities::empty(), TeamRole::capabilities)
    }

    /// Only the owner may change roles.
    pub fn can_change_role(&self, actor: Snowflake) -> Decision {
        if self.team.is_owner(actor) {
            Ok(())
        } else {
            Err(DomainError::NotTeamOwner)
        }
    }

    /// Outsiders of a private team learn nothing about its roster.
    fn require_roster_access(&self, actor: Snowflake) -> Decision {
        if self.team.is_public() || self.is_member(actor) {
            Ok(())
        } else {
            Err(DomainError::NotTeamMember)
        }
    }

    /// Role change against a concrete target.
    ///
    /// An owner target is rejected before the actor's role is looked at, so
    /// the owner-specific error is what every caller with roster access sees.
    pub fn check_role_change(&self, actor: Snowflake, target: Snowflake) -> Decision {
        self.require_roster_access(actor)?;
        let target_role = self.role_of(target).ok_or(DomainError::MemberNotFound)?;
        if target_role.is_owner() || self.team.is_owner(target) {
            return Err(DomainError::CannotModifyOwnerRole);
        }
        self.can_change_role(actor)
    }

    /// Owners and admins approve or reject join requests.
    pub fn can_approve_join_request(&self, actor: Snowflake) -> Decision {
        if self
            .capabilities_of(actor)
            .has(TeamCapabilities::APPROVE_JOIN_REQUESTS)
        {
            Ok(())
        } else {
            Err(DomainError::NotTeamManager)
        }
    }

    pub fn can_manage_events(&self, actor: Snowflake) -> Decision {
        if self
            .capabilities_of(actor)
            .has(TeamCapabilities::MANAGE_EVENTS)
        {
            Ok(())
        } else {
            Err(DomainError::NotTeamManager)
        }
    }

    /// Removal rules, evaluated in order once the actor may see the roster:
    ///
    /// 1. the owner can never be removed
    /// 2. the owner may remove anyone else
    /// 3. an admin may remove members and themself, but not another admin
    /// 4. anyone may remove themself
    pub fn can_remove_member(&self, actor: Snowflake, target: Snowflake) -> Decision {
        self.require_roster_access(actor)?;
        let target_role = self.role_of(target).ok_or(DomainError::MemberNotFound)?;

        if target_role.is_owner() || self.team.is_owner(target) {
            return Err(DomainError::CannotRemoveOwner);
        }
        if self.team.is_owner(actor) {
            return Ok(());
        }

        match self.role_of(actor) {
            Some(TeamRole::Admin) => {
                if target_role == TeamRole::Admin && actor != target {
                    Err(DomainError::AdminCannotRemoveAdmin)
                } else {
                    Ok(())
                }
            }
            _ if actor == target => Ok(()),
            _ => Err(DomainError::CannotRemoveMember),
        }
    }

    /// Public teams are readable by anyone, private teams only by members.
    pub fn can_view_members(&self, actor: Option<Snowflake>) -> Decision {
        if self.team.is_public() || actor.is_some_and(|id| self.is_member(id)) {
            Ok(())
        } else {
            Err(DomainError::MembersHidden)
        }
    }

    pub fn require_member(&self, actor: Snowflake) -> Result<&'a TeamMember, DomainError> {
        self.member(actor).ok_or(DomainError::NotTeamMember)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Visibility;

    const TEAM: Snowflake = Snowflake::new(100);
    const OWNER: Snowflake = Snowflake::new(1);
    const ADMIN: Snowflake = Snowflake::new(2);
    const ADMIN_2: Snowflake = Snowflake::new(3);
    const MEMBER: Snowflake = Snowflake::new(4);
    const MEMBER_2: Snowflake = Snowflake::new(5);
    const OUTSIDER: Snowflake = Snowflake::new(99);

    fn fixture(visibility: Visibility) -> (Team, Vec<TeamMember>) {
        let team = Team::new(TEAM, "Team T".to_string(), OWNER, visibility);
        let members = [
            (OWNER, TeamRole::Owner),
            (ADMIN, TeamRole::Admin),
            (ADMIN_2, TeamRole::Admin),
            (MEMBER, TeamRole::Member),
            (MEMBER_2, TeamRole::Member),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (user, role))| TeamMember::new(Snowflake::new(1000 + i as i64), TEAM, user, role))
        .collect();
        (team, members)
    }

    #[test]
    fn test_only_owner_changes_roles() {
        let (team, members) = fixture(Visibility::Public);
        let auth = RoleAuthority::new(&team, &members);

        assert!(auth.can_change_role(OWNER).is_ok());
        for actor in [ADMIN, MEMBER, OUTSIDER] {
            assert!(matches!(auth.can_change_role(actor), Err(DomainError::NotTeamOwner)));
        }
    }

    #[test]
    fn test_owner_role_change_rejected_for_every_actor() {
        let (team, members) = fixture(Visibility::Public);
        let auth = RoleAuthority::new(&team, &members);

        for actor in [OWNER, ADMIN, MEMBER, OUTSIDER] {
            assert!(matches!(
                auth.check_role_change(actor, OWNER),
                Err(DomainError::CannotModifyOwnerRole)
            ));
        }
        assert!(auth.check_role_change(OWNER, MEMBER).is_ok());
        assert!(matches!(
            auth.check_role_change(ADMIN, MEMBER),
            Err(DomainError::NotTeamOwner)
        ));
        assert!(matches!(
            auth.check_role_change(OWNER, OUTSIDER),
            Err(DomainError::MemberNotFound)
        ));
    }

    #[test]
    fn test_approvers_are_owner_and_admins() {
        let (team, members) = fixture(Visibility::Private);
        let auth = RoleAuthority::new(&team, &members);

        assert!(auth.can_approve_join_request(OWNER).is_ok());
        assert!(auth.can_approve_join_request(ADMIN).is_ok());
        assert!(matches!(
            auth.can_approve_join_request(MEMBER),
            Err(DomainError::NotTeamManager)
        ));
        assert!(matches!(
            auth.can_approve_join_request(OUTSIDER),
            Err(DomainError::NotTeamManager)
        ));
    }

    #[test]
    fn test_owner_is_never_removable() {
        let (team, members) = fixture(Visibility::Public);
        let auth = RoleAuthority::new(&team, &members);

        for actor in [OWNER, ADMIN, MEMBER, OUTSIDER] {
            assert!(matches!(
                auth.can_remove_member(actor, OWNER),
                Err(DomainError::CannotRemoveOwner)
            ));
        }
    }

    #[test]
    fn test_admin_removal_scenario() {
        let (team, members) = fixture(Visibility::Public);
        let auth = RoleAuthority::new(&team, &members);

        // admin vs owner, admin vs admin, admin vs member, member vs admin
        assert!(auth.can_remove_member(ADMIN, OWNER).is_err());
        assert!(matches!(
            auth.can_remove_member(ADMIN, ADMIN_2),
            Err(DomainError::AdminCannotRemoveAdmin)
        ));
        assert!(auth.can_remove_member(ADMIN, MEMBER).is_ok());
        assert!(matches!(
            auth.can_remove_member(MEMBER, ADMIN),
            Err(DomainError::CannotRemoveMember)
        ));
    }

    #[test]
    fn test_self_removal() {
        let (team, members) = fixture(Visibility::Public);
        let auth = RoleAuthority::new(&team, &members);

        assert!(auth.can_remove_member(ADMIN, ADMIN).is_ok());
        assert!(auth.can_remove_member(MEMBER, MEMBER).is_ok());
        assert!(matches!(
            auth.can_remove_member(MEMBER, MEMBER_2),
            Err(DomainError::CannotRemoveMember)
        ));
    }

    #[test]
    fn test_owner_removes_anyone_else() {
        let (team, members) = fixture(Visibility::Public);
        let auth = RoleAuthority::new(&team, &members);

        for target in [ADMIN, ADMIN_2, MEMBER] {
            assert!(auth.can_remove_member(OWNER, target).is_ok());
        }
    }

    #[test]
    fn test_remove_unknown_target() {
        let (team, members) = fixture(Visibility::Public);
        let auth = RoleAuthority::new(&team, &members);

        assert!(matches!(
            auth.can_remove_member(OWNER, OUTSIDER),
            Err(DomainError::MemberNotFound)
        ));
    }

    #[test]
    fn test_private_roster_hidden_from_outsiders() {
        let (team, members) = fixture(Visibility::Private);
        let auth = RoleAuthority::new(&team, &members);

        // known member, unknown user and the owner all answer the same
        for target in [MEMBER, OUTSIDER, OWNER] {
            assert!(matches!(
                auth.can_remove_member(OUTSIDER, target),
                Err(DomainError::NotTeamMember)
            ));
            assert!(matches!(
                auth.check_role_change(OUTSIDER, target),
                Err(DomainError::NotTeamMember)
            ));
        }

        assert!(matches!(
            auth.can_remove_member(OWNER, OUTSIDER),
            Err(DomainError::MemberNotFound)
        ));
        assert!(matches!(
            auth.check_role_change(ADMIN, OWNER),
            Err(DomainError::CannotModifyOwnerRole)
        ));
    }

    #[test]
    fn test_view_members() {
        let (public, members) = fixture(Visibility::Public);
        let auth = RoleAuthority::new(&public, &members);
        assert!(auth.can_view_members(None).is_ok());
        assert!(auth.can_view_members(Some(OUTSIDER)).is_ok());

        let (private, members) = fixture(Visibility::Private);
        let auth = RoleAuthority::new(&private, &members);
        assert!(auth.can_view_members(Some(MEMBER)).is_ok());
        assert!(matches!(auth.can_view_members(None), Err(DomainError::MembersHidden)));
        assert!(matches!(
            auth.can_view_members(Some(OUTSIDER)),
            Err(DomainError::MembersHidden)
        ));
    }

    #[test]
    fn test_manage_events_and_membership() {
        let (team, members) = fixture(Visibility::Private);
        let auth = RoleAuthority::new(&team, &members);

        assert!(auth.can_manage_events(ADMIN).is_ok());
        assert!(auth.can_manage_events(MEMBER).is_err());
        assert_eq!(auth.require_member(MEMBER).unwrap().role, TeamRole::Member);
        assert!(matches!(auth.require_member(OUTSIDER), Err(DomainError::NotTeamMember)));
    }

    #[test]
    fn test_decisions_are_repeatable() {
        let (team, members) = fixture(Visibility::Private);
        let auth = RoleAuthority::new(&team, &members);

        for _ in 0..3 {
            assert!(auth.can_remove_member(ADMIN, MEMBER).is_ok());
            assert!(auth.can_remove_member(ADMIN, ADMIN_2).is_err());
        }
    }
}
