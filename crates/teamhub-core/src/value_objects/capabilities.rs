//! Capability bitflags derived from a member's role.
//!
//! Capabilities are never stored; they are recomputed from [`TeamRole`](super::TeamRole)
//! every time an authority decision is made.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TeamCapabilities: u32 {
        /// List members of a private team
        const VIEW_MEMBERS          = 1 << 0;
        /// Participate in team events
        const JOIN_EVENTS           = 1 << 1;
        /// Approve or reject pending join requests
        const APPROVE_JOIN_REQUESTS = 1 << 2;
        /// Remove other members
        const REMOVE_MEMBERS        = 1 << 3;
        /// Create team events
        const MANAGE_EVENTS         = 1 << 4;
        /// Promote or demote members
        const MANAGE_ROLES          = 1 << 5;

        const MEMBER = Self::VIEW_MEMBERS.bits() | Self::JOIN_EVENTS.bits();

        const ADMIN = Self::MEMBER.bits()
            | Self::APPROVE_JOIN_REQUESTS.bits()
            | Self::REMOVE_MEMBERS.bits()
            | Self::MANAGE_EVENTS.bits();

        const OWNER = Self::ADMIN.bits() | Self::MANAGE_ROLES.bits();
    }
}

impl TeamCapabilities {
    #[inline]
    pub fn has(&self, capability: TeamCapabilities) -> bool {
        self.contains(capability)
    }
}
