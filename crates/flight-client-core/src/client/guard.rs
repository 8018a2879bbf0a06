//! Access decisions for role gated screens
//!
//! The decision is a pure function of the current session snapshot and the
//! screen's allowed roles, recomputed on every evaluation. No history is kept.

use flight_shared::uac::Role;

use crate::{Client, SessionSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Session restore still in flight, show a neutral loading indicator
    Unknown,
    /// No user once loading finished, send to the login screen
    Unauthenticated,
    /// Logged in but the role is not in the allowed set
    Forbidden,
    /// Render the protected content
    Authorized,
}

pub fn route_access(is_loading: bool, role: Option<Role>, allowed_roles: &[Role]) -> RouteAccess {
    if is_loading {
        return RouteAccess::Unknown;
    }
    match role {
        None => RouteAccess::Unauthenticated,
        Some(role) if allowed_roles.contains(&role) => RouteAccess::Authorized,
        Some(_) => RouteAccess::Forbidden,
    }
}

impl Client {
    pub fn route_access(&self, allowed_roles: &[Role]) -> RouteAccess {
        let snapshot = self.session_snapshot();
        route_access(snapshot.is_loading, snapshot.role(), allowed_roles)
    }
}

impl SessionSnapshot {
    pub fn route_access(&self, allowed_roles: &[Role]) -> RouteAccess {
        route_access(self.is_loading, self.role(), allowed_roles)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator as _;

    use super::*;

    const ADMIN_ONLY: &[Role] = &[Role::Admin];
    const STAFF_ONLY: &[Role] = &[Role::Staff];
    const EVERYONE: &[Role] = &[Role::Admin, Role::Staff, Role::Customer];

    #[test]
    fn loading_session_is_unknown_regardless_of_user() {
        assert_eq!(route_access(true, None, EVERYONE), RouteAccess::Unknown);
        assert_eq!(
            route_access(true, Some(Role::Admin), ADMIN_ONLY),
            RouteAccess::Unknown
        );
    }

    #[test]
    fn no_user_is_always_unauthenticated() {
        for allowed in [ADMIN_ONLY, STAFF_ONLY, EVERYONE, &[]] {
            assert_eq!(
                route_access(false, None, allowed),
                RouteAccess::Unauthenticated
            );
        }
    }

    #[test]
    fn role_outside_allowed_set_is_never_authorized() {
        for role in Role::iter() {
            for allowed in [ADMIN_ONLY, STAFF_ONLY, &[][..]] {
                let access = route_access(false, Some(role), allowed);
                if allowed.contains(&role) {
                    assert_eq!(access, RouteAccess::Authorized);
                } else {
                    assert_eq!(access, RouteAccess::Forbidden);
                }
            }
        }
    }

    #[test]
    fn matching_role_is_authorized() {
        assert_eq!(
            route_access(false, Some(Role::Customer), EVERYONE),
            RouteAccess::Authorized
        );
        assert_eq!(
            route_access(false, Some(Role::Staff), STAFF_ONLY),
            RouteAccess::Authorized
        );
    }
}
