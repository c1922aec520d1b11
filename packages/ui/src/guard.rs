//! Route access decisions.
//!
//! The router layouts in the platform crates ask [`decide`] what to do with
//! the current [`SessionState`] and then render, wait or navigate.

use api::SessionState;

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Everyone.
    Public,
    /// Signed-out users only (login, register).
    PublicOnly,
    /// Signed-in users, or anyone while the backend is unreachable.
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Session still loading: render nothing, do not redirect yet.
    Wait,
    RedirectLogin,
    RedirectDashboard,
}

pub fn decide(access: Access, state: &SessionState) -> GuardDecision {
    match access {
        Access::Public => GuardDecision::Render,
        _ if state.loading => GuardDecision::Wait,
        Access::PublicOnly if state.is_authenticated() => GuardDecision::RedirectDashboard,
        Access::PublicOnly => GuardDecision::Render,
        Access::Protected if state.is_authenticated() => GuardDecision::Render,
        // Offline: let the user look around instead of bouncing to a login
        // that cannot succeed.
        Access::Protected if state.connectivity.is_disconnected() => GuardDecision::Render,
        Access::Protected => GuardDecision::RedirectLogin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Connectivity, User};

    fn state(user: bool, connectivity: Connectivity, loading: bool) -> SessionState {
        SessionState {
            user: user.then(|| User {
                id: 1,
                username: "alice".into(),
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
            }),
            connectivity,
            loading,
        }
    }

    #[test]
    fn test_protected_requires_user_when_connected() {
        assert_eq!(
            decide(Access::Protected, &state(false, Connectivity::Connected, false)),
            GuardDecision::RedirectLogin
        );
        assert_eq!(
            decide(Access::Protected, &state(true, Connectivity::Connected, false)),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_protected_open_when_disconnected() {
        assert_eq!(
            decide(Access::Protected, &state(false, Connectivity::Disconnected, false)),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_loading_waits() {
        let loading = state(false, Connectivity::Checking, true);
        assert_eq!(decide(Access::Protected, &loading), GuardDecision::Wait);
        assert_eq!(decide(Access::PublicOnly, &loading), GuardDecision::Wait);
        assert_eq!(decide(Access::Public, &loading), GuardDecision::Render);
    }

    #[test]
    fn test_public_only_sends_signed_in_users_to_dashboard() {
        assert_eq!(
            decide(Access::PublicOnly, &state(true, Connectivity::Connected, false)),
            GuardDecision::RedirectDashboard
        );
        assert_eq!(
            decide(Access::PublicOnly, &state(false, Connectivity::Disconnected, false)),
            GuardDecision::Render
        );
    }
}
