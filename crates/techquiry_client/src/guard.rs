//! Route guard for the login view: authenticated users are redirected home.

use crate::models::SessionState;
use crate::session::SessionService;

/// Route the login view should redirect to when a session exists.
pub const HOME_ROUTE: &str = "/";

/// Guard decision for a pending navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Allowed,
    /// Navigation cancelled; redirect to [`HOME_ROUTE`].
    Denied,
}

/// Decide whether navigation to the login view may proceed.
///
/// Reads already-published session state only; never triggers a refresh.
/// When the first session lookup is still in flight, waits for it to
/// resolve instead of racing against a stale "none".
pub async fn no_auth_guard(session: &SessionService) -> RouteAccess {
    let mut updates = session.session_updates();
    loop {
        match &*updates.borrow_and_update() {
            SessionState::Active(_) => return RouteAccess::Denied,
            SessionState::Anonymous => return RouteAccess::Allowed,
            SessionState::Unresolved => {}
        }
        // A closed channel means no session will ever resolve.
        if updates.changed().await.is_err() {
            return RouteAccess::Allowed;
        }
    }
}
