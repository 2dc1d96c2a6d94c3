//! Session service: derives the single "who is logged in" value from three
//! sequential lookups (identity → profile → avatar) and publishes it on a
//! watch channel.
//!
//! The chain tolerates partial failure: a missing profile or avatar (404)
//! yields a partial session without raising an error, while any other
//! failure publishes the partial result built so far and reports the
//! classified error to the hub.

use tokio::sync::watch;

use crate::error::ErrorHub;
use crate::models::{SessionState, UserSession};
use crate::users::UserApi;

/// Owns the current session value. All other components read clones
/// through [`SessionService::session_updates`] or the snapshot.
#[derive(Debug)]
pub struct SessionService {
    users: UserApi,
    errors: ErrorHub,
    sender: watch::Sender<SessionState>,
}

impl SessionService {
    pub fn new(users: UserApi, errors: ErrorHub) -> Self {
        let (sender, _) = watch::channel(SessionState::Unresolved);
        Self {
            users,
            errors,
            sender,
        }
    }

    /// Re-derive the session from the remote API.
    ///
    /// Strictly sequential; each step runs only after the previous one
    /// succeeded. Returns the session value current after the chain, so
    /// callers (the login form) can chain navigation on it. Unhandled step
    /// failures are reported to the error hub, never returned.
    pub async fn refresh(&self) -> Option<UserSession> {
        // Step 1: identity. A 401 means anonymous, not an error.
        let user_login = match self.users.current().await {
            Ok(user_login) => user_login,
            Err(error) if error.is_status(401) => {
                self.publish(SessionState::Anonymous);
                return None;
            }
            Err(error) => {
                // Publish nothing new; keep whatever was last known.
                self.errors.report(error);
                return self.current_session();
            }
        };

        let mut session = UserSession::new(user_login);
        let Some(user_id) = session.user_login.user_id else {
            // The API always assigns ids; without one the profile and
            // avatar cannot be fetched.
            tracing::warn!("current user login has no user id");
            self.publish(SessionState::Active(session.clone()));
            return Some(session);
        };

        // Step 2: profile data. A 404 means no profile yet.
        match self.users.data(user_id).await {
            Ok(user_data) => session.user_data = Some(user_data),
            Err(error) => {
                self.publish(SessionState::Active(session.clone()));
                if !error.is_status(404) {
                    self.errors.report(error);
                }
                return Some(session);
            }
        }

        // Step 3: avatar. A 404 means no avatar.
        match self.users.icon(user_id).await {
            Ok(user_icon) => session.user_icon = Some(user_icon),
            Err(error) => {
                self.publish(SessionState::Active(session.clone()));
                if !error.is_status(404) {
                    self.errors.report(error);
                }
                return Some(session);
            }
        }

        self.publish(SessionState::Active(session.clone()));
        Some(session)
    }

    /// Drop straight to anonymous (after logout); no network access.
    pub fn clear(&self) {
        self.publish(SessionState::Anonymous);
    }

    /// Most recently published session, synchronously. `None` when the
    /// chain never resolved or resolved to anonymous.
    pub fn current_session(&self) -> Option<UserSession> {
        self.sender.borrow().session().cloned()
    }

    /// Published state including the unresolved/anonymous distinction.
    pub fn current_state(&self) -> SessionState {
        self.sender.borrow().clone()
    }

    /// Continuous notification stream of the session value. New receivers
    /// observe the latest value immediately, then every change; the stream
    /// never completes while the service is alive.
    pub fn session_updates(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    fn publish(&self, state: SessionState) {
        tracing::debug!(active = state.session().is_some(), "session published");
        // send_replace keeps publishing even with no live receiver.
        self.sender.send_replace(state);
    }
}
