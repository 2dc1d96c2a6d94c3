//! Wire DTOs for the TechQuiry HTTP API. Field names are camelCase JSON.

use serde::{Deserialize, Serialize};

/// A user's login information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLogin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub username: String,
    /// Plaintext password; only present in outbound create/login payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserLogin {
    /// Credentials payload for login/create calls.
    pub fn credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: None,
            username: username.into(),
            password: Some(password.into()),
        }
    }
}

/// A user's profile data, one-to-one with `UserLogin` by user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
}

/// An inquiry (question) posted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inquiry_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub anonymous: bool,
}

/// A response (answer) to an inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inquiry_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub anonymous: bool,
    pub content: String,
}

/// The current session's user, composed from three lookups.
/// In-memory only; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_login: UserLogin,
    /// Absent when the user has no profile yet (profile fetch 404s).
    pub user_data: Option<UserData>,
    /// Absent when the user has no avatar (icon fetch 404s).
    pub user_icon: Option<Vec<u8>>,
}

impl UserSession {
    pub fn new(user_login: UserLogin) -> Self {
        Self {
            user_login,
            user_data: None,
            user_icon: None,
        }
    }

    /// Name shown in the navigation bar: "First Last" when profile data
    /// exists, the username otherwise.
    pub fn display_name(&self) -> String {
        match &self.user_data {
            Some(data) => format!("{} {}", data.first_name, data.last_name),
            None => self.user_login.username.clone(),
        }
    }
}

/// Published session state. `Unresolved` means no lookup has completed yet,
/// which the route guard treats differently from a resolved `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unresolved,
    Anonymous,
    Active(UserSession),
}

impl SessionState {
    /// Snapshot form: `None` for both unresolved and anonymous states.
    pub fn session(&self) -> Option<&UserSession> {
        match self {
            SessionState::Active(session) => Some(session),
            _ => None,
        }
    }
}
