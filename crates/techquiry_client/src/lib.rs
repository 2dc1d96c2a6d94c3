//! Shared TechQuiry client library (config, API gateway clients, session).
//! Used by the Tauri GUI and the `techquiry` CLI.

pub mod config;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod inquiries;
pub mod models;
pub mod responses;
pub mod session;
pub mod users;

pub use error::{ErrorHub, ErrorResponse, ErrorType};
pub use gateway::Gateway;
pub use guard::{no_auth_guard, RouteAccess, HOME_ROUTE};
pub use inquiries::InquiryApi;
pub use models::{Inquiry, Response, SessionState, UserData, UserLogin, UserSession};
pub use responses::ResponseApi;
pub use session::SessionService;
pub use users::UserApi;

use std::time::Duration;

/// The full client stack over one API base URL: typed resource clients,
/// the error hub, and the session service, all sharing one gateway
/// (and therefore one cookie store).
#[derive(Debug)]
pub struct TechQuiryClient {
    pub users: UserApi,
    pub inquiries: InquiryApi,
    pub responses: ResponseApi,
    pub errors: ErrorHub,
    pub session: SessionService,
}

impl TechQuiryClient {
    pub fn connect(base_url: &str, timeout: Option<Duration>) -> Result<Self, ErrorResponse> {
        let gateway = Gateway::new(base_url, timeout)?;
        let errors = ErrorHub::new();
        let users = UserApi::new(gateway.clone());
        let session = SessionService::new(users.clone(), errors.clone());
        Ok(Self {
            users,
            inquiries: InquiryApi::new(gateway.clone()),
            responses: ResponseApi::new(gateway),
            errors,
            session,
        })
    }
}
