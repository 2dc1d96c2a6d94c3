//! Typed client for the `/user` resource.

use crate::error::ErrorResponse;
use crate::gateway::{wire_page, Gateway};
use crate::models::{Inquiry, Response, UserData, UserLogin};

/// Stateless request builder over `/user`.
#[derive(Debug, Clone)]
pub struct UserApi {
    gateway: Gateway,
}

impl UserApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn count(&self) -> Result<u64, ErrorResponse> {
        self.gateway.get_json("/user/count").await
    }

    /// Fetch `count` logins from `page` (1-indexed).
    pub async fn range(&self, count: u32, page: u32) -> Result<Vec<UserLogin>, ErrorResponse> {
        self.gateway
            .get_json(&format!("/user/range/{}/{}", count, wire_page(page)))
            .await
    }

    /// Create a user; returns the new user id.
    pub async fn create(&self, user_login: &UserLogin) -> Result<i64, ErrorResponse> {
        self.gateway.post_json("/user/create", user_login).await
    }

    /// Identity of the currently authenticated user. Rejects with
    /// `{Server, 401}` when not logged in.
    pub async fn current(&self) -> Result<UserLogin, ErrorResponse> {
        self.gateway.get_json("/user/current").await
    }

    /// Authenticate; the session cookie lands in the gateway's cookie store.
    pub async fn login(&self, user_login: &UserLogin) -> Result<UserLogin, ErrorResponse> {
        self.gateway.post_json("/user/login", user_login).await
    }

    pub async fn logout(&self) -> Result<(), ErrorResponse> {
        self.gateway.post_empty("/user/logout").await
    }

    pub async fn by_username(&self, username: &str) -> Result<UserLogin, ErrorResponse> {
        self.gateway.get_json(&format!("/user/u/{}", username)).await
    }

    pub async fn by_id(&self, user_id: i64) -> Result<UserLogin, ErrorResponse> {
        self.gateway.get_json(&format!("/user/id/{}", user_id)).await
    }

    pub async fn update(&self, user_id: i64, user_login: &UserLogin) -> Result<(), ErrorResponse> {
        self.gateway
            .post_json_unit(&format!("/user/id/{}/update", user_id), user_login)
            .await
    }

    pub async fn delete(&self, user_id: i64) -> Result<(), ErrorResponse> {
        self.gateway
            .post_empty(&format!("/user/id/{}/delete", user_id))
            .await
    }

    /// Inquiries authored by the user.
    pub async fn inquiries(&self, user_id: i64) -> Result<Vec<Inquiry>, ErrorResponse> {
        self.gateway
            .get_json(&format!("/user/id/{}/inquiries", user_id))
            .await
    }

    /// Inquiries the user observes.
    pub async fn observed_inquiries(&self, user_id: i64) -> Result<Vec<Inquiry>, ErrorResponse> {
        self.gateway
            .get_json(&format!("/user/id/{}/observed", user_id))
            .await
    }

    /// Responses the user has upvoted.
    pub async fn upvoted_responses(&self, user_id: i64) -> Result<Vec<Response>, ErrorResponse> {
        self.gateway
            .get_json(&format!("/user/id/{}/upvotes", user_id))
            .await
    }

    pub async fn create_data(&self, user_data: &UserData) -> Result<(), ErrorResponse> {
        self.gateway.post_json_unit("/user/data/create", user_data).await
    }

    /// Profile data; rejects with `{Server, 404}` when the user has none.
    pub async fn data(&self, user_id: i64) -> Result<UserData, ErrorResponse> {
        self.gateway
            .get_json(&format!("/user/id/{}/data", user_id))
            .await
    }

    pub async fn update_data(
        &self,
        user_id: i64,
        user_data: &UserData,
    ) -> Result<(), ErrorResponse> {
        self.gateway
            .post_json_unit(&format!("/user/id/{}/data/update", user_id), user_data)
            .await
    }

    pub async fn delete_data(&self, user_id: i64) -> Result<(), ErrorResponse> {
        self.gateway
            .post_empty(&format!("/user/id/{}/data/delete", user_id))
            .await
    }

    /// Avatar bytes; rejects with `{Server, 404}` when the user has none.
    pub async fn icon(&self, user_id: i64) -> Result<Vec<u8>, ErrorResponse> {
        self.gateway
            .get_bytes(&format!("/user/id/{}/data/icon", user_id))
            .await
    }

    pub async fn update_icon(
        &self,
        user_id: i64,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ErrorResponse> {
        self.gateway
            .post_bytes(
                &format!("/user/id/{}/data/icon/update", user_id),
                bytes,
                content_type,
            )
            .await
    }

    pub async fn delete_icon(&self, user_id: i64) -> Result<(), ErrorResponse> {
        self.gateway
            .post_empty(&format!("/user/id/{}/data/icon/delete", user_id))
            .await
    }
}
