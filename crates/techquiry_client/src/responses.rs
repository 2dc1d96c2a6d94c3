//! Typed client for the `/response` resource.

use crate::error::ErrorResponse;
use crate::gateway::Gateway;
use crate::models::{Response, UserLogin};

/// Stateless request builder over `/response`.
#[derive(Debug, Clone)]
pub struct ResponseApi {
    gateway: Gateway,
}

impl ResponseApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn get(&self, response_id: i64) -> Result<Response, ErrorResponse> {
        self.gateway
            .get_json(&format!("/response/id/{}", response_id))
            .await
    }

    pub async fn update(&self, response_id: i64, response: &Response) -> Result<(), ErrorResponse> {
        self.gateway
            .post_json_unit(&format!("/response/id/{}/update", response_id), response)
            .await
    }

    pub async fn delete(&self, response_id: i64) -> Result<(), ErrorResponse> {
        self.gateway
            .post_empty(&format!("/response/id/{}/delete", response_id))
            .await
    }

    /// Users who upvoted the response.
    pub async fn upvotes(&self, response_id: i64) -> Result<Vec<UserLogin>, ErrorResponse> {
        self.gateway
            .get_json(&format!("/response/id/{}/upvote", response_id))
            .await
    }

    pub async fn upvote_count(&self, response_id: i64) -> Result<u64, ErrorResponse> {
        self.gateway
            .get_json(&format!("/response/id/{}/upvote/count", response_id))
            .await
    }

    /// Whether the current user has upvoted the response.
    pub async fn check_upvote(&self, response_id: i64) -> Result<bool, ErrorResponse> {
        self.gateway
            .get_json(&format!("/response/id/{}/upvote/check", response_id))
            .await
    }

    pub async fn create_upvote(&self, response_id: i64) -> Result<(), ErrorResponse> {
        self.gateway
            .post_empty(&format!("/response/id/{}/upvote/create", response_id))
            .await
    }

    pub async fn delete_upvote(&self, response_id: i64) -> Result<(), ErrorResponse> {
        self.gateway
            .post_empty(&format!("/response/id/{}/upvote/delete", response_id))
            .await
    }
}
