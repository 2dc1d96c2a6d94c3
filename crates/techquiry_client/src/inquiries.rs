//! Typed client for the `/inquiry` resource.

use crate::error::ErrorResponse;
use crate::gateway::{wire_page, Gateway};
use crate::models::{Inquiry, Response, UserLogin};

/// Stateless request builder over `/inquiry`.
#[derive(Debug, Clone)]
pub struct InquiryApi {
    gateway: Gateway,
}

impl InquiryApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn count(&self) -> Result<u64, ErrorResponse> {
        self.gateway.get_json("/inquiry/count").await
    }

    /// Fetch `count` inquiries from `page` (1-indexed).
    pub async fn range(&self, count: u32, page: u32) -> Result<Vec<Inquiry>, ErrorResponse> {
        self.gateway
            .get_json(&format!("/inquiry/range/{}/{}", count, wire_page(page)))
            .await
    }

    /// Create an inquiry; returns the new inquiry id.
    pub async fn create(&self, inquiry: &Inquiry) -> Result<i64, ErrorResponse> {
        self.gateway.post_json("/inquiry/create", inquiry).await
    }

    pub async fn get(&self, inquiry_id: i64) -> Result<Inquiry, ErrorResponse> {
        self.gateway
            .get_json(&format!("/inquiry/id/{}", inquiry_id))
            .await
    }

    pub async fn update(&self, inquiry_id: i64, inquiry: &Inquiry) -> Result<(), ErrorResponse> {
        self.gateway
            .post_json_unit(&format!("/inquiry/id/{}/update", inquiry_id), inquiry)
            .await
    }

    pub async fn delete(&self, inquiry_id: i64) -> Result<(), ErrorResponse> {
        self.gateway
            .post_empty(&format!("/inquiry/id/{}/delete", inquiry_id))
            .await
    }

    pub async fn responses(&self, inquiry_id: i64) -> Result<Vec<Response>, ErrorResponse> {
        self.gateway
            .get_json(&format!("/inquiry/id/{}/response", inquiry_id))
            .await
    }

    pub async fn response_count(&self, inquiry_id: i64) -> Result<u64, ErrorResponse> {
        self.gateway
            .get_json(&format!("/inquiry/id/{}/response/count", inquiry_id))
            .await
    }

    /// Post a response under the inquiry; returns the new response id.
    pub async fn create_response(
        &self,
        inquiry_id: i64,
        response: &Response,
    ) -> Result<i64, ErrorResponse> {
        self.gateway
            .post_json(&format!("/inquiry/id/{}/response/create", inquiry_id), response)
            .await
    }

    /// Users observing the inquiry.
    pub async fn observers(&self, inquiry_id: i64) -> Result<Vec<UserLogin>, ErrorResponse> {
        self.gateway
            .get_json(&format!("/inquiry/id/{}/observer", inquiry_id))
            .await
    }

    pub async fn observer_count(&self, inquiry_id: i64) -> Result<u64, ErrorResponse> {
        self.gateway
            .get_json(&format!("/inquiry/id/{}/observer/count", inquiry_id))
            .await
    }

    /// Whether the current user observes the inquiry.
    pub async fn check_observer(&self, inquiry_id: i64) -> Result<bool, ErrorResponse> {
        self.gateway
            .get_json(&format!("/inquiry/id/{}/observer/check", inquiry_id))
            .await
    }

    pub async fn create_observer(&self, inquiry_id: i64) -> Result<(), ErrorResponse> {
        self.gateway
            .post_empty(&format!("/inquiry/id/{}/observer/create", inquiry_id))
            .await
    }

    pub async fn delete_observer(&self, inquiry_id: i64) -> Result<(), ErrorResponse> {
        self.gateway
            .post_empty(&format!("/inquiry/id/{}/observer/delete", inquiry_id))
            .await
    }
}
