//! HTTP gateway: base-URL request helpers with one-shot error classification.
//!
//! Classification happens here, once per call, at the network boundary:
//! - transport failures with no HTTP status (connect refused, DNS, ...)
//!   become `Connection` errors;
//! - any non-2xx response becomes a `Server` error carrying the status and
//!   the body's `message` field when one is present.
//!
//! No retries; each call resolves or rejects exactly once. Credentials are
//! the session cookie held by the shared cookie store.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ErrorResponse;

/// Error body shape the API uses for 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Shared HTTP gateway over the API base URL.
#[derive(Debug, Clone)]
pub struct Gateway {
    base_url: Arc<str>,
    http: reqwest::Client,
}

impl Gateway {
    /// Build a gateway for `base_url` (e.g. `http://localhost:8080/api`).
    /// `timeout` bounds whole calls when set; by default calls have no
    /// client-side deadline.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ErrorResponse> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ErrorResponse::connection(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ErrorResponse> {
        let response = self.send(self.http.get(self.url(path))).await?;
        decode_json(response).await
    }

    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ErrorResponse> {
        let response = self.send(self.http.get(self.url(path))).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ErrorResponse::connection(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ErrorResponse> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        decode_json(response).await
    }

    /// POST with a JSON body, discarding any response payload.
    pub async fn post_json_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ErrorResponse> {
        self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(())
    }

    /// POST with an empty body, discarding any response payload.
    pub async fn post_empty(&self, path: &str) -> Result<(), ErrorResponse> {
        self.send(self.http.post(self.url(path))).await?;
        Ok(())
    }

    /// POST raw bytes (avatar upload).
    pub async fn post_bytes(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ErrorResponse> {
        let request = self
            .http
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        self.send(request).await?;
        Ok(())
    }

    /// Issue the request and classify any failure.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ErrorResponse> {
        let response = request.send().await.map_err(classify_transport)?;
        classify_status(response).await
    }
}

/// Map a transport-level failure. reqwest never surfaces an HTTP "status 0";
/// every failure without a status is a connection error.
fn classify_transport(error: reqwest::Error) -> ErrorResponse {
    match error.status() {
        Some(status) => ErrorResponse::server(status.as_u16(), error.to_string()),
        None => ErrorResponse::connection(error.to_string()),
    }
}

/// Pass 2xx responses through; turn anything else into a `Server` error,
/// reading the body's `message` field when present.
async fn classify_status(response: reqwest::Response) -> Result<reqwest::Response, ErrorResponse> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .bytes()
        .await
        .ok()
        .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
        .and_then(|body| body.message)
        .unwrap_or_default();
    Err(ErrorResponse::server(status.as_u16(), message))
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ErrorResponse> {
    response
        .json()
        .await
        .map_err(|e| ErrorResponse::connection(e.to_string()))
}

/// Translate a 1-indexed caller page to the API's 0-indexed wire page.
pub(crate) fn wire_page(page: u32) -> u32 {
    page.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::wire_page;

    #[test]
    fn pages_are_one_indexed_at_the_caller_boundary() {
        assert_eq!(wire_page(1), 0);
        assert_eq!(wire_page(3), 2);
        // Page 0 is out of contract; clamp rather than underflow.
        assert_eq!(wire_page(0), 0);
    }
}
