//! Classified errors and the error broadcast hub.
//!
//! Every HTTP failure is normalized into exactly one [`ErrorResponse`] at the
//! gateway boundary. Call sites either handle the status codes they care
//! about (401/404 in the session service) or hand the error to the
//! [`ErrorHub`], whose subscribers (the error toast) display it.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub const DEFAULT_CONNECTION_MESSAGE: &str = "A connection error occurred!";
pub const DEFAULT_SERVER_MESSAGE: &str = "A server error occurred!";

/// The two error classes: no reachable server vs an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    Connection,
    Server,
}

/// The normalized error value all failures are converted into before
/// leaving the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

impl ErrorResponse {
    pub fn connection(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            error_type: ErrorType::Connection,
            status: None,
            message: if message.is_empty() {
                DEFAULT_CONNECTION_MESSAGE.into()
            } else {
                message
            },
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            error_type: ErrorType::Server,
            status: Some(status),
            message: if message.is_empty() {
                DEFAULT_SERVER_MESSAGE.into()
            } else {
                message
            },
        }
    }

    /// True for a `Server` error carrying exactly `status`.
    pub fn is_status(&self, status: u16) -> bool {
        self.error_type == ErrorType::Server && self.status == Some(status)
    }

    /// Toast title: `Server` errors show "Error {status}!", connection
    /// errors have no title.
    pub fn title(&self) -> Option<String> {
        match (self.error_type, self.status) {
            (ErrorType::Server, Some(status)) => Some(format!("Error {}!", status)),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.error_type, self.status) {
            (ErrorType::Server, Some(status)) => {
                write!(f, "server error {}: {}", status, self.message)
            }
            _ => write!(f, "connection error: {}", self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}

/// Fan-out channel for unhandled errors, consumed by the error toast.
///
/// Explicitly constructed and passed to whoever may report or subscribe;
/// there is no process-global instance, so tests build isolated hubs.
#[derive(Debug, Clone)]
pub struct ErrorHub {
    sender: broadcast::Sender<ErrorResponse>,
}

impl ErrorHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        Self { sender }
    }

    /// Subscribe to every error reported after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ErrorResponse> {
        self.sender.subscribe()
    }

    /// Broadcast a classified error. Errors with no live subscriber are
    /// still logged.
    pub fn report(&self, error: ErrorResponse) {
        tracing::error!(%error, "unhandled error");
        let _ = self.sender.send(error);
    }

    /// Broadcast an untyped payload (e.g. forwarded from the GUI frontend)
    /// after validating it is a well-formed `ErrorResponse`. Malformed
    /// values are logged and dropped from the visible channel.
    pub fn report_value(&self, value: serde_json::Value) {
        match serde_json::from_value::<ErrorResponse>(value.clone()) {
            Ok(error) => self.report(error),
            Err(reason) => {
                tracing::warn!(%value, %reason, "dropping malformed error payload");
            }
        }
    }
}

impl Default for ErrorHub {
    fn default() -> Self {
        Self::new()
    }
}
