use serde::Deserialize;

pub const MSG_CONNECTION: &str = "Connection error. Check your internet connection and try again.";
pub const MSG_INVALID_DATA: &str = "Invalid data. Please check the form fields.";
pub const MSG_SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const MSG_SERVER: &str = "Internal server error. Please try again in a moment.";
pub const MSG_UNEXPECTED: &str = "Unexpected error. Please try again.";

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure: connect, timeout, broken body. Status 0.
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {status}")]
    Status { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

impl ApiError {
    /// HTTP status of the failure; 0 when the server was never reached.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) => Some(0),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Generic, user-facing text for the failure.
    pub fn user_message(&self) -> &'static str {
        match self.status() {
            Some(0) => MSG_CONNECTION,
            Some(400) => MSG_INVALID_DATA,
            Some(401 | 403) => MSG_SESSION_EXPIRED,
            Some(500) => MSG_SERVER,
            _ => MSG_UNEXPECTED,
        }
    }

    /// Message the server put in the error body, either a JSON `message`
    /// field or a plain-text body.
    pub fn server_message(&self) -> Option<String> {
        let ApiError::Status { body, .. } = self else {
            return None;
        };
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        match serde_json::from_str::<MessageBody>(body) {
            Ok(parsed) => parsed.message.filter(|message| !message.trim().is_empty()),
            Err(_) if !body.starts_with('{') && !body.starts_with('[') => Some(body.to_string()),
            Err(_) => None,
        }
    }
}
