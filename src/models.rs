// Wire types for the HTTP surface and the live-update channel

use serde::{Deserialize, Serialize};

use crate::store::StoredMessage;

/// Maximum length of `author` and `message` in characters, after trimming.
pub const MAX_FIELD_CHARS: usize = 255;

// Request Types
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub author: String,
    pub message: String,
}

// A submission that passed validation: both fields trimmed, non-empty and
// within the length bound.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub author: String,
    pub message: String,
}

// Response Types
/// One history entry as served by `GET /get/msg`. The timestamp is RFC 3339
/// text, or empty if the stored row has none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageOut {
    pub author: String,
    pub message: String,
    pub timestamp: String,
}

/// The payload pushed to live channels. Carries no timestamp; readers
/// reconcile ordering through the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiveMessage {
    pub author: String,
    pub message: String,
}

/// Success acknowledgment envelope, `{"detail": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct Ack {
    pub detail: String,
}

impl Ack {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

// Validation Error Types
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    /// Error attached to a named body field.
    pub fn field(field: &str, kind: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    /// Error attached to the request body as a whole.
    pub fn body(kind: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

// Trim one field and check the length bounds. Lengths are counted in
// characters, not bytes.
fn check_field(field: &str, raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::field(
            field,
            "string_too_short",
            "String should have at least 1 character",
        ));
    }
    if trimmed.chars().count() > MAX_FIELD_CHARS {
        return Err(FieldError::field(
            field,
            "string_too_long",
            "String should have at most 255 characters",
        ));
    }
    Ok(trimmed.to_string())
}

impl SendMessageRequest {
    /// Check both fields before anything touches the store. A rejected
    /// submission has no side effects; the caller turns the collected
    /// errors into a 422 response.
    pub fn validate(&self) -> Result<NewMessage, Vec<FieldError>> {
        let mut errors = Vec::new();

        let author = match check_field("author", &self.author) {
            Ok(v) => Some(v),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        let message = match check_field("message", &self.message) {
            Ok(v) => Some(v),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match (author, message) {
            (Some(author), Some(message)) => Ok(NewMessage { author, message }),
            _ => Err(errors),
        }
    }
}

impl From<StoredMessage> for MessageOut {
    fn from(stored: StoredMessage) -> Self {
        let timestamp = stored.timestamp_text();
        Self {
            author: stored.author,
            message: stored.message,
            timestamp,
        }
    }
}
