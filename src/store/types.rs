use chrono::{DateTime, Utc};
use tokio_postgres::Row;

use crate::store::error::Result;

/// One row of the `messages` table, as returned by a history read.
///
/// The row id never leaves the store: no endpoint exposes it, so reads
/// don't select it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMessage {
    /// Who wrote the message
    pub author: String,

    /// The message text
    pub message: String,

    /// Server-assigned insertion time; the column is nullable, so a row
    /// written without a default would read back as None
    pub timestamp: Option<DateTime<Utc>>,
}

impl StoredMessage {
    /// Parse a message row from the database
    pub(crate) fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            author: row.try_get("author")?,
            message: row.try_get("message")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    /// Render the timestamp as RFC 3339 text, or the empty string if the
    /// row somehow has none
    pub fn timestamp_text(&self) -> String {
        self.timestamp
            .map(|t| t.to_rfc3339())
            .unwrap_or_default()
    }
}
