use deadpool_postgres::Pool;

use crate::store::{connection::StoreConfig, error::Result, types::StoredMessage};

/// Schema for the single append-only table. Created at startup if absent;
/// the database assigns ids and timestamps.
const CREATE_MESSAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id        SERIAL PRIMARY KEY,
    author    VARCHAR(255) NOT NULL,
    message   TEXT NOT NULL,
    timestamp TIMESTAMPTZ DEFAULT now()
)"#;

/// Client for the message store
#[derive(Clone)]
pub struct MessageStore {
    pool: Pool,
}

impl MessageStore {
    /// Connect to the message store and make sure the schema exists.
    ///
    /// The schema statement doubles as the connection test: if the
    /// database is unreachable, this fails instead of the first request.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chat_relay::store::{MessageStore, StoreConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let store = MessageStore::connect(StoreConfig::from_env()).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        let store = Self::with_pool(config.build_pool()?);
        store.init_schema().await?;
        Ok(store)
    }

    /// Wrap an already-built pool without touching the database.
    pub fn with_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create the `messages` table if it doesn't exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        let conn = self.pool.get().await?;
        conn.execute(CREATE_MESSAGES_TABLE, &[]).await?;
        tracing::debug!("messages table ready");
        Ok(())
    }

    /// Insert one message row. The database assigns the id and the
    /// timestamp; neither is returned to the caller.
    pub async fn insert_message(&self, author: &str, message: &str) -> Result<()> {
        let conn = self.pool.get().await?;
        conn.execute(
            "INSERT INTO messages (author, message) VALUES ($1, $2)",
            &[&author, &message],
        )
        .await?;
        Ok(())
    }

    /// Retrieve every stored message, oldest first. There is no pagination;
    /// the history is always served whole.
    pub async fn list_messages(&self) -> Result<Vec<StoredMessage>> {
        let conn = self.pool.get().await?;
        let rows = conn
            .query(
                "SELECT author, message, timestamp FROM messages ORDER BY timestamp ASC",
                &[],
            )
            .await?;

        rows.iter().map(StoredMessage::from_row).collect()
    }
}
