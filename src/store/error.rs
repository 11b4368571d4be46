use thiserror::Error;

/// Result type for message store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for message store operations
#[derive(Debug, Error)]
pub enum Error {
    /// Connection error - pool construction failed or database unreachable
    #[error("connection error: {0}")]
    Connection(String),

    /// Pool error - checking a connection out of the pool failed
    #[error("pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// Database error - SQL execution failures
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),
}

impl From<deadpool_postgres::BuildError> for Error {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        Error::Connection(err.to_string())
    }
}
