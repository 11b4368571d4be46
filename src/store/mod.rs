//! PostgreSQL persistence for chat messages.
//!
//! One append-only table, three statements: create-if-absent at startup,
//! insert on submission, full ordered scan for history. Access goes through
//! a deadpool connection pool; every operation checks a connection out for
//! its own duration and returns it on every exit path.

pub mod client;
pub mod connection;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::MessageStore;
pub use connection::StoreConfig;
pub use error::{Error, Result};
pub use types::StoredMessage;
