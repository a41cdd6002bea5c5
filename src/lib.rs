//! # Textdex - String analysis and deduplication store
//!
//! Accepts arbitrary text, derives a fixed set of properties (length,
//! palindrome status, character diversity, word count, SHA-256 content hash,
//! character frequency distribution) and persists each distinct string
//! exactly once, retrievable by its original text or by its content hash.
//!
//! Textdex provides:
//! - A deterministic, side-effect-free analysis engine
//! - A dual-indexed store (by hash, by value) safe under concurrent access
//! - Interchangeable in-memory and SQLite storage backends
//! - An HTTP API and CLI with structured and natural-language filtering

pub mod analyzer;
pub mod config;
pub mod filter;
pub mod server;
pub mod store;
pub mod value;

// Re-exports for convenient access
pub use analyzer::analyze;
pub use filter::Filter;
pub use store::{MemoryStore, SqliteStore, ValueStore};
pub use value::{Properties, Value};

/// Result type alias for Textdex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Textdex operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Save rejected because the text or its hash is already stored
    #[error("value already exists")]
    AlreadyExists,

    /// Delete target is not stored
    #[error("value not found")]
    NotFound,

    /// Infrastructure fault in the SQLite backend; distinct from the
    /// domain conditions above
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
