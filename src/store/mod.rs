//! Storage Layer - dual-indexed persistence
//!
//! Every backend keeps two lookup structures that must agree at all times:
//! - `by_hash`: id -> Value
//! - `by_value`: text -> id
//!
//! Backends:
//! - [`MemoryStore`]: both indices behind one RwLock
//! - [`SqliteStore`]: one table, primary key on id, UNIQUE on value

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::value::Value;
use crate::Result;

/// Capability interface every storage backend implements.
///
/// Callers depend only on this trait, never on a concrete backend. All
/// operations are synchronous and run to completion without suspending; a
/// backend holds its internal lock only for the duration of one call and
/// never across caller I/O.
pub trait ValueStore: Send + Sync {
    /// Insert a value iff neither its id nor its text is already stored.
    ///
    /// Fails with [`crate::Error::AlreadyExists`] on either collision and
    /// performs no mutation; both indices are updated as a single atomic
    /// step relative to every other operation.
    fn save(&self, value: Value) -> Result<()>;

    /// Exact-match lookup by original text. `Ok(None)` when absent.
    fn get_by_value(&self, text: &str) -> Result<Option<Value>>;

    /// Lookup by content hash id. `Ok(None)` when absent.
    fn get_by_hash(&self, id: &str) -> Result<Option<Value>>;

    /// Snapshot of every stored value; order is unspecified.
    fn get_all(&self) -> Result<Vec<Value>>;

    /// Remove the value for this text from both indices atomically.
    ///
    /// Fails with [`crate::Error::NotFound`] when the text is absent.
    fn delete_by_value(&self, text: &str) -> Result<()>;
}
