//! In-memory storage backend
//!
//! Both indices live behind a single RwLock so no reader can ever observe
//! one index updated and not the other. Readers proceed concurrently;
//! writers exclude readers and each other.

use crate::store::ValueStore;
use crate::value::Value;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Indices guarded as one unit. Never lock these independently.
#[derive(Default)]
struct Indexes {
    by_hash: HashMap<String, Value>,
    by_value: HashMap<String, String>,
}

/// Memory-backed store; the default backend for the server.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Indexes>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.inner.read().expect("store lock poisoned").by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ValueStore for MemoryStore {
    fn save(&self, value: Value) -> Result<()> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        if inner.by_hash.contains_key(&value.id) || inner.by_value.contains_key(&value.text) {
            return Err(Error::AlreadyExists);
        }
        inner.by_value.insert(value.text.clone(), value.id.clone());
        inner.by_hash.insert(value.id.clone(), value);
        Ok(())
    }

    fn get_by_value(&self, text: &str) -> Result<Option<Value>> {
        let inner = self.inner.read().expect("store lock poisoned");
        let found = inner
            .by_value
            .get(text)
            .and_then(|id| inner.by_hash.get(id))
            .cloned();
        Ok(found)
    }

    fn get_by_hash(&self, id: &str) -> Result<Option<Value>> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.by_hash.get(id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Value>> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.by_hash.values().cloned().collect())
    }

    fn delete_by_value(&self, text: &str) -> Result<()> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let id = inner.by_value.remove(text).ok_or(Error::NotFound)?;
        inner.by_hash.remove(&id);
        Ok(())
    }
}
