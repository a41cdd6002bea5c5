//! SQLite storage backend
//!
//! One row per value; the primary key on `id` and the UNIQUE constraint on
//! `value` enforce both uniqueness rules inside a single INSERT, so a save
//! either fully succeeds or leaves the table untouched. The connection sits
//! behind a Mutex: every operation is one serialized round trip.

use crate::store::{schema, ValueStore};
use crate::value::{Properties, Value};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

const SELECT_COLUMNS: &str = "id, value, length, is_palindrome, unique_characters, \
     word_count, sha256_hash, character_frequency_map, created_at";

/// SQLite-backed store for persistent deployments.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Count all stored values
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM strings", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a Value
    fn row_to_value(row: &rusqlite::Row) -> rusqlite::Result<Value> {
        let freq_json: String = row.get(7)?;
        let char_frequency = serde_json::from_str(&freq_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let created_str: String = row.get(8)?;
        let created_at = DateTime::parse_from_rfc3339(&created_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    8,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(Value {
            id: row.get(0)?,
            text: row.get(1)?,
            properties: Properties {
                length: row.get::<_, i64>(2)? as usize,
                palindrome: row.get(3)?,
                unique_chars: row.get::<_, i64>(4)? as usize,
                word_count: row.get::<_, i64>(5)? as usize,
                sha256: row.get(6)?,
                char_frequency,
            },
            created_at,
        })
    }
}

impl ValueStore for SqliteStore {
    fn save(&self, value: Value) -> Result<()> {
        let freq_json = serde_json::to_string(&value.properties.char_frequency)?;
        let conn = self.conn.lock().expect("connection lock poisoned");
        let result = conn.execute(
            r#"
            INSERT INTO strings (id, value, length, is_palindrome, unique_characters,
                                 word_count, sha256_hash, character_frequency_map, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                value.id,
                value.text,
                value.properties.length as i64,
                value.properties.palindrome,
                value.properties.unique_chars as i64,
                value.properties.word_count as i64,
                value.properties.sha256,
                freq_json,
                value.created_at.to_rfc3339(),
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(Error::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_by_value(&self, text: &str) -> Result<Option<Value>> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        conn.query_row(
            &format!("SELECT {} FROM strings WHERE value = ?1", SELECT_COLUMNS),
            [text],
            Self::row_to_value,
        )
        .optional()
        .map_err(Into::into)
    }

    fn get_by_hash(&self, id: &str) -> Result<Option<Value>> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        conn.query_row(
            &format!("SELECT {} FROM strings WHERE id = ?1", SELECT_COLUMNS),
            [id],
            Self::row_to_value,
        )
        .optional()
        .map_err(Into::into)
    }

    fn get_all(&self) -> Result<Vec<Value>> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        let mut stmt = conn.prepare(&format!("SELECT {} FROM strings", SELECT_COLUMNS))?;

        let values = stmt
            .query_map([], Self::row_to_value)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(values)
    }

    fn delete_by_value(&self, text: &str) -> Result<()> {
        let conn = self.conn.lock().expect("connection lock poisoned");
        let affected = conn.execute("DELETE FROM strings WHERE value = ?1", [text])?;
        if affected == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;

    #[test]
    fn test_save_and_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let value = analyze("hello world");

        store.save(value.clone()).unwrap();

        let by_value = store.get_by_value("hello world").unwrap().unwrap();
        assert_eq!(by_value.id, value.id);
        assert_eq!(by_value.text, value.text);
        assert_eq!(by_value.properties, value.properties);

        let by_hash = store.get_by_hash(&value.id).unwrap().unwrap();
        assert_eq!(by_hash.text, "hello world");
    }

    #[test]
    fn test_timestamp_survives_the_row_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let value = analyze("stamped");
        let created = value.created_at;

        store.save(value).unwrap();
        let stored = store.get_by_value("stamped").unwrap().unwrap();
        // RFC 3339 keeps full precision, so this is exact
        assert_eq!(stored.created_at, created);
    }

    #[test]
    fn test_duplicate_text_rejected_without_mutation() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save(analyze("dup")).unwrap();

        assert!(matches!(
            store.save(analyze("dup")),
            Err(Error::AlreadyExists)
        ));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_mismatched_entity_with_colliding_id_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = analyze("original");
        store.save(first.clone()).unwrap();

        let mut forged = analyze("different text");
        forged.id = first.id.clone();
        assert!(matches!(store.save(forged), Err(Error::AlreadyExists)));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get_by_value("nope").unwrap().is_none());
        assert!(store.get_by_hash("abc123").unwrap().is_none());
    }

    #[test]
    fn test_delete_then_reinsert() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save(analyze("ephemeral")).unwrap();

        store.delete_by_value("ephemeral").unwrap();
        assert!(store.get_by_value("ephemeral").unwrap().is_none());

        store.save(analyze("ephemeral")).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save(analyze("kept")).unwrap();

        assert!(matches!(
            store.delete_by_value("never inserted"),
            Err(Error::NotFound)
        ));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_get_all_snapshot() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save(analyze("one")).unwrap();
        store.save(analyze("two")).unwrap();
        store.save(analyze("three")).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 3);
        let mut texts: Vec<_> = all.iter().map(|v| v.text.as_str()).collect();
        texts.sort();
        assert_eq!(texts, ["one", "three", "two"]);
    }

    #[test]
    fn test_unicode_frequency_column_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let value = analyze("日本語 日本語");
        store.save(value.clone()).unwrap();

        let stored = store.get_by_value("日本語 日本語").unwrap().unwrap();
        assert_eq!(stored.properties.char_frequency, value.properties.char_frequency);
        assert_eq!(stored.properties.char_frequency["日"], 2);
    }

    #[test]
    fn test_concurrent_saves_of_same_text_admit_one() {
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SqliteStore::open(&dir.path().join("race.db")).unwrap());
        let threads = 8;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.save(analyze("contested")))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(Error::AlreadyExists)))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(conflicts, threads - 1);
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_file_backed_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("textdex.db");

        {
            let store = SqliteStore::open(&db_path).unwrap();
            store.save(analyze("durable")).unwrap();
        }

        let store = SqliteStore::open(&db_path).unwrap();
        let stored = store.get_by_value("durable").unwrap().unwrap();
        assert_eq!(stored.text, "durable");
    }
}
