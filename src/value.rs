//! Value types - the persisted entity and its derived properties
//!
//! A [`Value`] is one analyzed string. Its `id` is the SHA-256 hex digest of
//! the text and doubles as the primary key; the text itself is unique across
//! the store. Properties are computed once by the analyzer and never
//! recomputed or mutated after insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Properties derived from a string by the analyzer.
///
/// All counts are over Unicode scalar values (chars), never bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// Count of chars in the text
    pub length: usize,
    /// Case-insensitive, char-wise palindrome check
    #[serde(rename = "is_palindrome")]
    pub palindrome: bool,
    /// Count of distinct chars
    #[serde(rename = "unique_characters")]
    pub unique_chars: usize,
    /// Count of whitespace-delimited tokens
    pub word_count: usize,
    /// Lowercase hex SHA-256 of the UTF-8 bytes; same value as `Value::id`
    #[serde(rename = "sha256_hash")]
    pub sha256: String,
    /// Each distinct char (as a string key) to its occurrence count.
    /// Values sum to `length`.
    #[serde(rename = "character_frequency_map")]
    pub char_frequency: BTreeMap<String, u64>,
}

/// One persisted string together with its derived properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    /// Content hash of the text, hex-encoded; primary key
    pub id: String,
    /// The original (trimmed) input string; unique across all entries
    #[serde(rename = "value")]
    pub text: String,
    /// Derived, immutable once computed
    pub properties: Properties,
    /// UTC timestamp assigned when the entity was built
    pub created_at: DateTime<Utc>,
}
