//! Analysis engine - derives [`Properties`] from raw text
//!
//! Pure functions with no shared state; safe to call from any thread. Every
//! property is computed over Unicode scalar values (chars), not bytes, so
//! multi-byte input yields the same counts a human would.

use crate::value::{Properties, Value};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

/// Analyze a string and build a fully populated [`Value`].
///
/// Deterministic for everything but `created_at`, which is stamped with the
/// current UTC time. Empty input is valid: length 0, word count 0, palindrome
/// true, empty frequency map.
pub fn analyze(text: &str) -> Value {
    let sha256 = sha256_hex(text);
    let properties = Properties {
        length: text.chars().count(),
        palindrome: is_palindrome(text),
        unique_chars: unique_chars(text),
        word_count: word_count(text),
        sha256: sha256.clone(),
        char_frequency: char_frequency(text),
    };
    Value {
        id: sha256,
        text: text.to_string(),
        properties,
        created_at: Utc::now(),
    }
}

/// Lowercase hex SHA-256 digest of the UTF-8 bytes.
pub fn sha256_hex(text: &str) -> String {
    use std::fmt::Write as _;

    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        // Writing into a String cannot fail
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// Case-insensitive, char-wise palindrome check. Empty is a palindrome.
fn is_palindrome(text: &str) -> bool {
    let lowered: Vec<char> = text.to_lowercase().chars().collect();
    let mut i = 0;
    let mut j = lowered.len().saturating_sub(1);
    while i < j {
        if lowered[i] != lowered[j] {
            return false;
        }
        i += 1;
        j -= 1;
    }
    true
}

fn unique_chars(text: &str) -> usize {
    text.chars().collect::<HashSet<_>>().len()
}

/// Tokens delimited by runs of Unicode whitespace. Leading/trailing
/// whitespace produces no empty tokens.
fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn char_frequency(text: &str) -> BTreeMap<String, u64> {
    let mut freq = BTreeMap::new();
    for ch in text.chars() {
        *freq.entry(ch.to_string()).or_insert(0) += 1;
    }
    freq
}
