//! Database schema definitions

/// SQL to create the strings table.
///
/// `id` is the SHA-256 content hash and primary key; the UNIQUE constraint
/// on `value` gives the second index. Property columns are flattened onto
/// the row, with the frequency map as a JSON text column.
pub const CREATE_STRINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS strings (
    id TEXT PRIMARY KEY,
    value TEXT NOT NULL UNIQUE,
    length INTEGER NOT NULL,
    is_palindrome INTEGER NOT NULL,
    unique_characters INTEGER NOT NULL,
    word_count INTEGER NOT NULL,
    sha256_hash TEXT NOT NULL,
    character_frequency_map TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] =
    &["CREATE INDEX IF NOT EXISTS idx_strings_value ON strings(value)"];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_STRINGS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
