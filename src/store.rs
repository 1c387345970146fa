//! Bits shared by the persistence backends: the error type every store
//! method returns and the title fold used for duplicate detection.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Folds a title for duplicate comparison: case-insensitive and
/// accent-insensitive, base letters preserved. "Gröceries" and "GROCERIES"
/// both fold to "groceries". The Postgres backend gets the same behavior
/// from `lower(unaccent(..))`; this fold serves the in-memory backend.
pub fn collation_fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
