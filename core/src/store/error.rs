use std::fmt;

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum StoreError {
    /// The database file could not be opened or its directory is missing.
    Unavailable(String),
    /// An update or delete targeted an id with no matching row.
    RecordNotFound(i64),
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => {
                write!(f, "store unavailable: {}", msg)
            }
            StoreError::RecordNotFound(id) => {
                write!(f, "no agent with id {}", id)
            }
            StoreError::Sqlite(e) => write!(f, "database error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Sqlite(e)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_id() {
        let msg = StoreError::RecordNotFound(42).to_string();
        assert!(msg.contains("42"));
    }

    #[test]
    fn unavailable_carries_reason() {
        let msg = StoreError::Unavailable("disk full".into()).to_string();
        assert!(msg.contains("disk full"));
    }
}
