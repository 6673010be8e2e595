//! SQLite database - connection management
//!
//! The tables are owned by the content-management side; this process only
//! reads them. One `Database` is opened per invocation and closed on drop.
//!
//! All read operations are in the tables/ subdirectory.

use rusqlite::{Connection, OpenFlags, Result as SqliteResult};
use std::sync::Mutex;

/// A single read-only connection, scoped to one invocation
pub struct Database {
    pub(crate) conn: Mutex<Connection>,
    path: String,
}

impl Database {
    /// Open a read-only connection. A missing database file is an error.
    pub fn open(database_url: &str) -> SqliteResult<Self> {
        let path = strip_scheme(database_url).to_string();

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::debug!("Opened database connection to {}", path);

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        log::debug!("Closing database connection to {}", self.path);
    }
}

/// Accept both plain paths and `sqlite://` style connection strings
fn strip_scheme(database_url: &str) -> &str {
    database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_scheme() {
        assert_eq!(strip_scheme("sqlite:///var/db/media.db"), "/var/db/media.db");
        assert_eq!(strip_scheme("sqlite:media.db"), "media.db");
        assert_eq!(strip_scheme("./.db/mediahub.db"), "./.db/mediahub.db");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        assert!(Database::open(path.to_str().unwrap()).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_connection_is_read_only() {
        let fixture = crate::db::fixtures::Fixture::new();
        let db = Database::open(&fixture.database_url()).unwrap();
        let result = db.conn.lock().unwrap().execute(
            "INSERT INTO users (id, name, created_at) VALUES (99, 'x', '2024-01-01T00:00:00Z')",
            [],
        );
        assert!(result.is_err());
    }
}
