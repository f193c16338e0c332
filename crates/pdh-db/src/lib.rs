//! # pdh-db
//!
//! libSQL storage for Product Discovery Hub.
//!
//! Holds every framework table: projects, CSD items, personas and their
//! details, vision boards, model canvases and their sticky items, RICE items,
//! roadmap items, objectives, key results, and framework links. Ownership,
//! uniqueness, enum membership, ranges, and cascades are declared in
//! `migrations/001_initial.sql`. Repos add owner scoping (`user_id`) to every
//! query so one user never reads or writes another user's rows.
//!
//! Uses the `libsql` crate (local file, `:memory:`, or a remote libSQL server).

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod test_support;
pub mod updates;

pub use migrations::REQUIRED_TABLES;
pub use service::PdhService;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and one connection shared by every request, so
/// no repository opens a transaction on it.
pub struct PdhDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl PdhDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::from_database(db).await
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        Self::from_database(db).await
    }

    async fn from_database(db: libsql::Database) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let pdh_db = Self {
            db,
            conn,
        };
        pdh_db.run_migrations().await?;
        Ok(pdh_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"csd-a3f8b2c1d4e5f607"`.
    ///
    /// Uses `randomblob(8)` in SQL to produce 16-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(8)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Helper to create an in-memory database for testing.
    async fn test_db() -> PdhDb {
        PdhDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        assert!(db.missing_tables().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_keys_enabled() {
        let db = test_db().await;
        let mut rows = db.conn().query("PRAGMA foreign_keys", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        assert!(db.missing_tables().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn generate_id_format() {
        let db = test_db().await;
        let id = db.generate_id("csd").await.unwrap();
        assert!(id.starts_with("csd-"));
        assert_eq!(id.len(), 20); // "csd-" + 16 hex chars
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_unique() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..200 {
            assert!(ids.insert(db.generate_id("prj").await.unwrap()));
        }
    }

    #[tokio::test]
    async fn file_backed_database_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdh.db");
        let path = path.to_str().unwrap();

        {
            let db = PdhDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO projects (id, user_id, name) VALUES ('prj-1', 'u1', 'Kept')",
                    (),
                )
                .await
                .unwrap();
        }

        let db = PdhDb::open_local(path).await.unwrap();
        let mut rows = db
            .conn()
            .query("SELECT name FROM projects WHERE id = 'prj-1'", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "Kept");
    }
}
