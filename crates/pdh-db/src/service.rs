//! Service layer owning the database handle.
//!
//! `PdhService` wraps `PdhDb`. All repo methods are implemented as
//! `impl PdhService` blocks in `repos/`, and every one of them takes the
//! caller's `user_id` so reads and writes stay inside the caller's rows.

use crate::PdhDb;
use crate::error::DatabaseError;

/// Owner-scoped data access for every framework.
pub struct PdhService {
    db: PdhDb,
}

impl PdhService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = PdhDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create a service backed by a remote libSQL server.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the remote database cannot be reached.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = PdhDb::open_remote(url, auth_token).await?;
        Ok(Self { db })
    }

    /// Create from an existing `PdhDb` (for testing).
    #[must_use]
    pub const fn from_db(db: PdhDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &PdhDb {
        &self.db
    }
}
