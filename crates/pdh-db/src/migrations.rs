//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::PdhDb;
use crate::error::DatabaseError;

/// Initial schema: 12 tables, 11 indexes, 17 triggers.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

/// Tables the service cannot run without.
pub const REQUIRED_TABLES: [&str; 12] = [
    "projects",
    "csd_items",
    "personas",
    "persona_details",
    "product_vision_boards",
    "business_model_canvases",
    "bmc_items",
    "rice_items",
    "roadmap_items",
    "objectives",
    "key_results",
    "framework_links",
];

impl PdhDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }

    /// Return the required tables that are absent from the database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if `sqlite_master` cannot be queried.
    pub async fn missing_tables(&self) -> Result<Vec<&'static str>, DatabaseError> {
        let mut missing = Vec::new();
        for table in REQUIRED_TABLES {
            let mut rows = self
                .conn
                .query(
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                )
                .await?;
            if rows.next().await?.is_none() {
                missing.push(table);
            }
        }
        Ok(missing)
    }
}
