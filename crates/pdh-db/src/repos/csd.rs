//! CSD matrix repository: sticky notes per category plus drag-and-drop reorder.

use pdh_core::entities::CsdItem;
use pdh_core::enums::CsdCategory;
use pdh_core::ids::PREFIX_CSD_ITEM;
use pdh_core::requests::{CsdItemCreate, CsdReorder};

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, now_utc, parse_datetime, parse_enum};
use crate::service::PdhService;
use crate::updates::{SetList, reorder_statement};
use crate::updates::csd::CsdItemUpdate;

const CSD_COLUMNS: &str = "id, project_id, user_id, category, text, position, created_at, updated_at";

/// Matrix column order: Certainty, Supposition, Doubt.
const CATEGORY_ORDER: &str =
    "CASE category WHEN 'Certainty' THEN 0 WHEN 'Supposition' THEN 1 ELSE 2 END";

fn row_to_csd_item(row: &libsql::Row) -> Result<CsdItem, DatabaseError> {
    Ok(CsdItem {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        category: parse_enum(&row.get::<String>(3)?)?,
        text: row.get::<String>(4)?,
        position: row.get::<i64>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl PdhService {
    pub async fn list_csd_items(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Vec<CsdItem>, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {CSD_COLUMNS} FROM csd_items
                     WHERE project_id = ?1 AND user_id = ?2
                     ORDER BY {CATEGORY_ORDER}, position, created_at"
                ),
                [project_id, user_id],
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_csd_item(&row)?);
        }
        Ok(items)
    }

    /// Create a CSD item at the end of its category column.
    pub async fn create_csd_item(
        &self,
        user_id: &str,
        input: &CsdItemCreate,
    ) -> Result<CsdItem, DatabaseError> {
        self.require_project(user_id, &input.project_id).await?;
        let now = format_timestamp(now_utc());
        let id = self.db().generate_id(PREFIX_CSD_ITEM).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO csd_items (id, project_id, user_id, category, text, position, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5,
                         (SELECT COALESCE(MAX(position) + 1, 0) FROM csd_items
                          WHERE project_id = ?2 AND category = ?4),
                         ?6, ?6)",
                libsql::params![
                    id.as_str(),
                    input.project_id.as_str(),
                    user_id,
                    input.category.as_str(),
                    input.text.as_str(),
                    now
                ],
            )
            .await?;

        self.get_csd_item(user_id, &input.project_id, &id).await
    }

    pub async fn get_csd_item(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
    ) -> Result<CsdItem, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {CSD_COLUMNS} FROM csd_items
                     WHERE id = ?1 AND project_id = ?2 AND user_id = ?3"
                ),
                [id, project_id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(DatabaseError::NotFound { entity: "CSD item" })?;
        row_to_csd_item(&row)
    }

    pub async fn update_csd_item(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
        update: &CsdItemUpdate,
    ) -> Result<CsdItem, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        // Existence first, so an item from another project is a 404 rather than a no-op.
        let current = self.get_csd_item(user_id, project_id, id).await?;

        let mut sets = SetList::default();
        if let Some(category) = update.category {
            sets.push("category", category.as_str());
        }
        if let Some(ref text) = update.text {
            sets.push("text", text.as_str());
        }
        if let Some(position) = update.position {
            sets.push("position", position);
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("csd_items", id, Some(user_id));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_csd_item(user_id, project_id, id).await
    }

    pub async fn delete_csd_item(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
    ) -> Result<(), DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let changed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM csd_items WHERE id = ?1 AND project_id = ?2 AND user_id = ?3",
                [id, project_id, user_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { entity: "CSD item" });
        }
        Ok(())
    }

    /// Rewrite positions (and optionally the category) to match `item_ids`.
    ///
    /// All ids must belong to the project. Positions are written in one statement.
    pub async fn reorder_csd_items(
        &self,
        user_id: &str,
        project_id: &str,
        request: &CsdReorder,
    ) -> Result<Vec<CsdItem>, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        if request.item_ids.is_empty() {
            return Err(DatabaseError::Validation("No items to reorder".into()));
        }
        for id in &request.item_ids {
            match self.get_csd_item(user_id, project_id, id).await {
                Ok(_) => {}
                Err(DatabaseError::NotFound { .. }) => {
                    return Err(DatabaseError::Validation(
                        "One or more items not found or not owned by user".into(),
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        let (sql, params) = reorder_statement(
            "csd_items",
            "position",
            request.new_category.map(CsdCategory::as_str),
            &request.item_ids,
            user_id,
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        tracing::debug!(project_id, count = request.item_ids.len(), "csd items reordered");

        let mut items = Vec::with_capacity(request.item_ids.len());
        for id in &request.item_ids {
            items.push(self.get_csd_item(user_id, project_id, id).await?);
        }
        Ok(items)
    }
}
