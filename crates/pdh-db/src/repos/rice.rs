//! RICE prioritisation repository.
//!
//! `rice_score` is stored, not computed on read, so the list can be ordered
//! by it. Every write that touches a score recomputes it.

use pdh_core::entities::RiceItem;
use pdh_core::ids::PREFIX_RICE_ITEM;
use pdh_core::requests::RiceItemCreate;
use pdh_core::scoring::rice_score;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now_utc, parse_datetime};
use crate::service::PdhService;
use crate::updates::SetList;
use crate::updates::rice::RiceItemUpdate;

const RICE_COLUMNS: &str = "id, project_id, user_id, name, description, reach_score, \
     impact_score, confidence_score, effort_score, rice_score, created_at, updated_at";

fn row_to_rice_item(row: &libsql::Row) -> Result<RiceItem, DatabaseError> {
    Ok(RiceItem {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
        description: get_opt_string(row, 4)?,
        reach_score: row.get::<i64>(5)?,
        impact_score: row.get::<i64>(6)?,
        confidence_score: row.get::<i64>(7)?,
        effort_score: row.get::<i64>(8)?,
        rice_score: row.get::<f64>(9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

impl PdhService {
    /// RICE items for a project, highest score first.
    pub async fn list_rice_items(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Vec<RiceItem>, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {RICE_COLUMNS} FROM rice_items
                     WHERE project_id = ?1 AND user_id = ?2
                     ORDER BY rice_score DESC, created_at"
                ),
                [project_id, user_id],
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_rice_item(&row)?);
        }
        Ok(items)
    }

    pub async fn create_rice_item(
        &self,
        user_id: &str,
        input: &RiceItemCreate,
    ) -> Result<RiceItem, DatabaseError> {
        self.require_project(user_id, &input.project_id).await?;
        let now = now_utc();
        let id = self.db().generate_id(PREFIX_RICE_ITEM).await?;
        let score = rice_score(
            input.reach_score,
            input.impact_score,
            input.confidence_score,
            input.effort_score,
        );

        self.db()
            .conn()
            .execute(
                "INSERT INTO rice_items (id, project_id, user_id, name, description, reach_score,
                     impact_score, confidence_score, effort_score, rice_score, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
                libsql::params![
                    id.as_str(),
                    input.project_id.as_str(),
                    user_id,
                    input.name.as_str(),
                    input.description.as_deref(),
                    input.reach_score,
                    input.impact_score,
                    input.confidence_score,
                    input.effort_score,
                    score,
                    format_timestamp(now)
                ],
            )
            .await?;
        tracing::debug!(rice_item_id = %id, score, "rice item created");

        Ok(RiceItem {
            id,
            project_id: input.project_id.clone(),
            user_id: user_id.to_string(),
            name: input.name.clone(),
            description: input.description.clone(),
            reach_score: input.reach_score,
            impact_score: input.impact_score,
            confidence_score: input.confidence_score,
            effort_score: input.effort_score,
            rice_score: score,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_rice_item(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
    ) -> Result<RiceItem, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {RICE_COLUMNS} FROM rice_items
                     WHERE id = ?1 AND project_id = ?2 AND user_id = ?3"
                ),
                [id, project_id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(DatabaseError::NotFound { entity: "RICE item" })?;
        row_to_rice_item(&row)
    }

    /// Apply a partial update. Score changes are merged with the stored
    /// values before `rice_score` is recomputed.
    pub async fn update_rice_item(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
        update: &RiceItemUpdate,
    ) -> Result<RiceItem, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let current = self.get_rice_item(user_id, project_id, id).await?;

        let mut sets = SetList::default();
        if let Some(ref name) = update.name {
            sets.push("name", name.as_str());
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.as_deref());
        }
        if update.touches_score() {
            let reach = update.reach_score.unwrap_or(current.reach_score);
            let impact = update.impact_score.unwrap_or(current.impact_score);
            let confidence = update.confidence_score.unwrap_or(current.confidence_score);
            let effort = update.effort_score.unwrap_or(current.effort_score);
            sets.push("reach_score", reach);
            sets.push("impact_score", impact);
            sets.push("confidence_score", confidence);
            sets.push("effort_score", effort);
            sets.push("rice_score", rice_score(reach, impact, confidence, effort));
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("rice_items", id, Some(user_id));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_rice_item(user_id, project_id, id).await
    }

    pub async fn delete_rice_item(
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
                "DELETE FROM rice_items WHERE id = ?1 AND project_id = ?2 AND user_id = ?3",
                [id, project_id, user_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { entity: "RICE item" });
        }
        Ok(())
    }
}
