//! Roadmap repository.
//!
//! Items are ordered by year, quarter, then position. New items go to the end
//! of their quarter unless the caller pins a position.

use chrono::NaiveDate;
use pdh_core::entities::RoadmapItem;
use pdh_core::ids::PREFIX_ROADMAP_ITEM;
use pdh_core::requests::RoadmapItemCreate;

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, now_utc, parse_datetime, parse_enum, parse_optional_date,
};
use crate::service::PdhService;
use crate::updates::SetList;
use crate::updates::roadmap::RoadmapItemUpdate;

const ROADMAP_COLUMNS: &str = "id, project_id, user_id, name, description, quarter, year, status, \
     start_date, end_date, priority, timeframe, position, created_at, updated_at";

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

fn row_to_roadmap_item(row: &libsql::Row) -> Result<RoadmapItem, DatabaseError> {
    let name = row.get::<String>(3)?;
    Ok(RoadmapItem {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        content: name.clone(),
        name,
        description: get_opt_string(row, 4)?,
        quarter: parse_enum(&row.get::<String>(5)?)?,
        year: row.get::<i64>(6)?,
        status: parse_enum(&row.get::<String>(7)?)?,
        start_date: parse_optional_date(get_opt_string(row, 8)?.as_deref())?,
        end_date: parse_optional_date(get_opt_string(row, 9)?.as_deref())?,
        priority: parse_enum(&row.get::<String>(10)?)?,
        timeframe: parse_enum(&row.get::<String>(11)?)?,
        position: row.get::<i64>(12)?,
        created_at: parse_datetime(&row.get::<String>(13)?)?,
        updated_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

impl PdhService {
    pub async fn list_roadmap_items(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Vec<RoadmapItem>, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {ROADMAP_COLUMNS} FROM roadmap_items
                     WHERE project_id = ?1 AND user_id = ?2
                     ORDER BY year, quarter, position, created_at"
                ),
                [project_id, user_id],
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_roadmap_item(&row)?);
        }
        Ok(items)
    }

    /// Number of roadmap items in a project. Seeds the mock suggestion rotation.
    pub async fn count_roadmap_items(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM roadmap_items WHERE project_id = ?1 AND user_id = ?2",
                [project_id, user_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    pub async fn create_roadmap_item(
        &self,
        user_id: &str,
        input: &RoadmapItemCreate,
    ) -> Result<RoadmapItem, DatabaseError> {
        self.require_project(user_id, &input.project_id).await?;
        let now = format_timestamp(now_utc());
        let id = self.db().generate_id(PREFIX_ROADMAP_ITEM).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO roadmap_items (id, project_id, user_id, name, description, quarter,
                     year, status, start_date, end_date, priority, timeframe, position,
                     created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                         COALESCE(?13, (SELECT COALESCE(MAX(position) + 1, 0) FROM roadmap_items
                                        WHERE project_id = ?2 AND year = ?7 AND quarter = ?6)),
                         ?14, ?14)",
                libsql::params![
                    id.as_str(),
                    input.project_id.as_str(),
                    user_id,
                    input.resolved_name(),
                    input.description.as_deref(),
                    input.quarter.as_str(),
                    input.year,
                    input.status.as_str(),
                    format_date(input.start_date),
                    format_date(input.end_date),
                    input.priority.as_str(),
                    input.timeframe.as_str(),
                    input.position,
                    now
                ],
            )
            .await?;
        tracing::debug!(roadmap_item_id = %id, quarter = input.quarter.as_str(), "roadmap item created");

        self.get_roadmap_item(user_id, &input.project_id, &id).await
    }

    pub async fn get_roadmap_item(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
    ) -> Result<RoadmapItem, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {ROADMAP_COLUMNS} FROM roadmap_items
                     WHERE id = ?1 AND project_id = ?2 AND user_id = ?3"
                ),
                [id, project_id, user_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: "Roadmap item",
        })?;
        row_to_roadmap_item(&row)
    }

    pub async fn update_roadmap_item(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
        update: &RoadmapItemUpdate,
    ) -> Result<RoadmapItem, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let current = self.get_roadmap_item(user_id, project_id, id).await?;

        let mut sets = SetList::default();
        if let Some(name) = update.resolved_name() {
            sets.push("name", name);
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.as_deref());
        }
        if let Some(quarter) = update.quarter {
            sets.push("quarter", quarter.as_str());
        }
        if let Some(year) = update.year {
            sets.push("year", year);
        }
        if let Some(status) = update.status {
            sets.push("status", status.as_str());
        }
        if let Some(start_date) = update.start_date {
            sets.push("start_date", format_date(start_date));
        }
        if let Some(end_date) = update.end_date {
            sets.push("end_date", format_date(end_date));
        }
        if let Some(priority) = update.priority {
            sets.push("priority", priority.as_str());
        }
        if let Some(timeframe) = update.timeframe {
            sets.push("timeframe", timeframe.as_str());
        }
        if let Some(position) = update.position {
            sets.push("position", position);
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("roadmap_items", id, Some(user_id));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_roadmap_item(user_id, project_id, id).await
    }

    pub async fn delete_roadmap_item(
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
                "DELETE FROM roadmap_items WHERE id = ?1 AND project_id = ?2 AND user_id = ?3",
                [id, project_id, user_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "Roadmap item",
            });
        }
        Ok(())
    }
}
