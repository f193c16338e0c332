//! Typed links between framework items, and the generic item lookup.
//!
//! Endpoints are `(ItemType, id)` pairs with no foreign key. The delete
//! triggers on each item table remove dangling links.

use pdh_core::entities::{FrameworkLink, ItemResponse, LinkedItemSnippet};
use pdh_core::enums::ItemType;
use pdh_core::ids::PREFIX_LINK;
use pdh_core::requests::FrameworkLinkCreate;
use pdh_core::scoring::truncate_snippet;

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, item_lookup_sql, item_source, now_utc, parse_enum,
};
use crate::service::PdhService;

fn row_to_item(row: &libsql::Row, item_type: ItemType) -> Result<ItemResponse, DatabaseError> {
    Ok(ItemResponse {
        id: row.get::<String>(0)?,
        item_type,
        content: row.get::<String>(1)?,
        name: get_opt_string(row, 2)?,
        project_id: row.get::<String>(3)?,
    })
}

impl PdhService {
    /// Resolve any linkable item the caller owns.
    ///
    /// # Errors
    ///
    /// `NotFound` labelled with the item kind (e.g. `"Key result"`).
    pub async fn get_item(
        &self,
        user_id: &str,
        item_type: ItemType,
        id: &str,
    ) -> Result<ItemResponse, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&item_lookup_sql(item_type), [id, user_id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: item_source(item_type).label,
        })?;
        row_to_item(&row, item_type)
    }

    async fn require_item_in_project(
        &self,
        user_id: &str,
        project_id: &str,
        item_type: ItemType,
        id: &str,
    ) -> Result<(), DatabaseError> {
        let item = self.get_item(user_id, item_type, id).await?;
        if item.project_id != project_id {
            return Err(DatabaseError::NotFound {
                entity: item_source(item_type).label,
            });
        }
        Ok(())
    }

    pub async fn create_link(
        &self,
        user_id: &str,
        input: &FrameworkLinkCreate,
    ) -> Result<FrameworkLink, DatabaseError> {
        self.require_project(user_id, &input.project_id).await?;
        self.require_item_in_project(
            user_id,
            &input.project_id,
            input.source_item_type,
            &input.source_item_id,
        )
        .await?;
        self.require_item_in_project(
            user_id,
            &input.project_id,
            input.target_item_type,
            &input.target_item_id,
        )
        .await?;

        let now = now_utc();
        let id = self.db().generate_id(PREFIX_LINK).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO framework_links (id, project_id, user_id, source_item_id,
                     source_item_type, target_item_id, target_item_type, link_type, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    id.as_str(),
                    input.project_id.as_str(),
                    user_id,
                    input.source_item_id.as_str(),
                    input.source_item_type.as_str(),
                    input.target_item_id.as_str(),
                    input.target_item_type.as_str(),
                    input.link_type.as_deref(),
                    format_timestamp(now)
                ],
            )
            .await?;
        tracing::debug!(
            link_id = %id,
            source = input.source_item_type.as_str(),
            target = input.target_item_type.as_str(),
            "framework link created"
        );

        Ok(FrameworkLink {
            id,
            project_id: input.project_id.clone(),
            user_id: user_id.to_string(),
            source_item_id: input.source_item_id.clone(),
            source_item_type: input.source_item_type,
            target_item_id: input.target_item_id.clone(),
            target_item_type: input.target_item_type,
            link_type: input.link_type.clone(),
            created_at: now,
        })
    }

    pub async fn delete_link(&self, user_id: &str, id: &str) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM framework_links WHERE id = ?1 AND user_id = ?2",
                [id, user_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { entity: "Link" });
        }
        Ok(())
    }

    /// Items on the other end of every link touching `(item_type, id)`.
    ///
    /// Outgoing links come first, then incoming ones, each in creation order.
    /// Snippet content is truncated for display.
    pub async fn list_linked_items(
        &self,
        user_id: &str,
        item_type: ItemType,
        id: &str,
    ) -> Result<Vec<LinkedItemSnippet>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT other_type, other_id FROM (
                     SELECT target_item_type AS other_type, target_item_id AS other_id,
                            0 AS direction, created_at
                     FROM framework_links
                     WHERE source_item_type = ?1 AND source_item_id = ?2 AND user_id = ?3
                     UNION ALL
                     SELECT source_item_type, source_item_id, 1, created_at
                     FROM framework_links
                     WHERE target_item_type = ?1 AND target_item_id = ?2 AND user_id = ?3
                 ) ORDER BY direction, created_at",
                [item_type.as_str(), id, user_id],
            )
            .await?;

        let mut endpoints = Vec::new();
        while let Some(row) = rows.next().await? {
            let other_type: ItemType = parse_enum(&row.get::<String>(0)?)?;
            endpoints.push((other_type, row.get::<String>(1)?));
        }

        let mut snippets = Vec::with_capacity(endpoints.len());
        for (other_type, other_id) in endpoints {
            match self.get_item(user_id, other_type, &other_id).await {
                Ok(item) => snippets.push(LinkedItemSnippet {
                    id: item.id,
                    item_type: other_type,
                    content: truncate_snippet(&item.content),
                    name: item.name,
                }),
                Err(DatabaseError::NotFound { .. }) => {
                    tracing::warn!(item_type = other_type.as_str(), id = %other_id, "skipping dangling link");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(snippets)
    }
}
