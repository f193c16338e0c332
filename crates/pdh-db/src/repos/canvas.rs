//! Product vision board and business model canvas repositories.
//!
//! Both are per-project singletons (UNIQUE `project_id`). Canvas sticky items
//! live in `bmc_items`, ordered by block then position.

use pdh_core::entities::{BusinessModelCanvas, CanvasItem, ProductVisionBoard};
use pdh_core::ids::{PREFIX_CANVAS_ITEM, PREFIX_MODEL_CANVAS, PREFIX_VISION_BOARD};
use pdh_core::requests::{CanvasItemCreate, ModelCanvasCreate, VisionBoardCreate};

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now_utc, parse_datetime, parse_enum};
use crate::service::PdhService;
use crate::updates::SetList;
use crate::updates::canvas::{CanvasItemUpdate, ModelCanvasUpdate, VisionBoardUpdate};

const PVB_COLUMNS: &str = "id, project_id, user_id, vision, target_customers, customer_needs, \
     product_features, business_goals, created_at, updated_at";

const BMC_COLUMNS: &str = "id, project_id, user_id, key_partners, key_activities, key_resources, \
     value_propositions, customer_relationships, channels, customer_segments, cost_structure, \
     revenue_streams, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, project_id, user_id, block, content, position, created_at, updated_at";

/// Canvas layout order, left to right and top to bottom.
const BLOCK_ORDER: &str = "CASE block \
     WHEN 'key_partners' THEN 0 WHEN 'key_activities' THEN 1 WHEN 'key_resources' THEN 2 \
     WHEN 'value_propositions' THEN 3 WHEN 'customer_relationships' THEN 4 \
     WHEN 'channels' THEN 5 WHEN 'customer_segments' THEN 6 \
     WHEN 'cost_structure' THEN 7 ELSE 8 END";

fn row_to_vision_board(row: &libsql::Row) -> Result<ProductVisionBoard, DatabaseError> {
    Ok(ProductVisionBoard {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        vision: get_opt_string(row, 3)?,
        target_customers: get_opt_string(row, 4)?,
        customer_needs: get_opt_string(row, 5)?,
        product_features: get_opt_string(row, 6)?,
        business_goals: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

fn row_to_model_canvas(row: &libsql::Row) -> Result<BusinessModelCanvas, DatabaseError> {
    Ok(BusinessModelCanvas {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        key_partners: get_opt_string(row, 3)?,
        key_activities: get_opt_string(row, 4)?,
        key_resources: get_opt_string(row, 5)?,
        value_propositions: get_opt_string(row, 6)?,
        customer_relationships: get_opt_string(row, 7)?,
        channels: get_opt_string(row, 8)?,
        customer_segments: get_opt_string(row, 9)?,
        cost_structure: get_opt_string(row, 10)?,
        revenue_streams: get_opt_string(row, 11)?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
        updated_at: parse_datetime(&row.get::<String>(13)?)?,
    })
}

fn row_to_canvas_item(row: &libsql::Row) -> Result<CanvasItem, DatabaseError> {
    Ok(CanvasItem {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        block: parse_enum(&row.get::<String>(3)?)?,
        content: row.get::<String>(4)?,
        position: row.get::<i64>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl PdhService {
    // -----------------------------------------------------------------------
    // Product vision board
    // -----------------------------------------------------------------------

    /// The project's vision board, if one was created.
    pub async fn find_vision_board(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Option<ProductVisionBoard>, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {PVB_COLUMNS} FROM product_vision_boards
                     WHERE project_id = ?1 AND user_id = ?2"
                ),
                [project_id, user_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_vision_board(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_vision_board(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<ProductVisionBoard, DatabaseError> {
        self.find_vision_board(user_id, project_id)
            .await?
            .ok_or(DatabaseError::NotFound {
                entity: "Product Vision Board",
            })
    }

    pub async fn create_vision_board(
        &self,
        user_id: &str,
        input: &VisionBoardCreate,
    ) -> Result<ProductVisionBoard, DatabaseError> {
        if self
            .find_vision_board(user_id, &input.project_id)
            .await?
            .is_some()
        {
            return Err(DatabaseError::Validation(
                "A Product Vision Board already exists for this project".into(),
            ));
        }
        let now = now_utc();
        let id = self.db().generate_id(PREFIX_VISION_BOARD).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO product_vision_boards (id, project_id, user_id, vision, target_customers,
                     customer_needs, product_features, business_goals, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                libsql::params![
                    id.as_str(),
                    input.project_id.as_str(),
                    user_id,
                    input.vision.as_deref(),
                    input.target_customers.as_deref(),
                    input.customer_needs.as_deref(),
                    input.product_features.as_deref(),
                    input.business_goals.as_deref(),
                    format_timestamp(now)
                ],
            )
            .await?;

        Ok(ProductVisionBoard {
            id,
            project_id: input.project_id.clone(),
            user_id: user_id.to_string(),
            vision: input.vision.clone(),
            target_customers: input.target_customers.clone(),
            customer_needs: input.customer_needs.clone(),
            product_features: input.product_features.clone(),
            business_goals: input.business_goals.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn update_vision_board(
        &self,
        user_id: &str,
        project_id: &str,
        update: &VisionBoardUpdate,
    ) -> Result<ProductVisionBoard, DatabaseError> {
        let current = self.get_vision_board(user_id, project_id).await?;

        let mut sets = SetList::default();
        for (column, value) in update.columns() {
            if let Some(value) = value {
                sets.push(column, value.as_deref());
            }
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("product_vision_boards", &current.id, Some(user_id));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_vision_board(user_id, project_id).await
    }

    // -----------------------------------------------------------------------
    // Business model canvas
    // -----------------------------------------------------------------------

    pub async fn find_model_canvas(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Option<BusinessModelCanvas>, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {BMC_COLUMNS} FROM business_model_canvases
                     WHERE project_id = ?1 AND user_id = ?2"
                ),
                [project_id, user_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_model_canvas(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_model_canvas(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<BusinessModelCanvas, DatabaseError> {
        self.find_model_canvas(user_id, project_id)
            .await?
            .ok_or(DatabaseError::NotFound {
                entity: "Business Model Canvas",
            })
    }

    pub async fn create_model_canvas(
        &self,
        user_id: &str,
        input: &ModelCanvasCreate,
    ) -> Result<BusinessModelCanvas, DatabaseError> {
        if self
            .find_model_canvas(user_id, &input.project_id)
            .await?
            .is_some()
        {
            return Err(DatabaseError::Validation(
                "A Business Model Canvas already exists for this project".into(),
            ));
        }
        let now = format_timestamp(now_utc());
        let id = self.db().generate_id(PREFIX_MODEL_CANVAS).await?;

        let mut params: Vec<libsql::Value> = vec![
            id.as_str().into(),
            input.project_id.as_str().into(),
            user_id.into(),
        ];
        params.extend(input.blocks().into_iter().map(|(_, value)| value.into()));
        params.push(now.into());

        self.db()
            .conn()
            .execute(
                "INSERT INTO business_model_canvases (id, project_id, user_id, key_partners,
                     key_activities, key_resources, value_propositions, customer_relationships,
                     channels, customer_segments, cost_structure, revenue_streams,
                     created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
                libsql::params_from_iter(params),
            )
            .await?;

        self.get_model_canvas(user_id, &input.project_id).await
    }

    pub async fn update_model_canvas(
        &self,
        user_id: &str,
        project_id: &str,
        update: &ModelCanvasUpdate,
    ) -> Result<BusinessModelCanvas, DatabaseError> {
        let current = self.get_model_canvas(user_id, project_id).await?;

        let mut sets = SetList::default();
        for (block, value) in update.columns() {
            if let Some(value) = value {
                sets.push(block.as_str(), value.as_deref());
            }
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("business_model_canvases", &current.id, Some(user_id));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_model_canvas(user_id, project_id).await
    }

    // -----------------------------------------------------------------------
    // Canvas sticky items
    // -----------------------------------------------------------------------

    pub async fn list_canvas_items(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Vec<CanvasItem>, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {ITEM_COLUMNS} FROM bmc_items
                     WHERE project_id = ?1 AND user_id = ?2
                     ORDER BY {BLOCK_ORDER}, position, created_at"
                ),
                [project_id, user_id],
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_canvas_item(&row)?);
        }
        Ok(items)
    }

    /// Add a sticky to a block. Without an explicit position it goes last.
    pub async fn create_canvas_item(
        &self,
        user_id: &str,
        project_id: &str,
        input: &CanvasItemCreate,
    ) -> Result<CanvasItem, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let now = format_timestamp(now_utc());
        let id = self.db().generate_id(PREFIX_CANVAS_ITEM).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO bmc_items (id, project_id, user_id, block, content, position, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5,
                         COALESCE(?6, (SELECT COALESCE(MAX(position) + 1, 0) FROM bmc_items
                                       WHERE project_id = ?2 AND block = ?4)),
                         ?7, ?7)",
                libsql::params![
                    id.as_str(),
                    project_id,
                    user_id,
                    input.block.as_str(),
                    input.content.as_str(),
                    input.position,
                    now
                ],
            )
            .await?;

        self.get_canvas_item(user_id, project_id, &id).await
    }

    pub async fn get_canvas_item(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
    ) -> Result<CanvasItem, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {ITEM_COLUMNS} FROM bmc_items
                     WHERE id = ?1 AND project_id = ?2 AND user_id = ?3"
                ),
                [id, project_id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(DatabaseError::NotFound { entity: "BMC item" })?;
        row_to_canvas_item(&row)
    }

    pub async fn update_canvas_item(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
        update: &CanvasItemUpdate,
    ) -> Result<CanvasItem, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let current = self.get_canvas_item(user_id, project_id, id).await?;

        let mut sets = SetList::default();
        if let Some(block) = update.block {
            sets.push("block", block.as_str());
        }
        if let Some(ref content) = update.content {
            sets.push("content", content.as_str());
        }
        if let Some(position) = update.position {
            sets.push("position", position);
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("bmc_items", id, Some(user_id));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_canvas_item(user_id, project_id, id).await
    }

    pub async fn delete_canvas_item(
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
                "DELETE FROM bmc_items WHERE id = ?1 AND project_id = ?2 AND user_id = ?3",
                [id, project_id, user_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { entity: "BMC item" });
        }
        Ok(())
    }
}
