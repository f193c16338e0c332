//! Persona repository, including the goal/need/pain point/motivation details
//! shown on each persona card.

use pdh_core::entities::{ItemResponse, Persona, PersonaDetail};
use pdh_core::enums::{ItemType, PersonaDetailCategory};
use pdh_core::ids::{PREFIX_PERSONA, PREFIX_PERSONA_DETAIL};
use pdh_core::requests::{PersonaCreate, PersonaDetailCreate, PersonaDetailReorder};

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now_utc, parse_datetime, parse_enum};
use crate::service::PdhService;
use crate::updates::{SetList, reorder_statement};
use crate::updates::persona::{PersonaDetailUpdate, PersonaUpdate};

const PERSONA_COLUMNS: &str =
    "id, project_id, user_id, name, photo_url, quote, demographics, bio, created_at, updated_at";

const DETAIL_COLUMNS: &str =
    "id, persona_id, user_id, category, content, order_index, created_at, updated_at";

const DETAIL_CATEGORY_ORDER: &str = "CASE category WHEN 'Goal' THEN 0 WHEN 'Need' THEN 1 \
     WHEN 'Pain Point' THEN 2 ELSE 3 END";

fn row_to_persona(row: &libsql::Row) -> Result<Persona, DatabaseError> {
    Ok(Persona {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
        photo_url: get_opt_string(row, 4)?,
        quote: get_opt_string(row, 5)?,
        demographics: get_opt_string(row, 6)?,
        bio: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

fn row_to_detail(row: &libsql::Row) -> Result<PersonaDetail, DatabaseError> {
    Ok(PersonaDetail {
        id: row.get::<String>(0)?,
        persona_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        category: parse_enum(&row.get::<String>(3)?)?,
        content: row.get::<String>(4)?,
        order_index: row.get::<i64>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl PdhService {
    // -----------------------------------------------------------------------
    // Personas
    // -----------------------------------------------------------------------

    pub async fn list_personas(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Vec<Persona>, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {PERSONA_COLUMNS} FROM personas
                     WHERE project_id = ?1 AND user_id = ?2 ORDER BY created_at"
                ),
                [project_id, user_id],
            )
            .await?;

        let mut personas = Vec::new();
        while let Some(row) = rows.next().await? {
            personas.push(row_to_persona(&row)?);
        }
        Ok(personas)
    }

    pub async fn create_persona(
        &self,
        user_id: &str,
        input: &PersonaCreate,
    ) -> Result<Persona, DatabaseError> {
        self.require_project(user_id, &input.project_id).await?;
        let now = now_utc();
        let id = self.db().generate_id(PREFIX_PERSONA).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO personas (id, project_id, user_id, name, photo_url, quote, demographics, bio, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                libsql::params![
                    id.as_str(),
                    input.project_id.as_str(),
                    user_id,
                    input.name.as_str(),
                    input.photo_url.as_deref(),
                    input.quote.as_deref(),
                    input.demographics.as_deref(),
                    input.bio.as_deref(),
                    format_timestamp(now)
                ],
            )
            .await?;

        Ok(Persona {
            id,
            project_id: input.project_id.clone(),
            user_id: user_id.to_string(),
            name: input.name.clone(),
            photo_url: input.photo_url.clone(),
            quote: input.quote.clone(),
            demographics: input.demographics.clone(),
            bio: input.bio.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_persona(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
    ) -> Result<Persona, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {PERSONA_COLUMNS} FROM personas
                     WHERE id = ?1 AND project_id = ?2 AND user_id = ?3"
                ),
                [id, project_id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(DatabaseError::NotFound { entity: "Persona" })?;
        row_to_persona(&row)
    }

    /// Fetch a persona by id alone, still scoped to its owner.
    pub async fn require_persona(
        &self,
        user_id: &str,
        persona_id: &str,
    ) -> Result<Persona, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {PERSONA_COLUMNS} FROM personas WHERE id = ?1 AND user_id = ?2"),
                [persona_id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(DatabaseError::NotFound { entity: "Persona" })?;
        row_to_persona(&row)
    }

    pub async fn update_persona(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
        update: &PersonaUpdate,
    ) -> Result<Persona, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let current = self.get_persona(user_id, project_id, id).await?;

        let mut sets = SetList::default();
        if let Some(ref name) = update.name {
            sets.push("name", name.as_str());
        }
        for (column, value) in [
            ("photo_url", &update.photo_url),
            ("quote", &update.quote),
            ("demographics", &update.demographics),
            ("bio", &update.bio),
        ] {
            if let Some(value) = value {
                sets.push(column, value.as_deref());
            }
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("personas", id, Some(user_id));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_persona(user_id, project_id, id).await
    }

    /// Delete a persona. Its details go with it through the schema cascade.
    pub async fn delete_persona(
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
                "DELETE FROM personas WHERE id = ?1 AND project_id = ?2 AND user_id = ?3",
                [id, project_id, user_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { entity: "Persona" });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Persona details
    // -----------------------------------------------------------------------

    pub async fn list_persona_details(
        &self,
        user_id: &str,
        persona_id: &str,
    ) -> Result<Vec<PersonaDetail>, DatabaseError> {
        self.require_persona(user_id, persona_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {DETAIL_COLUMNS} FROM persona_details
                     WHERE persona_id = ?1 AND user_id = ?2
                     ORDER BY {DETAIL_CATEGORY_ORDER}, order_index, created_at"
                ),
                [persona_id, user_id],
            )
            .await?;

        let mut details = Vec::new();
        while let Some(row) = rows.next().await? {
            details.push(row_to_detail(&row)?);
        }
        Ok(details)
    }

    /// Append a detail after the last one in its (persona, category) list.
    pub async fn create_persona_detail(
        &self,
        user_id: &str,
        input: &PersonaDetailCreate,
    ) -> Result<PersonaDetail, DatabaseError> {
        self.require_persona(user_id, &input.persona_id).await?;
        let now = format_timestamp(now_utc());
        let id = self.db().generate_id(PREFIX_PERSONA_DETAIL).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO persona_details (id, persona_id, user_id, category, content, order_index, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5,
                         (SELECT COALESCE(MAX(order_index) + 1, 0) FROM persona_details
                          WHERE persona_id = ?2 AND category = ?4),
                         ?6, ?6)",
                libsql::params![
                    id.as_str(),
                    input.persona_id.as_str(),
                    user_id,
                    input.category.as_str(),
                    input.content.as_str(),
                    now
                ],
            )
            .await?;

        self.get_persona_detail(user_id, &input.persona_id, &id).await
    }

    pub async fn get_persona_detail(
        &self,
        user_id: &str,
        persona_id: &str,
        id: &str,
    ) -> Result<PersonaDetail, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {DETAIL_COLUMNS} FROM persona_details
                     WHERE id = ?1 AND persona_id = ?2 AND user_id = ?3"
                ),
                [id, persona_id, user_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: "Persona detail",
        })?;
        row_to_detail(&row)
    }

    pub async fn update_persona_detail(
        &self,
        user_id: &str,
        persona_id: &str,
        id: &str,
        update: &PersonaDetailUpdate,
    ) -> Result<PersonaDetail, DatabaseError> {
        self.require_persona(user_id, persona_id).await?;
        let current = self.get_persona_detail(user_id, persona_id, id).await?;

        let mut sets = SetList::default();
        if let Some(category) = update.category {
            sets.push("category", category.as_str());
        }
        if let Some(ref content) = update.content {
            sets.push("content", content.as_str());
        }
        if let Some(order_index) = update.order_index {
            sets.push("order_index", order_index);
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("persona_details", id, Some(user_id));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_persona_detail(user_id, persona_id, id).await
    }

    pub async fn delete_persona_detail(
        &self,
        user_id: &str,
        persona_id: &str,
        id: &str,
    ) -> Result<(), DatabaseError> {
        self.require_persona(user_id, persona_id).await?;
        let changed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM persona_details WHERE id = ?1 AND persona_id = ?2 AND user_id = ?3",
                [id, persona_id, user_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "Persona detail",
            });
        }
        Ok(())
    }

    /// Set `order_index` to each id's position in `item_ids`.
    pub async fn reorder_persona_details(
        &self,
        user_id: &str,
        persona_id: &str,
        request: &PersonaDetailReorder,
    ) -> Result<Vec<PersonaDetail>, DatabaseError> {
        self.require_persona(user_id, persona_id).await?;
        for id in &request.item_ids {
            self.get_persona_detail(user_id, persona_id, id).await?;
        }

        let (sql, params) = reorder_statement(
            "persona_details",
            "order_index",
            request.new_category.map(PersonaDetailCategory::as_str),
            &request.item_ids,
            user_id,
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        let mut details = Vec::with_capacity(request.item_ids.len());
        for id in &request.item_ids {
            details.push(self.get_persona_detail(user_id, persona_id, id).await?);
        }
        Ok(details)
    }

    /// Every persona detail in a project, as uniform item views.
    pub async fn list_project_persona_details(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Vec<ItemResponse>, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT d.id, d.content FROM persona_details d
                 JOIN personas p ON p.id = d.persona_id
                 WHERE p.project_id = ?1 AND d.user_id = ?2
                 ORDER BY p.created_at, d.order_index",
                [project_id, user_id],
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(ItemResponse {
                id: row.get::<String>(0)?,
                item_type: ItemType::PersonaDetail,
                content: row.get::<String>(1)?,
                name: None,
                project_id: project_id.to_string(),
            });
        }
        Ok(items)
    }
}
