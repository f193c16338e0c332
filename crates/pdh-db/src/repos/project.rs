//! Project repository. Every other repo checks ownership through here.

use pdh_core::entities::Project;
use pdh_core::ids::PREFIX_PROJECT;
use pdh_core::requests::ProjectCreate;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now_utc, parse_datetime};
use crate::service::PdhService;
use crate::updates::SetList;
use crate::updates::project::ProjectUpdate;

const PROJECT_COLUMNS: &str = "id, user_id, name, description, created_at, updated_at";

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get::<String>(0)?,
        user_id: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl PdhService {
    pub async fn create_project(
        &self,
        user_id: &str,
        input: &ProjectCreate,
    ) -> Result<Project, DatabaseError> {
        let now = now_utc();
        let id = self.db().generate_id(PREFIX_PROJECT).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO projects (id, user_id, name, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    user_id,
                    input.name.as_str(),
                    input.description.as_deref(),
                    format_timestamp(now),
                    format_timestamp(now)
                ],
            )
            .await?;
        Ok(Project {
            id,
            user_id: user_id.to_string(),
            name: input.name.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Projects owned by `user_id`, most recently updated first.
    pub async fn list_projects(&self, user_id: &str) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects
                     WHERE user_id = ?1 ORDER BY updated_at DESC, created_at DESC"
                ),
                [user_id],
            )
            .await?;

        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Fetch a project the caller owns.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound { entity: "Project" }` when the id is unknown
    /// or belongs to another user.
    pub async fn get_project(&self, user_id: &str, id: &str) -> Result<Project, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1 AND user_id = ?2"),
                [id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(DatabaseError::NotFound { entity: "Project" })?;
        row_to_project(&row)
    }

    /// Ownership gate used before every child read or write.
    pub async fn require_project(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Project, DatabaseError> {
        self.get_project(user_id, project_id).await
    }

    pub async fn update_project(
        &self,
        user_id: &str,
        id: &str,
        update: &ProjectUpdate,
    ) -> Result<Project, DatabaseError> {
        let mut sets = SetList::default();
        if let Some(ref name) = update.name {
            sets.push("name", name.as_str());
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.as_deref());
        }

        if sets.is_empty() {
            return self.get_project(user_id, id).await;
        }

        let (sql, params) = sets.into_update("projects", id, Some(user_id));
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { entity: "Project" });
        }
        self.get_project(user_id, id).await
    }

    /// Delete a project. The schema cascades to every framework row.
    pub async fn delete_project(&self, user_id: &str, id: &str) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM projects WHERE id = ?1 AND user_id = ?2",
                [id, user_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { entity: "Project" });
        }
        Ok(())
    }
}
