//! Objectives and key results.
//!
//! Key results carry no owner or project column; both are reached through
//! the parent objective.

use std::collections::HashMap;

use pdh_core::entities::{KeyResult, Objective};
use pdh_core::ids::{PREFIX_KEY_RESULT, PREFIX_OBJECTIVE};
use pdh_core::requests::{KeyResultCreate, ObjectiveCreate};
use pdh_core::responses::ObjectiveWithKeyResults;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now_utc, parse_datetime, parse_enum};
use crate::service::PdhService;
use crate::updates::SetList;
use crate::updates::okr::{KeyResultUpdate, ObjectiveUpdate};

const OBJECTIVE_COLUMNS: &str =
    "id, project_id, user_id, title, description, status, created_at, updated_at";

const KEY_RESULT_COLUMNS: &str = "k.id, k.objective_id, k.title, k.description, k.current_value, \
     k.target_value, k.status, k.created_at, k.updated_at";

fn row_to_objective(row: &libsql::Row) -> Result<Objective, DatabaseError> {
    Ok(Objective {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        user_id: row.get::<String>(2)?,
        title: row.get::<String>(3)?,
        description: get_opt_string(row, 4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

fn row_to_key_result(row: &libsql::Row) -> Result<KeyResult, DatabaseError> {
    Ok(KeyResult {
        id: row.get::<String>(0)?,
        objective_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        current_value: row.get::<f64>(4)?,
        target_value: row.get::<f64>(5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl PdhService {
    // -----------------------------------------------------------------------
    // Objectives
    // -----------------------------------------------------------------------

    pub async fn create_objective(
        &self,
        user_id: &str,
        input: &ObjectiveCreate,
    ) -> Result<Objective, DatabaseError> {
        self.require_project(user_id, &input.project_id).await?;
        let now = now_utc();
        let id = self.db().generate_id(PREFIX_OBJECTIVE).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO objectives (id, project_id, user_id, title, description, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                libsql::params![
                    id.as_str(),
                    input.project_id.as_str(),
                    user_id,
                    input.title.as_str(),
                    input.description.as_deref(),
                    input.status.as_str(),
                    format_timestamp(now)
                ],
            )
            .await?;

        Ok(Objective {
            id,
            project_id: input.project_id.clone(),
            user_id: user_id.to_string(),
            title: input.title.clone(),
            description: input.description.clone(),
            status: input.status,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_objective(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
    ) -> Result<Objective, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {OBJECTIVE_COLUMNS} FROM objectives
                     WHERE id = ?1 AND project_id = ?2 AND user_id = ?3"
                ),
                [id, project_id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(DatabaseError::NotFound { entity: "Objective" })?;
        row_to_objective(&row)
    }

    /// Objectives in creation order, each with its key results and progress.
    pub async fn list_okr(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<Vec<ObjectiveWithKeyResults>, DatabaseError> {
        self.require_project(user_id, project_id).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {OBJECTIVE_COLUMNS} FROM objectives
                     WHERE project_id = ?1 AND user_id = ?2
                     ORDER BY created_at, id"
                ),
                [project_id, user_id],
            )
            .await?;
        let mut objectives = Vec::new();
        while let Some(row) = rows.next().await? {
            objectives.push(row_to_objective(&row)?);
        }

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {KEY_RESULT_COLUMNS} FROM key_results k
                     JOIN objectives o ON o.id = k.objective_id
                     WHERE o.project_id = ?1 AND o.user_id = ?2
                     ORDER BY k.created_at, k.id"
                ),
                [project_id, user_id],
            )
            .await?;
        let mut by_objective: HashMap<String, Vec<KeyResult>> = HashMap::new();
        while let Some(row) = rows.next().await? {
            let key_result = row_to_key_result(&row)?;
            by_objective
                .entry(key_result.objective_id.clone())
                .or_default()
                .push(key_result);
        }

        Ok(objectives
            .into_iter()
            .map(|objective| {
                let key_results = by_objective.remove(&objective.id).unwrap_or_default();
                ObjectiveWithKeyResults::new(objective, key_results)
            })
            .collect())
    }

    pub async fn update_objective(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
        update: &ObjectiveUpdate,
    ) -> Result<Objective, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let current = self.get_objective(user_id, project_id, id).await?;

        let mut sets = SetList::default();
        if let Some(ref title) = update.title {
            sets.push("title", title.as_str());
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.as_deref());
        }
        if let Some(status) = update.status {
            sets.push("status", status.as_str());
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("objectives", id, Some(user_id));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_objective(user_id, project_id, id).await
    }

    /// Delete an objective. Its key results go with it.
    pub async fn delete_objective(
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
                "DELETE FROM objectives WHERE id = ?1 AND project_id = ?2 AND user_id = ?3",
                [id, project_id, user_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { entity: "Objective" });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Key results
    // -----------------------------------------------------------------------

    pub async fn create_key_result(
        &self,
        user_id: &str,
        project_id: &str,
        input: &KeyResultCreate,
    ) -> Result<KeyResult, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        self.get_objective(user_id, project_id, &input.objective_id)
            .await?;
        let now = now_utc();
        let id = self.db().generate_id(PREFIX_KEY_RESULT).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO key_results (id, objective_id, title, description, current_value,
                     target_value, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                libsql::params![
                    id.as_str(),
                    input.objective_id.as_str(),
                    input.title.as_str(),
                    input.description.as_deref(),
                    input.current_value,
                    input.target_value,
                    input.status.as_str(),
                    format_timestamp(now)
                ],
            )
            .await?;

        Ok(KeyResult {
            id,
            objective_id: input.objective_id.clone(),
            title: input.title.clone(),
            description: input.description.clone(),
            current_value: input.current_value,
            target_value: input.target_value,
            status: input.status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a key result owned by `user_id`, checking it sits under `project_id`.
    ///
    /// # Errors
    ///
    /// `NotFound { entity: "Key result" }` for an unknown id, and
    /// `OutsideProject` when the parent objective belongs to another project.
    pub async fn get_key_result(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
    ) -> Result<KeyResult, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {KEY_RESULT_COLUMNS}, o.project_id FROM key_results k
                     JOIN objectives o ON o.id = k.objective_id
                     WHERE k.id = ?1 AND o.user_id = ?2"
                ),
                [id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(DatabaseError::NotFound { entity: "Key result" })?;
        if row.get::<String>(9)? != project_id {
            return Err(DatabaseError::OutsideProject(
                "Key result does not belong to this project",
            ));
        }
        row_to_key_result(&row)
    }

    pub async fn update_key_result(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
        update: &KeyResultUpdate,
    ) -> Result<KeyResult, DatabaseError> {
        self.require_project(user_id, project_id).await?;
        let current = self.get_key_result(user_id, project_id, id).await?;

        let mut sets = SetList::default();
        if let Some(ref title) = update.title {
            sets.push("title", title.as_str());
        }
        if let Some(ref description) = update.description {
            sets.push("description", description.as_deref());
        }
        if let Some(current_value) = update.current_value {
            sets.push("current_value", current_value);
        }
        if let Some(target_value) = update.target_value {
            sets.push("target_value", target_value);
        }
        if let Some(status) = update.status {
            sets.push("status", status.as_str());
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let (sql, params) = sets.into_update("key_results", id, None);
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        self.get_key_result(user_id, project_id, id).await
    }

    pub async fn delete_key_result(
        &self,
        user_id: &str,
        project_id: &str,
        id: &str,
    ) -> Result<(), DatabaseError> {
        self.require_project(user_id, project_id).await?;
        self.get_key_result(user_id, project_id, id).await?;
        self.db()
            .conn()
            .execute("DELETE FROM key_results WHERE id = ?1", [id])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pdh_core::enums::OkrStatus;
    use pdh_core::requests::KeyResultCreate;
    use pretty_assertions::assert_eq;

    use crate::error::DatabaseError;
    use crate::service::PdhService;
    use crate::test_support::helpers::{create_test_objective, create_test_project, test_service};
    use crate::updates::okr::{KeyResultUpdateBuilder, ObjectiveUpdate};

    async fn add_key_result(
        svc: &PdhService,
        project_id: &str,
        objective_id: &str,
        current: f64,
        target: f64,
    ) -> String {
        svc.create_key_result(
            "user-a",
            project_id,
            &KeyResultCreate {
                objective_id: objective_id.into(),
                title: "Weekly actives".into(),
                description: None,
                current_value: current,
                target_value: target,
                status: OkrStatus::NotStarted,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn list_nests_key_results_with_progress() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "user-a").await;
        let objective = create_test_objective(&svc, "user-a", &project.id).await;
        add_key_result(&svc, &project.id, &objective.id, 1.0, 3.0).await;
        add_key_result(&svc, &project.id, &objective.id, 50.0, 100.0).await;
        create_test_objective(&svc, "user-a", &project.id).await;

        let okr = svc.list_okr("user-a", &project.id).await.unwrap();
        assert_eq!(okr.len(), 2);
        assert_eq!(okr[0].objective.id, objective.id);
        assert_eq!(okr[0].key_results.len(), 2);
        assert!((okr[0].progress - 41.7).abs() < 1e-9);
        assert!(okr[1].key_results.is_empty());
        assert!(okr[1].progress.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn update_objective_status() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "user-a").await;
        let objective = create_test_objective(&svc, "user-a", &project.id).await;
        let updated = svc
            .update_objective(
                "user-a",
                &project.id,
                &objective.id,
                &ObjectiveUpdate {
                    status: Some(OkrStatus::AtRisk),
                    ..ObjectiveUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, OkrStatus::AtRisk);
        assert_eq!(updated.title, objective.title);
    }

    #[tokio::test]
    async fn deleting_objective_removes_key_results() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "user-a").await;
        let objective = create_test_objective(&svc, "user-a", &project.id).await;
        let kr = add_key_result(&svc, &project.id, &objective.id, 0.0, 10.0).await;

        svc.delete_objective("user-a", &project.id, &objective.id)
            .await
            .unwrap();
        let err = svc
            .get_key_result("user-a", &project.id, &kr)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { entity: "Key result" }));
    }

    #[tokio::test]
    async fn key_result_update_recomputes_progress_on_read() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "user-a").await;
        let objective = create_test_objective(&svc, "user-a", &project.id).await;
        let kr = add_key_result(&svc, &project.id, &objective.id, 0.0, 10.0).await;

        let updated = svc
            .update_key_result(
                "user-a",
                &project.id,
                &kr,
                &KeyResultUpdateBuilder::new()
                    .current_value(5.0)
                    .status(OkrStatus::InProgress)
                    .build(),
            )
            .await
            .unwrap();
        assert!((updated.progress() - 50.0).abs() < f64::EPSILON);
        assert_eq!(updated.status, OkrStatus::InProgress);
    }

    #[tokio::test]
    async fn key_result_from_other_project_is_rejected() {
        let svc = test_service().await;
        let home = create_test_project(&svc, "user-a").await;
        let other = create_test_project(&svc, "user-a").await;
        let objective = create_test_objective(&svc, "user-a", &home.id).await;
        let kr = add_key_result(&svc, &home.id, &objective.id, 0.0, 10.0).await;

        let err = svc
            .delete_key_result("user-a", &other.id, &kr)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Key result does not belong to this project");
    }

    #[tokio::test]
    async fn key_result_needs_objective_in_project() {
        let svc = test_service().await;
        let home = create_test_project(&svc, "user-a").await;
        let other = create_test_project(&svc, "user-a").await;
        let objective = create_test_objective(&svc, "user-a", &home.id).await;

        let err = svc
            .create_key_result(
                "user-a",
                &other.id,
                &KeyResultCreate {
                    objective_id: objective.id.clone(),
                    title: "Stray".into(),
                    description: None,
                    current_value: 0.0,
                    target_value: 1.0,
                    status: OkrStatus::NotStarted,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Objective not found");
    }

    #[tokio::test]
    async fn zero_target_hits_check() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "user-a").await;
        let objective = create_test_objective(&svc, "user-a", &project.id).await;
        let err = svc
            .update_key_result(
                "user-a",
                &project.id,
                &add_key_result(&svc, &project.id, &objective.id, 0.0, 1.0).await,
                &KeyResultUpdateBuilder::new().target_value(0.0).build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Constraint(_)));
    }
}
