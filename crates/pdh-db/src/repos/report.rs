//! Report snapshot assembly.

use pdh_core::enums::ReportFramework;
use pdh_core::report::{CsdGroups, GENERATED_AT_FORMAT, ReportSection, ReportSnapshot};
use pdh_core::requests::ReportRequest;

use crate::error::DatabaseError;
use crate::helpers::now_utc;
use crate::service::PdhService;

impl PdhService {
    /// Fetch everything a report needs for the selected frameworks.
    ///
    /// A missing vision board or canvas leaves that section `None`; the
    /// template prints a placeholder instead.
    pub async fn report_snapshot(
        &self,
        user_id: &str,
        project_id: &str,
        request: &ReportRequest,
    ) -> Result<ReportSnapshot, DatabaseError> {
        let project = self.require_project(user_id, project_id).await?;

        let csd = if request.includes(ReportFramework::Csd) {
            let mut groups = CsdGroups::default();
            for item in self.list_csd_items(user_id, project_id).await? {
                groups.push(item);
            }
            Some(groups)
        } else {
            None
        };

        let pvb = if request.includes(ReportFramework::Pvb) {
            self.find_vision_board(user_id, project_id)
                .await?
                .map(|board| ReportSection::vision_board(&board))
        } else {
            None
        };

        let bmc = if request.includes(ReportFramework::Bmc) {
            self.find_model_canvas(user_id, project_id)
                .await?
                .map(|canvas| ReportSection::model_canvas(&canvas))
        } else {
            None
        };

        let rice = if request.includes(ReportFramework::Rice) {
            Some(self.list_rice_items(user_id, project_id).await?)
        } else {
            None
        };

        let roadmap = if request.includes(ReportFramework::Roadmap) {
            Some(self.list_roadmap_items(user_id, project_id).await?)
        } else {
            None
        };

        let okr = if request.includes(ReportFramework::Okr) {
            Some(self.list_okr(user_id, project_id).await?)
        } else {
            None
        };

        tracing::debug!(
            project_id,
            frameworks = request.frameworks.len(),
            "report snapshot assembled"
        );

        Ok(ReportSnapshot {
            project,
            frameworks: request.frameworks.clone(),
            include_cover_page: request.include_cover_page,
            include_toc: request.include_toc,
            csd,
            pvb,
            bmc,
            rice,
            roadmap,
            okr,
            generated_at: now_utc().format(GENERATED_AT_FORMAT).to_string(),
        })
    }
}
