//! Data handed to the report template.
//!
//! A snapshot is assembled by `pdh-db` in one pass and rendered by
//! `pdh-report`. Only the frameworks named in the request are populated.

use serde::Serialize;

use crate::entities::{BusinessModelCanvas, CsdItem, ProductVisionBoard, Project, RiceItem, RoadmapItem};
use crate::enums::{BmcBlock, CsdCategory, PvbSection, ReportFramework};
use crate::responses::ObjectiveWithKeyResults;

/// Timestamp format printed on the cover page.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// CSD items split by category, each in board order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CsdGroups {
    pub certainty: Vec<CsdItem>,
    pub supposition: Vec<CsdItem>,
    pub doubt: Vec<CsdItem>,
}

impl CsdGroups {
    pub fn push(&mut self, item: CsdItem) {
        match item.category {
            CsdCategory::Certainty => self.certainty.push(item),
            CsdCategory::Supposition => self.supposition.push(item),
            CsdCategory::Doubt => self.doubt.push(item),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.certainty.len() + self.supposition.len() + self.doubt.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A labelled text section, used for both canvases so the template can loop.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportSection {
    pub key: &'static str,
    pub label: &'static str,
    pub content: Option<String>,
}

impl ReportSection {
    #[must_use]
    pub fn vision_board(board: &ProductVisionBoard) -> Vec<Self> {
        PvbSection::ALL
            .into_iter()
            .map(|section| Self {
                key: section.as_str(),
                label: section.label(),
                content: board.section(section).map(str::to_string),
            })
            .collect()
    }

    #[must_use]
    pub fn model_canvas(canvas: &BusinessModelCanvas) -> Vec<Self> {
        BmcBlock::ALL
            .into_iter()
            .map(|block| Self {
                key: block.as_str(),
                label: block.label(),
                content: canvas.block(block).map(str::to_string),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportSnapshot {
    pub project: Project,
    pub frameworks: Vec<ReportFramework>,
    pub include_cover_page: bool,
    pub include_toc: bool,
    pub csd: Option<CsdGroups>,
    pub pvb: Option<Vec<ReportSection>>,
    pub bmc: Option<Vec<ReportSection>>,
    pub rice: Option<Vec<RiceItem>>,
    pub roadmap: Option<Vec<RoadmapItem>>,
    pub okr: Option<Vec<ObjectiveWithKeyResults>>,
    pub generated_at: String,
}

impl ReportSnapshot {
    /// File name offered to the browser, without extension. Control
    /// characters become `_` so the name is a valid header value.
    #[must_use]
    pub fn file_stem(&self) -> String {
        let name: String = self
            .project
            .name
            .chars()
            .map(|c| if c.is_control() { '_' } else { c })
            .collect();
        format!("{name}_Report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn csd(category: CsdCategory, text: &str) -> CsdItem {
        CsdItem {
            id: format!("csd-{text}"),
            project_id: "prj-1".into(),
            user_id: "u1".into(),
            category,
            text: text.into(),
            position: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn csd_groups_route_by_category() {
        let mut groups = CsdGroups::default();
        groups.push(csd(CsdCategory::Doubt, "churn"));
        groups.push(csd(CsdCategory::Certainty, "growth"));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.doubt[0].text, "churn");
        assert!(groups.supposition.is_empty());

        let json = serde_json::to_value(&groups).unwrap();
        assert!(json.get("Certainty").is_some());
    }

    #[test]
    fn file_stem_replaces_control_characters() {
        let snapshot = ReportSnapshot {
            project: Project {
                id: "prj-1".into(),
                user_id: "u1".into(),
                name: "Q3\nPlan\t\u{7f}Café".into(),
                description: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            frameworks: vec![ReportFramework::Csd],
            include_cover_page: true,
            include_toc: true,
            csd: None,
            pvb: None,
            bmc: None,
            rice: None,
            roadmap: None,
            okr: None,
            generated_at: "2026-10-18".into(),
        };
        assert_eq!(snapshot.file_stem(), "Q3_Plan__Café_Report");
    }

    #[test]
    fn vision_board_sections_keep_canvas_order() {
        let board = ProductVisionBoard {
            id: "pvb-1".into(),
            project_id: "prj-1".into(),
            user_id: "u1".into(),
            vision: Some("Zero paperwork".into()),
            target_customers: None,
            customer_needs: None,
            product_features: None,
            business_goals: Some("Profit".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let sections = ReportSection::vision_board(&board);
        assert_eq!(sections.len(), 5);
        assert_eq!(sections[0].key, "vision");
        assert_eq!(sections[0].content.as_deref(), Some("Zero paperwork"));
        assert_eq!(sections[4].content.as_deref(), Some("Profit"));
    }
}
