//! Deterministic roadmap board suggestions.
//!
//! These fill an empty board column without a model call. The theme rotates
//! with the number of items already on the roadmap so repeated requests on a
//! growing board do not repeat themselves.

use chrono::{Datelike, Utc};
use pdh_core::enums::{Priority, Quarter, RoadmapStatus, Timeframe};
use pdh_core::responses::RoadmapSuggestion;

use crate::error::AiError;

pub const COMMON_THEMES: [&str; 9] = [
    "Implement user authentication",
    "Add analytics dashboard",
    "Create mobile responsive design",
    "Improve search functionality",
    "Add export to PDF feature",
    "Implement dark mode",
    "Create onboarding tutorial",
    "Optimize database queries",
    "Add collaborative editing",
];

const SUGGESTION_COUNT: usize = 3;

/// Which board grouping the request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Timeframe(Timeframe),
    Priority(Priority),
}

impl Column {
    fn parse(category: Option<&str>, view_mode: Option<&str>) -> Result<Self, AiError> {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AiError::invalid("Category is required for roadmap suggestions"))?;
        let parsed = if view_mode == Some("timeframe") {
            category.parse().map(Self::Timeframe)
        } else {
            category.parse().map(Self::Priority)
        };
        parsed.map_err(|e| AiError::invalid(e.to_string()))
    }

    fn describe(self) -> String {
        match self {
            Self::Timeframe(t) => format!("Mock suggestion for {t} timeframe"),
            Self::Priority(p) => format!("Mock suggestion with {p} priority"),
        }
    }

    const fn timeframe(self) -> Timeframe {
        match self {
            Self::Timeframe(t) => t,
            Self::Priority(_) => Timeframe::Next,
        }
    }

    const fn priority(self) -> Priority {
        match self {
            Self::Timeframe(_) => Priority::Medium,
            Self::Priority(p) => p,
        }
    }
}

/// Inputs for [`board_suggestions`].
#[derive(Debug, Clone, Copy)]
pub struct BoardRequest<'a> {
    pub project_id: &'a str,
    pub project_name: &'a str,
    pub user_id: &'a str,
    pub category: Option<&'a str>,
    pub view_mode: Option<&'a str>,
    /// Roadmap items already in the project.
    pub existing_count: usize,
    pub year: i64,
}

pub fn current_year() -> i64 {
    i64::from(Utc::now().year())
}

/// Three draft cards for a board column.
///
/// # Errors
///
/// [`AiError::InvalidRequest`] when the column category is missing or does
/// not belong to the requested view.
pub fn board_suggestions(request: &BoardRequest<'_>) -> Result<Vec<RoadmapSuggestion>, AiError> {
    let column = Column::parse(request.category, request.view_mode)?;
    let suggestions = (0..SUGGESTION_COUNT)
        .map(|i| {
            let theme = COMMON_THEMES[(i + request.existing_count) % COMMON_THEMES.len()];
            let name = if request.project_name.is_empty() {
                theme.to_string()
            } else {
                format!("{theme} for {}", request.project_name)
            };
            RoadmapSuggestion {
                id: format!("temp_{i}"),
                project_id: request.project_id.to_string(),
                user_id: request.user_id.to_string(),
                content: name.clone(),
                name,
                description: column.describe(),
                timeframe: column.timeframe(),
                priority: column.priority(),
                quarter: Quarter::Q1,
                year: request.year,
                status: RoadmapStatus::Planned,
            }
        })
        .collect();
    Ok(suggestions)
}

/// Used for `roadmap` prompts when the model call fails.
pub fn fallback_lines(category: &str, project_name: &str) -> Vec<String> {
    vec![
        format!("Implement core {category} features for {project_name}"),
        format!("Research {category} market trends for {project_name}"),
        format!("Create {category} prototypes for {project_name}"),
    ]
}
