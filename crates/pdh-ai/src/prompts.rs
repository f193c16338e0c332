//! Prompt text for each framework.
//!
//! Every list prompt ends with [`ONE_PER_LINE`] so the reply can be split
//! on newlines by [`crate::parse::suggestion_lines`].

use std::fmt::Write as _;

use pdh_core::enums::{BmcBlock, CsdCategory, PersonaDetailCategory, Priority, PvbSection};

const ONE_PER_LINE: &str =
    "Return ONLY the suggestions, one per line, with no numbering, headers, or other text.";

/// Accumulates the header block and body paragraphs of a prompt.
struct Prompt {
    text: String,
}

impl Prompt {
    fn new(role: &str) -> Self {
        Self {
            text: format!("{role}\n\n"),
        }
    }

    fn field(mut self, name: &str, value: &str) -> Self {
        let _ = writeln!(self.text, "{name}: {value}");
        self
    }

    fn context(self, context: Option<&str>) -> Self {
        match context.map(str::trim).filter(|c| !c.is_empty()) {
            Some(context) => self.field("Context", context),
            None => self,
        }
    }

    fn existing(mut self, heading: &str, items: &[String]) -> Self {
        if items.is_empty() {
            return self;
        }
        let _ = writeln!(self.text, "{heading}:");
        for item in items {
            let _ = writeln!(self.text, "- {item}");
        }
        self
    }

    fn paragraph(mut self, body: &str) -> Self {
        let _ = write!(self.text, "\n{body}\n");
        self
    }

    fn finish(self) -> String {
        self.text
    }
}

/// Human name for a vision board section. Unknown keys are title-cased.
pub fn vision_section_name(section: &str) -> String {
    match section.parse::<PvbSection>() {
        Ok(PvbSection::Vision) => "Vision Statement".to_string(),
        Ok(PvbSection::CustomerNeeds) => "Customer Needs/Problems".to_string(),
        Ok(other) => other.label().to_string(),
        Err(_) => title_case(section),
    }
}

/// Human name for a canvas block. Unknown keys are title-cased.
pub fn canvas_block_name(block: &str) -> String {
    block
        .parse::<BmcBlock>()
        .map_or_else(|_| title_case(block), |b| b.label().to_string())
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn csd(
    project_name: &str,
    category: CsdCategory,
    context: Option<&str>,
    existing: &[String],
) -> String {
    Prompt::new(
        "You are a product discovery expert helping a team with their \
         Certainty-Supposition-Doubt (CSD) Matrix.",
    )
    .field("Project", project_name)
    .field("Category", category.as_str())
    .context(context)
    .existing("Existing items in this category", existing)
    .paragraph(&format!(
        "Suggest 3-5 concise, clear, and insightful items for the {category} category \
         of the CSD Matrix, based on the project name and any context provided."
    ))
    .paragraph(
        "Certainties = what we know for sure\n\
         Suppositions = what we believe but are not certain about\n\
         Doubts = what we are unsure about and need to investigate",
    )
    .paragraph(ONE_PER_LINE)
    .finish()
}

pub fn vision_board(project_name: &str, section: &str, context: Option<&str>) -> String {
    let section = vision_section_name(section);
    Prompt::new("You are a product strategy expert helping a team with their Product Vision Board.")
        .field("Project", project_name)
        .field("Section", &section)
        .context(context)
        .paragraph(&format!(
            "Provide 3-5 concise, clear, and strategic suggestions for the {section} section \
             of the Product Vision Board, based on the project name and any context provided."
        ))
        .paragraph(ONE_PER_LINE)
        .finish()
}

pub fn model_canvas(project_name: &str, block: &str, context: Option<&str>) -> String {
    let block = canvas_block_name(block);
    Prompt::new("You are a business model expert helping a team with their Business Model Canvas.")
        .field("Project", project_name)
        .field("Section", &block)
        .context(context)
        .paragraph(&format!(
            "Provide 3-5 concise, clear, and insightful suggestions for the {block} section \
             of the Business Model Canvas, based on the project name and any context provided."
        ))
        .paragraph(ONE_PER_LINE)
        .finish()
}

pub fn persona(project_name: &str, category: PersonaDetailCategory, context: Option<&str>) -> String {
    let plural = format!("{}s", category.as_str().to_lowercase());
    Prompt::new(
        "You are a UX researcher and user persona expert helping a team define detailed user personas.",
    )
    .field("Project", project_name)
    .field(
        "Category",
        &format!("{} ({})", category.as_str(), category.describe()),
    )
    .context(context)
    .paragraph(&format!(
        "Suggest 4-6 concise, specific, and realistic {plural} for a user persona of this \
         project. They should fit the kind of user who would interact with a product like \
         {project_name}."
    ))
    .paragraph(ONE_PER_LINE)
    .finish()
}

pub fn objectives(project_name: &str, context: Option<&str>, existing: &[String]) -> String {
    Prompt::new("You are an OKR expert helping a team define clear Objectives for their project.")
        .field("Project", project_name)
        .context(context)
        .existing("Existing objectives", existing)
        .paragraph(
            "Provide 3-5 concise, clear, and inspiring Objective statements that follow OKR \
             best practices. Good Objectives are:\n\
             - qualitative, inspirational, and action-oriented\n\
             - time-bound (typically quarterly or annually)\n\
             - challenging yet achievable",
        )
        .paragraph(
            "Return ONLY the objective statements, one per line, with no numbering, headers, \
             or other text.",
        )
        .finish()
}

pub fn key_results(project_name: &str, objective: &str, context: Option<&str>) -> String {
    Prompt::new(
        "You are an OKR expert helping a team define measurable Key Results for their Objective.",
    )
    .field("Project", project_name)
    .field("Objective", objective)
    .context(context)
    .paragraph(
        "Provide 3-5 concise, clear, and measurable Key Result statements for this objective. \
         Good Key Results are:\n\
         - quantitative, with concrete numbers\n\
         - clear on what is being measured and how\n\
         - outcome-focused rather than a list of tasks\n\
         - time-bound (typically quarterly or annually)",
    )
    .paragraph(
        "Return ONLY the key result statements, one per line, with no numbering, headers, \
         or other text.",
    )
    .finish()
}

pub fn roadmap(
    project_name: &str,
    category: &str,
    context: Option<&str>,
    existing: &[String],
) -> String {
    let kind = if category.to_lowercase().parse::<Priority>().is_ok() {
        "priority"
    } else {
        "timeframe"
    };
    Prompt::new("You are a product roadmap expert helping a team plan their product roadmap.")
        .field("Project", project_name)
        .field("Category", &format!("{category} ({kind})"))
        .context(context)
        .existing("Existing roadmap items", existing)
        .paragraph(&format!(
            "Suggest 3-5 concise, clear, and realistic roadmap items for the {category} {kind} \
             category. Make each one specific and actionable."
        ))
        .paragraph(
            "Timeframes: 'now' is the current sprint or month, 'next' is 1-3 months out, \
             'later' is 3+ months out.\n\
             Priorities: 'high' must be done first, 'medium' is important but not critical, \
             'low' is nice to have.",
        )
        .paragraph(ONE_PER_LINE)
        .finish()
}

pub fn rice(project_name: &str, context: Option<&str>, existing: &[String]) -> String {
    Prompt::new(
        "You are a product prioritization expert helping a team with their RICE prioritization matrix.",
    )
    .field("Project", project_name)
    .context(context)
    .existing("Existing features in this project", existing)
    .paragraph(
        "Suggest 4-5 features or initiatives this project could consider. For each one give:\n\
         1. a clear, concise name (max 8 words)\n\
         2. a brief description (1-2 sentences)\n\
         3. RICE scores: reach_score, impact_score and confidence_score from 0 to 10, \
         effort_score from 1 to 10 (higher means more work)",
    )
    .paragraph(
        "Format the response as a JSON array:\n\
         [\n  {\"name\": \"Feature name\", \"description\": \"Feature description\", \
         \"reach_score\": 8, \"impact_score\": 7, \"confidence_score\": 6, \"effort_score\": 5}\n]",
    )
    .finish()
}
