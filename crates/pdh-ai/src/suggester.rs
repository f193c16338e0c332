//! Prompt-type dispatch for `POST /api/ai/suggest`.

use std::sync::Arc;

use pdh_core::enums::{CsdCategory, PersonaDetailCategory, PromptType};
use pdh_core::requests::AiPromptRequest;
use pdh_core::responses::{AiSuggestion, RiceSuggestion};

use crate::client::{CompletionBackend, CompletionRequest};
use crate::error::AiError;
use crate::{parse, prompts, roadmap};

const KEY_RESULT_PREFIX: &str = "keyresult:";

/// What a validated suggestion request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionTarget {
    Csd(CsdCategory),
    VisionBoard(String),
    ModelCanvas(String),
    Rice,
    Roadmap(String),
    Objectives,
    KeyResults { objective: String },
    Persona(PersonaDetailCategory),
}

fn required(value: Option<&str>, message: &str) -> Result<String, AiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AiError::invalid(message))
}

impl SuggestionTarget {
    /// Check that the request carries the input its prompt type needs.
    ///
    /// # Errors
    ///
    /// [`AiError::InvalidRequest`] with the message the API returns as 400.
    pub fn from_request(request: &AiPromptRequest) -> Result<Self, AiError> {
        let query = request.specific_query.as_deref();
        match request.prompt_type {
            PromptType::Csd => request
                .category
                .map(Self::Csd)
                .ok_or_else(|| AiError::invalid("Category is required for CSD suggestions")),
            PromptType::Pvb => {
                required(query, "Section name is required for PVB suggestions").map(Self::VisionBoard)
            }
            PromptType::Bmc => {
                required(query, "Section name is required for BMC suggestions").map(Self::ModelCanvas)
            }
            PromptType::Rice => Ok(Self::Rice),
            PromptType::Roadmap => {
                required(query, "Category is required for roadmap suggestions").map(Self::Roadmap)
            }
            PromptType::Okr => Self::okr(query),
            PromptType::Persona => request
                .persona_category
                .map(Self::Persona)
                .ok_or_else(|| AiError::invalid("Category is required for persona suggestions")),
        }
    }

    fn okr(query: Option<&str>) -> Result<Self, AiError> {
        let query = query.map(str::trim).unwrap_or_default();
        if query == "objective" {
            return Ok(Self::Objectives);
        }
        match query.strip_prefix(KEY_RESULT_PREFIX) {
            Some(objective) if objective.trim().is_empty() => Err(AiError::invalid(
                "Objective text is required for key result suggestions",
            )),
            Some(objective) => Ok(Self::KeyResults {
                objective: objective.trim().to_string(),
            }),
            None => Err(AiError::invalid("Invalid specific_query for OKR prompt")),
        }
    }
}

/// Project facts fed into a prompt.
#[derive(Debug, Clone, Default)]
pub struct PromptContext<'a> {
    pub project_name: &'a str,
    pub context: Option<&'a str>,
    /// Existing items relevant to the target, e.g. CSD texts in the same
    /// category or roadmap item names.
    pub existing: Vec<String>,
}

/// Builds prompts, calls the completion backend, and parses replies.
#[derive(Clone)]
pub struct Suggester {
    backend: Arc<dyn CompletionBackend>,
}

impl std::fmt::Debug for Suggester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suggester").finish_non_exhaustive()
    }
}

impl Suggester {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    async fn lines(&self, prompt: String) -> Result<Vec<String>, AiError> {
        let reply = self.backend.complete(&CompletionRequest::new(prompt)).await?;
        Ok(parse::suggestion_lines(&reply))
    }

    /// # Errors
    ///
    /// Any backend failure, except for roadmap targets which fall back to
    /// templated suggestions.
    pub async fn suggest(
        &self,
        target: &SuggestionTarget,
        ctx: &PromptContext<'_>,
    ) -> Result<AiSuggestion, AiError> {
        let project = ctx.project_name;
        let (suggestions, reasoning) = match target {
            SuggestionTarget::Csd(category) => (
                self.lines(prompts::csd(project, *category, ctx.context, &ctx.existing))
                    .await?,
                "Generated based on project context and existing CSD items.".to_string(),
            ),
            SuggestionTarget::VisionBoard(section) => (
                self.lines(prompts::vision_board(project, section, ctx.context))
                    .await?,
                format!("Generated based on project context for the {section} section."),
            ),
            SuggestionTarget::ModelCanvas(block) => (
                self.lines(prompts::model_canvas(project, block, ctx.context))
                    .await?,
                format!("Generated based on project context for the {block} section."),
            ),
            SuggestionTarget::Rice => (
                self.rice_ideas(ctx)
                    .await?
                    .into_iter()
                    .map(|idea| idea.name)
                    .collect(),
                "Generated feature ideas based on project context and existing RICE items."
                    .to_string(),
            ),
            SuggestionTarget::Roadmap(category) => return Ok(self.roadmap(category, ctx).await),
            SuggestionTarget::Objectives => (
                self.lines(prompts::objectives(project, ctx.context, &ctx.existing))
                    .await?,
                "Generated objective suggestions based on project context.".to_string(),
            ),
            SuggestionTarget::KeyResults { objective } => (
                self.lines(prompts::key_results(project, objective, ctx.context))
                    .await?,
                "Generated key result suggestions based on the objective.".to_string(),
            ),
            SuggestionTarget::Persona(category) => {
                let reply = self
                    .backend
                    .complete(&CompletionRequest::new(prompts::persona(
                        project,
                        *category,
                        ctx.context,
                    )))
                    .await?;
                (
                    parse::persona_lines(&reply),
                    format!(
                        "Generated {} suggestions for user persona in {project}.",
                        category.as_str().to_lowercase()
                    ),
                )
            }
        };
        Ok(AiSuggestion {
            suggestions,
            reasoning: Some(reasoning),
        })
    }

    async fn roadmap(&self, category: &str, ctx: &PromptContext<'_>) -> AiSuggestion {
        let prompt = prompts::roadmap(ctx.project_name, category, ctx.context, &ctx.existing);
        match self.lines(prompt).await {
            Ok(suggestions) => AiSuggestion {
                suggestions,
                reasoning: Some(format!(
                    "Generated roadmap suggestions for {category} based on project context."
                )),
            },
            Err(error) => {
                tracing::error!(%error, "roadmap suggestion failed, using fallback");
                AiSuggestion {
                    suggestions: roadmap::fallback_lines(category, ctx.project_name),
                    reasoning: Some(
                        "Generated using fallback mechanism due to AI service error.".to_string(),
                    ),
                }
            }
        }
    }

    /// Feature ideas with scores for the RICE matrix.
    ///
    /// # Errors
    ///
    /// Backend failures. An unparseable reply is not an error; it yields a
    /// single placeholder idea.
    pub async fn rice_ideas(&self, ctx: &PromptContext<'_>) -> Result<Vec<RiceSuggestion>, AiError> {
        let prompt = prompts::rice(ctx.project_name, ctx.context, &ctx.existing);
        let reply = self.backend.complete(&CompletionRequest::rice(prompt)).await?;
        Ok(parse::rice_suggestions(&reply))
    }
}
