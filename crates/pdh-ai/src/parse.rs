//! Turning model replies into suggestion lists.

use pdh_core::requests::{EFFORT_MIN, SCORE_MAX, SCORE_MIN};
use pdh_core::responses::RiceSuggestion;
use pdh_core::scoring::rice_score;
use serde::Deserialize;

pub const UNPARSED_RICE_NAME: &str = "Feature suggestion (JSON parsing failed)";
pub const UNPARSED_RICE_DESCRIPTION: &str =
    "The AI generated text that couldn't be parsed. Please try again.";

/// One suggestion per non-empty line, with bullets and numbering removed.
pub fn suggestion_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`suggestion_lines`], but drops section headers such as `Goals:`.
pub fn persona_lines(text: &str) -> Vec<String> {
    suggestion_lines(text)
        .into_iter()
        .filter(|line| !line.ends_with(':'))
        .collect()
}

fn clean_line(line: &str) -> &str {
    let mut line = line.trim();
    while let Some(rest) = line.strip_prefix(['-', '*', '•']) {
        if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
            break;
        }
        line = rest.trim_start();
    }
    strip_numbering(line)
}

/// `1. Foo`, `12) Foo` and `3.Foo` become `Foo`. `3D printing` and
/// `3.5x faster` are left alone.
fn strip_numbering(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix(['.', ')']) {
        Some(rest) if !rest.starts_with(|c: char| c.is_ascii_digit()) => rest.trim_start(),
        _ => line,
    }
}

#[derive(Debug, Deserialize)]
struct RawRiceIdea {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    reach_score: f64,
    #[serde(default)]
    impact_score: f64,
    #[serde(default)]
    confidence_score: f64,
    #[serde(default)]
    effort_score: f64,
}

/// The JSON payload of a reply: a ```json fence, a bare fence, or the
/// outermost array.
fn json_payload(text: &str) -> &str {
    if let Some((_, rest)) = text.split_once("```json") {
        return rest.split("```").next().unwrap_or(rest).trim();
    }
    if let Some((_, rest)) = text.split_once("```") {
        return rest.split("```").next().unwrap_or(rest).trim();
    }
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text.trim(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn clamp_score(value: f64, min: i64) -> i64 {
    if !value.is_finite() {
        return min;
    }
    (value.round() as i64).clamp(min, SCORE_MAX)
}

fn suggestion(index: usize, name: String, description: Option<String>, scores: [i64; 4]) -> RiceSuggestion {
    let [reach, impact, confidence, effort] = scores;
    RiceSuggestion {
        id: format!("temp_{index}"),
        name,
        description,
        reach_score: reach,
        impact_score: impact,
        confidence_score: confidence,
        effort_score: effort,
        rice_score: rice_score(reach, impact, confidence, effort),
    }
}

/// Placeholder returned when the reply holds no usable JSON.
pub fn unparsed_rice_placeholder() -> RiceSuggestion {
    suggestion(
        0,
        UNPARSED_RICE_NAME.to_string(),
        Some(UNPARSED_RICE_DESCRIPTION.to_string()),
        [5; 4],
    )
}

/// Parse RICE feature ideas. Scores are clamped to their column ranges and
/// the RICE score is derived, never taken from the model.
pub fn rice_suggestions(text: &str) -> Vec<RiceSuggestion> {
    let ideas = match serde_json::from_str::<Vec<RawRiceIdea>>(json_payload(text)) {
        Ok(ideas) if !ideas.is_empty() => ideas,
        Ok(_) => {
            tracing::warn!("AI returned an empty RICE list");
            return vec![unparsed_rice_placeholder()];
        }
        Err(error) => {
            tracing::warn!(%error, "could not parse RICE suggestions");
            return vec![unparsed_rice_placeholder()];
        }
    };

    ideas
        .into_iter()
        .filter(|idea| !idea.name.trim().is_empty())
        .enumerate()
        .map(|(i, idea)| {
            suggestion(
                i,
                idea.name.trim().to_string(),
                idea.description.filter(|d| !d.trim().is_empty()),
                [
                    clamp_score(idea.reach_score, SCORE_MIN),
                    clamp_score(idea.impact_score, SCORE_MIN),
                    clamp_score(idea.confidence_score, SCORE_MIN),
                    clamp_score(idea.effort_score, EFFORT_MIN),
                ],
            )
        })
        .collect()
}
