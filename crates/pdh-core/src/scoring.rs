//! Derived scores: RICE priority, key result progress, objective progress,
//! and snippet truncation for linked items.

use crate::entities::KeyResult;

/// Maximum characters of item content shown in a link snippet.
pub const SNIPPET_MAX_CHARS: usize = 100;

/// `reach * impact * confidence / effort`, with effort floored at 1.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rice_score(reach: i64, impact: i64, confidence: i64, effort: i64) -> f64 {
    let numerator = reach as f64 * impact as f64 * confidence as f64;
    numerator / effort.max(1) as f64
}

/// Percentage of `target` reached by `current`, capped at 100.
///
/// A non-positive target yields 0. The schema forbids it, but rows built in
/// memory are not checked.
#[must_use]
pub fn key_result_progress(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (current / target * 100.0).min(100.0)
}

/// Mean key result progress rounded to one decimal place, 0 when empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn objective_progress(key_results: &[KeyResult]) -> f64 {
    if key_results.is_empty() {
        return 0.0;
    }
    let total: f64 = key_results.iter().map(KeyResult::progress).sum();
    round_one_decimal(total / key_results.len() as f64)
}

#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Truncate snippet text to [`SNIPPET_MAX_CHARS`], ending with `...` when cut.
#[must_use]
pub fn truncate_snippet(content: &str) -> String {
    if content.chars().count() <= SNIPPET_MAX_CHARS {
        return content.to_string();
    }
    let head: String = content.chars().take(SNIPPET_MAX_CHARS - 3).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use crate::enums::OkrStatus;

    fn kr(current: f64, target: f64) -> KeyResult {
        KeyResult {
            id: "krs-1".into(),
            objective_id: "obj-1".into(),
            title: "Signups".into(),
            description: None,
            current_value: current,
            target_value: target,
            status: OkrStatus::InProgress,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn rice_score_divides_by_effort() {
        assert!((rice_score(8, 5, 10, 4) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rice_score_floors_effort_at_one() {
        assert!((rice_score(2, 3, 4, 0) - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rice_score_handles_extreme_inputs() {
        let score = rice_score(i64::MAX, i64::MAX, 10, 1);
        assert!(score.is_finite());
        assert!(score > 1e38);
    }

    #[test]
    fn key_result_progress_is_capped() {
        assert!((key_result_progress(150.0, 100.0) - 100.0).abs() < f64::EPSILON);
        assert!((key_result_progress(25.0, 100.0) - 25.0).abs() < f64::EPSILON);
        assert!(key_result_progress(5.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn objective_progress_averages_and_rounds() {
        let krs = vec![kr(1.0, 3.0), kr(50.0, 100.0)];
        // (33.333.. + 50) / 2 = 41.666.. -> 41.7
        assert!((objective_progress(&krs) - 41.7).abs() < 1e-9);
        assert!(objective_progress(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn short_snippets_are_untouched() {
        assert_eq!(truncate_snippet("short"), "short");
    }

    #[test]
    fn long_snippets_are_cut_to_one_hundred_chars() {
        let long = "x".repeat(150);
        let snippet = truncate_snippet(&long);
        assert_eq!(snippet.chars().count(), 100);
        assert!(snippet.ends_with("..."));
    }
}
