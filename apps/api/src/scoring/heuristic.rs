//! Keyword-overlap scorer. Pure, deterministic, no I/O. Used both as the
//! fallback for the LLM path and as the floor of the scoring contract.

use async_trait::async_trait;

use crate::scoring::{AtsScorer, ScoreRationale, ScoreResult, ScorerBackend, MIN_SCORE};

pub struct HeuristicScorer;

#[async_trait]
impl AtsScorer for HeuristicScorer {
    async fn score(&self, resume_text: &str, required_skills: &[String]) -> ScoreResult {
        heuristic_score(resume_text, required_skills)
    }
}

/// Case-insensitive substring match of each required skill against the text.
///
/// score = round(100 * matched / total), floored to `MIN_SCORE` when the
/// computation yields 0 (including the degenerate empty-skill-list case).
pub fn heuristic_score(resume_text: &str, required_skills: &[String]) -> ScoreResult {
    let (matched, missing) = match_skills(resume_text, required_skills);

    let score = if required_skills.is_empty() {
        MIN_SCORE
    } else {
        let ratio = matched.len() as f64 / required_skills.len() as f64;
        let rounded = (100.0 * ratio).round() as u8;
        rounded.max(MIN_SCORE)
    };

    let rationale = ScoreRationale {
        skills: Some(format!(
            "Matched {} of {} required skills by keyword overlap.",
            matched.len(),
            required_skills.len()
        )),
        ..Default::default()
    };

    ScoreResult {
        score,
        rationale,
        matched_skills: matched,
        missing_skills: missing,
        backend: ScorerBackend::Heuristic,
    }
}

/// Splits the required skills into (matched, missing) against the text.
/// Shared with the LLM path, which uses it when the model omits its own
/// skill lists.
pub fn match_skills(resume_text: &str, required_skills: &[String]) -> (Vec<String>, Vec<String>) {
    let text_lower = resume_text.to_lowercase();
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for skill in required_skills {
        let skill_lower = skill.to_lowercase();
        if !skill_lower.is_empty() && text_lower.contains(&skill_lower) {
            matched.push(skill.clone());
        } else {
            missing.push(skill.clone());
        }
    }

    (matched, missing)
}
