//! ATS scoring — pluggable, trait-based scorer measuring a resume against a
//! job's required skills.
//!
//! Default: `LlmScorer`, which degrades to `HeuristicScorer` on any internal
//! failure. The heuristic is pure Rust, deterministic and fully testable; it
//! doubles as the fallback and as the floor of the scoring contract.
//!
//! `AppState` holds an `Arc<dyn AtsScorer>`, swapped at startup.

pub mod heuristic;
pub mod llm;
pub mod parse;
pub mod prompts;

use async_trait::async_trait;
use serde::Serialize;

pub use heuristic::HeuristicScorer;
pub use llm::LlmScorer;

/// Floor applied whenever a computation would yield 0. Downstream UI treats a
/// hard zero as "not attempted", so the pipeline never emits one.
pub const MIN_SCORE: u8 = 1;

/// Which backend produced a score. Internal-only: degradation is logged,
/// never surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerBackend {
    Llm,
    Heuristic,
}

/// Free-text analysis accompanying a score. Best-effort on the LLM path,
/// synthetic on the heuristic path.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreRationale {
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub extra: Option<String>,
}

/// Result of one scoring call. Ephemeral: only the integer score survives
/// into the persisted application.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub rationale: ScoreRationale,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub backend: ScorerBackend,
}

impl ScoreResult {
    /// The documented minimum for a document with no readable text: every
    /// required skill counts as missing and the score floors at `MIN_SCORE`.
    pub fn no_readable_text(required_skills: &[String]) -> Self {
        ScoreResult {
            score: MIN_SCORE,
            rationale: ScoreRationale {
                skills: Some("No readable text found in the resume.".to_string()),
                ..Default::default()
            },
            matched_skills: Vec::new(),
            missing_skills: required_skills.to_vec(),
            backend: ScorerBackend::Heuristic,
        }
    }
}

/// The scorer contract: always an integer in [0, 100], never an error.
/// Implementations that call out (the LLM path) must degrade internally
/// rather than fail; scoring is a blocking precondition for completing a
/// submission.
#[async_trait]
pub trait AtsScorer: Send + Sync {
    async fn score(&self, resume_text: &str, required_skills: &[String]) -> ScoreResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_readable_text_floors_at_minimum() {
        let skills = vec!["Python".to_string()];
        let result = ScoreResult::no_readable_text(&skills);
        assert_eq!(result.score, MIN_SCORE);
        assert!(result.matched_skills.is_empty());
        assert_eq!(result.missing_skills, skills);
    }

    #[test]
    fn test_backend_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ScorerBackend::Heuristic).unwrap(),
            r#""heuristic""#
        );
        assert_eq!(serde_json::to_string(&ScorerBackend::Llm).unwrap(), r#""llm""#);
    }
}
