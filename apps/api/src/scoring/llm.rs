//! LLM-backed scorer. Never fails outward: any transport error, timeout,
//! empty response or unparsable score degrades to the heuristic result for
//! the same inputs. The degradation is logged and otherwise invisible; the
//! caller always receives a bounded integer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::llm_client::TextModel;
use crate::scoring::heuristic::{heuristic_score, match_skills};
use crate::scoring::parse::{parse_score, parse_section, parse_skill_list};
use crate::scoring::{prompts, AtsScorer, ScoreRationale, ScoreResult, ScorerBackend};

pub struct LlmScorer {
    model: Arc<dyn TextModel>,
}

impl LlmScorer {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    fn degrade(&self, reason: &str, resume_text: &str, required_skills: &[String]) -> ScoreResult {
        warn!(reason, "ATS scoring degraded to heuristic");
        heuristic_score(resume_text, required_skills)
    }
}

#[async_trait]
impl AtsScorer for LlmScorer {
    async fn score(&self, resume_text: &str, required_skills: &[String]) -> ScoreResult {
        let prompt = prompts::build_ats_prompt(resume_text, required_skills);

        let raw = match self.model.generate(prompts::ATS_SYSTEM, &prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => return self.degrade("model returned empty text", resume_text, required_skills),
            Err(e) => return self.degrade(&e.to_string(), resume_text, required_skills),
        };

        let Some(score) = parse_score(&raw) else {
            return self.degrade("no parsable Score token in model output", resume_text, required_skills);
        };

        debug!(score, "LLM ATS score parsed");

        let rationale = ScoreRationale {
            skills: parse_section(&raw, "Skills Analysis:"),
            experience: parse_section(&raw, "Experience Analysis:"),
            education: parse_section(&raw, "Education Analysis:"),
            extra: parse_section(&raw, "Additional Factors:"),
        };

        // Skill lists are best-effort; fall back to plain keyword matching
        // when the model omits them.
        let (matched_skills, missing_skills) = match (
            parse_skill_list(&raw, "Matched Skills:"),
            parse_skill_list(&raw, "Missing Skills:"),
        ) {
            (Some(m), Some(x)) => (m, x),
            _ => match_skills(resume_text, required_skills),
        };

        ScoreResult {
            score,
            rationale,
            matched_skills,
            missing_skills,
            backend: ScorerBackend::Llm,
        }
    }
}
