// Prompt constants for the ATS scoring service.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt for ATS analysis.
pub const ATS_SYSTEM: &str = "You are an expert ATS analyzer. \
    You evaluate resumes against job requirements and respond ONLY in the \
    exact response format you are given. Never add commentary before the \
    Score line.";

/// Builds the scoring prompt for one (resume, skills) pair.
///
/// The output contract ("Score: <int>" on its own line, then the analysis
/// sections) is what `parse::parse_score` and `parse::parse_section` match
/// against; keep them in sync.
pub fn build_ats_prompt(resume_text: &str, required_skills: &[String]) -> String {
    format!(
        r#"Analyze the resume against the job requirements and provide a detailed score based on multiple criteria.

JOB REQUIREMENTS:
- Skills: {skills}
- Preferred Experience: At least 2 years of relevant experience (if not specified, assume this as a baseline).
- Preferred Education: Bachelor's degree or higher, with a CGPA of 3.0 or above (if not specified, assume this as a baseline).

RESUME CONTENT:
{resume_text}

ANALYSIS INSTRUCTIONS:
1. Skills Analysis:
   - Check for each required skill, including variations and related terms (e.g., 'js' for 'javascript', 'reactjs' for 'react').
   - Evaluate expertise level for each skill based on years of experience, project complexity, or specific achievements.
2. Experience Analysis:
   - Identify the candidate's total years of relevant work experience and its relevance to the requirements.
3. Education Analysis:
   - Extract the highest degree and CGPA (if mentioned) and assess relevance to the role.
4. Additional Factors:
   - Certifications, awards, leadership roles, publications or other achievements that align with the requirements.
5. Scoring:
   - Skills (40%): 90-100 for all skills with strong evidence, 70-89 for most skills with good evidence, 50-69 for some skills with moderate evidence, 30-49 for few skills with limited evidence, 0-29 for minimal or no skills.
   - Experience (30%): 90-100 for >5 years of relevant experience, 70-89 for 3-5 years, 50-69 for 1-2 years, 30-49 for <1 year, 0-29 for no relevant experience.
   - Education (20%): 90-100 for relevant degree with CGPA >= 3.5, 70-89 for relevant degree with CGPA 3.0-3.5, 50-69 for relevant degree with CGPA < 3.0, 30-49 for non-relevant degree or no CGPA, 0-29 for no degree.
   - Additional Factors (10%): 90-100 for multiple relevant certifications/achievements, 70-89 for some, 50-69 for minimal, 0-49 for none.
   - Combine the weighted scores for a final score out of 100.

RESPONSE FORMAT:
Score: [0-100]
Skills Analysis: [Explanation of skill matches and expertise]
Experience Analysis: [Relevant experience, years, and relevance]
Education Analysis: [Degree, CGPA (if found), and relevance]
Additional Factors: [Certifications, awards, or other relevant details]
Matched Skills: [Comma-separated list of matched skills]
Missing Skills: [Comma-separated list of missing skills]"#,
        skills = required_skills.join(", "),
        resume_text = resume_text,
    )
}
