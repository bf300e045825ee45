//! Parsing of the model's free-form scoring response.
//!
//! The most fragile step of the pipeline, so it is a pure function from
//! string to `Option`, unit-tested independently of any network call.

/// Extracts the integer after the literal `Score:` token.
///
/// Returns `None` when the token is absent, the digits are missing, or the
/// value falls outside [0, 100]; callers treat all three identically.
pub fn parse_score(text: &str) -> Option<u8> {
    let idx = text.find("Score:")?;
    let rest = text[idx + "Score:".len()..].trim_start();

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let value: u32 = digits.parse().ok()?;
    if value > 100 {
        return None;
    }
    Some(value as u8)
}

/// Returns the rest of the line after `header`, if non-empty.
pub fn parse_section(text: &str, header: &str) -> Option<String> {
    let idx = text.find(header)?;
    let rest = &text[idx + header.len()..];
    let line = rest.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

/// Parses a comma-separated skill list after `header`, tolerating optional
/// surrounding brackets.
pub fn parse_skill_list(text: &str, header: &str) -> Option<Vec<String>> {
    let line = parse_section(text, header)?;
    let trimmed = line
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Some(Vec::new());
    }
    Some(
        trimmed
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_score() {
        assert_eq!(parse_score("Score: 84"), Some(84));
    }

    #[test]
    fn test_parses_score_embedded_in_prose() {
        let text = "After reviewing the resume:\nScore: 72\nSkills Analysis: strong";
        assert_eq!(parse_score(text), Some(72));
    }

    #[test]
    fn test_boundary_values_accepted() {
        assert_eq!(parse_score("Score: 0"), Some(0));
        assert_eq!(parse_score("Score: 100"), Some(100));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(parse_score("Score: 101"), None);
        assert_eq!(parse_score("Score: 250"), None);
        assert_eq!(parse_score("Score: 99999999999"), None);
    }

    #[test]
    fn test_missing_token_rejected() {
        assert_eq!(parse_score("The candidate looks strong overall."), None);
        assert_eq!(parse_score(""), None);
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert_eq!(parse_score("Score: excellent"), None);
        assert_eq!(parse_score("Score:"), None);
    }

    #[test]
    fn test_tolerates_extra_whitespace() {
        assert_eq!(parse_score("Score:    55"), Some(55));
    }

    #[test]
    fn test_stops_at_first_non_digit() {
        // "Score: 67/100" reads as 67.
        assert_eq!(parse_score("Score: 67/100"), Some(67));
    }

    #[test]
    fn test_parse_section_reads_rest_of_line() {
        let text = "Score: 80\nSkills Analysis: React and SQL covered well\nExperience Analysis: 4 years";
        assert_eq!(
            parse_section(text, "Skills Analysis:"),
            Some("React and SQL covered well".to_string())
        );
        assert_eq!(
            parse_section(text, "Experience Analysis:"),
            Some("4 years".to_string())
        );
    }

    #[test]
    fn test_parse_section_missing_header() {
        assert_eq!(parse_section("Score: 80", "Education Analysis:"), None);
    }

    #[test]
    fn test_parse_skill_list_with_brackets() {
        let text = "Matched Skills: [React, SQL]";
        assert_eq!(
            parse_skill_list(text, "Matched Skills:"),
            Some(vec!["React".to_string(), "SQL".to_string()])
        );
    }

    #[test]
    fn test_parse_skill_list_without_brackets() {
        let text = "Missing Skills: Node.js, Kubernetes";
        assert_eq!(
            parse_skill_list(text, "Missing Skills:"),
            Some(vec!["Node.js".to_string(), "Kubernetes".to_string()])
        );
    }

    #[test]
    fn test_parse_skill_list_none_keyword_is_empty() {
        let text = "Missing Skills: None";
        assert_eq!(parse_skill_list(text, "Missing Skills:"), Some(Vec::new()));
    }
}
