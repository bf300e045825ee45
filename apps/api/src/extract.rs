//! Resume text extraction.
//!
//! Precondition checks run before any parsing: an empty buffer or a missing
//! `%PDF` signature fails fast with `DocumentError`, so malformed uploads
//! never reach the parser or the scorer.

use thiserror::Error;

/// Ceiling on extracted text carried downstream. Bounds prompt size for the
/// scoring call.
pub const MAX_RESUME_TEXT_CHARS: usize = 3000;

const PDF_MAGIC: &[u8; 4] = b"%PDF";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("the uploaded file is empty")]
    Empty,

    #[error("the file is not a valid PDF document")]
    BadSignature,

    #[error("the PDF could not be parsed: {0}")]
    Parse(String),
}

/// Outcome of a successful extraction.
///
/// A scanned-image PDF parses fine but yields no characters; that is not an
/// error. The sentinel lets the caller assign the minimum fallback score
/// instead of rejecting the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    Text(String),
    NoReadableText,
}

/// Extracts plain text from an uploaded resume document.
pub fn extract_resume_text(bytes: &[u8]) -> Result<ExtractedText, DocumentError> {
    if bytes.is_empty() {
        return Err(DocumentError::Empty);
    }
    if bytes.len() < PDF_MAGIC.len() || &bytes[..PDF_MAGIC.len()] != PDF_MAGIC {
        return Err(DocumentError::BadSignature);
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| DocumentError::Parse(e.to_string()))?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(ExtractedText::NoReadableText);
    }

    Ok(ExtractedText::Text(truncate_chars(
        trimmed,
        MAX_RESUME_TEXT_CHARS,
    )))
}

/// Truncates to at most `max` characters without splitting a code point.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_rejected() {
        assert!(matches!(
            extract_resume_text(&[]),
            Err(DocumentError::Empty)
        ));
    }

    #[test]
    fn test_wrong_signature_rejected_before_parsing() {
        let docx_magic = b"PK\x03\x04 definitely not a pdf";
        assert!(matches!(
            extract_resume_text(docx_magic),
            Err(DocumentError::BadSignature)
        ));
    }

    #[test]
    fn test_short_buffer_rejected() {
        assert!(matches!(
            extract_resume_text(b"%P"),
            Err(DocumentError::BadSignature)
        ));
    }

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_chars("hello", 3000), "hello");
    }

    #[test]
    fn test_truncate_at_limit() {
        let long = "a".repeat(4000);
        assert_eq!(truncate_chars(&long, 3000).len(), 3000);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // 2-byte code points: byte-indexed slicing would panic mid-character.
        let long = "é".repeat(3500);
        let out = truncate_chars(&long, 3000);
        assert_eq!(out.chars().count(), 3000);
    }
}
