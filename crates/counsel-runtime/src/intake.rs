//! Turning a submitted document into analyzable text.
//!
//! Document decoding happens before this point: PDFs arrive as the text of
//! each page. Images are accepted as a submission kind but have no text
//! extractor, so they are rejected here rather than analyzed as empty text.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::IntakeConfig;

/// Errors from text intake.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Text is unreadable or too short ({chars} characters, need at least {min})")]
    TooShort { chars: usize, min: usize },

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
}

/// A document submitted for analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Submission {
    /// Pasted contract text
    Text { text: String },

    /// Text of a PDF, one entry per page in page order
    PdfPages { pages: Vec<String> },

    /// A photographed contract
    Image { media_type: String },
}

impl Submission {
    pub fn text(text: impl Into<String>) -> Self {
        Submission::Text { text: text.into() }
    }

    pub fn pdf_pages(pages: Vec<String>) -> Self {
        Submission::PdfPages { pages }
    }

    pub fn image(media_type: impl Into<String>) -> Self {
        Submission::Image {
            media_type: media_type.into(),
        }
    }
}

/// Extract the contract text from a submission.
///
/// PDF pages are concatenated with no separator, so a term broken across a
/// page boundary still reads as one word. The length check counts every
/// character of the extracted text, whitespace included, and never bytes.
pub fn extract_text(submission: &Submission, config: &IntakeConfig) -> Result<String, IntakeError> {
    let text = match submission {
        Submission::Text { text } => text.clone(),
        Submission::PdfPages { pages } => pages.concat(),
        Submission::Image { media_type } => {
            warn!(media_type = %media_type, "Image submission rejected");
            return Err(IntakeError::UnsupportedInput(format!(
                "text recognition for {} is not available; submit the text or a PDF",
                media_type
            )));
        }
    };

    let chars = text.chars().count();
    if chars < config.min_text_chars {
        warn!(chars, min = config.min_text_chars, "Submission too short");
        return Err(IntakeError::TooShort {
            chars,
            min: config.min_text_chars,
        });
    }

    debug!(chars, "Submission accepted");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min: usize) -> IntakeConfig {
        IntakeConfig {
            min_text_chars: min,
        }
    }

    #[test]
    fn test_text_accepted() {
        let text = extract_text(&Submission::text("착수금 5,000,000원"), &config(5)).unwrap();
        assert_eq!(text, "착수금 5,000,000원");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 10 Hangul syllables, 30 bytes in UTF-8
        let submission = Submission::text("가나다라마바사아자차");
        assert!(extract_text(&submission, &config(10)).is_ok());
        assert_eq!(
            extract_text(&submission, &config(11)),
            Err(IntakeError::TooShort { chars: 10, min: 11 })
        );
    }

    #[test]
    fn test_whitespace_counts_toward_length() {
        // 5 Hangul syllables padded to 9 characters
        let submission = Submission::text("  가나다라마\n\n");
        assert!(extract_text(&submission, &config(9)).is_ok());
        assert_eq!(
            extract_text(&submission, &config(10)),
            Err(IntakeError::TooShort { chars: 9, min: 10 })
        );
    }

    #[test]
    fn test_empty_text_rejected() {
        assert_eq!(
            extract_text(&Submission::text(""), &config(1)),
            Err(IntakeError::TooShort { chars: 0, min: 1 })
        );
    }

    #[test]
    fn test_pdf_pages_concatenated_in_order() {
        let submission = Submission::pdf_pages(vec!["제1조 목적".to_string(), "제2조 위임한계".to_string()]);
        let text = extract_text(&submission, &config(1)).unwrap();
        assert_eq!(text, "제1조 목적제2조 위임한계");
    }

    #[test]
    fn test_keyword_split_across_pages_is_found() {
        let submission = Submission::pdf_pages(vec![
            "제4조 착수".to_string(),
            "금 5,000,000원을 지급한다.".to_string(),
        ]);
        let text = extract_text(&submission, &config(1)).unwrap();
        assert!(counsel_core::evaluate(&text).is_found("착수금"));
    }

    #[test]
    fn test_image_unsupported() {
        let result = extract_text(&Submission::image("image/png"), &config(0));
        assert!(matches!(result, Err(IntakeError::UnsupportedInput(_))));
    }

    #[test]
    fn test_default_minimum() {
        let result = extract_text(&Submission::text("짧은 계약서"), &IntakeConfig::default());
        assert!(matches!(result, Err(IntakeError::TooShort { min: 50, .. })));
    }

    #[test]
    fn test_submission_serde() {
        let submission: Submission =
            serde_json::from_str(r#"{"kind": "pdf_pages", "pages": ["a", "b"]}"#).unwrap();
        assert_eq!(submission, Submission::pdf_pages(vec!["a".into(), "b".into()]));
    }
}
