//! Input validation and content limits for forum submissions.
//!
//! The same limits the form UI enforces (title and content budgets, tag
//! rules) are re-checked here before anything is sent to the backend, so a
//! caller bypassing the form cannot submit oversized or empty content.

use crate::error::{CareSyncError, Result};

/// Maximum topic title length in characters.
pub const MAX_TITLE_CHARS: usize = 50;

/// Maximum topic/reply content length in characters.
pub const MAX_CONTENT_CHARS: usize = 5000;

/// Maximum number of tags per topic.
pub const MAX_TAGS_COUNT: usize = 10;

/// Maximum length of a single tag in characters.
pub const MAX_TAG_CHARS: usize = 64;

/// Validation functions for user-submitted forum content.
pub struct Validator;

impl Validator {
    /// Validates a topic title: non-blank, within budget, no control chars.
    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(CareSyncError::validation("Title cannot be empty"));
        }
        let chars = title.chars().count();
        if chars > MAX_TITLE_CHARS {
            return Err(CareSyncError::validation(format!(
                "Title too long: {} characters exceeds maximum of {}",
                chars, MAX_TITLE_CHARS
            )));
        }
        if title.chars().any(char::is_control) {
            return Err(CareSyncError::validation(
                "Title contains control characters",
            ));
        }
        Ok(())
    }

    /// Validates topic or reply content: non-blank and within budget.
    pub fn validate_content(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(CareSyncError::validation("Content cannot be empty"));
        }
        let chars = content.chars().count();
        if chars > MAX_CONTENT_CHARS {
            return Err(CareSyncError::validation(format!(
                "Content too long: {} characters exceeds maximum of {}",
                chars, MAX_CONTENT_CHARS
            )));
        }
        Ok(())
    }

    /// Validates a single tag.
    pub fn validate_tag(tag: &str) -> Result<()> {
        if tag.trim().is_empty() {
            return Err(CareSyncError::validation("Tag cannot be empty"));
        }
        let chars = tag.chars().count();
        if chars > MAX_TAG_CHARS {
            return Err(CareSyncError::validation(format!(
                "Tag too long: {} characters exceeds maximum of {}",
                chars, MAX_TAG_CHARS
            )));
        }
        if tag.chars().any(char::is_control) {
            return Err(CareSyncError::validation("Tag contains control characters"));
        }
        Ok(())
    }

    /// Validates a tag list: count limit plus each tag individually.
    pub fn validate_tags(tags: &[String]) -> Result<()> {
        if tags.len() > MAX_TAGS_COUNT {
            return Err(CareSyncError::validation(format!(
                "Too many tags: {} exceeds maximum of {}",
                tags.len(),
                MAX_TAGS_COUNT
            )));
        }
        for tag in tags {
            Self::validate_tag(tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_validation() {
        assert!(Validator::validate_title("איך להתמודד עם חרדה?").is_ok());
        assert!(Validator::validate_title("").is_err());
        assert!(Validator::validate_title("   ").is_err());
        assert!(Validator::validate_title("a\x01b").is_err());

        let long_title = "א".repeat(MAX_TITLE_CHARS + 1);
        assert!(Validator::validate_title(&long_title).is_err());

        // Exactly at the limit passes (chars, not bytes)
        let max_title = "א".repeat(MAX_TITLE_CHARS);
        assert!(Validator::validate_title(&max_title).is_ok());
    }

    #[test]
    fn test_content_validation() {
        assert!(Validator::validate_content("תוכן").is_ok());
        assert!(Validator::validate_content("").is_err());
        assert!(Validator::validate_content("  \n ").is_err());

        let long_content = "x".repeat(MAX_CONTENT_CHARS + 1);
        assert!(Validator::validate_content(&long_content).is_err());
    }

    #[test]
    fn test_tag_validation() {
        assert!(Validator::validate_tag("חרדה").is_ok());
        assert!(Validator::validate_tag("").is_err());
        assert!(Validator::validate_tag(&"t".repeat(MAX_TAG_CHARS + 1)).is_err());

        let ok_tags: Vec<String> = (0..MAX_TAGS_COUNT).map(|i| format!("tag{i}")).collect();
        assert!(Validator::validate_tags(&ok_tags).is_ok());

        let too_many: Vec<String> = (0..MAX_TAGS_COUNT + 1).map(|i| format!("tag{i}")).collect();
        assert!(Validator::validate_tags(&too_many).is_err());
    }
}
