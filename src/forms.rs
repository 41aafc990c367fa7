//! Draft models backing the topic and reply forms.
//!
//! Collects a new topic's title/content/tags with the same client-side
//! rules the form UI enforces: character budgets, tag dedupe, and
//! lightweight text markup insertion around a selection.

use crate::error::Result;
use crate::model::{NewPost, NewTopic};
use crate::validation::{Validator, MAX_CONTENT_CHARS, MAX_TITLE_CHARS};

/// Markup styles the content toolbar can wrap a selection in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Bold,
    Italic,
    Underline,
}

impl Markup {
    fn delimiter(self) -> &'static str {
        match self {
            Markup::Bold => "**",
            Markup::Italic => "*",
            Markup::Underline => "__",
        }
    }
}

/// Wraps the selected character range of `text` in markup delimiters.
///
/// Out-of-range or inverted selections leave the text unchanged. Returns
/// the new text and the caret position just after the inserted markup.
pub fn insert_markup(text: &str, start: usize, end: usize, markup: Markup) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    if start > end || end > chars.len() {
        return (text.to_string(), text.chars().count());
    }

    let delimiter = markup.delimiter();
    let before: String = chars[..start].iter().collect();
    let selected: String = chars[start..end].iter().collect();
    let after: String = chars[end..].iter().collect();

    let formatted = format!("{delimiter}{selected}{delimiter}");
    let caret = start + formatted.chars().count();
    (format!("{before}{formatted}{after}"), caret)
}

/// Draft state for the "create topic" form.
#[derive(Debug, Clone, Default)]
pub struct TopicDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author: String,
}

impl TopicDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag, trimming whitespace and ignoring blanks and duplicates.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes a tag by value.
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Wraps the selected content range in markup.
    pub fn format_content(&mut self, start: usize, end: usize, markup: Markup) -> usize {
        let (content, caret) = insert_markup(&self.content, start, end, markup);
        self.content = content;
        caret
    }

    /// Characters still available in the title budget.
    pub fn title_remaining(&self) -> usize {
        MAX_TITLE_CHARS.saturating_sub(self.title.chars().count())
    }

    /// Characters still available in the content budget.
    pub fn content_remaining(&self) -> usize {
        MAX_CONTENT_CHARS.saturating_sub(self.content.chars().count())
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }

    /// Validates the draft and produces the creation payload.
    pub fn validate(&self) -> Result<NewTopic> {
        Validator::validate_title(&self.title)?;
        Validator::validate_content(&self.content)?;
        Validator::validate_tags(&self.tags)?;
        Ok(NewTopic {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            author: self.author.clone(),
        })
    }
}

/// Draft state for the reply box under a topic.
#[derive(Debug, Clone, Default)]
pub struct ReplyDraft {
    pub content: String,
    pub author: String,
}

impl ReplyDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters still available in the content budget.
    pub fn content_remaining(&self) -> usize {
        MAX_CONTENT_CHARS.saturating_sub(self.content.chars().count())
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Validates the draft and produces the creation payload.
    pub fn validate(&self) -> Result<NewPost> {
        Validator::validate_content(&self.content)?;
        Ok(NewPost {
            content: self.content.clone(),
            author: self.author.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_markup_wraps_selection() {
        let (text, caret) = insert_markup("hello world", 6, 11, Markup::Bold);
        assert_eq!(text, "hello **world**");
        assert_eq!(caret, 15);

        let (text, _) = insert_markup("hello", 0, 5, Markup::Italic);
        assert_eq!(text, "*hello*");

        let (text, _) = insert_markup("hello", 0, 5, Markup::Underline);
        assert_eq!(text, "__hello__");
    }

    #[test]
    fn test_insert_markup_empty_selection() {
        let (text, caret) = insert_markup("ab", 1, 1, Markup::Bold);
        assert_eq!(text, "a****b");
        assert_eq!(caret, 5);
    }

    #[test]
    fn test_insert_markup_char_indices_not_bytes() {
        // Hebrew characters are multi-byte; selection is in characters
        let (text, _) = insert_markup("שלום עולם", 5, 9, Markup::Bold);
        assert_eq!(text, "שלום **עולם**");
    }

    #[test]
    fn test_insert_markup_invalid_range_unchanged() {
        let (text, _) = insert_markup("abc", 2, 1, Markup::Bold);
        assert_eq!(text, "abc");
        let (text, _) = insert_markup("abc", 0, 10, Markup::Bold);
        assert_eq!(text, "abc");
    }

    #[test]
    fn test_tag_dedupe_and_trim() {
        let mut draft = TopicDraft::new();
        assert!(draft.add_tag(" חרדה "));
        assert!(!draft.add_tag("חרדה"));
        assert!(!draft.add_tag("   "));
        assert_eq!(draft.tags, vec!["חרדה"]);

        draft.remove_tag("חרדה");
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_submit_gating() {
        let mut draft = TopicDraft::new();
        assert!(!draft.can_submit());
        draft.title = "כותרת".to_string();
        assert!(!draft.can_submit());
        draft.content = "תוכן".to_string();
        assert!(draft.can_submit());

        let payload = draft.validate().unwrap();
        assert_eq!(payload.title, "כותרת");
    }

    #[test]
    fn test_validate_rejects_over_budget() {
        let draft = TopicDraft {
            title: "t".repeat(MAX_TITLE_CHARS + 1),
            content: "c".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_err());

        let reply = ReplyDraft {
            content: "x".repeat(MAX_CONTENT_CHARS + 1),
            ..Default::default()
        };
        assert!(reply.validate().is_err());
    }

    #[test]
    fn test_budget_counters() {
        let mut draft = TopicDraft::new();
        draft.title = "שלום".to_string();
        assert_eq!(draft.title_remaining(), MAX_TITLE_CHARS - 4);
        assert_eq!(draft.content_remaining(), MAX_CONTENT_CHARS);
    }
}
