//! Shared types for the notes service and its HTTP clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =====================================================
// Domain Types
// =====================================================

/// A persisted note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Assigned by the store at creation, never reused
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Assigned by the store at creation, never changes
    pub created_at: DateTime<Utc>,
}

// =====================================================
// Request Types
// =====================================================

/// Body of a create or update request.
///
/// Both fields are optional on the wire so a missing field is reported as a
/// validation failure instead of a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Check both fields, returning the borrowed values when they are usable.
    pub fn validated(&self) -> Result<(&str, &str), String> {
        validate_note_fields(self.title.as_deref(), self.content.as_deref())
    }
}

/// Query string of `GET /notes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNotesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Reject missing or blank (after trimming) title/content.
pub fn validate_note_fields<'a>(
    title: Option<&'a str>,
    content: Option<&'a str>,
) -> Result<(&'a str, &'a str), String> {
    let title = title.filter(|t| !t.trim().is_empty());
    let content = content.filter(|c| !c.trim().is_empty());

    match (title, content) {
        (Some(title), Some(content)) => Ok((title, content)),
        (None, None) => Err("Title and content are required".to_string()),
        (None, Some(_)) => Err("Title is required".to_string()),
        (Some(_), None) => Err("Content is required".to_string()),
    }
}

// =====================================================
// Response Types
// =====================================================

/// Success envelope: `{ "data": ... }`
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Acknowledgement or failure body: `{ "message": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert_eq!(
            validate_note_fields(Some("  "), Some("body")),
            Err("Title is required".to_string())
        );
        assert_eq!(
            validate_note_fields(Some("title"), Some("\n\t")),
            Err("Content is required".to_string())
        );
        assert_eq!(
            validate_note_fields(None, None),
            Err("Title and content are required".to_string())
        );
    }

    #[test]
    fn test_validate_keeps_values_untrimmed() {
        let (title, content) = validate_note_fields(Some(" Groceries "), Some("Milk, eggs")).unwrap();
        assert_eq!(title, " Groceries ");
        assert_eq!(content, "Milk, eggs");
    }

    #[test]
    fn test_note_input_missing_fields_deserialize_as_none() {
        let input: NoteInput = serde_json::from_str(r#"{"title":"only title"}"#).unwrap();
        assert_eq!(input.title.as_deref(), Some("only title"));
        assert!(input.content.is_none());
        assert!(input.validated().is_err());
    }

    #[test]
    fn test_message_response_tolerates_empty_body() {
        let parsed: MessageResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.message.is_none());
    }
}
