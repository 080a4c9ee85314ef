use crate::error::{DocupadError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A folder grouping documents. Categories form a tree via `parent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub parent: Option<Uuid>,
}

impl Category {
    pub fn new(name: String, description: String, parent: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            parent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: Uuid,
    pub category: Uuid,
    /// File name, extension included (e.g. "minutes.html").
    pub name: String,
    pub description: String,
    pub creator: Option<String>,
    pub date_created: DateTime<Utc>,
    pub modifier: Option<String>,
    pub date_modified: DateTime<Utc>,
    /// Download token; `Some` while the document is shared.
    pub shared: Option<Uuid>,
}

impl DocumentMeta {
    pub fn new(category: Uuid, name: String, description: String, creator: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category,
            name,
            description,
            modifier: creator.clone(),
            creator,
            date_created: now,
            date_modified: now,
            shared: None,
        }
    }
}

/// A document: metadata plus an opaque content buffer. The editor layer only
/// ever reads `metadata.name` and reads/writes `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub metadata: DocumentMeta,
    pub content: Vec<u8>,
}

impl Document {
    pub fn new(
        category: Uuid,
        name: String,
        description: String,
        creator: Option<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            metadata: DocumentMeta::new(category, name, description, creator),
            content,
        }
    }
}

/// Returns the extension of a file name: the segment after the last dot.
/// A name without a dot yields the whole name, which never matches a
/// registered extension and so falls through to the plain-text paths.
pub fn file_extension(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Validates a document name before it reaches the store, which derives
/// content file names from it.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DocupadError::Api("Document name cannot be empty".into()));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(DocupadError::Api(format!(
            "Document name cannot contain path separators: {}",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_last_segment() {
        assert_eq!(file_extension("notes.html"), "html");
        assert_eq!(file_extension("minutes.draft.etherpad"), "etherpad");
        assert_eq!(file_extension("report.txt"), "txt");
    }

    #[test]
    fn extension_of_undotted_name_is_the_name() {
        assert_eq!(file_extension("README"), "README");
    }

    #[test]
    fn new_document_stamps_creator_as_modifier() {
        let doc = Document::new(
            Uuid::new_v4(),
            "a.txt".into(),
            "".into(),
            Some("alice".into()),
            Vec::new(),
        );
        assert_eq!(doc.metadata.creator.as_deref(), Some("alice"));
        assert_eq!(doc.metadata.modifier.as_deref(), Some("alice"));
        assert_eq!(doc.metadata.date_created, doc.metadata.date_modified);
        assert!(doc.metadata.shared.is_none());
    }

    #[test]
    fn validate_name_rejects_empty_and_paths() {
        assert!(validate_name("").is_err());
        assert!(validate_name("  ").is_err());
        assert!(validate_name("a/b.txt").is_err());
        assert!(validate_name("a\\b.txt").is_err());
        assert!(validate_name("notes.html").is_ok());
    }
}
