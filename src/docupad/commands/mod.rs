use crate::listing::DisplayDocument;
use crate::model::{Category, Document};
use std::path::PathBuf;

pub mod categories;
pub mod create;
pub mod delete;
pub mod download;
pub mod edit;
pub mod export;
pub mod helpers;
pub mod list;
pub mod search;
pub mod share;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_documents: Vec<Document>,
    pub listed_documents: Vec<DisplayDocument>,
    pub categories: Vec<Category>,
    pub document_paths: Vec<PathBuf>,
    /// Embeddable markup fragments produced by editor operations.
    pub fragments: Vec<String>,
    /// Shared-download links produced by share operations.
    pub links: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_documents(mut self, documents: Vec<Document>) -> Self {
        self.affected_documents = documents;
        self
    }

    pub fn with_listed_documents(mut self, documents: Vec<DisplayDocument>) -> Self {
        self.listed_documents = documents;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_document_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.document_paths = paths;
        self
    }
}

/// A partial update to a document; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct DocumentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<uuid::Uuid>,
    pub content: Option<Vec<u8>>,
}
