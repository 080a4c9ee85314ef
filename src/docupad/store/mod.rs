//! # Storage Layer
//!
//! The [`DocumentStore`] trait abstracts persistence of documents and
//! categories so the command layer never touches the filesystem directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production file-based storage
//!   - Document metadata in `documents.json`, categories in `categories.json`
//!   - Document content in individual files: `doc-{uuid}.{ext}`
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!
//! Metadata and content are stored separately so listing documents does not
//! require reading every content file.

use crate::error::Result;
use crate::model::{Category, Document, DocumentMeta};
use std::path::PathBuf;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for document and category storage.
pub trait DocumentStore {
    /// Save a document (create or update)
    fn save_document(&mut self, document: &Document) -> Result<()>;

    /// Get a document by ID, content included
    fn get_document(&self, id: &Uuid) -> Result<Document>;

    /// List metadata for all documents
    fn list_documents(&self) -> Result<Vec<DocumentMeta>>;

    /// Delete a document permanently
    fn delete_document(&mut self, id: &Uuid) -> Result<()>;

    /// Get the content file path for a document (for file-based stores)
    fn document_path(&self, id: &Uuid) -> Result<PathBuf>;

    /// Save a category (create or update)
    fn save_category(&mut self, category: &Category) -> Result<()>;

    /// Get a category by ID
    fn get_category(&self, id: &Uuid) -> Result<Category>;

    /// List all categories
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// Delete a category permanently. Documents are not touched; cascading
    /// lives in the command layer.
    fn delete_category(&mut self, id: &Uuid) -> Result<()>;
}
