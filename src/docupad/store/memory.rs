use super::DocumentStore;
use crate::error::{DocupadError, Result};
use crate::model::{Category, Document, DocumentMeta};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    documents: HashMap<Uuid, Document>,
    categories: HashMap<Uuid, Category>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryStore {
    fn save_document(&mut self, document: &Document) -> Result<()> {
        self.documents.insert(document.metadata.id, document.clone());
        Ok(())
    }

    fn get_document(&self, id: &Uuid) -> Result<Document> {
        self.documents
            .get(id)
            .cloned()
            .ok_or(DocupadError::DocumentNotFound(*id))
    }

    fn list_documents(&self) -> Result<Vec<DocumentMeta>> {
        Ok(self.documents.values().map(|d| d.metadata.clone()).collect())
    }

    fn delete_document(&mut self, id: &Uuid) -> Result<()> {
        if self.documents.remove(id).is_none() {
            return Err(DocupadError::DocumentNotFound(*id));
        }
        Ok(())
    }

    fn document_path(&self, id: &Uuid) -> Result<PathBuf> {
        let doc = self.get_document(id)?;
        Ok(PathBuf::from(doc.metadata.name))
    }

    fn save_category(&mut self, category: &Category) -> Result<()> {
        self.categories.insert(category.id, category.clone());
        Ok(())
    }

    fn get_category(&self, id: &Uuid) -> Result<Category> {
        self.categories
            .get(id)
            .cloned()
            .ok_or(DocupadError::CategoryNotFound(*id))
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.values().cloned().collect())
    }

    fn delete_category(&mut self, id: &Uuid) -> Result<()> {
        if self.categories.remove(id).is_none() {
            return Err(DocupadError::CategoryNotFound(*id));
        }
        Ok(())
    }
}
