use super::DocumentStore;
use crate::error::{DocupadError, Result};
use crate::model::{file_extension, Category, Document, DocumentMeta};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DOCUMENTS_FILE: &str = "documents.json";
const CATEGORIES_FILE: &str = "categories.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn content_filename(meta: &DocumentMeta) -> String {
        format!("doc-{}.{}", meta.id, file_extension(&meta.name))
    }

    /// Find the content file for a document, whatever extension it was
    /// written with. A rename can change the extension, so the lookup scans
    /// by the `doc-{uuid}.` prefix instead of recomputing the name.
    fn find_content_file(&self, id: &Uuid) -> Option<PathBuf> {
        let prefix = format!("doc-{}.", id);
        let entries = fs::read_dir(&self.root).ok()?;
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            if file_name.to_string_lossy().starts_with(&prefix) {
                return Some(entry.path());
            }
        }
        None
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn load_map<T: serde::de::DeserializeOwned>(&self, file: &str) -> Result<HashMap<Uuid, T>> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(path)?;
        let map: HashMap<Uuid, T> = serde_json::from_str(&content)?;
        Ok(map)
    }

    fn save_map<T: serde::Serialize>(&self, file: &str, map: &HashMap<Uuid, T>) -> Result<()> {
        let path = self.root.join(file);
        let content = serde_json::to_string_pretty(map)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn load_documents(&self) -> Result<HashMap<Uuid, DocumentMeta>> {
        self.load_map(DOCUMENTS_FILE)
    }

    fn load_categories(&self) -> Result<HashMap<Uuid, Category>> {
        self.load_map(CATEGORIES_FILE)
    }
}

impl DocumentStore for FileStore {
    fn save_document(&mut self, document: &Document) -> Result<()> {
        self.ensure_dir()?;

        // 1. Update metadata index
        let mut meta_map = self.load_documents()?;
        meta_map.insert(document.metadata.id, document.metadata.clone());
        self.save_map(DOCUMENTS_FILE, &meta_map)?;

        // 2. Replace the content file; a rename may have changed its extension
        if let Some(old) = self.find_content_file(&document.metadata.id) {
            fs::remove_file(old)?;
        }
        let path = self.root.join(Self::content_filename(&document.metadata));
        fs::write(path, &document.content)?;

        Ok(())
    }

    fn get_document(&self, id: &Uuid) -> Result<Document> {
        let meta_map = self.load_documents()?;
        let metadata = meta_map
            .get(id)
            .ok_or(DocupadError::DocumentNotFound(*id))?
            .clone();

        let content = match self.find_content_file(id) {
            Some(path) => fs::read(path)?,
            None => Vec::new(),
        };

        Ok(Document { metadata, content })
    }

    fn list_documents(&self) -> Result<Vec<DocumentMeta>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let meta_map = self.load_documents()?;
        Ok(meta_map.into_values().collect())
    }

    fn delete_document(&mut self, id: &Uuid) -> Result<()> {
        let mut meta_map = self.load_documents()?;
        if meta_map.remove(id).is_none() {
            return Err(DocupadError::DocumentNotFound(*id));
        }
        self.save_map(DOCUMENTS_FILE, &meta_map)?;

        if let Some(path) = self.find_content_file(id) {
            fs::remove_file(path)?;
        }

        Ok(())
    }

    fn document_path(&self, id: &Uuid) -> Result<PathBuf> {
        let meta_map = self.load_documents()?;
        let metadata = meta_map.get(id).ok_or(DocupadError::DocumentNotFound(*id))?;

        if let Some(path) = self.find_content_file(id) {
            Ok(path)
        } else {
            Ok(self.root.join(Self::content_filename(metadata)))
        }
    }

    fn save_category(&mut self, category: &Category) -> Result<()> {
        self.ensure_dir()?;
        let mut map = self.load_categories()?;
        map.insert(category.id, category.clone());
        self.save_map(CATEGORIES_FILE, &map)
    }

    fn get_category(&self, id: &Uuid) -> Result<Category> {
        let map = self.load_categories()?;
        map.get(id)
            .cloned()
            .ok_or(DocupadError::CategoryNotFound(*id))
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let map = self.load_categories()?;
        Ok(map.into_values().collect())
    }

    fn delete_category(&mut self, id: &Uuid) -> Result<()> {
        let mut map = self.load_categories()?;
        if map.remove(id).is_none() {
            return Err(DocupadError::CategoryNotFound(*id));
        }
        self.save_map(CATEGORIES_FILE, &map)
    }
}
