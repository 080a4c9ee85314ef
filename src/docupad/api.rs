//! # API Facade
//!
//! Thin facade over the command layer and the single entry point for every
//! UI. It dispatches to the right command, normalizes inputs (selectors and
//! category names to ids), and returns structured `Result<CmdResult>` values.
//! Business logic stays in `commands/*`; I/O and presentation stay in the
//! caller.
//!
//! Generic over [`DocumentStore`], so production runs on `FileStore` and
//! tests on `InMemoryStore`.

use crate::commands::{self, helpers, CmdResult, DocumentUpdate};
use crate::config::DocupadConfig;
use crate::error::{DocupadError, Result};
use crate::store::DocumentStore;
use std::path::Path;
use uuid::Uuid;

pub use crate::commands::{CmdMessage, MessageLevel};

pub struct DocupadApi<S: DocumentStore> {
    store: S,
    config: DocupadConfig,
}

impl<S: DocumentStore> DocupadApi<S> {
    pub fn new(store: S, config: DocupadConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &DocupadConfig {
        &self.config
    }

    pub fn create_document(
        &mut self,
        category_name: &str,
        name: String,
        description: String,
        content: Vec<u8>,
    ) -> Result<CmdResult> {
        let category = helpers::find_category_by_name(&self.store, category_name)?;
        commands::create::run(
            &mut self.store,
            &category.id,
            name,
            description,
            helpers::current_user(),
            content,
        )
    }

    pub fn list_documents(&self, category_name: Option<&str>) -> Result<CmdResult> {
        match category_name {
            Some(name) => {
                let category = helpers::find_category_by_name(&self.store, name)?;
                commands::list::run(&self.store, Some(&category.id))
            }
            None => commands::list::run(&self.store, None),
        }
    }

    pub fn search_documents(&self, term: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn view_documents<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let ids = helpers::resolve_selectors(&self.store, selectors)?;
        commands::view::run(&self.store, &ids)
    }

    pub fn update_document(&mut self, selector: &str, update: DocumentUpdate) -> Result<CmdResult> {
        let id = helpers::resolve_selector(&self.store, selector)?;
        commands::update::run(&mut self.store, &id, update, helpers::current_user())
    }

    pub fn delete_documents<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let ids = helpers::resolve_selectors(&self.store, selectors)?;
        commands::delete::run(&mut self.store, &ids)
    }

    pub fn list_categories(&self) -> Result<CmdResult> {
        commands::categories::list(&self.store)
    }

    pub fn add_category(
        &mut self,
        name: String,
        description: String,
        parent_name: Option<&str>,
    ) -> Result<CmdResult> {
        let parent = match parent_name {
            Some(parent_name) => {
                Some(helpers::find_category_by_name(&self.store, parent_name)?.id)
            }
            None => None,
        };
        commands::categories::add(&mut self.store, name, description, parent)
    }

    pub fn modify_category(
        &mut self,
        name: &str,
        new_name: Option<String>,
        description: Option<String>,
        parent_name: Option<&str>,
    ) -> Result<CmdResult> {
        let category = helpers::find_category_by_name(&self.store, name)?;
        let parent = match parent_name {
            Some(parent_name) => {
                Some(helpers::find_category_by_name(&self.store, parent_name)?.id)
            }
            None => None,
        };
        commands::categories::modify(&mut self.store, &category.id, new_name, description, parent)
    }

    pub fn delete_category(&mut self, name: &str) -> Result<CmdResult> {
        let category = helpers::find_category_by_name(&self.store, name)?;
        commands::categories::delete(&mut self.store, &category.id)
    }

    pub fn share_document(&mut self, selector: &str) -> Result<CmdResult> {
        let id = helpers::resolve_selector(&self.store, selector)?;
        commands::share::share(&mut self.store, &id, &self.config.root_url)
    }

    pub fn unshare_document(&mut self, selector: &str) -> Result<CmdResult> {
        let id = helpers::resolve_selector(&self.store, selector)?;
        commands::share::unshare(&mut self.store, &id)
    }

    pub fn download_document(&self, selector: &str) -> Result<CmdResult> {
        let id = helpers::resolve_selector(&self.store, selector)?;
        commands::download::by_id(&self.store, &id)
    }

    pub fn download_shared(&self, token: &str, filename: &str) -> Result<CmdResult> {
        let token = Uuid::parse_str(token)
            .map_err(|_| DocupadError::Api(format!("Invalid share token: {}", token)))?;
        commands::download::by_token(&self.store, &token, filename)
    }

    pub fn export_documents<I: AsRef<str>>(
        &self,
        selectors: &[I],
        out_dir: &Path,
    ) -> Result<CmdResult> {
        let ids = helpers::resolve_selectors(&self.store, selectors)?;
        commands::export::run(&self.store, &ids, out_dir)
    }

    pub fn open_editor(&self, selector: &str) -> Result<CmdResult> {
        let id = helpers::resolve_selector(&self.store, selector)?;
        commands::edit::open(&self.store, &self.config, &id)
    }

    pub fn sync_editor(&mut self, selector: &str) -> Result<CmdResult> {
        let id = helpers::resolve_selector(&self.store, selector)?;
        commands::edit::sync(&mut self.store, &self.config, &id, helpers::current_user())
    }

    pub fn close_editor(&self, selector: &str) -> Result<CmdResult> {
        let id = helpers::resolve_selector(&self.store, selector)?;
        commands::edit::close(&self.store, &self.config, &id)
    }

    pub fn editor_capabilities(&self) -> Result<CmdResult> {
        commands::edit::capabilities(&self.config)
    }

    pub fn document_paths<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let ids = helpers::resolve_selectors(&self.store, selectors)?;
        let mut result = CmdResult::default();
        for id in &ids {
            result.document_paths.push(self.store.document_path(id)?);
        }
        Ok(result)
    }
}
