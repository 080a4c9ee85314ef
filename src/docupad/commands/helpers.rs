use crate::error::{DocupadError, Result};
use crate::listing::{index_documents, DisplayDocument};
use crate::model::Category;
use crate::store::DocumentStore;
use uuid::Uuid;

/// Documents in canonical display order.
pub fn indexed_documents<S: DocumentStore>(store: &S) -> Result<Vec<DisplayDocument>> {
    let documents = store.list_documents()?;
    let categories = store.list_categories()?;
    Ok(index_documents(documents, &categories))
}

/// Resolve a user selector, a 1-based listing index or an exact document
/// name, to a document id.
pub fn resolve_selector<S: DocumentStore>(store: &S, selector: &str) -> Result<Uuid> {
    let listed = indexed_documents(store)?;

    if let Ok(n) = selector.parse::<usize>() {
        return listed
            .iter()
            .find(|d| d.index == n)
            .map(|d| d.meta.id)
            .ok_or_else(|| DocupadError::Api(format!("No document at index {}", n)));
    }

    let matches: Vec<&DisplayDocument> =
        listed.iter().filter(|d| d.meta.name == selector).collect();
    match matches.len() {
        0 => Err(DocupadError::Api(format!(
            "No document named '{}'",
            selector
        ))),
        1 => Ok(matches[0].meta.id),
        _ => Err(DocupadError::Api(format!(
            "Several documents are named '{}'; select one by index",
            selector
        ))),
    }
}

pub fn resolve_selectors<S: DocumentStore, I: AsRef<str>>(
    store: &S,
    selectors: &[I],
) -> Result<Vec<Uuid>> {
    selectors
        .iter()
        .map(|s| resolve_selector(store, s.as_ref()))
        .collect()
}

/// Resolve a category by exact name.
pub fn find_category_by_name<S: DocumentStore>(store: &S, name: &str) -> Result<Category> {
    let categories = store.list_categories()?;
    let mut matches: Vec<Category> = categories.into_iter().filter(|c| c.name == name).collect();
    match matches.len() {
        0 => Err(DocupadError::Api(format!("No category named '{}'", name))),
        1 => Ok(matches.remove(0)),
        _ => Err(DocupadError::Api(format!(
            "Several categories are named '{}'",
            name
        ))),
    }
}

/// The acting user, for audit fields. The host framework supplies the
/// authenticated user; the CLI falls back to the environment.
pub fn current_user() -> Option<String> {
    std::env::var("USER").ok().filter(|u| !u.is_empty())
}
