use crate::model::{Category, DocumentMeta};
use std::collections::HashMap;
use uuid::Uuid;

/// A document as presented to a user: its metadata, a 1-based display index
/// stable for the current listing, and the resolved category name.
#[derive(Debug, Clone)]
pub struct DisplayDocument {
    pub category_name: String,
    pub meta: DocumentMeta,
    pub index: usize,
}

/// Assigns display indexes in canonical order: category name first, then
/// document name. The index is what CLI selectors refer to.
pub fn index_documents(
    mut documents: Vec<DocumentMeta>,
    categories: &[Category],
) -> Vec<DisplayDocument> {
    let names: HashMap<Uuid, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    documents.sort_by(|a, b| {
        let ca = names.get(&a.category).copied().unwrap_or("");
        let cb = names.get(&b.category).copied().unwrap_or("");
        ca.cmp(cb).then_with(|| a.name.cmp(&b.name))
    });

    documents
        .into_iter()
        .enumerate()
        .map(|(i, meta)| DisplayDocument {
            category_name: names
                .get(&meta.category)
                .copied()
                .unwrap_or("?")
                .to_string(),
            meta,
            index: i + 1,
        })
        .collect()
}
