use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DocupadError, Result};
use crate::model::Category;
use crate::store::DocumentStore;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub fn add<S: DocumentStore>(
    store: &mut S,
    name: String,
    description: String,
    parent: Option<Uuid>,
) -> Result<CmdResult> {
    if name.trim().is_empty() {
        return Err(DocupadError::Api("Category name cannot be empty".into()));
    }
    if let Some(parent) = &parent {
        store.get_category(parent)?;
    }

    let category = Category::new(name, description, parent);
    store.save_category(&category)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category added: {}",
        category.name
    )));
    result.categories.push(category);
    Ok(result)
}

pub fn modify<S: DocumentStore>(
    store: &mut S,
    id: &Uuid,
    name: Option<String>,
    description: Option<String>,
    parent: Option<Uuid>,
) -> Result<CmdResult> {
    let mut category = store.get_category(id)?;

    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(DocupadError::Api("Category name cannot be empty".into()));
        }
        category.name = name;
    }
    if let Some(description) = description {
        category.description = description;
    }
    if let Some(parent) = parent {
        store.get_category(&parent)?;
        // Re-parenting must not create a cycle
        if parent == *id || descendants(store, id)?.contains(&parent) {
            return Err(DocupadError::Api(format!(
                "Category '{}' cannot be its own ancestor",
                category.name
            )));
        }
        category.parent = Some(parent);
    }

    store.save_category(&category)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category modified: {}",
        category.name
    )));
    result.categories.push(category);
    Ok(result)
}

/// Delete a category, its child categories, and every document they hold.
pub fn delete<S: DocumentStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let category = store.get_category(id)?;

    let mut doomed = descendants(store, id)?;
    doomed.insert(*id);

    let mut result = CmdResult::default();
    let mut removed_documents = 0;
    for meta in store.list_documents()? {
        if doomed.contains(&meta.category) {
            store.delete_document(&meta.id)?;
            removed_documents += 1;
        }
    }
    for category_id in &doomed {
        store.delete_category(category_id)?;
    }

    result.add_message(CmdMessage::success(format!(
        "Category deleted: {} ({} categories, {} documents removed)",
        category.name,
        doomed.len(),
        removed_documents
    )));
    Ok(result)
}

pub fn list<S: DocumentStore>(store: &S) -> Result<CmdResult> {
    let mut categories = store.list_categories()?;
    let names: HashMap<Uuid, String> = categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect();
    // Parent name first, then own name, matching the listing screen
    categories.sort_by(|a, b| {
        let pa = a.parent.and_then(|p| names.get(&p)).cloned().unwrap_or_default();
        let pb = b.parent.and_then(|p| names.get(&p)).cloned().unwrap_or_default();
        pa.cmp(&pb).then_with(|| a.name.cmp(&b.name))
    });
    Ok(CmdResult::default().with_categories(categories))
}

/// Transitive child categories of `id`.
fn descendants<S: DocumentStore>(store: &S, id: &Uuid) -> Result<HashSet<Uuid>> {
    let categories = store.list_categories()?;
    let mut found: HashSet<Uuid> = HashSet::new();
    let mut frontier = vec![*id];
    while let Some(current) = frontier.pop() {
        for category in &categories {
            if category.parent == Some(current) && found.insert(category.id) {
                frontier.push(category.id);
            }
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn add_requires_existing_parent() {
        let mut store = InMemoryStore::new();
        assert!(add(&mut store, "a".into(), "".into(), Some(Uuid::new_v4())).is_err());
        assert!(add(&mut store, "a".into(), "".into(), None).is_ok());
    }

    #[test]
    fn delete_cascades_to_children_and_documents() {
        let mut store = InMemoryStore::new();
        let root = add(&mut store, "root".into(), "".into(), None).unwrap().categories[0].clone();
        let child = add(&mut store, "child".into(), "".into(), Some(root.id))
            .unwrap()
            .categories[0]
            .clone();
        let other = add(&mut store, "other".into(), "".into(), None).unwrap().categories[0].clone();
        create::run(&mut store, &child.id, "a.txt".into(), "".into(), None, vec![]).unwrap();
        create::run(&mut store, &other.id, "b.txt".into(), "".into(), None, vec![]).unwrap();

        delete(&mut store, &root.id).unwrap();

        assert!(store.get_category(&root.id).is_err());
        assert!(store.get_category(&child.id).is_err());
        assert!(store.get_category(&other.id).is_ok());
        let remaining = store.list_documents().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "b.txt");
    }

    #[test]
    fn reparenting_under_a_descendant_is_rejected() {
        let mut store = InMemoryStore::new();
        let root = add(&mut store, "root".into(), "".into(), None).unwrap().categories[0].clone();
        let child = add(&mut store, "child".into(), "".into(), Some(root.id))
            .unwrap()
            .categories[0]
            .clone();

        assert!(modify(&mut store, &root.id, None, None, Some(child.id)).is_err());
        assert!(modify(&mut store, &root.id, None, None, Some(root.id)).is_err());
    }

    #[test]
    fn list_orders_by_parent_then_name() {
        let mut store = InMemoryStore::new();
        let b = add(&mut store, "b".into(), "".into(), None).unwrap().categories[0].clone();
        add(&mut store, "a".into(), "".into(), Some(b.id)).unwrap();
        add(&mut store, "c".into(), "".into(), None).unwrap();

        let listed = list(&store).unwrap().categories;
        let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        // roots (no parent name) first, then children grouped under parent name
        assert_eq!(names, vec!["b", "c", "a"]);
    }
}
