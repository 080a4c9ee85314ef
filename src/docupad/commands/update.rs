use crate::commands::{CmdMessage, CmdResult, DocumentUpdate};
use crate::error::Result;
use crate::model::validate_name;
use crate::store::DocumentStore;
use chrono::Utc;
use uuid::Uuid;

pub fn run<S: DocumentStore>(
    store: &mut S,
    id: &Uuid,
    update: DocumentUpdate,
    modifier: Option<String>,
) -> Result<CmdResult> {
    let mut document = store.get_document(id)?;

    if let Some(name) = update.name {
        validate_name(&name)?;
        document.metadata.name = name;
    }
    if let Some(description) = update.description {
        document.metadata.description = description;
    }
    if let Some(category) = update.category {
        // New category must exist
        store.get_category(&category)?;
        document.metadata.category = category;
    }
    if let Some(content) = update.content {
        document.content = content;
    }

    if modifier.is_some() {
        document.metadata.modifier = modifier;
    }
    document.metadata.date_modified = Utc::now();

    store.save_document(&document)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Document modified: {}",
        document.metadata.name
    )));
    result.affected_documents.push(document);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::error::DocupadError;
    use crate::model::Category;
    use crate::store::memory::InMemoryStore;

    fn seeded() -> (InMemoryStore, Uuid) {
        let mut store = InMemoryStore::new();
        let cat = Category::new("work".into(), "".into(), None);
        store.save_category(&cat).unwrap();
        let result = create::run(
            &mut store,
            &cat.id,
            "a.txt".into(),
            "".into(),
            Some("alice".into()),
            b"v1".to_vec(),
        )
        .unwrap();
        let id = result.affected_documents[0].metadata.id;
        (store, id)
    }

    #[test]
    fn updates_fields_and_stamps_modifier() {
        let (mut store, id) = seeded();

        run(
            &mut store,
            &id,
            DocumentUpdate {
                description: Some("updated".into()),
                content: Some(b"v2".to_vec()),
                ..DocumentUpdate::default()
            },
            Some("bob".into()),
        )
        .unwrap();

        let doc = store.get_document(&id).unwrap();
        assert_eq!(doc.metadata.description, "updated");
        assert_eq!(doc.content, b"v2");
        assert_eq!(doc.metadata.modifier.as_deref(), Some("bob"));
        assert_eq!(doc.metadata.creator.as_deref(), Some("alice"));
        assert!(doc.metadata.date_modified >= doc.metadata.date_created);
    }

    #[test]
    fn moving_to_a_missing_category_fails() {
        let (mut store, id) = seeded();
        let err = run(
            &mut store,
            &id,
            DocumentUpdate {
                category: Some(Uuid::new_v4()),
                ..DocumentUpdate::default()
            },
            None,
        );
        assert!(matches!(err, Err(DocupadError::CategoryNotFound(_))));
    }

    #[test]
    fn untouched_fields_are_preserved() {
        let (mut store, id) = seeded();
        run(&mut store, &id, DocumentUpdate::default(), None).unwrap();

        let doc = store.get_document(&id).unwrap();
        assert_eq!(doc.metadata.name, "a.txt");
        assert_eq!(doc.content, b"v1");
        assert_eq!(doc.metadata.modifier.as_deref(), Some("alice"));
    }
}
