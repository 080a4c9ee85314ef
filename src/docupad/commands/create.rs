use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{validate_name, Document};
use crate::store::DocumentStore;
use uuid::Uuid;

pub fn run<S: DocumentStore>(
    store: &mut S,
    category: &Uuid,
    name: String,
    description: String,
    creator: Option<String>,
    content: Vec<u8>,
) -> Result<CmdResult> {
    validate_name(&name)?;
    // A document always belongs to an existing category
    let category = store.get_category(category)?;

    let document = Document::new(category.id, name, description, creator, content);
    store.save_document(&document)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Document added to {}: {}",
        category.name, document.metadata.name
    )));
    result.affected_documents.push(document);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocupadError;
    use crate::model::Category;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn creates_document_in_category() {
        let mut store = InMemoryStore::new();
        let cat = Category::new("work".into(), "".into(), None);
        store.save_category(&cat).unwrap();

        let result = run(
            &mut store,
            &cat.id,
            "notes.txt".into(),
            "meeting notes".into(),
            Some("alice".into()),
            b"hello".to_vec(),
        )
        .unwrap();

        assert_eq!(result.affected_documents.len(), 1);
        let doc = &result.affected_documents[0];
        assert_eq!(doc.metadata.category, cat.id);
        assert_eq!(store.get_document(&doc.metadata.id).unwrap().content, b"hello");
    }

    #[test]
    fn missing_category_is_an_error() {
        let mut store = InMemoryStore::new();
        let err = run(
            &mut store,
            &Uuid::new_v4(),
            "notes.txt".into(),
            "".into(),
            None,
            vec![],
        );
        assert!(matches!(err, Err(DocupadError::CategoryNotFound(_))));
    }

    #[test]
    fn invalid_name_is_rejected() {
        let mut store = InMemoryStore::new();
        let cat = Category::new("work".into(), "".into(), None);
        store.save_category(&cat).unwrap();

        let err = run(&mut store, &cat.id, "".into(), "".into(), None, vec![]);
        assert!(err.is_err());
    }
}
