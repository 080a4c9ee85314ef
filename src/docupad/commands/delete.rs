use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DocumentStore;
use uuid::Uuid;

pub fn run<S: DocumentStore>(store: &mut S, ids: &[Uuid]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for id in ids {
        let document = store.get_document(id)?;
        store.delete_document(id)?;
        result.add_message(CmdMessage::success(format!(
            "Document deleted: {}",
            document.metadata.name
        )));
        result.affected_documents.push(document);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::model::Category;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn deletes_documents_permanently() {
        let mut store = InMemoryStore::new();
        let cat = Category::new("work".into(), "".into(), None);
        store.save_category(&cat).unwrap();
        let created =
            create::run(&mut store, &cat.id, "a.txt".into(), "".into(), None, vec![]).unwrap();
        let id = created.affected_documents[0].metadata.id;

        run(&mut store, &[id]).unwrap();

        assert!(store.get_document(&id).is_err());
        assert!(store.list_documents().unwrap().is_empty());
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut store = InMemoryStore::new();
        assert!(run(&mut store, &[Uuid::new_v4()]).is_err());
    }
}
