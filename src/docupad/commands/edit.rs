use crate::commands::{CmdMessage, CmdResult};
use crate::config::DocupadConfig;
use crate::editors::{self, DocEditor, EditorKind};
use crate::error::{DocupadError, Result};
use crate::store::DocumentStore;
use chrono::Utc;
use uuid::Uuid;

/// Open an editing session: push the document's content to the remote pad
/// and return the embeddable view fragment.
pub fn open<S: DocumentStore>(
    store: &S,
    config: &DocupadConfig,
    id: &Uuid,
) -> Result<CmdResult> {
    let document = store.get_document(id)?;
    let editor = require_editor(config, &document.metadata.name)?;

    editor.send_content(&document)?;

    let mut result = CmdResult::default();
    result.fragments.push(editor.iframe_fragment());
    result.add_message(CmdMessage::success(format!(
        "Editing session opened: {}",
        document.metadata.name
    )));
    result.affected_documents.push(document);
    Ok(result)
}

/// Pull the remote pad's content back into the document. The store is only
/// written after a successful pull, so a failed sync leaves the document
/// untouched.
pub fn sync<S: DocumentStore>(
    store: &mut S,
    config: &DocupadConfig,
    id: &Uuid,
    modifier: Option<String>,
) -> Result<CmdResult> {
    let mut document = store.get_document(id)?;
    let editor = require_editor(config, &document.metadata.name)?;

    editor.save_content(&mut document)?;

    if modifier.is_some() {
        document.metadata.modifier = modifier;
    }
    document.metadata.date_modified = Utc::now();
    store.save_document(&document)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Document synchronized from editor: {}",
        document.metadata.name
    )));
    result.affected_documents.push(document);
    Ok(result)
}

/// Tear down the remote session. Safe to call when no session exists.
pub fn close<S: DocumentStore>(
    store: &S,
    config: &DocupadConfig,
    id: &Uuid,
) -> Result<CmdResult> {
    let document = store.get_document(id)?;
    let editor = require_editor(config, &document.metadata.name)?;

    editor.close()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Editing session closed: {}",
        document.metadata.name
    )));
    Ok(result)
}

/// Per-backend capability report, one line per registered editor.
pub fn capabilities(config: &DocupadConfig) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for kind in EditorKind::ALL {
        let extensions = kind.extensions_supported(config);
        if extensions.is_empty() {
            result.add_message(CmdMessage::warning(format!(
                "{}: no extensions available",
                kind.label()
            )));
        } else {
            let list: Vec<String> = extensions.into_iter().collect();
            result.add_message(CmdMessage::info(format!(
                "{}: {}",
                kind.label(),
                list.join(", ")
            )));
        }
    }
    Ok(result)
}

fn require_editor(config: &DocupadConfig, document_name: &str) -> Result<Box<dyn DocEditor>> {
    editors::editor_for(config, document_name).ok_or_else(|| {
        DocupadError::Api(format!(
            "No editor available for '{}'",
            document_name
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::model::Category;
    use crate::store::memory::InMemoryStore;
    use crate::store::DocumentStore;

    fn seeded() -> (InMemoryStore, Uuid) {
        let mut store = InMemoryStore::new();
        let cat = Category::new("work".into(), "".into(), None);
        store.save_category(&cat).unwrap();
        let created = create::run(
            &mut store,
            &cat.id,
            "notes.html".into(),
            "".into(),
            None,
            b"<p>x</p>".to_vec(),
        )
        .unwrap();
        (store, created.affected_documents[0].metadata.id)
    }

    #[test]
    fn open_without_any_configured_editor_fails() {
        let (store, id) = seeded();
        let config = DocupadConfig::default();

        let err = open(&store, &config, &id);
        assert!(matches!(err, Err(DocupadError::Api(_))));
    }

    #[test]
    fn sync_failure_leaves_document_untouched() {
        let (mut store, id) = seeded();
        let config = DocupadConfig::default();
        let before = store.get_document(&id).unwrap();

        assert!(sync(&mut store, &config, &id, Some("bob".into())).is_err());

        let after = store.get_document(&id).unwrap();
        assert_eq!(after.content, before.content);
        assert_eq!(after.metadata.date_modified, before.metadata.date_modified);
    }

    #[test]
    fn capabilities_report_unavailable_backends() {
        let config = DocupadConfig::default();
        let result = capabilities(&config).unwrap();
        assert_eq!(result.messages.len(), EditorKind::ALL.len());
        assert!(result.messages[0].content.contains("no extensions available"));
    }
}
