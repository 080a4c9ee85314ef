use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DocupadError, Result};
use crate::store::DocumentStore;
use uuid::Uuid;

pub fn by_id<S: DocumentStore>(store: &S, id: &Uuid) -> Result<CmdResult> {
    let document = store.get_document(id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Downloading {} ({} bytes)",
        document.metadata.name,
        document.content.len()
    )));
    result.affected_documents.push(document);
    Ok(result)
}

/// Token-gated download behind a shared link. Both the token and the file
/// name must match; either mismatch is reported as not found, so a leaked
/// token cannot be used to enumerate document names.
pub fn by_token<S: DocumentStore>(store: &S, token: &Uuid, filename: &str) -> Result<CmdResult> {
    let meta = store
        .list_documents()?
        .into_iter()
        .find(|m| m.shared == Some(*token) && m.name == filename)
        .ok_or_else(|| DocupadError::Api("No shared document matches this link".into()))?;

    by_id(store, &meta.id)
}
