use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DocumentStore;
use uuid::Uuid;

/// The download URL handed out for a shared document. Token validity is
/// checked again at download time, together with the file name.
pub fn shared_link(root_url: &str, token: &Uuid, filename: &str) -> String {
    format!(
        "{}/downloadFile?shared={}&filename={}",
        root_url.trim_end_matches('/'),
        token,
        filename
    )
}

pub fn share<S: DocumentStore>(store: &mut S, id: &Uuid, root_url: &str) -> Result<CmdResult> {
    let mut document = store.get_document(id)?;

    // Re-sharing keeps the existing token so links already handed out stay valid
    let token = document.metadata.shared.unwrap_or_else(Uuid::new_v4);
    document.metadata.shared = Some(token);
    store.save_document(&document)?;

    let link = shared_link(root_url, &token, &document.metadata.name);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Document shared: {}",
        document.metadata.name
    )));
    result.links.push(link);
    result.affected_documents.push(document);
    Ok(result)
}

pub fn unshare<S: DocumentStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let mut document = store.get_document(id)?;
    document.metadata.shared = None;
    store.save_document(&document)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Sharing revoked: {}",
        document.metadata.name
    )));
    result.affected_documents.push(document);
    Ok(result)
}
