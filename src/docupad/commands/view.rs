use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DocumentStore;
use uuid::Uuid;

/// Load documents in full, content included, for a show screen.
pub fn run<S: DocumentStore>(store: &S, ids: &[Uuid]) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for id in ids {
        result.affected_documents.push(store.get_document(id)?);
    }
    Ok(result)
}
