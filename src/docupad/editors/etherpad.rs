use super::service::{EtherpadClient, PadService};
use super::DocEditor;
use crate::config::EtherpadSettings;
use crate::error::{DocupadError, Result};
use crate::model::{file_extension, Document};
use once_cell::sync::OnceCell;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// Etherpad-backed document editor.
///
/// An instance binds one document (by name) to one pad session in one hosting
/// application (by root URL). The session identifier is a pure function of
/// those two inputs, so reopening the same document lands on the same pad
/// without any identity table.
pub struct EtherPadEditor {
    root_url: String,
    document_name: String,
    settings: Option<EtherpadSettings>,
    client: OnceCell<EtherpadClient>,
}

impl EtherPadEditor {
    pub fn new(
        root_url: String,
        document_name: String,
        settings: Option<EtherpadSettings>,
    ) -> Self {
        Self {
            root_url,
            document_name,
            settings,
            client: OnceCell::new(),
        }
    }

    /// The derived pad identifier: 128-bit digest of the root URL, then the
    /// document name. Reproducible across requests; two root URLs only
    /// collide on the same name by digest collision.
    pub fn pad_id(&self) -> String {
        derive_pad_id(&self.root_url, &self.document_name)
    }

    /// The HTTP client, constructed on first use. Without settings no client
    /// is ever built and every operation fails before touching the network.
    fn client(&self) -> Result<&EtherpadClient> {
        let settings = self.settings.as_ref().ok_or_else(|| {
            DocupadError::Configuration("etherpad service settings are missing".into())
        })?;
        self.client.get_or_try_init(|| EtherpadClient::new(settings))
    }

    /// Extensions this backend can currently handle. A best-effort probe:
    /// any failure, configuration or network, degrades to the empty set so
    /// unrelated editors stay usable.
    pub fn extension_supported(settings: Option<&EtherpadSettings>) -> BTreeSet<String> {
        let settings = match settings {
            Some(settings) => settings,
            None => return BTreeSet::new(),
        };
        match EtherpadClient::new(settings) {
            Ok(client) => probe_extensions(&client),
            Err(err) => {
                tracing::warn!("etherpad capability probe failed: {}", err);
                BTreeSet::new()
            }
        }
    }
}

/// Ask the service whether the configured key is accepted; a working service
/// means plain-text and HTML documents can be edited. Probe failures are
/// swallowed, so a service that is down reads the same as one that was never
/// configured.
fn probe_extensions<S: PadService>(service: &S) -> BTreeSet<String> {
    match service.check_token() {
        Ok(()) => ["txt", "html"].iter().map(|s| s.to_string()).collect(),
        Err(err) => {
            tracing::warn!("etherpad capability probe failed: {}", err);
            BTreeSet::new()
        }
    }
}

impl DocEditor for EtherPadEditor {
    fn extensions_supported(&self) -> BTreeSet<String> {
        Self::extension_supported(self.settings.as_ref())
    }

    fn iframe_fragment(&self) -> String {
        match &self.settings {
            Some(settings) => format!(
                r#"<iframe name="embed_readwrite" src="{}/p/{}" width="100%" height="450"></iframe>"#,
                settings.url.trim_end_matches('/'),
                self.pad_id()
            ),
            None => "<iframe></iframe>".to_string(),
        }
    }

    fn send_content(&self, document: &Document) -> Result<()> {
        push_content(self.client()?, &self.pad_id(), document)
    }

    fn save_content(&self, document: &mut Document) -> Result<()> {
        pull_content(self.client()?, &self.pad_id(), document)
    }

    fn close(&self) -> Result<()> {
        close_pad(self.client()?, &self.pad_id())
    }
}

pub(crate) fn derive_pad_id(root_url: &str, document_name: &str) -> String {
    let digest = Sha256::digest(root_url.as_bytes());
    format!("{}-{}", hex::encode(&digest[..16]), document_name)
}

/// Open the session: create the pad if absent (idempotent), then push local
/// content. Empty content pushes nothing, so an existing pad's content is
/// never clobbered by an empty local draft.
fn push_content<S: PadService>(service: &S, pad_id: &str, document: &Document) -> Result<()> {
    let existing = service.list_pad_ids()?;
    if !existing.iter().any(|id| id == pad_id) {
        service.create_pad(pad_id, &document.metadata.name)?;
    }

    if document.content.is_empty() {
        return Ok(());
    }

    let text = std::str::from_utf8(&document.content).map_err(|_| {
        DocupadError::Api(format!(
            "Document '{}' is not text; only text content can be sent to the pad",
            document.metadata.name
        ))
    })?;

    if file_extension(&document.metadata.name) == "html" {
        service.set_html(pad_id, text)
    } else {
        service.set_text(pad_id, text)
    }
}

/// Pull the pad's current state back into the document buffer, export form
/// selected by extension: `etherpad` takes the service-native interchange
/// export, `html` the rich-text form, anything else plain text.
fn pull_content<S: PadService>(service: &S, pad_id: &str, document: &mut Document) -> Result<()> {
    match file_extension(&document.metadata.name) {
        "etherpad" => document.content = service.export(pad_id, "etherpad")?,
        "html" => document.content = service.get_html(pad_id)?.into_bytes(),
        _ => document.content = service.get_text(pad_id)?.into_bytes(),
    }
    Ok(())
}

/// Delete the remote pad if it exists. A no-op when the pad is already gone,
/// so closing twice is safe.
fn close_pad<S: PadService>(service: &S, pad_id: &str) -> Result<()> {
    let existing = service.list_pad_ids()?;
    if existing.iter().any(|id| id == pad_id) {
        service.delete_pad(pad_id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[derive(Default)]
    struct MockService {
        pads: RefCell<Vec<String>>,
        calls: RefCell<Vec<String>>,
        text: RefCell<HashMap<String, String>>,
        html: RefCell<HashMap<String, String>>,
        export_payload: Vec<u8>,
        reject_token: bool,
    }

    impl MockService {
        fn with_pad(pad_id: &str) -> Self {
            let service = Self::default();
            service.pads.borrow_mut().push(pad_id.to_string());
            service
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl PadService for MockService {
        fn check_token(&self) -> Result<()> {
            self.calls.borrow_mut().push("checkToken".into());
            if self.reject_token {
                return Err(DocupadError::ServiceRejection("no or wrong API Key".into()));
            }
            Ok(())
        }

        fn list_pad_ids(&self) -> Result<Vec<String>> {
            self.calls.borrow_mut().push("listAllPads".into());
            Ok(self.pads.borrow().clone())
        }

        fn create_pad(&self, pad_id: &str, _name: &str) -> Result<()> {
            self.calls.borrow_mut().push("createPad".into());
            self.pads.borrow_mut().push(pad_id.to_string());
            Ok(())
        }

        fn delete_pad(&self, pad_id: &str) -> Result<()> {
            self.calls.borrow_mut().push("deletePad".into());
            self.pads.borrow_mut().retain(|id| id != pad_id);
            Ok(())
        }

        fn set_text(&self, pad_id: &str, text: &str) -> Result<()> {
            self.calls.borrow_mut().push("setText".into());
            self.text.borrow_mut().insert(pad_id.into(), text.into());
            Ok(())
        }

        fn set_html(&self, pad_id: &str, html: &str) -> Result<()> {
            self.calls.borrow_mut().push("setHTML".into());
            self.html.borrow_mut().insert(pad_id.into(), html.into());
            Ok(())
        }

        fn get_text(&self, pad_id: &str) -> Result<String> {
            self.calls.borrow_mut().push("getText".into());
            Ok(self.text.borrow().get(pad_id).cloned().unwrap_or_default())
        }

        fn get_html(&self, pad_id: &str) -> Result<String> {
            self.calls.borrow_mut().push("getHTML".into());
            Ok(self.html.borrow().get(pad_id).cloned().unwrap_or_default())
        }

        fn export(&self, _pad_id: &str, export_type: &str) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push(format!("export:{}", export_type));
            Ok(self.export_payload.clone())
        }
    }

    fn document(name: &str, content: &[u8]) -> Document {
        Document::new(Uuid::new_v4(), name.into(), "".into(), None, content.to_vec())
    }

    #[test]
    fn pad_id_is_deterministic() {
        let a = derive_pad_id("https://app.example", "notes.html");
        let b = derive_pad_id("https://app.example", "notes.html");
        assert_eq!(a, b);
    }

    #[test]
    fn pad_id_changes_with_either_input() {
        let base = derive_pad_id("https://app.example", "notes.html");
        assert_ne!(base, derive_pad_id("https://other.example", "notes.html"));
        assert_ne!(base, derive_pad_id("https://app.example", "other.html"));
    }

    #[test]
    fn pad_id_is_digest_then_name() {
        let id = derive_pad_id("https://app.example", "notes.html");
        assert!(id.ends_with("-notes.html"));
        let digest = &id[..id.len() - "-notes.html".len()];
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn open_creates_pad_once() {
        let service = MockService::default();
        let doc = document("notes.txt", b"hello");

        push_content(&service, "pad-1", &doc).unwrap();
        push_content(&service, "pad-1", &doc).unwrap();

        let creates = service.calls().iter().filter(|c| *c == "createPad").count();
        assert_eq!(creates, 1);
    }

    #[test]
    fn empty_content_is_not_pushed() {
        let service = MockService::with_pad("pad-1");
        service.text.borrow_mut().insert("pad-1".into(), "remote".into());
        let doc = document("notes.txt", b"");

        push_content(&service, "pad-1", &doc).unwrap();

        assert!(!service.calls().iter().any(|c| c == "setText" || c == "setHTML"));
        assert_eq!(service.text.borrow().get("pad-1").unwrap(), "remote");
    }

    #[test]
    fn html_documents_push_rich_text() {
        let service = MockService::default();
        let doc = document("notes.html", b"<p>hi</p>");

        push_content(&service, "pad-1", &doc).unwrap();

        assert!(service.calls().iter().any(|c| c == "setHTML"));
        assert!(!service.calls().iter().any(|c| c == "setText"));
    }

    #[test]
    fn other_documents_push_plain_text() {
        let service = MockService::default();
        let doc = document("notes.md", b"hi");

        push_content(&service, "pad-1", &doc).unwrap();

        assert!(service.calls().iter().any(|c| c == "setText"));
    }

    #[test]
    fn binary_content_is_rejected() {
        let service = MockService::default();
        let doc = document("notes.txt", &[0xff, 0xfe, 0x00]);

        let err = push_content(&service, "pad-1", &doc);
        assert!(matches!(err, Err(DocupadError::Api(_))));
    }

    #[test]
    fn etherpad_extension_pulls_interchange_export() {
        let service = MockService {
            export_payload: b"raw-export".to_vec(),
            ..MockService::default()
        };
        let mut doc = document("minutes.etherpad", b"old");

        pull_content(&service, "pad-1", &mut doc).unwrap();

        assert!(service.calls().iter().any(|c| c == "export:etherpad"));
        assert_eq!(doc.content, b"raw-export");
    }

    #[test]
    fn html_extension_pulls_rich_text() {
        let service = MockService::default();
        service.html.borrow_mut().insert("pad-1".into(), "<p>x</p>".into());
        let mut doc = document("notes.html", b"");

        pull_content(&service, "pad-1", &mut doc).unwrap();

        assert!(service.calls().iter().any(|c| c == "getHTML"));
        assert_eq!(doc.content, b"<p>x</p>");
    }

    #[test]
    fn other_extension_pulls_plain_text() {
        let service = MockService::default();
        service.text.borrow_mut().insert("pad-1".into(), "plain".into());
        let mut doc = document("notes.txt", b"");

        pull_content(&service, "pad-1", &mut doc).unwrap();

        assert!(service.calls().iter().any(|c| c == "getText"));
        assert_eq!(doc.content, b"plain");
    }

    #[test]
    fn close_is_a_noop_for_unknown_pad() {
        let service = MockService::default();

        close_pad(&service, "pad-1").unwrap();

        assert!(!service.calls().iter().any(|c| c == "deletePad"));
    }

    #[test]
    fn close_deletes_existing_pad() {
        let service = MockService::with_pad("pad-1");

        close_pad(&service, "pad-1").unwrap();

        assert!(service.calls().iter().any(|c| c == "deletePad"));
        assert!(service.pads.borrow().is_empty());
    }

    #[test]
    fn no_settings_means_no_capability() {
        assert!(EtherPadEditor::extension_supported(None).is_empty());
    }

    #[test]
    fn successful_probe_advertises_txt_and_html() {
        let service = MockService::default();
        let extensions = probe_extensions(&service);
        let expected: std::collections::BTreeSet<String> =
            ["txt", "html"].iter().map(|s| s.to_string()).collect();
        assert_eq!(extensions, expected);
    }

    #[test]
    fn rejected_probe_degrades_to_no_capability() {
        let service = MockService {
            reject_token: true,
            ..MockService::default()
        };
        assert!(probe_extensions(&service).is_empty());
    }

    #[test]
    fn operations_without_settings_fail_fast() {
        let editor = EtherPadEditor::new("https://app.example".into(), "notes.txt".into(), None);
        let doc = document("notes.txt", b"hi");

        let err = editor.send_content(&doc);
        assert!(matches!(err, Err(DocupadError::Configuration(_))));
        assert!(matches!(editor.close(), Err(DocupadError::Configuration(_))));
    }

    #[test]
    fn iframe_points_at_the_pad() {
        let editor = EtherPadEditor::new(
            "https://app.example".into(),
            "notes.html".into(),
            Some(crate::config::EtherpadSettings {
                url: "https://pad.example".into(),
                apikey: "K".into(),
                timeout_secs: 20,
            }),
        );
        let fragment = editor.iframe_fragment();
        assert!(fragment.contains("https://pad.example/p/"));
        assert!(fragment.contains(&editor.pad_id()));
        assert!(fragment.contains(r#"width="100%" height="450""#));
    }
}
