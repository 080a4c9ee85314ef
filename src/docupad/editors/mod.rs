//! # Editor Registry & Dispatch
//!
//! Maps a document to the editor backends able to handle it, and lets each
//! backend self-report availability.
//!
//! Backends form a closed, statically registered set: [`EditorKind::ALL`].
//! Adding a remote editing backend means adding a variant there and
//! implementing [`DocEditor`]; dispatch logic does not change. Each backend
//! declares what it can do ([`DocEditor::extensions_supported`]) and whether
//! it currently can: for a remote-service-backed editor that declaration is a
//! best-effort network probe, so a service that is down, misconfigured, or
//! unauthorized simply advertises no extensions instead of failing callers.

use crate::config::DocupadConfig;
use crate::error::Result;
use crate::model::Document;
use std::collections::BTreeSet;

pub mod etherpad;
pub mod service;

pub use etherpad::EtherPadEditor;

/// A document editor bound to one document in one hosting application.
///
/// The default implementations are the "no remote backend" behavior: no
/// capability, an empty embeddable fragment, and no-op session operations.
pub trait DocEditor {
    /// Extensions this editor can handle under its current configuration.
    /// Capability discovery never fails outward; it degrades to empty.
    fn extensions_supported(&self) -> BTreeSet<String>;

    /// True if the document's file-name extension is in this editor's
    /// supported set.
    fn is_managed(&self, document_name: &str) -> bool {
        self.extensions_supported()
            .iter()
            .any(|ext| document_name.ends_with(&format!(".{}", ext)))
    }

    /// Embeddable markup pointing at the editing view. Full width, fixed
    /// height; empty fragment when no remote backend is configured.
    fn iframe_fragment(&self) -> String {
        "<iframe></iframe>".to_string()
    }

    /// Open the remote session and push local content into it.
    fn send_content(&self, _document: &Document) -> Result<()> {
        Ok(())
    }

    /// Pull the remote session's content back into the document buffer.
    fn save_content(&self, _document: &mut Document) -> Result<()> {
        Ok(())
    }

    /// Tear down the remote session. Idempotent.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// The closed set of known editor backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    EtherPad,
}

impl EditorKind {
    /// Every registered backend, in selection-priority order: when several
    /// backends could claim a document, the first match wins.
    pub const ALL: &'static [EditorKind] = &[EditorKind::EtherPad];

    pub fn label(&self) -> &'static str {
        match self {
            EditorKind::EtherPad => "etherpad",
        }
    }

    /// Instantiate this backend bound to one document name.
    pub fn editor(&self, config: &DocupadConfig, document_name: &str) -> Box<dyn DocEditor> {
        match self {
            EditorKind::EtherPad => Box::new(EtherPadEditor::new(
                config.root_url.clone(),
                document_name.to_string(),
                config.etherpad.clone(),
            )),
        }
    }

    /// Probe the extensions this backend currently supports.
    pub fn extensions_supported(&self, config: &DocupadConfig) -> BTreeSet<String> {
        match self {
            EditorKind::EtherPad => EtherPadEditor::extension_supported(config.etherpad.as_ref()),
        }
    }
}

/// Union of supported extensions over all registered backends. Used to
/// decide whether to offer "open in editor" at all.
pub fn all_supported_extensions(config: &DocupadConfig) -> BTreeSet<String> {
    let mut extensions = BTreeSet::new();
    for kind in EditorKind::ALL {
        extensions.extend(kind.extensions_supported(config));
    }
    extensions
}

/// The first registered backend that manages the given document name, if any.
pub fn editor_for(config: &DocupadConfig, document_name: &str) -> Option<Box<dyn DocEditor>> {
    for kind in EditorKind::ALL {
        let editor = kind.editor(config, document_name);
        if editor.is_managed(document_name) {
            return Some(editor);
        }
    }
    None
}
