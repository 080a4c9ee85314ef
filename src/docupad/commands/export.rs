use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DocumentStore;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use super::helpers::indexed_documents;

pub fn run<S: DocumentStore>(store: &S, ids: &[Uuid], out_dir: &Path) -> Result<CmdResult> {
    // 1. Resolve documents: explicit ids, or everything
    let entries = resolve_entries(store, ids)?;

    if entries.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No documents to export."));
        return Ok(result);
    }

    // 2. Prepare output file
    let now = Utc::now();
    let filename = format!("docupad-{}.tar.gz", now.format("%Y-%m-%d_%H%M%S"));
    let path = out_dir.join(&filename);
    let file = File::create(&path)?;

    // 3. Write archive
    write_archive(file, &entries)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} documents to {}",
        entries.len(),
        path.display()
    )));
    result.document_paths.push(path);
    Ok(result)
}

/// (archive entry name, content) pairs, grouped by category directory.
fn resolve_entries<S: DocumentStore>(
    store: &S,
    ids: &[Uuid],
) -> Result<Vec<(String, Vec<u8>)>> {
    let listed = indexed_documents(store)?;
    let mut entries = Vec::new();
    for dd in listed {
        if !ids.is_empty() && !ids.contains(&dd.meta.id) {
            continue;
        }
        let document = store.get_document(&dd.meta.id)?;
        let entry_name = format!(
            "docupad/{}/{}",
            sanitize_filename(&dd.category_name),
            sanitize_filename(&document.metadata.name)
        );
        entries.push((entry_name, document.content));
    }
    Ok(entries)
}

fn write_archive<W: Write>(writer: W, entries: &[(String, Vec<u8>)]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for (entry_name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_slice())?;
    }

    tar.finish()?;
    Ok(())
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::model::Category;
    use crate::store::memory::InMemoryStore;
    use crate::store::DocumentStore;

    #[test]
    fn resolve_entries_groups_by_category() {
        let mut store = InMemoryStore::new();
        let cat = Category::new("work".into(), "".into(), None);
        store.save_category(&cat).unwrap();
        create::run(
            &mut store,
            &cat.id,
            "a.txt".into(),
            "".into(),
            None,
            b"x".to_vec(),
        )
        .unwrap();

        let entries = resolve_entries(&store, &[]).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "docupad/work/a.txt");
        assert_eq!(entries[0].1, b"x");
    }

    #[test]
    fn write_archive_produces_gzip() {
        let entries = vec![("docupad/work/a.txt".to_string(), b"content".to_vec())];
        let mut buf = Vec::new();
        write_archive(&mut buf, &entries).unwrap();

        assert!(!buf.is_empty());
        // Gzip header magic is 1f 8b
        assert_eq!(buf[0], 0x1f);
        assert_eq!(buf[1], 0x8b);
    }

    #[test]
    fn sanitize_keeps_dots_and_replaces_separators() {
        assert_eq!(sanitize_filename("a.txt"), "a.txt");
        assert_eq!(sanitize_filename("foo/bar"), "foo_bar");
        assert_eq!(sanitize_filename("baz\\qux"), "baz_qux");
    }
}
