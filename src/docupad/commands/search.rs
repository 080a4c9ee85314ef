use crate::commands::CmdResult;
use crate::error::Result;
use crate::listing::DisplayDocument;
use crate::store::DocumentStore;

use super::helpers::indexed_documents;

/// Search over name, description, and category name, the fields the search
/// screen exposes. Name matches rank above description matches, which rank
/// above category matches.
pub fn run<S: DocumentStore>(store: &S, term: &str) -> Result<CmdResult> {
    let listed = indexed_documents(store)?;
    let term_lower = term.to_lowercase();

    let mut matches: Vec<(DisplayDocument, u8)> = listed
        .into_iter()
        .filter_map(|dd| {
            let name_lower = dd.meta.name.to_lowercase();
            let description_lower = dd.meta.description.to_lowercase();
            let category_lower = dd.category_name.to_lowercase();

            let score = if name_lower == term_lower {
                1
            } else if name_lower.contains(&term_lower) {
                2
            } else if description_lower.contains(&term_lower) {
                3
            } else if category_lower.contains(&term_lower) {
                4
            } else {
                return None;
            };

            Some((dd, score))
        })
        .collect();

    matches.sort_by(|(a, score_a), (b, score_b)| {
        score_a
            .cmp(score_b)
            .then_with(|| a.meta.name.cmp(&b.meta.name))
    });

    let listed = matches.into_iter().map(|(dd, _)| dd).collect();
    Ok(CmdResult::default().with_listed_documents(listed))
}
