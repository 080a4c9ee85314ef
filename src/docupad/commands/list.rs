use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DocumentStore;
use uuid::Uuid;

use super::helpers::indexed_documents;

pub fn run<S: DocumentStore>(store: &S, category: Option<&Uuid>) -> Result<CmdResult> {
    let mut listed = indexed_documents(store)?;
    if let Some(category) = category {
        listed.retain(|d| d.meta.category == *category);
    }
    Ok(CmdResult::default().with_listed_documents(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::model::Category;
    use crate::store::memory::InMemoryStore;
    use crate::store::DocumentStore;

    #[test]
    fn lists_all_or_by_category() {
        let mut store = InMemoryStore::new();
        let work = Category::new("work".into(), "".into(), None);
        let admin = Category::new("admin".into(), "".into(), None);
        store.save_category(&work).unwrap();
        store.save_category(&admin).unwrap();
        create::run(&mut store, &work.id, "a.txt".into(), "".into(), None, vec![]).unwrap();
        create::run(&mut store, &admin.id, "b.txt".into(), "".into(), None, vec![]).unwrap();

        let all = run(&store, None).unwrap();
        assert_eq!(all.listed_documents.len(), 2);

        let filtered = run(&store, Some(&work.id)).unwrap();
        assert_eq!(filtered.listed_documents.len(), 1);
        assert_eq!(filtered.listed_documents[0].meta.name, "a.txt");
    }
}
