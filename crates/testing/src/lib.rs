//! Shared fixtures for cross-crate tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use folio_core::{traits::BlobStore, NewProject};
use folio_storage_ephemeral::EphemeralBlobStore;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlakyError {
    #[error("injected read failure")]
    Read,
    #[error("injected write failure")]
    Write,
    #[error(transparent)]
    Inner(#[from] folio_storage_ephemeral::EphemeralError),
}

/// Ephemeral store with switchable read/write failures and a write counter.
#[derive(Default)]
pub struct FlakyBlobStore {
    inner: EphemeralBlobStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &EphemeralBlobStore {
        &self.inner
    }
}

impl BlobStore for FlakyBlobStore {
    type Error = FlakyError;

    fn get_json(&self, key: &str) -> Result<Option<Value>, Self::Error> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(FlakyError::Read);
        }
        Ok(self.inner.get_json(key)?)
    }

    fn put_json(&self, key: &str, value: &Value) -> Result<(), Self::Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FlakyError::Write);
        }
        self.inner.put_json(key, value)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn sample_project(title: &str) -> NewProject {
    NewProject {
        title: title.to_owned(),
        description: format!("{title} description"),
        category: "Branding".to_owned(),
        image_url: format!("https://example.com/{title}.jpg"),
        tags: vec!["Typography".to_owned(), title.to_owned()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{CoreError, Project, ProjectPatch, ProjectStore};
    use std::sync::Arc;

    fn flaky_store() -> ProjectStore<FlakyBlobStore> {
        ProjectStore::new(Arc::new(FlakyBlobStore::new()))
    }

    #[test]
    fn ids_are_one_to_n_in_creation_order() {
        let store = flaky_store();
        for n in 1..=10u64 {
            let p = store.create(sample_project(&format!("p{n}"))).unwrap();
            assert_eq!(p.id, n);
        }
        let ids: Vec<u64> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn list_reflects_each_mutation() {
        let store = flaky_store();
        let a = store.create(sample_project("a")).unwrap();
        assert!(store.list().contains(&a));

        let patch = ProjectPatch {
            description: Some("changed".into()),
            ..Default::default()
        };
        let updated = store.update(a.id, patch).unwrap();
        assert_eq!(store.list(), vec![updated.clone()]);
        assert_eq!(updated.description, "changed");
        assert_eq!(updated.title, a.title);

        store.delete(a.id).unwrap();
        assert!(store.list().iter().all(|p| p.id != a.id));
    }

    #[test]
    fn unreadable_storage_is_never_reseeded_or_overwritten() {
        let store = flaky_store();
        store.create(sample_project("keep")).unwrap();
        store.blob().fail_reads(true);

        assert!(matches!(store.initialize(), Err(CoreError::StorageRead(_))));
        assert!(matches!(
            store.create(sample_project("other")),
            Err(CoreError::StorageRead(_))
        ));
        assert!(matches!(store.delete(1), Err(CoreError::StorageRead(_))));
        let patch = ProjectPatch {
            title: Some("overwritten".into()),
            ..Default::default()
        };
        assert!(matches!(store.update(1, patch), Err(CoreError::StorageRead(_))));
        assert_eq!(store.blob().writes(), 1);

        store.blob().fail_reads(false);
        let titles: Vec<String> = store.list().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["keep".to_string()]);
    }

    #[test]
    fn write_failures_are_distinct_from_not_found() {
        let store = flaky_store();
        store.create(sample_project("a")).unwrap();
        store.blob().fail_writes(true);
        assert!(matches!(
            store.update(1, ProjectPatch::default()),
            Err(CoreError::StorageWrite(_))
        ));
        assert!(matches!(
            store.update(9, ProjectPatch::default()),
            Err(CoreError::NotFound(9))
        ));
        assert!(matches!(store.delete(1), Err(CoreError::StorageWrite(_))));
        store.blob().fail_writes(false);
        assert_eq!(store.get(1).unwrap().title, "a");
    }

    #[test]
    fn whole_key_removal_returns_to_uninitialized() {
        let store = flaky_store();
        let seeded = store.initialize().unwrap();
        assert_eq!(seeded.len(), 6);
        assert!(store.blob().inner().remove(store.key().as_str()));
        assert!(store.list().is_empty());
        assert_eq!(store.initialize().unwrap(), seeded);
    }

    #[test]
    fn stores_with_different_names_are_isolated() {
        let blob = Arc::new(FlakyBlobStore::new());
        let a = ProjectStore::with_logical_name(Arc::clone(&blob), "portfolio_projects");
        let b = ProjectStore::with_logical_name(Arc::clone(&blob), "archive#2024");
        a.initialize().unwrap();
        assert!(b.list().is_empty());
        assert_eq!(b.key().as_str(), "archive2024");
        assert_eq!(blob.inner().keys(), vec!["portfolioprojects".to_string()]);
    }

    #[test]
    fn stored_document_matches_persisted_layout() {
        let store = flaky_store();
        store.create(sample_project("layout")).unwrap();
        let doc = store
            .blob()
            .inner()
            .get_json(store.key().as_str())
            .unwrap()
            .unwrap();
        let records = doc.as_array().unwrap();
        assert_eq!(records.len(), 1);
        let obj = records[0].as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["category", "description", "id", "imageUrl", "tags", "title"]
        );
        let back: Vec<Project> = serde_json::from_value(doc).unwrap();
        assert_eq!(back[0].id, 1);
    }
}
