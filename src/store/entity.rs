//! The generic JSON-backed entity store.

use crate::error::Result;
use crate::model::Record;
use crate::store::document;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

struct Inner<R> {
    records: Vec<R>,
    next_id: u32,
}

/// One JSON-backed collection of records of a single kind.
///
/// The whole collection lives in memory from [`EntityStore::open`]
/// onwards; every mutation is applied under the store's mutex and
/// written through to the backing file before returning. Ids are
/// allocated from a counter that only moves forward, so an id freed by
/// `delete` is never handed out again.
///
/// Each store has its own lock; stores never contend with each other.
pub struct EntityStore<R> {
    path: PathBuf,
    inner: Mutex<Inner<R>>,
}

impl<R> EntityStore<R>
where
    R: Record + Clone + Serialize + DeserializeOwned,
{
    /// Load the collection from `path`, creating the file (as an empty
    /// array) if it does not exist. The id counter starts one past the
    /// highest id found, or at 1 for an empty collection.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<R> = document::load(&path)?;
        let next_id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
        debug!(path = %path.display(), count = records.len(), next_id, "opened entity store");
        Ok(Self {
            path,
            inner: Mutex::new(Inner { records, next_id }),
        })
    }

    /// Snapshot of the current collection. Later mutations do not show
    /// up in a snapshot already handed out.
    pub fn list(&self) -> Vec<R> {
        self.inner.lock().records.clone()
    }

    /// First record with the given id, or `None`. Absence is not an
    /// error here; callers decide how to surface it.
    pub fn get(&self, id: u32) -> Option<R> {
        self.inner
            .lock()
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    /// Append `record` with a freshly allocated id (any id the caller
    /// set is overwritten), persist, and return the stored record.
    pub fn add(&self, mut record: R) -> Result<R> {
        let mut inner = self.inner.lock();
        record.set_id(inner.next_id);
        inner.next_id += 1;
        inner.records.push(record.clone());
        self.persist(&inner.records)?;
        Ok(record)
    }

    /// Replace the first record with id `id` by `record`, forcing the
    /// stored record's id to `id` and keeping its position. A missing id
    /// is a silent no-op; callers that care should `get` first.
    pub fn update(&self, id: u32, mut record: R) -> Result<()> {
        let mut inner = self.inner.lock();
        let Some(slot) = inner.records.iter_mut().find(|r| r.id() == id) else {
            return Ok(());
        };
        record.set_id(id);
        *slot = record;
        self.persist(&inner.records)
    }

    /// Remove every record with id `id` (normally at most one) and
    /// persist. Deleting an id that is not present is not an error.
    pub fn delete(&self, id: u32) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.records.retain(|r| r.id() != id);
        self.persist(&inner.records)
    }

    // Called with the lock held; a failure leaves the in-memory mutation
    // applied, so memory and disk diverge until the next successful
    // persist or a reopen.
    fn persist(&self, records: &[R]) -> Result<()> {
        document::save(&self.path, records).inspect_err(|e| {
            warn!(path = %self.path.display(), error = %e, "persist failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Genre;
    use std::sync::Arc;
    use std::thread;

    fn open_store(dir: &tempfile::TempDir) -> EntityStore<Genre> {
        EntityStore::open(dir.path().join("genres.json")).unwrap()
    }

    #[test]
    fn add_assigns_increasing_ids_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let a = store.add(Genre::new("Horror".into())).unwrap();
        let b = store.add(Genre::new("Sci-fi".into())).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn add_overwrites_caller_supplied_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let mut genre = Genre::new("Horror".into());
        genre.id = 99;
        let stored = store.add(genre).unwrap();
        assert_eq!(stored.id, 1);
        assert!(store.get(99).is_none());
    }

    #[test]
    fn get_after_add_returns_equal_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let stored = store.add(Genre::new("Horror".into())).unwrap();
        assert_eq!(store.get(stored.id), Some(stored));
    }

    #[test]
    fn get_missing_id_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        assert!(store.get(1).is_none());
    }

    #[test]
    fn update_replaces_in_place_and_forces_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        store.add(Genre::new("Horror".into())).unwrap();
        let b = store.add(Genre::new("Sci-fi".into())).unwrap();
        store.add(Genre::new("Poetry".into())).unwrap();

        let mut replacement = Genre::new("Science Fiction".into());
        replacement.id = 42;
        store.update(b.id, replacement).unwrap();

        let all = store.list();
        assert_eq!(all[1].id, b.id);
        assert_eq!(all[1].name, "Science Fiction");
        assert!(store.get(42).is_none());
    }

    #[test]
    fn update_missing_id_leaves_collection_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        store.add(Genre::new("Horror".into())).unwrap();
        store.update(17, Genre::new("Poetry".into())).unwrap();

        let all = store.list();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Horror");
    }

    #[test]
    fn delete_removes_record_and_tolerates_missing_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let a = store.add(Genre::new("Horror".into())).unwrap();
        store.delete(a.id).unwrap();
        assert!(store.get(a.id).is_none());

        store.delete(a.id).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let a = store.add(Genre::new("Horror".into())).unwrap();
        let b = store.add(Genre::new("Sci-fi".into())).unwrap();
        store.delete(b.id).unwrap();
        store.delete(a.id).unwrap();

        let c = store.add(Genre::new("Poetry".into())).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn reopen_restores_records_and_id_counter() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = open_store(&dir);
            store.add(Genre::new("Horror".into())).unwrap();
            store.add(Genre::new("Sci-fi".into())).unwrap();
        }

        let store = open_store(&dir);
        assert_eq!(store.list().len(), 2);
        let c = store.add(Genre::new("Poetry".into())).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn open_fails_on_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genres.json");
        std::fs::write(&path, "{ definitely not an array").unwrap();
        assert!(EntityStore::<Genre>::open(&path).is_err());
    }

    #[test]
    fn concurrent_adds_get_unique_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(open_store(&dir));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let mut ids = Vec::new();
                    for i in 0..10 {
                        let genre = Genre::new(format!("genre-{t}-{i}"));
                        ids.push(store.add(genre).unwrap().id);
                    }
                    ids
                })
            })
            .collect();

        let mut all_ids: Vec<u32> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all_ids.sort_unstable();
        all_ids.dedup();
        assert_eq!(all_ids.len(), 80);
        assert_eq!(store.list().len(), 80);
    }
}
