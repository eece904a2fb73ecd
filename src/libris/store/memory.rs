use super::{Collection, StorageBackend};
use crate::error::{LibrisError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since libris is single-threaded,
/// which lets the `StorageBackend` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    documents: RefCell<HashMap<Collection, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
    failing_collection: Cell<Option<Collection>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw document, as if another process had written it.
    pub fn with_document(self, collection: Collection, contents: &str) -> Self {
        self.documents
            .borrow_mut()
            .insert(collection, contents.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Fail writes to `collection` only; `None` lets every write through.
    pub fn fail_writes_to(&self, collection: Option<Collection>) {
        self.failing_collection.set(collection);
    }

    pub fn document(&self, collection: Collection) -> Option<String> {
        self.documents.borrow().get(&collection).cloned()
    }

    /// Number of successful writes across all collections.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemBackend {
    fn read_document(&self, collection: Collection) -> Result<Option<String>> {
        Ok(self.documents.borrow().get(&collection).cloned())
    }

    fn write_document(&self, collection: Collection, contents: &str) -> Result<()> {
        let failing = self.failing_collection.get() == Some(collection);
        if self.simulate_write_error.get() || failing {
            return Err(LibrisError::Store("Simulated write error".to_string()));
        }
        self.documents
            .borrow_mut()
            .insert(collection, contents.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[test]
    fn test_missing_document_loads_empty() {
        let backend = MemBackend::new();
        let users: Vec<User> = backend.load(Collection::Users).unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_null_and_blank_documents_load_empty() {
        let backend = MemBackend::new()
            .with_document(Collection::Users, "null")
            .with_document(Collection::Checkouts, "  \n");
        let users: Vec<User> = backend.load(Collection::Users).unwrap();
        assert!(users.is_empty());
        let users: Vec<User> = backend.load(Collection::Checkouts).unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_save_replaces_snapshot() {
        let backend = MemBackend::new();
        backend
            .save(Collection::Users, &[User::new("Ada", 1), User::new("Grace", 2)])
            .unwrap();
        backend.save(Collection::Users, &[User::new("Linus", 3)]).unwrap();

        let users: Vec<User> = backend.load(Collection::Users).unwrap();
        assert_eq!(users, vec![User::new("Linus", 3)]);
        assert_eq!(backend.write_count(), 2);
    }

    #[test]
    fn test_collections_are_independent() {
        let backend = MemBackend::new();
        backend.save(Collection::Users, &[User::new("Ada", 1)]).unwrap();
        assert!(backend.document(Collection::Books).is_none());
    }

    #[test]
    fn test_garbage_document_is_an_error() {
        let backend = MemBackend::new().with_document(Collection::Users, "{not json");
        let result: Result<Vec<User>> = backend.load(Collection::Users);
        assert!(matches!(result, Err(LibrisError::Serialization(_))));
    }

    #[test]
    fn test_simulated_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let result = backend.save(Collection::Users, &[User::new("Ada", 1)]);
        assert!(matches!(result, Err(LibrisError::Store(_))));
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn test_write_error_for_one_collection() {
        let backend = MemBackend::new();
        backend.fail_writes_to(Some(Collection::Checkouts));
        backend.save(Collection::Users, &[User::new("Ada", 1)]).unwrap();
        let result = backend.save::<User>(Collection::Checkouts, &[]);
        assert!(matches!(result, Err(LibrisError::Store(_))));

        backend.fail_writes_to(None);
        backend.save::<User>(Collection::Checkouts, &[]).unwrap();
        assert_eq!(backend.write_count(), 2);
    }
}
