//! The book catalog: validated book records in insertion order.
//!
//! Lookups are linear scans and the first record with a matching ISBN wins.
//! ISBN uniqueness is not enforced, so adding the same ISBN twice leaves the
//! later record unreachable by lookup (it still shows in [`BookCatalog::list`]).

use crate::error::{LibrisError, Result};
use crate::model::{Book, BookDraft};
use crate::store::{Collection, StorageBackend};
use tracing::{debug, info};

/// What the checkout ledger needs from the catalog.
pub trait Inventory {
    fn lookup(&self, isbn: &str) -> Option<&Book>;

    /// Overwrite the stored quantity of a book and persist the change.
    fn update_quantity<S: StorageBackend>(
        &mut self,
        store: &S,
        isbn: &str,
        quantity: u32,
    ) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct BookCatalog {
    books: Vec<Book>,
}

impl BookCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the in-memory catalog with the stored snapshot.
    pub fn load<S: StorageBackend>(&mut self, store: &S) -> Result<()> {
        self.books = store.load(Collection::Books)?;
        debug!(count = self.books.len(), "catalog loaded");
        Ok(())
    }

    /// Validate and append a book, then persist the whole catalog.
    ///
    /// Nothing is stored and nothing is written if any field is invalid.
    pub fn add<S: StorageBackend>(&mut self, store: &S, draft: BookDraft) -> Result<&Book> {
        let book = Book::try_from(draft)?;
        self.books.push(book);
        if let Err(e) = self.save(store) {
            self.books.pop();
            return Err(e);
        }

        let book = &self.books[self.books.len() - 1];
        info!(isbn = %book.isbn, title = %book.title, quantity = book.quantity, "book added");
        Ok(book)
    }

    pub fn lookup(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn == isbn)
    }

    pub fn update_quantity<S: StorageBackend>(
        &mut self,
        store: &S,
        isbn: &str,
        quantity: u32,
    ) -> Result<()> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or_else(|| LibrisError::BookNotFound(isbn.to_string()))?;
        let previous = book.quantity;
        book.quantity = quantity;

        if let Err(e) = self.save(store) {
            if let Some(book) = self.books.iter_mut().find(|b| b.isbn == isbn) {
                book.quantity = previous;
            }
            return Err(e);
        }
        debug!(isbn, previous, quantity, "quantity updated");
        Ok(())
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn save<S: StorageBackend>(&self, store: &S) -> Result<()> {
        store.save(Collection::Books, &self.books)
    }
}

impl Inventory for BookCatalog {
    fn lookup(&self, isbn: &str) -> Option<&Book> {
        BookCatalog::lookup(self, isbn)
    }

    fn update_quantity<S: StorageBackend>(
        &mut self,
        store: &S,
        isbn: &str,
        quantity: u32,
    ) -> Result<()> {
        BookCatalog::update_quantity(self, store, isbn, quantity)
    }
}
