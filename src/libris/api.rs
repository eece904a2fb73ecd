//! # API Facade
//!
//! [`Library`] is the single entry point for every libris operation,
//! whichever UI is driving it. It owns the storage backend and the three
//! managers, dispatches to them, and wraps their results in a [`CmdResult`].
//!
//! The facade does no printing and no business logic of its own: validation
//! belongs to [`model`](crate::model), availability rules to
//! [`ledger`](crate::ledger). Not-found and not-available outcomes come back
//! as `Err` so a UI can decide whether to report and carry on (the menu) or
//! stop (a one-shot subcommand).
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `Library<FsBackend>`
//! - Testing: `Library<MemBackend>`

use crate::catalog::BookCatalog;
use crate::directory::UserDirectory;
use crate::error::{LibrisError, Result};
use crate::ledger::CheckoutLedger;
use crate::model::{Book, BookDraft, Checkout, User};
use crate::store::StorageBackend;

pub struct Library<S: StorageBackend> {
    store: S,
    catalog: BookCatalog,
    directory: UserDirectory,
    ledger: CheckoutLedger,
}

impl<S: StorageBackend> Library<S> {
    /// Build a library over `store` and load all three collections from it.
    pub fn open(store: S) -> Result<Self> {
        let mut library = Self {
            store,
            catalog: BookCatalog::new(),
            directory: UserDirectory::new(),
            ledger: CheckoutLedger::new(),
        };
        library.reload()?;
        Ok(library)
    }

    /// Discard in-memory state and read every collection back from storage.
    pub fn reload(&mut self) -> Result<()> {
        self.catalog.load(&self.store)?;
        self.directory.load(&self.store)?;
        self.ledger.load(&self.store)?;
        Ok(())
    }

    pub fn add_book(&mut self, draft: BookDraft) -> Result<CmdResult> {
        let book = self.catalog.add(&self.store, draft)?.clone();
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!("Book added: {}", book.title)));
        Ok(result.with_books(vec![book]))
    }

    pub fn find_book(&self, isbn: &str) -> Result<CmdResult> {
        let book = self
            .catalog
            .lookup(isbn)
            .ok_or_else(|| LibrisError::BookNotFound(isbn.to_string()))?;
        Ok(CmdResult::default().with_books(vec![book.clone()]))
    }

    pub fn list_books(&self) -> CmdResult {
        CmdResult::default().with_books(self.catalog.list().to_vec())
    }

    pub fn add_user(&mut self, name: &str) -> Result<CmdResult> {
        let user = self.directory.add(&self.store, name)?.clone();
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "User added: {} ({})",
            user.name, user.user_id
        )));
        Ok(result.with_users(vec![user]))
    }

    pub fn list_users(&self) -> CmdResult {
        CmdResult::default().with_users(self.directory.list().to_vec())
    }

    pub fn checkout_book(&mut self, user_id: &str, isbn: &str) -> Result<CmdResult> {
        let checkout = self
            .ledger
            .checkout_book(&mut self.catalog, &self.store, user_id, isbn)?
            .clone();

        let mut result = CmdResult::default();
        if self.directory.lookup(user_id).is_none() {
            result.add_message(CmdMessage::warning(format!(
                "{} is not a registered user",
                user_id
            )));
        }
        result.add_message(CmdMessage::success("Book checked out."));
        Ok(result.with_checkouts(vec![checkout]))
    }

    pub fn return_book(&mut self, user_id: &str, isbn: &str) -> Result<CmdResult> {
        let checkout = self
            .ledger
            .return_book(&mut self.catalog, &self.store, user_id, isbn)?
            .clone();
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success("Book returned successfully."));
        Ok(result.with_checkouts(vec![checkout]))
    }

    /// All loans, or only those of one user.
    pub fn list_checkouts(&self, user_id: Option<&str>) -> CmdResult {
        let checkouts = match user_id {
            Some(id) => self.ledger.loans_for(id).cloned().collect(),
            None => self.ledger.list().to_vec(),
        };
        CmdResult::default().with_checkouts(checkouts)
    }

    pub fn catalog(&self) -> &BookCatalog {
        &self.catalog
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn ledger(&self) -> &CheckoutLedger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub books: Vec<Book>,
    pub users: Vec<User>,
    pub checkouts: Vec<Checkout>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_books(mut self, books: Vec<Book>) -> Self {
        self.books = books;
        self
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn with_checkouts(mut self, checkouts: Vec<Checkout>) -> Self {
        self.checkouts = checkouts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LoanState;
    use crate::store::memory::MemBackend;
    use crate::store::Collection;
    use crate::test_utils::dune;

    const DUNE: &str = "9780441013593";

    fn library() -> Library<MemBackend> {
        Library::open(MemBackend::new()).unwrap()
    }

    #[test]
    fn test_add_book_returns_record_and_message() {
        let mut lib = library();
        let result = lib.add_book(dune()).unwrap();
        assert_eq!(result.books.len(), 1);
        assert_eq!(result.books[0].quantity, 3);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(lib.list_books().books.len(), 1);
    }

    #[test]
    fn test_invalid_book_writes_nothing() {
        let mut lib = library();
        let draft = BookDraft {
            isbn: "123".to_string(),
            ..dune()
        };
        assert!(matches!(
            lib.add_book(draft),
            Err(LibrisError::Validation(_))
        ));
        assert!(lib.list_books().books.is_empty());
        assert!(lib.store().document(Collection::Books).is_none());
    }

    #[test]
    fn test_find_book() {
        let mut lib = library();
        lib.add_book(dune()).unwrap();
        assert_eq!(lib.find_book(DUNE).unwrap().books[0].title, "Dune");
        assert!(matches!(
            lib.find_book("0441013597"),
            Err(LibrisError::BookNotFound(_))
        ));
    }

    #[test]
    fn test_dune_scenario() {
        let mut lib = library();
        lib.add_book(dune()).unwrap();
        let user_id = lib.add_user("Paul").unwrap().users[0].user_id.clone();
        assert_eq!(user_id, "LIB_USER_1");

        let result = lib.checkout_book(&user_id, DUNE).unwrap();
        assert_eq!(result.checkouts[0].state(), LoanState::OnLoan);
        assert_eq!(lib.catalog().lookup(DUNE).unwrap().quantity, 2);
        assert_eq!(lib.ledger().list().len(), 1);

        let result = lib.return_book(&user_id, DUNE).unwrap();
        assert_eq!(result.checkouts[0].state(), LoanState::Returned);
        assert_eq!(lib.catalog().lookup(DUNE).unwrap().quantity, 3);
    }

    #[test]
    fn test_checkout_by_unregistered_user_warns() {
        let mut lib = library();
        lib.add_book(dune()).unwrap();
        let result = lib.checkout_book("LIB_USER_99", DUNE).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[1].level, MessageLevel::Success);
    }

    #[test]
    fn test_state_survives_reopen() {
        let mut lib = library();
        lib.add_book(dune()).unwrap();
        lib.add_user("Paul").unwrap();
        lib.checkout_book("LIB_USER_1", DUNE).unwrap();

        let store = MemBackend::new();
        for collection in [Collection::Books, Collection::Users, Collection::Checkouts] {
            let doc = lib.store().document(collection).unwrap();
            store.write_document(collection, &doc).unwrap();
        }

        let mut reopened = Library::open(store).unwrap();
        assert_eq!(reopened.catalog().lookup(DUNE).unwrap().quantity, 2);
        assert_eq!(reopened.list_checkouts(Some("LIB_USER_1")).checkouts.len(), 1);
        assert_eq!(
            reopened.add_user("Chani").unwrap().users[0].user_id,
            "LIB_USER_2"
        );
    }

    #[test]
    fn test_list_checkouts_filter() {
        let mut lib = library();
        lib.add_book(dune()).unwrap();
        lib.checkout_book("LIB_USER_1", DUNE).unwrap();
        lib.checkout_book("LIB_USER_2", DUNE).unwrap();

        assert_eq!(lib.list_checkouts(None).checkouts.len(), 2);
        assert_eq!(lib.list_checkouts(Some("LIB_USER_2")).checkouts.len(), 1);
    }
}
