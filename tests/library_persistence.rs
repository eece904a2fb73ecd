mod common;

use common::{dune, DUNE};
use libris::api::Library;
use libris::error::LibrisError;
use libris::model::{Book, BookDraft, LoanState};
use libris::store::fs::FsBackend;
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Library<FsBackend> {
    Library::open(FsBackend::new(dir.path().to_path_buf())).unwrap()
}

#[test]
fn test_dune_scenario_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut lib = open(&dir);

    lib.add_book(dune()).unwrap();
    assert_eq!(lib.list_books().books.len(), 1);
    assert_eq!(lib.catalog().lookup(DUNE).unwrap().quantity, 3);

    lib.checkout_book("LIB_USER_1", DUNE).unwrap();
    assert_eq!(lib.catalog().lookup(DUNE).unwrap().quantity, 2);
    assert_eq!(lib.ledger().list()[0].state(), LoanState::OnLoan);

    lib.return_book("LIB_USER_1", DUNE).unwrap();
    assert_eq!(lib.catalog().lookup(DUNE).unwrap().quantity, 3);
    assert_eq!(lib.ledger().list()[0].state(), LoanState::Returned);
}

#[test]
fn test_short_isbn_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let mut lib = open(&dir);

    let draft = BookDraft {
        isbn: "123".to_string(),
        ..dune()
    };
    assert!(matches!(
        lib.add_book(draft),
        Err(LibrisError::Validation(_))
    ));
    assert!(lib.list_books().books.is_empty());
    assert!(!dir.path().join("books.json").exists());
}

#[test]
fn test_checkout_quantity_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut lib = open(&dir);
        lib.add_book(dune()).unwrap();
        lib.checkout_book("LIB_USER_1", DUNE).unwrap();
    }

    let lib = open(&dir);
    assert_eq!(lib.catalog().lookup(DUNE).unwrap().quantity, 2);
    assert_eq!(lib.ledger().on_loan_count(DUNE), 1);

    let on_disk: Vec<Book> =
        serde_json::from_str(&fs::read_to_string(dir.path().join("books.json")).unwrap()).unwrap();
    assert_eq!(on_disk[0].quantity, 2);
}

#[test]
fn test_user_ids_do_not_repeat_after_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut lib = open(&dir);
        lib.add_user("Paul").unwrap();
        lib.add_user("Chani").unwrap();
    }

    let mut lib = open(&dir);
    let result = lib.add_user("Stilgar").unwrap();
    assert_eq!(result.users[0].user_id, "LIB_USER_3");

    let ids: Vec<&str> = lib
        .directory()
        .list()
        .iter()
        .map(|u| u.user_id.as_str())
        .collect();
    assert_eq!(ids, vec!["LIB_USER_1", "LIB_USER_2", "LIB_USER_3"]);
}

#[test]
fn test_return_after_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut lib = open(&dir);
        lib.add_book(dune()).unwrap();
        lib.checkout_book("LIB_USER_1", DUNE).unwrap();
    }

    let mut lib = open(&dir);
    lib.return_book("LIB_USER_1", DUNE).unwrap();
    assert!(matches!(
        lib.return_book("LIB_USER_1", DUNE),
        Err(LibrisError::LoanNotFound { .. })
    ));

    let lib = open(&dir);
    assert_eq!(lib.catalog().lookup(DUNE).unwrap().quantity, 3);
    assert_eq!(lib.ledger().on_loan_count(DUNE), 0);
}

#[test]
fn test_corrupt_catalog_fails_to_open() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("books.json"), "[{\"title\": \"Dune\"}]").unwrap();

    let result = Library::open(FsBackend::new(dir.path().to_path_buf()));
    assert!(matches!(result, Err(LibrisError::Serialization(_))));
}
