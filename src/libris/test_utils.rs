use crate::model::BookDraft;

/// The draft used throughout the tests: three copies of Dune on shelf SF-12.
pub fn dune() -> BookDraft {
    BookDraft {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        isbn: "9780441013593".to_string(),
        publication: "Ace Books".to_string(),
        genre: "Science Fiction".to_string(),
        shelf_number: "SF-12".to_string(),
        quantity: "3".to_string(),
    }
}
