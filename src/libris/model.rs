use crate::validation::{
    parse_quantity, validate_author, validate_checkout_isbn, validate_genre, validate_isbn,
    validate_publication, validate_shelf_number, ValidationError,
};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub const USER_ID_PREFIX: &str = "LIB_USER_";

/// A catalog entry. Only built through [`BookDraft`] (or deserialization,
/// which goes through the same checks), so every field matches its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookRecord")]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication: String,
    pub genre: String,
    pub shelf_number: String,
    pub quantity: u32,
}

/// Unvalidated book fields, as typed into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication: String,
    pub genre: String,
    pub shelf_number: String,
    pub quantity: String,
}

impl TryFrom<BookDraft> for Book {
    type Error = ValidationError;

    fn try_from(draft: BookDraft) -> Result<Self, Self::Error> {
        validate_isbn(&draft.isbn)?;
        validate_author(&draft.author)?;
        validate_publication(&draft.publication)?;
        validate_genre(&draft.genre)?;
        validate_shelf_number(&draft.shelf_number)?;
        let quantity = parse_quantity(&draft.quantity)?;

        Ok(Book {
            title: draft.title,
            author: draft.author,
            isbn: draft.isbn,
            publication: draft.publication,
            genre: draft.genre,
            shelf_number: draft.shelf_number,
            quantity,
        })
    }
}

// Older files may hold the quantity as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
struct BookRecord {
    title: String,
    author: String,
    isbn: String,
    publication: String,
    genre: String,
    shelf_number: String,
    quantity: RawQuantity,
}

impl TryFrom<BookRecord> for Book {
    type Error = ValidationError;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        let quantity = match record.quantity {
            RawQuantity::Number(n) => n.to_string(),
            RawQuantity::Text(s) => s,
        };
        Book::try_from(BookDraft {
            title: record.title,
            author: record.author,
            isbn: record.isbn,
            publication: record.publication,
            genre: record.genre,
            shelf_number: record.shelf_number,
            quantity,
        })
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Author: {}, ISBN: {}, Publication: {}, Genre: {}, Shelf Number: {}, Quantity: {}",
            self.title,
            self.author,
            self.isbn,
            self.publication,
            self.genre,
            self.shelf_number,
            self.quantity
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub user_id: String,
}

impl User {
    pub fn new(name: impl Into<String>, number: u64) -> Self {
        Self {
            name: name.into(),
            user_id: format_user_id(number),
        }
    }

    /// The sequence number embedded in the identifier, if it has the
    /// `LIB_USER_<n>` shape.
    pub fn number(&self) -> Option<u64> {
        parse_user_number(&self.user_id)
    }
}

pub fn format_user_id(number: u64) -> String {
    format!("{}{}", USER_ID_PREFIX, number)
}

pub fn parse_user_number(user_id: &str) -> Option<u64> {
    user_id.strip_prefix(USER_ID_PREFIX)?.parse().ok()
}

/// Where a single loan stands. `OnLoan -> Returned` is the only transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LoanState {
    #[default]
    OnLoan,
    Returned,
}

impl LoanState {
    pub fn is_returned(self) -> bool {
        self == LoanState::Returned
    }
}

impl From<bool> for LoanState {
    fn from(returned: bool) -> Self {
        if returned {
            LoanState::Returned
        } else {
            LoanState::OnLoan
        }
    }
}

impl fmt::Display for LoanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanState::OnLoan => write!(f, "on loan"),
            LoanState::Returned => write!(f, "returned"),
        }
    }
}

/// A loan of one copy of a book to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CheckoutRecord")]
pub struct Checkout {
    pub user_id: String,
    pub isbn: String,
    #[serde(rename = "returned", serialize_with = "serialize_returned")]
    state: LoanState,
}

impl Checkout {
    /// Starts a new loan. The ISBN must be 10 or 13 characters long.
    pub fn new(
        user_id: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::with_state(user_id.into(), isbn.into(), LoanState::OnLoan)
    }

    fn with_state(user_id: String, isbn: String, state: LoanState) -> Result<Self, ValidationError> {
        validate_checkout_isbn(&isbn)?;
        Ok(Self {
            user_id,
            isbn,
            state,
        })
    }

    pub fn state(&self) -> LoanState {
        self.state
    }

    pub fn is_on_loan(&self) -> bool {
        self.state == LoanState::OnLoan
    }

    pub fn mark_returned(&mut self) {
        self.state = LoanState::Returned;
    }
}

#[derive(Deserialize)]
struct CheckoutRecord {
    user_id: String,
    isbn: String,
    #[serde(default)]
    returned: bool,
}

impl TryFrom<CheckoutRecord> for Checkout {
    type Error = ValidationError;

    fn try_from(record: CheckoutRecord) -> Result<Self, Self::Error> {
        Checkout::with_state(record.user_id, record.isbn, record.returned.into())
    }
}

fn serialize_returned<S: Serializer>(state: &LoanState, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_bool(state.is_returned())
}
