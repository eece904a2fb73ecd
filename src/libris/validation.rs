//! Field validation for catalog records.
//!
//! Every string field of a [`Book`](crate::model::Book) has a fixed
//! character class. The rules are kept exactly as the on-disk data has always
//! been checked, so files written by earlier versions keep loading:
//!
//! | Field | Rule |
//! |-------|------|
//! | ISBN | exactly 10 or 13 decimal digits |
//! | Author | letters, spaces and periods |
//! | Publication | letters, spaces and periods |
//! | Genre | letters and spaces |
//! | Shelf number | letters, digits and hyphens |
//! | Quantity | an integer that is not negative |
//!
//! Letters and digits are ASCII only. None of the fields may be empty.

use std::fmt;

/// Validates a book ISBN: exactly 10 or 13 ASCII digits.
///
/// # Examples
/// ```
/// use libris::validation::validate_isbn;
///
/// assert!(validate_isbn("0441013597").is_ok());
/// assert!(validate_isbn("9780441013593").is_ok());
///
/// assert!(validate_isbn("123").is_err());
/// assert!(validate_isbn("978-0441013593").is_err());
/// ```
pub fn validate_isbn(isbn: &str) -> Result<(), ValidationError> {
    let is_valid = matches!(isbn.len(), 10 | 13) && isbn.chars().all(|c| c.is_ascii_digit());
    if is_valid {
        Ok(())
    } else {
        Err(ValidationError::Isbn(isbn.to_string()))
    }
}

pub fn validate_author(author: &str) -> Result<(), ValidationError> {
    if only(author, is_name_char) {
        Ok(())
    } else {
        Err(ValidationError::Author(author.to_string()))
    }
}

pub fn validate_publication(publication: &str) -> Result<(), ValidationError> {
    if only(publication, is_name_char) {
        Ok(())
    } else {
        Err(ValidationError::Publication(publication.to_string()))
    }
}

pub fn validate_genre(genre: &str) -> Result<(), ValidationError> {
    if only(genre, |c| c.is_ascii_alphabetic() || c == ' ') {
        Ok(())
    } else {
        Err(ValidationError::Genre(genre.to_string()))
    }
}

pub fn validate_shelf_number(shelf: &str) -> Result<(), ValidationError> {
    if only(shelf, |c| c.is_ascii_alphanumeric() || c == '-') {
        Ok(())
    } else {
        Err(ValidationError::ShelfNumber(shelf.to_string()))
    }
}

/// Parses a quantity typed by a user. Surrounding whitespace and a leading
/// `+` are accepted; negative numbers are not.
pub fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ValidationError::Quantity(raw.to_string()))
}

/// The looser rule applied when a checkout record is built: the ISBN only has
/// to be 10 or 13 characters long, whatever those characters are.
pub fn validate_checkout_isbn(isbn: &str) -> Result<(), ValidationError> {
    if matches!(isbn.chars().count(), 10 | 13) {
        Ok(())
    } else {
        Err(ValidationError::CheckoutIsbn(isbn.to_string()))
    }
}

fn only(value: &str, allowed: impl Fn(char) -> bool) -> bool {
    !value.is_empty() && value.chars().all(allowed)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' ' || c == '.'
}

/// A field that failed validation, carrying the rejected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Isbn(String),
    Author(String),
    Publication(String),
    Genre(String),
    ShelfNumber(String),
    Quantity(String),
    /// ISBN given to a checkout record has the wrong length
    CheckoutIsbn(String),
}

impl ValidationError {
    /// Name of the field that failed, as it appears in the JSON files.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Isbn(_) | ValidationError::CheckoutIsbn(_) => "isbn",
            ValidationError::Author(_) => "author",
            ValidationError::Publication(_) => "publication",
            ValidationError::Genre(_) => "genre",
            ValidationError::ShelfNumber(_) => "shelf_number",
            ValidationError::Quantity(_) => "quantity",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Isbn(v) => {
                write!(f, "Invalid ISBN '{}' (expected 10 or 13 digits)", v)
            }
            ValidationError::Author(v) => write!(
                f,
                "Invalid author name '{}' (only letters, spaces and periods allowed)",
                v
            ),
            ValidationError::Publication(v) => write!(
                f,
                "Invalid publication name '{}' (only letters, spaces and periods allowed)",
                v
            ),
            ValidationError::Genre(v) => write!(
                f,
                "Invalid genre '{}' (only letters and spaces allowed)",
                v
            ),
            ValidationError::ShelfNumber(v) => write!(
                f,
                "Invalid shelf number '{}' (only letters, digits and hyphens allowed)",
                v
            ),
            ValidationError::Quantity(v) => {
                write!(f, "Invalid quantity '{}' (expected a whole number >= 0)", v)
            }
            ValidationError::CheckoutIsbn(v) => write!(
                f,
                "ISBN '{}' must be either 10 or 13 characters long",
                v
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
