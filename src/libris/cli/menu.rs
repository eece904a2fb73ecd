//! The numbered interactive menu.
//!
//! Choices are fixed: 1 add book, 2 list books, 3 add user, 4 checkout book,
//! 5 exit. Anything else reprints the menu. Validation, not-found and
//! not-available errors are shown and the loop carries on; storage errors end
//! it. End of input behaves like choosing exit.

use super::print::{print_books, print_error, print_messages};
use libris::api::Library;
use libris::error::{LibrisError, Result};
use libris::model::BookDraft;
use libris::store::StorageBackend;
use std::io::{BufRead, Write};

const MENU: &str = "
Library Management System
1. Add Book
2. List Books
3. Add User
4. Checkout Book
5. Exit";

pub(super) fn run_menu<S, R, W>(library: &mut Library<S>, mut input: R, out: &mut W) -> Result<()>
where
    S: StorageBackend,
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = prompt(&mut input, out, "Enter choice: ")? else {
            break;
        };

        let outcome = match choice.trim() {
            "1" => match read_book(&mut input, out)? {
                Some(draft) => library.add_book(draft),
                None => break,
            },
            "2" => {
                print_books(out, &library.list_books().books)?;
                continue;
            }
            "3" => match prompt(&mut input, out, "Enter user name: ")? {
                Some(name) => library.add_user(&name),
                None => break,
            },
            "4" => {
                let Some(user_id) = prompt(&mut input, out, "Enter user ID: ")? else {
                    break;
                };
                let Some(isbn) = prompt(&mut input, out, "Enter ISBN of the book to checkout: ")?
                else {
                    break;
                };
                library.checkout_book(user_id.trim(), isbn.trim())
            }
            "5" => {
                writeln!(out, "Exiting.")?;
                break;
            }
            _ => {
                writeln!(out, "Invalid choice, please try again.")?;
                continue;
            }
        };

        match outcome {
            Ok(result) => print_messages(out, &result.messages)?,
            Err(e) if e.is_recoverable() => print_error(out, &e)?,
            Err(e) => return Err(e),
        }
    }
    out.flush()?;
    Ok(())
}

fn read_book<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<BookDraft>> {
    let mut fields = Vec::with_capacity(7);
    for label in [
        "Enter title: ",
        "Enter author: ",
        "Enter ISBN: ",
        "Enter publication: ",
        "Enter genre: ",
        "Enter shelf number: ",
        "Enter quantity: ",
    ] {
        match prompt(input, out, label)? {
            Some(value) => fields.push(value),
            None => return Ok(None),
        }
    }

    let mut fields = fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    Ok(Some(BookDraft {
        title: next(),
        author: next(),
        isbn: next(),
        publication: next(),
        genre: next(),
        shelf_number: next(),
        quantity: next(),
    }))
}

/// Print `label` and read one line without its line ending.
/// Returns Ok(None) at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(LibrisError::Io)?;
    if read == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
    line.truncate(trimmed);
    Ok(Some(line))
}
