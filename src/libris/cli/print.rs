use colored::Colorize;
use libris::api::{CmdMessage, MessageLevel};
use libris::model::{Book, Checkout, User};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

pub(super) fn print_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
        }
    }
    Ok(())
}

pub(super) fn print_error<W: Write>(out: &mut W, error: &dyn std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{}", error.to_string().red())
}

pub(super) fn print_books<W: Write>(out: &mut W, books: &[Book]) -> io::Result<()> {
    if books.is_empty() {
        return writeln!(out, "No books in the catalog.");
    }
    for book in books {
        let line = book.to_string();
        if book.quantity == 0 {
            writeln!(out, "{}", line.dimmed())?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

pub(super) fn print_users<W: Write>(out: &mut W, users: &[User]) -> io::Result<()> {
    if users.is_empty() {
        return writeln!(out, "No users registered.");
    }
    let id_width = users.iter().map(|u| u.user_id.width()).max().unwrap_or(0);
    for user in users {
        let padding = id_width.saturating_sub(user.user_id.width());
        writeln!(
            out,
            "{}{}  {}",
            user.user_id.yellow(),
            " ".repeat(padding),
            user.name
        )?;
    }
    Ok(())
}

pub(super) fn print_checkouts<W: Write>(out: &mut W, checkouts: &[Checkout]) -> io::Result<()> {
    if checkouts.is_empty() {
        return writeln!(out, "No checkouts recorded.");
    }
    let id_width = checkouts
        .iter()
        .map(|c| c.user_id.width())
        .max()
        .unwrap_or(0);
    for checkout in checkouts {
        let padding = id_width.saturating_sub(checkout.user_id.width());
        let state = checkout.state().to_string();
        let state = if checkout.is_on_loan() {
            state.yellow()
        } else {
            state.dimmed()
        };
        writeln!(
            out,
            "{}{}  {}  {}",
            checkout.user_id,
            " ".repeat(padding),
            checkout.isbn,
            state
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(render(|o| print_books(o, &[])), "No books in the catalog.\n");
        assert_eq!(render(|o| print_users(o, &[])), "No users registered.\n");
        assert_eq!(
            render(|o| print_checkouts(o, &[])),
            "No checkouts recorded.\n"
        );
    }

    #[test]
    fn test_users_are_aligned() {
        let users = vec![User::new("Ada", 1), User::new("Grace", 10)];
        let text = render(|o| print_users(o, &users));
        assert_eq!(text, "LIB_USER_1   Ada\nLIB_USER_10  Grace\n");
    }

    #[test]
    fn test_checkout_states() {
        let mut returned = Checkout::new("LIB_USER_1", "9780441013593").unwrap();
        returned.mark_returned();
        let open = Checkout::new("LIB_USER_2", "0441013597").unwrap();

        let text = render(|o| print_checkouts(o, &[returned, open]));
        assert!(text.contains("LIB_USER_1  9780441013593  returned"));
        assert!(text.contains("LIB_USER_2  0441013597  on loan"));
    }

    #[test]
    fn test_messages_plain_text() {
        let messages = vec![CmdMessage::success("Book checked out.")];
        assert_eq!(
            render(|o| print_messages(o, &messages)),
            "Book checked out.\n"
        );
    }
}
