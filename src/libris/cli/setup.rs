use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "libris", version)]
#[command(about = "Keep track of a small library's books, users and loans", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the JSON files (defaults to $LIBRIS_DATA_DIR, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use the per-user data directory instead of the current directory
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the catalog
    #[command(alias = "ab")]
    AddBook {
        #[arg(long)]
        title: String,

        #[arg(long)]
        author: String,

        /// 10 or 13 digits
        #[arg(long)]
        isbn: String,

        #[arg(long)]
        publication: String,

        #[arg(long)]
        genre: String,

        /// Shelf location, e.g. SF-12
        #[arg(long)]
        shelf: String,

        /// Number of copies
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        quantity: String,
    },

    /// List every book in the catalog
    #[command(alias = "ls")]
    Books,

    /// Show one book by ISBN
    FindBook { isbn: String },

    /// Register a user
    AddUser { name: String },

    /// List registered users
    Users,

    /// Lend a book to a user
    #[command(alias = "co")]
    Checkout { user_id: String, isbn: String },

    /// Take back a book from a user
    Return { user_id: String, isbn: String },

    /// List loans
    Loans {
        /// Only loans of this user
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (books-file, users-file, checkouts-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Run the interactive menu (the default)
    Menu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["libris"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_checkout_args() {
        let cli = Cli::try_parse_from(["libris", "co", "LIB_USER_1", "9780441013593"]).unwrap();
        match cli.command {
            Some(Commands::Checkout { user_id, isbn }) => {
                assert_eq!(user_id, "LIB_USER_1");
                assert_eq!(isbn, "9780441013593");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["libris", "books", "--data-dir", "/tmp/lib", "-v"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/lib")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_negative_quantity_reaches_validation() {
        let cli = Cli::try_parse_from([
            "libris", "add-book", "--title", "Dune", "--author", "Frank Herbert", "--isbn",
            "9780441013593", "--publication", "Ace Books", "--genre", "Science Fiction",
            "--shelf", "SF-12", "--quantity", "-1",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::AddBook { quantity, .. }) => assert_eq!(quantity, "-1"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
