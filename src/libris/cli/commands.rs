use super::menu::run_menu;
use super::print::{print_books, print_checkouts, print_messages, print_users};
use super::setup::{Cli, Commands};
use clap::Parser;
use libris::api::Library;
use libris::config::{resolve_data_dir, LibrisConfig, DATA_DIR_ENV};
use libris::error::{LibrisError, Result};
use libris::model::BookDraft;
use libris::store::fs::FsBackend;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "LIBRIS_LOG";

struct AppContext {
    library: Library<FsBackend>,
    data_dir: PathBuf,
    config: LibrisConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::AddBook {
            title,
            author,
            isbn,
            publication,
            genre,
            shelf,
            quantity,
        }) => handle_add_book(
            &mut ctx,
            BookDraft {
                title,
                author,
                isbn,
                publication,
                genre,
                shelf_number: shelf,
                quantity,
            },
        ),
        Some(Commands::Books) => handle_books(&ctx),
        Some(Commands::FindBook { isbn }) => handle_find_book(&ctx, &isbn),
        Some(Commands::AddUser { name }) => handle_add_user(&mut ctx, &name),
        Some(Commands::Users) => handle_users(&ctx),
        Some(Commands::Checkout { user_id, isbn }) => handle_checkout(&mut ctx, &user_id, &isbn),
        Some(Commands::Return { user_id, isbn }) => handle_return(&mut ctx, &user_id, &isbn),
        Some(Commands::Loans { user }) => handle_loans(&ctx, user.as_deref()),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Menu) | None => handle_menu(&mut ctx),
    }
}

/// Logs go to stderr so they never mix with menu output. `LIBRIS_LOG` takes an
/// `EnvFilter` directive; without it the level is `warn`, or `debug` with `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(
        cli.data_dir.clone(),
        std::env::var_os(DATA_DIR_ENV),
        cli.global,
    )?;
    let config = LibrisConfig::load(&data_dir)?;
    debug!(data_dir = %data_dir.display(), "opening library");

    let store = FsBackend::new(data_dir.clone()).with_config(config.clone());
    let library = Library::open(store)?;

    Ok(AppContext {
        library,
        data_dir,
        config,
    })
}

fn handle_add_book(ctx: &mut AppContext, draft: BookDraft) -> Result<()> {
    let result = ctx.library.add_book(draft)?;
    print_messages(&mut io::stdout(), &result.messages)?;
    Ok(())
}

fn handle_books(ctx: &AppContext) -> Result<()> {
    let result = ctx.library.list_books();
    print_books(&mut io::stdout(), &result.books)?;
    Ok(())
}

fn handle_find_book(ctx: &AppContext, isbn: &str) -> Result<()> {
    let result = ctx.library.find_book(isbn)?;
    print_books(&mut io::stdout(), &result.books)?;
    Ok(())
}

fn handle_add_user(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.library.add_user(name)?;
    print_messages(&mut io::stdout(), &result.messages)?;
    Ok(())
}

fn handle_users(ctx: &AppContext) -> Result<()> {
    let result = ctx.library.list_users();
    print_users(&mut io::stdout(), &result.users)?;
    Ok(())
}

fn handle_checkout(ctx: &mut AppContext, user_id: &str, isbn: &str) -> Result<()> {
    let result = ctx.library.checkout_book(user_id, isbn)?;
    print_messages(&mut io::stdout(), &result.messages)?;
    Ok(())
}

fn handle_return(ctx: &mut AppContext, user_id: &str, isbn: &str) -> Result<()> {
    let result = ctx.library.return_book(user_id, isbn)?;
    print_messages(&mut io::stdout(), &result.messages)?;
    Ok(())
}

fn handle_loans(ctx: &AppContext, user_id: Option<&str>) -> Result<()> {
    let result = ctx.library.list_checkouts(user_id);
    print_checkouts(&mut io::stdout(), &result.checkouts)?;
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut out = io::stdout();
    match (key, value) {
        (None, _) => {
            for key in LibrisConfig::keys() {
                writeln!(out, "{} = {}", key, ctx.config.get(key).unwrap_or_default())?;
            }
        }
        (Some(key), None) => {
            let value = ctx
                .config
                .get(&key)
                .ok_or_else(|| LibrisError::Api(format!("Unknown config key: {}", key)))?;
            writeln!(out, "{}", value)?;
        }
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            writeln!(out, "{} = {}", key, value)?;
        }
    }
    Ok(())
}

fn handle_menu(ctx: &mut AppContext) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_menu(&mut ctx.library, stdin.lock(), &mut stdout)
}
