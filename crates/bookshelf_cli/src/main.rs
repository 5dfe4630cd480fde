//! `bookshelf` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and `BOOKSHELF_*` environment variables.
//! - Wire the configured store family into the facade once, at startup.
//! - Print facade results as JSON on stdout.

use bookshelf_core::db::{open_db, open_db_in_memory, open_mapper_db, open_mapper_db_in_memory};
use bookshelf_core::{
    init_logging, AppConfig, Book, BookStore, MapperBookStore, MapperUserStore, SqlBookStore,
    SqlUserStore, StoreBackend, User, UserDataFacade, UserId, UserStore,
};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "Manage users and their books")]
struct Cli {
    /// Store family: sql (jdbc) or mapper (orm, jpa).
    #[arg(long, env = "BOOKSHELF_BACKEND", default_value = "sql", value_parser = StoreBackend::from_str)]
    backend: StoreBackend,
    /// SQLite database file; in-memory when omitted.
    #[arg(long, env = "BOOKSHELF_DATABASE")]
    database: Option<PathBuf>,
    #[arg(long, env = "BOOKSHELF_LOG_LEVEL", default_value_t = bookshelf_core::default_log_level().to_string())]
    log_level: String,
    /// Absolute directory for rotated log files; logging is off when omitted.
    #[arg(long, env = "BOOKSHELF_LOG_DIR")]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a user and its books.
    Create {
        /// User record as JSON, e.g. '{"full_name":"A","age":30}'.
        #[arg(long)]
        user: String,
        /// JSON array of book records; `null` entries are skipped.
        #[arg(long)]
        books: Option<String>,
    },
    /// Show a user's id and book ids.
    Get { user_id: UserId },
    /// Partially update a user; `--books` replaces the whole book set.
    Update {
        user_id: UserId,
        #[arg(long, default_value = "{}")]
        user: String,
        #[arg(long)]
        books: Option<String>,
    },
    /// Delete a user and all of its books.
    Delete { user_id: UserId },
    /// Print `pong` and the core version.
    Ping,
}

impl Cli {
    fn config(&self) -> AppConfig {
        AppConfig {
            backend: self.backend,
            database: self.database.clone(),
            log_level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = cli.config();
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli backend={} database={}",
        config.backend,
        config.database_label()
    );

    if matches!(cli.command, Command::Ping) {
        println!("pong {}", bookshelf_core::core_version());
        return Ok(());
    }

    match config.backend {
        StoreBackend::Sql => {
            let conn = match config.database.as_deref() {
                Some(path) => open_db(path)?,
                None => open_db_in_memory()?,
            };
            let facade = UserDataFacade::new(SqlUserStore::new(&conn), SqlBookStore::new(&conn));
            execute(&facade, &cli.command)
        }
        StoreBackend::Mapper => {
            let session = match config.database.as_deref() {
                Some(path) => open_mapper_db(path)?,
                None => open_mapper_db_in_memory()?,
            };
            let facade = UserDataFacade::new(
                MapperUserStore::new(&session),
                MapperBookStore::new(&session),
            );
            execute(&facade, &cli.command)
        }
    }
}

fn execute<U: UserStore, B: BookStore>(
    facade: &UserDataFacade<U, B>,
    command: &Command,
) -> CliResult<()> {
    let view = match command {
        Command::Create { user, books } => {
            let user: User = serde_json::from_str(user)?;
            let books = parse_books(books.as_deref())?.unwrap_or_default();
            facade.create_user_with_books(&user, &books)?
        }
        Command::Get { user_id } => facade.get_user_with_books(*user_id)?,
        Command::Update {
            user_id,
            user,
            books,
        } => {
            let user: User = serde_json::from_str(user)?;
            let books = parse_books(books.as_deref())?;
            facade.update_user_with_books(&user, *user_id, books.as_deref())?
        }
        Command::Delete { user_id } => {
            facade.delete_user_with_books(*user_id)?;
            return Ok(());
        }
        Command::Ping => return Ok(()),
    };

    println!("{}", serde_json::to_string(&view)?);
    Ok(())
}

fn parse_books(raw: Option<&str>) -> CliResult<Option<Vec<Option<Book>>>> {
    match raw {
        Some(json) => Ok(Some(serde_json::from_str(json)?)),
        None => Ok(None),
    }
}
