use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use flashcards_core::model::DUE_DATE_FORMAT;
use flashcards_core::{Clock, PosLabels};
use services::{StudyLoopService, StudySession};
use storage::read_catalog;
use storage::repository::Storage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod terminal;

use terminal::{Intent, Side};

const DEFAULT_CATALOG: &str = "data/example.json";
const DEFAULT_DB: &str = "flashcards.sqlite3";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidDate { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidDate { raw } => {
                write!(f, "invalid --today value: {raw} (expected YYYY-MM-DD)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  flashcards study [--db <sqlite_url>] [--catalog <path>] [--today <YYYY-MM-DD>]");
    eprintln!("  flashcards list  [--db <sqlite_url>] [--catalog <path>] [--today <YYYY-MM-DD>] [--json]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:{DEFAULT_DB}");
    eprintln!("  --catalog {DEFAULT_CATALOG}");
    eprintln!("  --today <local date>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FLASHCARDS_DB_URL, FLASHCARDS_CATALOG, FLASHCARDS_LOG_JSON, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Study,
    List,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "study" => Some(Self::Study),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    catalog: PathBuf,
    today: Option<NaiveDate>,
    json: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("FLASHCARDS_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url(DEFAULT_DB.into()), normalize_sqlite_url);
        let mut catalog = std::env::var("FLASHCARDS_CATALOG")
            .ok()
            .map_or_else(|| PathBuf::from(DEFAULT_CATALOG), PathBuf::from);
        let mut today = None;
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--catalog" => {
                    catalog = PathBuf::from(require_value(args, "--catalog")?);
                }
                "--today" => {
                    let value = require_value(args, "--today")?;
                    let parsed = NaiveDate::parse_from_str(&value, DUE_DATE_FORMAT)
                        .map_err(|_| ArgsError::InvalidDate { raw: value.clone() })?;
                    today = Some(parsed);
                }
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            catalog,
            today,
            json,
        })
    }

    fn clock(&self) -> Clock {
        self.today.map_or_else(Clock::system, Clock::fixed)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.trim(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Filter directive from `RUST_LOG`, falling back to `info` when unset or blank.
fn log_directive(env: Option<String>) -> String {
    env.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned())
}

fn init_tracing() {
    let directive = log_directive(std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter =
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if env_bool("FLASHCARDS_LOG_JSON") {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn study(
    service: &StudyLoopService,
    mut session: StudySession,
) -> Result<(), Box<dyn std::error::Error>> {
    let labels = PosLabels::default();
    let mut side = Side::Front;
    terminal::print_help();
    terminal::render_card(&session, &labels, side)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let intent = match terminal::parse_intent(&line) {
            Ok(intent) => intent,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match intent {
            Intent::Flip => side = side.flipped(),
            Intent::Previous => {
                session.previous()?;
                side = Side::Front;
            }
            Intent::Next => {
                session.next()?;
                side = Side::Front;
            }
            Intent::Grade(grade) => {
                match service.grade_current(&mut session, grade).await {
                    Ok(graded) => println!("{} is due {}", graded.card_id, graded.due_date),
                    Err(err) if err.is_persistence_failure() => {
                        eprintln!("warning: progress was not saved: {err}");
                    }
                    Err(err) => return Err(err.into()),
                }
                session.next()?;
                side = Side::Front;
            }
            Intent::List => {
                terminal::render_list(&session, service.today());
                continue;
            }
            Intent::Jump(index) => {
                if let Err(err) = session.select(index) {
                    eprintln!("{err}");
                    continue;
                }
                side = Side::Front;
            }
            Intent::Help => {
                terminal::print_help();
                continue;
            }
            Intent::Quit => break,
        }

        terminal::render_card(&session, &labels, side)?;
    }

    Ok(())
}

fn list(
    service: &StudyLoopService,
    session: &StudySession,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = session.entries(service.today());
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        terminal::render_entries(&rows);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: studying when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Study,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Study,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let catalog = read_catalog(&parsed.catalog)?;
    info!(path = %parsed.catalog.display(), cards = catalog.len(), "catalog loaded");

    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    let service = StudyLoopService::new(parsed.clock(), storage.progress);
    let session = service.start_session(catalog).await?;

    match cmd {
        Command::Study => study(&service, session).await,
        Command::List => list(&service, &session, parsed.json),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_directive_defaults_to_info() {
        assert_eq!(log_directive(None), "info");
        assert_eq!(log_directive(Some("  ".into())), "info");
        assert_eq!(log_directive(Some("services=debug".into())), "services=debug");
    }

    #[test]
    fn normalize_keeps_memory_and_absolute_urls() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/cards.db".into()),
            "sqlite:///tmp/cards.db"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:/tmp/cards.db".into()),
            "sqlite:///tmp/cards.db"
        );
    }
}
