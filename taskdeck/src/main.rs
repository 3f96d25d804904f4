//! `taskdeck` — single-user task list client.
//!
//! Drives the task list from the command line, either against a running
//! `taskdeck-server` or fully standalone with local file storage.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Standalone (local storage)
//! cargo run --bin taskdeck -- add "buy milk" --priority high
//! cargo run --bin taskdeck -- list --sort priority
//!
//! # Against a server
//! cargo run --bin taskdeck -- --server-url http://localhost:5000 list
//!
//! # Or via environment variable
//! TASKDECK_SERVER=http://localhost:5000 cargo run --bin taskdeck -- list
//! ```

use std::path::Path;
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::app::{App, Backend};
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::repo::TaskRepository;
use taskdeck::state::TaskList;
use taskdeck::storage::LocalStore;
use taskdeck::view::SortMode;
use taskdeck_proto::task::{Priority, TaskId};

#[derive(Parser, Debug)]
#[command(version, about = "Single-user task list with a REST backend")]
struct Cli {
    #[command(flatten)]
    args: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Add a task.
    Add {
        /// The task text.
        text: String,
        /// Due date (RFC 3339 or YYYY-MM-DD).
        #[arg(long, value_parser = parse_due)]
        due: Option<DateTime<Utc>>,
        /// Priority (high, medium, low).
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// List tasks.
    List {
        /// Display order (none, due, priority).
        #[arg(long, default_value = "none")]
        sort: SortMode,
    },
    /// Flip completion on a task.
    Toggle {
        /// Task id (any unambiguous prefix).
        id: String,
    },
    /// Replace a task's text.
    Edit {
        /// Task id (any unambiguous prefix).
        id: String,
        /// The new text.
        text: String,
    },
    /// Delete a task.
    Rm {
        /// Task id (any unambiguous prefix).
        id: String,
    },
    /// Move a task to a new position (0-based, in collection order).
    Move {
        /// Task id (any unambiguous prefix).
        id: String,
        /// Target position.
        position: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli.args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    let _log_guard = init_logging(&cli.args.log_level, cli.args.log_file.as_deref());

    let backend = match build_backend(&config) {
        Ok(b) => b,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::open(backend).await;

    if let Err(msg) = run_command(&mut app, cli.command).await {
        eprintln!("error: {msg}");
        return ExitCode::FAILURE;
    }

    if let Some(err) = app.error() {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Picks the backend variant: a configured server URL selects the
/// server-backed session, otherwise tasks live in local storage.
fn build_backend(config: &ClientConfig) -> Result<Backend, String> {
    if let Some(url) = &config.server_url {
        let repo = TaskRepository::new(url, config.request_timeout).map_err(|e| e.to_string())?;
        return Ok(Backend::Remote(repo));
    }
    let dir = config
        .data_dir
        .clone()
        .or_else(LocalStore::default_dir)
        .ok_or("could not determine a data directory (no HOME)")?;
    Ok(Backend::Local(LocalStore::new(&dir)))
}

/// Applies one subcommand to the session and renders the result.
async fn run_command(app: &mut App, command: Command) -> Result<(), String> {
    match command {
        Command::Add {
            text,
            due,
            priority,
        } => {
            app.add(&text, due, priority).await;
        }
        Command::List { sort } => {
            app.set_sort(sort);
        }
        Command::Toggle { id } => {
            let id = resolve_id(app.tasks(), &id)?;
            app.toggle(&id).await;
        }
        Command::Edit { id, text } => {
            let id = resolve_id(app.tasks(), &id)?;
            app.edit(&id, &text).await;
        }
        Command::Rm { id } => {
            let id = resolve_id(app.tasks(), &id)?;
            app.remove(&id).await;
        }
        Command::Move { id, position } => {
            let id = resolve_id(app.tasks(), &id)?;
            app.move_task(&id, position);
        }
    }
    render(app);
    Ok(())
}

/// Prints the display sequence plus the summary line.
fn render(app: &App) {
    if app.tasks().is_empty() {
        println!("no tasks");
        return;
    }
    for task in app.view() {
        let check = if task.completed { 'x' } else { ' ' };
        let short: String = task.id.to_string().chars().take(8).collect();
        let mut line = format!("[{check}] {short}  {}", task.text);
        if let Some(due) = task.due_date {
            line.push_str(&format!("  (due {})", due.format("%Y-%m-%d")));
        }
        if let Some(priority) = task.priority {
            line.push_str(&format!("  [{priority}]"));
        }
        println!("{line}");
    }
    let summary = app.summary();
    println!("done: {} / {}", summary.completed, summary.total);
}

/// Resolves a full id or unique prefix against the current collection.
fn resolve_id(list: &TaskList, needle: &str) -> Result<TaskId, String> {
    let matches: Vec<&TaskId> = list
        .tasks()
        .iter()
        .map(|t| &t.id)
        .filter(|id| id.to_string().starts_with(needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => Err(format!("no task matches id '{needle}'")),
        _ => Err(format!("id '{needle}' is ambiguous")),
    }
}

/// Parses a due date from RFC 3339 or a plain `YYYY-MM-DD` (midnight UTC).
fn parse_due(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(Utc.from_utc_datetime(&midnight));
    }
    Err(format!(
        "invalid due date '{s}' (expected RFC 3339 or YYYY-MM-DD)"
    ))
}

/// Initialize logging: to a file when `--log-file` is given (the returned
/// [`WorkerGuard`] must be held until shutdown), to stderr otherwise.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if let Some(path) = file_path {
        let log_dir = path.parent()?;
        let file_name = path.file_name()?.to_str()?;

        let file_appender = tracing_appender::rolling::never(log_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_env_filter(env_filter)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .init();
        None
    }
}
