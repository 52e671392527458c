//! Command-line front end for the toist todo list.
//!
//! Usage:
//!
//! ```text
//! toist [--data-dir <dir>] [--max-length <chars>] [list]
//! toist add <text>...
//! toist toggle <id>
//! toist delete <id>
//! toist clear-completed
//! ```
//!
//! Each invocation opens the store, loads the saved list, applies one
//! command, and prints the resulting list. The list is kept in
//! `<data-dir>/toist-todos.json`. Logging goes to stderr and is controlled by
//! `RUST_LOG` (default `warn`).

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use mockable::{Clock, DefaultClock};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use toist::todo::{
    adapters::fs::FileKeyValueStore,
    domain::{DEFAULT_MAX_TEXT_LENGTH, TimestampIdGenerator, TodoId},
    ports::StorageError,
    services::{TodoConfig, TodoController, TodoNotice, TodoPersistence},
    view::TodoListView,
};
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type FileController = TodoController<FileKeyValueStore, DefaultClock, TimestampIdGenerator>;

/// A small persistent todo list.
#[derive(Debug, Parser)]
#[command(name = "toist", version, about = "A small persistent todo list")]
struct Cli {
    /// Directory holding the saved todo list
    #[arg(long, env = "TOIST_DATA_DIR", default_value = ".toist")]
    data_dir: Utf8PathBuf,

    /// Maximum task length in characters
    #[arg(long, env = "TOIST_MAX_LENGTH", default_value_t = DEFAULT_MAX_TEXT_LENGTH)]
    max_length: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show all tasks
    List,
    /// Add a task; words are joined with single spaces
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Mark a task done, or reopen a done task
    Toggle {
        /// Task identifier as shown by `list`
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task identifier as shown by `list`
        id: String,
    },
    /// Delete every done task
    ClearCompleted,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not open todo storage: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Session(#[from] TodoNotice),
    #[error("could not render the todo list: {0}")]
    Render(#[from] minijinja::Error),
    #[error("could not write output: {0}")]
    Output(#[from] io::Error),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn apply(controller: &mut FileController, command: Command) -> Result<(), TodoNotice> {
    match command {
        Command::List => Ok(()),
        Command::Add { text } => controller.add(&text.join(" ")).await,
        Command::Toggle { id } => controller.toggle(&TodoId::new(id)).await.map(|_| ()),
        Command::Delete { id } => controller.delete(&TodoId::new(id)).await.map(|_| ()),
        Command::ClearCompleted => controller.clear_completed().await.map(|_| ()),
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = TodoConfig::default().with_max_text_length(cli.max_length);
    let clock = Arc::new(DefaultClock);
    let mut controller: FileController = TodoController::new(
        Arc::clone(&clock),
        Arc::new(TimestampIdGenerator),
        config.clone(),
    );

    let store = FileKeyValueStore::open(&cli.data_dir)?;
    controller
        .attach(TodoPersistence::new(Arc::new(store), &config))
        .await?;

    let applied = apply(&mut controller, cli.command.unwrap_or(Command::List)).await;

    let rendered = TodoListView::new(controller.list(), clock.utc())
        .with_notice(controller.notice())
        .render()?;
    writeln!(io::stdout().lock(), "{rendered}")?;

    Ok(if applied.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "toist failed");
            ExitCode::FAILURE
        }
    }
}
