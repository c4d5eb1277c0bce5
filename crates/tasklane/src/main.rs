//! CLI entry point for tasklane.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use tasklane_app::{ProjectConfig, TaskService};
use tasklane_core::{SortField, SortOrder};
use tasklane_store_rest::RestStore;
use terminal::TerminalPrompt;

mod commands;
mod terminal;

/// Manage the remote todo list from a terminal.
#[derive(Parser, Debug)]
#[command(name = "tasklane", version, about = "tasklane: remote todo list client")]
struct Cli {
    /// Directory holding `.tasklane/config.toml` (defaults to current).
    #[arg(long)]
    dir: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List open (or completed) tasks.
    Ls {
        /// Field to sort by.
        #[arg(long)]
        sort: Option<SortField>,
        /// Sort direction (asc or desc).
        #[arg(long)]
        order: Option<SortOrder>,
        /// Show completed tasks instead of open ones.
        #[arg(long, conflicts_with = "open")]
        completed: bool,
        /// Show open tasks even when the configuration lists completed ones.
        #[arg(long)]
        open: bool,
    },

    /// Create a task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        detail: Option<String>,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Overwrite fields of an existing task.
    Edit {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        detail: Option<String>,
        /// Due date as YYYY-MM-DD, or an empty string to clear it.
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Mark a task complete.
    Done {
        #[arg(long)]
        id: i64,
        /// Reopen the task instead.
        #[arg(long)]
        undo: bool,
    },

    /// Delete a task.
    Rm {
        #[arg(long)]
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

impl Command {
    const fn assume_yes(&self) -> bool {
        matches!(self, Self::Rm { yes: true, .. })
    }
}

fn main() -> Result<()> {
    let Cli { dir, cmd } = Cli::parse();
    install_tracing();

    let dir = dir.unwrap_or_else(|| ".".to_owned());
    execute_command(&dir, cmd)
}

fn execute_command(dir: &str, command: Command) -> Result<()> {
    let config = ProjectConfig::load(dir)?;
    let store = RestStore::new(config.remote()?.to_rest_config())?;
    let service = TaskService::new(store, TerminalPrompt::new(command.assume_yes()));

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(commands::run(command, &service, config.view))
}

fn install_tracing() {
    // RUST_LOG overrides the default INFO level.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
