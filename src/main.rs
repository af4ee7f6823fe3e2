use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use checklist::model::{Filter, TodoId};

mod cli_exec;
mod cli_runtime;

#[derive(Parser)]
#[command(name = "checklist")]
#[command(about = "Todo list client for a REST record store", long_about = None)]
struct Cli {
    /// Record store origin (defaults to http://localhost:5000)
    #[arg(long, env = "CHECKLIST_URL", global = true)]
    url: Option<String>,

    /// JSON config file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Append logs to this file (the TUI logs nowhere else)
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    /// Re-fetch the whole list after every change
    #[arg(long, global = true)]
    reload_after_mutation: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive todo list (default)
    Tui,

    /// List todos
    List {
        /// all, active or completed
        #[arg(long, default_value = "all")]
        filter: Filter,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single todo
    Show {
        id: TodoId,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show total/active/completed counts
    Stats {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a todo
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Flip a todo between active and completed
    Toggle { id: TodoId },

    /// Delete a todo
    Rm {
        id: TodoId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);
    let interactive = matches!(command, Commands::Tui);

    cli_runtime::init_tracing(cli.log_file.as_deref(), interactive)?;
    let config = cli_runtime::resolve_config(
        cli.config.as_deref(),
        cli.url,
        cli.reload_after_mutation,
    )?;
    tracing::debug!(base_url = %config.base_url, resource = %config.resource, "resolved config");

    cli_exec::handle_command(&config, command)
}

#[cfg(test)]
#[path = "tests/cli/cli_tests.rs"]
mod tests;
