//! # todo - flag-driven todo list CLI
//!
//! Keeps a small ordered list of tasks in a JSON file. Each task has a title,
//! a completion state with timestamps, an optional due date and a priority.
//! Tasks are addressed by their current position in the list.
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a task due at the end of the year with high priority
//! todo --add "File taxes" --due 31.12.2024 --prio 1
//!
//! # Show everything
//! todo --list
//!
//! # Mark task 0 done, then drop all completed tasks
//! todo --toggle 0
//! todo --clean --keep-active
//! ```
//!
//! Exactly one action runs per invocation. When several action flags are
//! given, the first in the order `--list`, `--add`, `--edit`, `--toggle`,
//! `--delete`, `--clean` wins.
//!
//! Data is stored in `~/.todo/todos.json` unless `--db` or `TODO_DB` points
//! elsewhere. Set `RUST_LOG=todo=debug` to trace every mutation on stderr.

use std::io;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod cli;
pub mod cmd;
pub mod db;
pub mod error;
pub mod fields;
pub mod task;

use cli::Cli;
use cmd::*;
use error::TodoError;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        cmd_completions(shell, &mut io::stdout());
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), TodoError> {
    let action = cli.require_action()?;
    let stdin = io::stdin();
    run_in(&cli.db_path(), action, &mut stdin.lock(), &mut io::stdout())
}
