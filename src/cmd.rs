//! Action dispatch for the CLI.
//!
//! `execute` runs one resolved `Action` against the collection. Console I/O
//! is passed in so the interactive edit flow can be driven from tests.

use std::io::{BufRead, Write};
use std::path::Path;

use clap_complete::{generate, Shell};
use tracing::{debug, warn};

use crate::db::{format_due_date, parse_due_date, Todos};
use crate::error::TodoError;
use crate::fields::{EditField, Priority};

/// The single operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Add {
        title: String,
        due: Option<String>,
        prio: Option<String>,
    },
    Edit(i64),
    Toggle(i64),
    Delete(i64),
    Clean { keep_active: bool },
}

impl Action {
    /// Whether a successful run of this action changes the collection.
    pub fn mutates(&self) -> bool {
        !matches!(self, Action::List)
    }
}

/// Load the store at `db_path`, run `action` and save the store again when
/// the action mutates it and succeeded.
pub fn run_in<R: BufRead, W: Write>(
    db_path: &Path,
    action: Action,
    input: &mut R,
    out: &mut W,
) -> Result<(), TodoError> {
    let mut todos = Todos::load(db_path)?;
    let mutates = action.mutates();
    execute(action, &mut todos, input, out)?;
    if mutates {
        todos.save(db_path)?;
    }
    Ok(())
}

/// Run `action` against `todos`, reading prompts from `input` and writing
/// results to `out`.
pub fn execute<R: BufRead, W: Write>(
    action: Action,
    todos: &mut Todos,
    input: &mut R,
    out: &mut W,
) -> Result<(), TodoError> {
    debug!(?action, "executing");
    match action {
        Action::List => {
            write!(out, "{}", todos.render())?;
        },
        Action::Add { title, due, prio } => cmd_add(todos, out, &title, due, prio)?,
        Action::Edit(index) => cmd_edit(todos, input, out, index)?,
        Action::Toggle(index) => {
            let completed = todos.toggle(index)?;
            let state = if completed { "completed" } else { "active" };
            writeln!(out, "Marked task {} as {}", index, state)?;
        },
        Action::Delete(index) => {
            let task = todos.delete(index)?;
            writeln!(out, "Deleted task {}: {}", index, task.title)?;
        },
        Action::Clean { keep_active } => {
            let removed = todos.clean(keep_active);
            writeln!(out, "Removed {} task(s)", removed)?;
        },
    }
    Ok(())
}

/// Add a new task. An unparseable `--prio` falls back to Medium.
pub fn cmd_add<W: Write>(
    todos: &mut Todos,
    out: &mut W,
    title: &str,
    due: Option<String>,
    prio: Option<String>,
) -> Result<(), TodoError> {
    let due = due.as_deref().map(parse_due_date).transpose()?;
    let priority = match prio.as_deref() {
        None => Priority::default(),
        Some(p) => Priority::from_choice(p).unwrap_or_else(|e| {
            warn!("{e}; using Medium");
            Priority::default()
        }),
    };
    let index = todos.add(title, due, priority)?;
    writeln!(out, "Added task {}", index)?;
    Ok(())
}

/// Interactively change the title, due date or priority of one task.
pub fn cmd_edit<R: BufRead, W: Write>(
    todos: &mut Todos,
    input: &mut R,
    out: &mut W,
    index: i64,
) -> Result<(), TodoError> {
    let task = todos.get(index)?;
    let current_due = task.due_date.map(format_due_date).unwrap_or_else(|| "-".into());
    writeln!(
        out,
        "Editing task {}: {} (due {}, {})",
        index, task.title, current_due, task.priority
    )?;
    writeln!(out, "What would you like to edit?")?;
    writeln!(out, "1. Title")?;
    writeln!(out, "2. Due Date")?;
    writeln!(out, "3. Priority")?;
    write!(out, "Enter your choice (1-3): ")?;
    out.flush()?;

    let choice = read_line(input)?;
    match EditField::from_choice(&choice)? {
        EditField::Title => {
            write!(out, "Enter new title: ")?;
            out.flush()?;
            let title = read_line(input)?;
            todos.set_title(index, &title)?;
            writeln!(out, "Title updated successfully")?;
        },
        EditField::DueDate => {
            write!(out, "Enter new due date (DD.MM.YYYY) or leave empty to remove: ")?;
            out.flush()?;
            let line = read_line(input)?;
            if line.trim().is_empty() {
                todos.set_due_date(index, None)?;
                writeln!(out, "Due date removed")?;
            } else {
                let due = parse_due_date(&line)?;
                todos.set_due_date(index, Some(due))?;
                writeln!(out, "Due date updated successfully")?;
            }
        },
        EditField::Priority => {
            write!(out, "Enter the new priority (1 = High, 2 = Medium, 3 = Low): ")?;
            out.flush()?;
            let priority = Priority::from_choice(&read_line(input)?)?;
            todos.set_priority(index, priority)?;
            writeln!(out, "Priority updated successfully")?;
        },
    }
    Ok(())
}

/// Read one line without its terminator. End of input reads as an empty line.
fn read_line<R: BufRead>(input: &mut R) -> Result<String, TodoError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Generate shell completion scripts.
pub fn cmd_completions<W: Write>(shell: Shell, out: &mut W) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, out);
}
