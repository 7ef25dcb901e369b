use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::cmd::Action;
use crate::error::TodoError;

/// Flag-driven todo list manager.
/// Storage defaults to ~/.todo/todos.json or a path passed via --db.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Manage a todo list from the command line")]
pub struct Cli {
    /// List all todos.
    #[arg(long)]
    pub list: bool,

    /// Add a new todo with the given title.
    #[arg(long, value_name = "TITLE")]
    pub add: Option<String>,

    /// Due date for --add (DD.MM.YYYY).
    #[arg(long, value_name = "DATE", requires = "add")]
    pub due: Option<String>,

    /// Priority for --add: 1 = High, 2 = Medium, 3 = Low.
    #[arg(long, value_name = "1|2|3", requires = "add")]
    pub prio: Option<String>,

    /// Edit a todo by index.
    #[arg(long, value_name = "INDEX", allow_negative_numbers = true)]
    pub edit: Option<i64>,

    /// Toggle completion of a todo by index.
    #[arg(long, value_name = "INDEX", allow_negative_numbers = true)]
    pub toggle: Option<i64>,

    /// Delete a todo by index.
    #[arg(long, value_name = "INDEX", allow_negative_numbers = true)]
    pub delete: Option<i64>,

    /// Remove all todos (with --keep-active, only completed ones).
    #[arg(long)]
    pub clean: bool,

    /// With --clean, keep todos that are not completed yet.
    #[arg(long, requires = "clean")]
    pub keep_active: bool,

    /// Print a shell completion script and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Path to the JSON database file.
    #[arg(long, env = "TODO_DB")]
    pub db: Option<PathBuf>,
}

impl Cli {
    /// Resolve the single requested action. The first set flag wins in the
    /// order list, add, edit, toggle, delete, clean.
    pub fn action(&self) -> Option<Action> {
        if self.list {
            Some(Action::List)
        } else if let Some(title) = &self.add {
            Some(Action::Add {
                title: title.clone(),
                due: self.due.clone(),
                prio: self.prio.clone(),
            })
        } else if let Some(i) = self.edit {
            Some(Action::Edit(i))
        } else if let Some(i) = self.toggle {
            Some(Action::Toggle(i))
        } else if let Some(i) = self.delete {
            Some(Action::Delete(i))
        } else if self.clean {
            Some(Action::Clean { keep_active: self.keep_active })
        } else {
            None
        }
    }

    /// Like `action`, but a missing action flag is an `InvalidCommand` error.
    pub fn require_action(&self) -> Result<Action, TodoError> {
        self.action().ok_or(TodoError::InvalidCommand)
    }

    /// Storage location: `--db`/`TODO_DB`, else `~/.todo/todos.json`.
    pub fn db_path(&self) -> PathBuf {
        if let Some(p) = &self.db {
            return p.clone();
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".todo").join("todos.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["todo"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_no_flags_is_no_action() {
        assert_eq!(parse(&[]).action(), None);
        assert!(matches!(parse(&[]).require_action(), Err(TodoError::InvalidCommand)));
        assert!(matches!(
            parse(&["--db", "/tmp/x.json"]).require_action(),
            Err(TodoError::InvalidCommand)
        ));
        assert_eq!(parse(&["--list"]).require_action().unwrap(), Action::List);
    }

    #[test]
    fn test_add_with_due_and_prio() {
        let cli = parse(&["--add", "buy milk", "--due", "31.12.2024", "--prio", "1"]);
        assert_eq!(
            cli.action(),
            Some(Action::Add {
                title: "buy milk".into(),
                due: Some("31.12.2024".into()),
                prio: Some("1".into()),
            })
        );
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(parse(&["--delete", "2", "--list"]).action(), Some(Action::List));
        assert_eq!(
            parse(&["--toggle", "1", "--add", "x"]).action(),
            Some(Action::Add { title: "x".into(), due: None, prio: None })
        );
        assert_eq!(parse(&["--delete", "3", "--edit", "1"]).action(), Some(Action::Edit(1)));
        assert_eq!(parse(&["--clean", "--toggle", "0"]).action(), Some(Action::Toggle(0)));
        assert_eq!(parse(&["--clean", "--delete", "0"]).action(), Some(Action::Delete(0)));
    }

    #[test]
    fn test_clean_variants() {
        assert_eq!(parse(&["--clean"]).action(), Some(Action::Clean { keep_active: false }));
        assert_eq!(
            parse(&["--clean", "--keep-active"]).action(),
            Some(Action::Clean { keep_active: true })
        );
        assert!(Cli::try_parse_from(["todo", "--keep-active"]).is_err());
    }

    #[test]
    fn test_empty_add_still_selects_add() {
        assert_eq!(
            parse(&["--add", "", "--toggle", "0"]).action(),
            Some(Action::Add { title: String::new(), due: None, prio: None })
        );
    }

    #[test]
    fn test_negative_index_is_accepted() {
        assert_eq!(parse(&["--delete", "-1"]).action(), Some(Action::Delete(-1)));
    }

    #[test]
    fn test_due_requires_add() {
        assert!(Cli::try_parse_from(["todo", "--due", "31.12.2024"]).is_err());
    }

    #[test]
    fn test_db_path_override() {
        let cli = parse(&["--db", "/tmp/x.json", "--list"]);
        assert_eq!(cli.db_path(), PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
