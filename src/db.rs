//! Task collection, JSON storage and formatting helpers.
//!
//! `Todos` owns the ordered list of tasks. Tasks are addressed by their
//! position, so deleting or cleaning shifts the index of everything after the
//! removed entries.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TodoError;
use crate::fields::Priority;
use crate::task::Task;

/// Date format accepted for due dates, e.g. `31.12.2024`.
pub const DUE_FORMAT: &str = "%d.%m.%Y";

const TIME_FORMAT: &str = "%d.%m.%Y %H:%M";
const TITLE_WIDTH: usize = 40;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Todos {
    pub tasks: Vec<Task>,
}

impl Todos {
    /// Load the collection from a JSON file. A missing file yields an empty collection.
    pub fn load(path: &Path) -> Result<Self, TodoError> {
        if !path.exists() {
            debug!(path = %path.display(), "no store yet, starting empty");
            return Ok(Todos::default());
        }
        let mut buf = String::new();
        File::open(path)?.read_to_string(&mut buf)?;
        let todos: Todos = serde_json::from_str(&buf)?;
        debug!(path = %path.display(), count = todos.len(), "loaded store");
        Ok(todos)
    }

    /// Save the collection via temp file + rename.
    pub fn save(&self, path: &Path) -> Result<(), TodoError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(self)?;
        let written = File::create(&tmp)
            .and_then(|mut f| {
                f.write_all(data.as_bytes())?;
                f.flush()
            })
            .and_then(|_| fs::rename(&tmp, path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(path = %path.display(), count = self.len(), "saved store");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a new task and return its index.
    pub fn add(
        &mut self,
        title: &str,
        due_date: Option<NaiveDate>,
        priority: Priority,
    ) -> Result<usize, TodoError> {
        let title = clean_title(title)?;
        self.tasks.push(Task::new(title.clone(), due_date, priority));
        let index = self.tasks.len() - 1;
        debug!(index, %title, ?due_date, %priority, "added task");
        Ok(index)
    }

    /// Check that `index` addresses an existing task.
    pub fn validate_index(&self, index: i64) -> Result<usize, TodoError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.tasks.len())
            .ok_or(TodoError::InvalidIndex { index, len: self.tasks.len() })
    }

    pub fn get(&self, index: i64) -> Result<&Task, TodoError> {
        let i = self.validate_index(index)?;
        Ok(&self.tasks[i])
    }

    fn get_mut(&mut self, index: i64) -> Result<&mut Task, TodoError> {
        let i = self.validate_index(index)?;
        Ok(&mut self.tasks[i])
    }

    /// Remove the task at `index`, returning it.
    pub fn delete(&mut self, index: i64) -> Result<Task, TodoError> {
        let i = self.validate_index(index)?;
        let task = self.tasks.remove(i);
        debug!(index = i, title = %task.title, "deleted task");
        Ok(task)
    }

    /// Flip completion state. Returns the new state.
    pub fn toggle(&mut self, index: i64) -> Result<bool, TodoError> {
        let t = self.get_mut(index)?;
        t.completed = !t.completed;
        t.completed_at = if t.completed { Some(Utc::now()) } else { None };
        debug!(index, completed = t.completed, "toggled task");
        Ok(t.completed)
    }

    pub fn set_title(&mut self, index: i64, title: &str) -> Result<(), TodoError> {
        let title = clean_title(title)?;
        self.get_mut(index)?.title = title.clone();
        debug!(index, %title, "updated title");
        Ok(())
    }

    /// Set or clear (`None`) the due date.
    pub fn set_due_date(&mut self, index: i64, due: Option<NaiveDate>) -> Result<(), TodoError> {
        self.get_mut(index)?.due_date = due;
        debug!(index, ?due, "updated due date");
        Ok(())
    }

    pub fn set_priority(&mut self, index: i64, priority: Priority) -> Result<(), TodoError> {
        self.get_mut(index)?.priority = priority;
        debug!(index, %priority, "updated priority");
        Ok(())
    }

    /// Remove every task, or only completed ones when `keep_active` is set.
    /// Returns the number of tasks removed.
    pub fn clean(&mut self, keep_active: bool) -> usize {
        let before = self.tasks.len();
        if keep_active {
            self.tasks.retain(|t| !t.completed);
        } else {
            self.tasks.clear();
        }
        let removed = before - self.tasks.len();
        debug!(keep_active, removed, "cleaned tasks");
        removed
    }

    /// Render the collection as a text table in stored order.
    pub fn render(&self) -> String {
        let title_width = self
            .tasks
            .iter()
            .map(|t| t.title.chars().count().min(TITLE_WIDTH))
            .max()
            .unwrap_or(0)
            .max("Title".len());

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<4} {:<tw$} {:<4} {:<16} {:<16} {:<10} {}",
            "#", "Title", "Done", "Created", "Completed", "Due", "Priority",
            tw = title_width
        );
        for (i, t) in self.tasks.iter().enumerate() {
            let done = if t.completed { "[x]" } else { "[ ]" };
            let completed_at = match (t.completed, t.completed_at) {
                (true, Some(at)) => format_timestamp(at),
                _ => String::new(),
            };
            let due = t.due_date.map(format_due_date).unwrap_or_default();
            let _ = writeln!(
                out,
                "{:<4} {:<tw$} {:<4} {:<16} {:<16} {:<10} {}",
                i,
                truncate(&t.title, TITLE_WIDTH),
                done,
                format_timestamp(t.created_at),
                completed_at,
                due,
                t.priority,
                tw = title_width
            );
        }
        out
    }
}

/// Trim a title and replace control characters with spaces. Blank titles are rejected.
fn clean_title(title: &str) -> Result<String, TodoError> {
    let title: String = title
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let title = title.trim();
    if title.is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Parse a due date in strict `DD.MM.YYYY` form.
pub fn parse_due_date(s: &str) -> Result<NaiveDate, TodoError> {
    let s = s.trim();
    let shape_ok = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            2 | 5 => b == b'.',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(TodoError::InvalidDueDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DUE_FORMAT).map_err(|_| TodoError::InvalidDueDate(s.to_string()))
}

pub fn format_due_date(d: NaiveDate) -> String {
    d.format(DUE_FORMAT).to_string()
}

/// Format a stored UTC timestamp in local time.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format(TIME_FORMAT).to_string()
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
