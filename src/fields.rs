//! Enumerations used by tasks and the interactive editor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Urgency of a task, entered on the command line as 1, 2 or 3.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "High")]
    High,
    #[default]
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Low")]
    Low,
}

impl Priority {
    /// Parse the numeric form used by `--prio` and the edit prompt.
    pub fn from_choice(s: &str) -> Result<Self, TodoError> {
        match s.trim().parse::<u8>() {
            Ok(1) => Ok(Priority::High),
            Ok(2) => Ok(Priority::Medium),
            Ok(3) => Ok(Priority::Low),
            _ => Err(TodoError::InvalidPriority(s.trim().to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field selected in the interactive edit menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    DueDate,
    Priority,
}

impl EditField {
    pub fn from_choice(s: &str) -> Result<Self, TodoError> {
        match s.trim() {
            "1" => Ok(EditField::Title),
            "2" => Ok(EditField::DueDate),
            "3" => Ok(EditField::Priority),
            other => Err(TodoError::InvalidChoice(other.to_string())),
        }
    }
}
