//! Task data structure.
//!
//! A `Task` is one todo item: a short title plus completion state, timestamps,
//! an optional due date and a priority.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::Priority;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    pub fn new(title: String, due_date: Option<NaiveDate>, priority: Priority) -> Self {
        Task {
            title,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
            due_date,
            priority,
        }
    }
}
