use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::calendar::CalendarDate;

/// Results returned by a search when the caller does not set a limit.
pub const DEFAULT_SEARCH_LIMIT: u32 = 25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    /// Next due date
    pub date: CalendarDate,
    pub title: String,
    pub comment: String,
    /// Repeat rule text; empty for a one-shot task
    pub repeat: String,
}

impl Task {
    #[inline]
    pub fn is_recurring(&self) -> bool {
        !self.repeat.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    /// `YYYYMMDD`; defaults to today when absent or empty
    pub date: Option<String>,
    pub comment: String,
    pub repeat: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,
    pub repeat: Option<String>,
}

/// Represents a filter for listing tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Either a `DD.MM.YYYY` date or free text matched against title and comment
    pub search: Option<String>,
    pub limit: Option<u32>,
}

impl TaskFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// The task repeats and now carries its next due date.
    Rescheduled(Task),
    /// The task had no further occurrences and was removed.
    Deleted(i64),
}
