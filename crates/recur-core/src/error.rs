use thiserror::Error;

/// Failures produced by the repeat-rule date engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("Invalid date '{0}': expected an 8-digit YYYYMMDD calendar date")]
    InvalidDateFormat(String),

    #[error("Invalid repeat rule '{rule}': {reason}")]
    InvalidRuleFormat { rule: String, reason: String },

    #[error("No date matching weekdays {0:?} within two weeks")]
    NoMatchingWeekday(Vec<u32>),

    #[error("No date matching repeat rule '{rule}' within two calendar years")]
    NoMatchingMonthDay { rule: String },

    #[error("Next occurrence after {after} is past year {}", crate::calendar::MAX_YEAR)]
    DateOutOfRange { after: String },
}

impl RecurrenceError {
    pub(crate) fn invalid_rule(rule: &str, reason: impl Into<String>) -> Self {
        RecurrenceError::InvalidRuleFormat {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}
