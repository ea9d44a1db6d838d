use anyhow::Result;
use recur_core::calendar::CalendarDate;
use recur_core::error::CoreError;
use recur_core::recurrence::{next_occurrence, NextDate};

use crate::cli::NextDateCommand;

/// Printed when the rule has no further occurrences.
pub const TERMINATE_SENTINEL: &str = "delete";

pub fn next_date(command: NextDateCommand, today: CalendarDate) -> Result<()> {
    let now = match command.now.as_deref() {
        Some(raw) => raw.parse::<CalendarDate>().map_err(CoreError::from)?,
        None => today,
    };

    let next = next_occurrence(now, &command.date, &command.repeat).map_err(CoreError::from)?;
    match next {
        NextDate::Scheduled(date) => println!("{}", date),
        NextDate::Terminate => println!("{}", TERMINATE_SENTINEL),
    }
    Ok(())
}
