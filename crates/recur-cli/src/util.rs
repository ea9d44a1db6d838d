use anyhow::{anyhow, Result};
use recur_core::calendar::CalendarDate;
use recur_core::error::CoreError;

pub fn parse_task_id(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(anyhow!(CoreError::InvalidInput(format!(
            "'{}' is not a valid task ID",
            raw
        )))),
    }
}

/// The `--today` override if given, otherwise the local date.
pub fn resolve_today(raw: Option<&str>) -> Result<CalendarDate> {
    match raw {
        Some(text) => Ok(text.parse::<CalendarDate>().map_err(CoreError::from)?),
        None => Ok(CalendarDate::today()),
    }
}
