use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use chrono_english::{parse_date_string, Dialect};
use recur_core::calendar::CalendarDate;

/// Turns user date input into the `YYYYMMDD` form stored on tasks.
///
/// Eight-digit input is passed through untouched so the core reports
/// malformed dates itself; anything else is read as English relative to
/// `today` ("tomorrow", "next friday", "25/12/2025").
pub fn parse_task_date(input: &str, today: CalendarDate) -> Result<String> {
    let input = input.trim();
    if input.len() == 8 && input.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(input.to_string());
    }

    let midnight = today
        .naive()
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid base date {}", today))?;
    let base = Utc.from_utc_datetime(&midnight);

    let parsed = parse_date_string(input, base, Dialect::Uk)
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))?;
    Ok(CalendarDate::from(parsed.date_naive()).to_string())
}
