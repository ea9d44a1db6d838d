//! Repeat-rule grammar.
//!
//! | Text               | Meaning                                         |
//! |--------------------|-------------------------------------------------|
//! | `""`               | single occurrence                               |
//! | `d 7`              | every 7 days (1..=400)                          |
//! | `y`                | every year on the same month and day            |
//! | `w 1,3,5`          | on the listed ISO weekdays (Mon=1..Sun=7)       |
//! | `m 1,15,-1`        | on the listed days of every month               |
//! | `m -1,-2 2,8`      | on the listed days of the listed months         |
//!
//! In month rules `-1` is the last day of the month and `-2` the one before.

use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

use crate::error::RecurrenceError;

pub const MAX_DAY_INTERVAL: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceRule {
    None,
    DailyInterval { days: u32 },
    Yearly,
    WeekdaySet(Vec<Weekday>),
    MonthDaySet { days: Vec<MonthDay>, months: Vec<u32> },
}

/// A day of the month, either counted from the start or from the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDay {
    /// Literal day number, 1..=31.
    Nth(u32),
    /// 1 is the last day of the month, 2 the second to last.
    FromEnd(u32),
}

impl MonthDay {
    /// Resolves against a month with `last_day` days. `None` when the day
    /// does not exist in that month.
    pub fn resolve(self, last_day: u32) -> Option<u32> {
        let day = match self {
            MonthDay::Nth(day) => day,
            MonthDay::FromEnd(offset) => (last_day + 1).checked_sub(offset)?,
        };
        (1..=last_day).contains(&day).then_some(day)
    }

    fn as_rule_value(self) -> i64 {
        match self {
            MonthDay::Nth(day) => i64::from(day),
            MonthDay::FromEnd(offset) => -i64::from(offset),
        }
    }
}

impl RecurrenceRule {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, RecurrenceRule::None)
    }
}

impl FromStr for RecurrenceRule {
    type Err = RecurrenceError;

    fn from_str(rule: &str) -> Result<Self, Self::Err> {
        if rule.is_empty() {
            return Ok(RecurrenceRule::None);
        }
        if rule == "y" {
            return Ok(RecurrenceRule::Yearly);
        }
        if let Some(rest) = rule.strip_prefix("d ") {
            return parse_daily(rule, rest);
        }
        if let Some(rest) = rule.strip_prefix("w ") {
            return parse_weekdays(rule, rest);
        }
        if let Some(rest) = rule.strip_prefix("m ") {
            return parse_month_days(rule, rest);
        }
        Err(RecurrenceError::invalid_rule(rule, "unrecognized rule"))
    }
}

fn parse_daily(rule: &str, rest: &str) -> Result<RecurrenceRule, RecurrenceError> {
    let days: u32 = rest
        .parse()
        .map_err(|_| RecurrenceError::invalid_rule(rule, format!("'{rest}' is not a day count")))?;
    if days == 0 || days > MAX_DAY_INTERVAL {
        return Err(RecurrenceError::invalid_rule(
            rule,
            format!("day interval {days} is outside 1..={MAX_DAY_INTERVAL}"),
        ));
    }
    Ok(RecurrenceRule::DailyInterval { days })
}

fn parse_weekdays(rule: &str, rest: &str) -> Result<RecurrenceRule, RecurrenceError> {
    let mut weekdays = Vec::new();
    for item in rest.split(',') {
        let weekday = item
            .parse::<u8>()
            .ok()
            .and_then(iso_weekday)
            .ok_or_else(|| {
                RecurrenceError::invalid_rule(rule, format!("weekday '{item}' is outside 1..=7"))
            })?;
        if !weekdays.contains(&weekday) {
            weekdays.push(weekday);
        }
    }
    Ok(RecurrenceRule::WeekdaySet(weekdays))
}

fn parse_month_days(rule: &str, rest: &str) -> Result<RecurrenceRule, RecurrenceError> {
    let groups: Vec<&str> = rest.split(' ').collect();
    if groups.len() > 2 {
        return Err(RecurrenceError::invalid_rule(
            rule,
            "expected at most a day list and a month list",
        ));
    }

    let mut days = Vec::new();
    for item in groups[0].split(',') {
        let day = match item.parse::<i32>() {
            Ok(-1) => MonthDay::FromEnd(1),
            Ok(-2) => MonthDay::FromEnd(2),
            Ok(day @ 1..=31) => MonthDay::Nth(day.unsigned_abs()),
            _ => {
                return Err(RecurrenceError::invalid_rule(
                    rule,
                    format!("month day '{item}' is not one of -2, -1, 1..=31"),
                ))
            }
        };
        if !days.contains(&day) {
            days.push(day);
        }
    }

    let mut months = Vec::new();
    if let Some(group) = groups.get(1) {
        for item in group.split(',') {
            let month = match item.parse::<u32>() {
                Ok(month @ 1..=12) => month,
                _ => {
                    return Err(RecurrenceError::invalid_rule(
                        rule,
                        format!("month '{item}' is outside 1..=12"),
                    ))
                }
            };
            if !months.contains(&month) {
                months.push(month);
            }
        }
    }

    Ok(RecurrenceRule::MonthDaySet { days, months })
}

/// Maps an ISO weekday number (Monday = 1) to a [`Weekday`].
pub fn iso_weekday(number: u8) -> Option<Weekday> {
    match number {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

fn join<T: fmt::Display>(values: impl Iterator<Item = T>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::None => Ok(()),
            RecurrenceRule::DailyInterval { days } => write!(f, "d {days}"),
            RecurrenceRule::Yearly => write!(f, "y"),
            RecurrenceRule::WeekdaySet(weekdays) => {
                write!(f, "w {}", join(weekdays.iter().map(|w| w.number_from_monday())))
            }
            RecurrenceRule::MonthDaySet { days, months } => {
                write!(f, "m {}", join(days.iter().map(|d| d.as_rule_value())))?;
                if !months.is_empty() {
                    write!(f, " {}", join(months.iter()))?;
                }
                Ok(())
            }
        }
    }
}
