use chrono::Weekday;

use crate::calendar::{days_in_month, CalendarDate};
use crate::error::RecurrenceError;
use crate::rule::{MonthDay, RecurrenceRule};

/// Days scanned by the weekday resolver, starting at `now`.
const WEEKDAY_SEARCH_DAYS: u64 = 14;

/// Outcome of asking a rule for its next occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextDate {
    /// The task is next due on this date.
    Scheduled(CalendarDate),
    /// The rule has no further occurrences; the task should be finalized.
    Terminate,
}

impl NextDate {
    /// The scheduled date, if any.
    #[inline]
    pub fn scheduled(self) -> Option<CalendarDate> {
        match self {
            NextDate::Scheduled(date) => Some(date),
            NextDate::Terminate => None,
        }
    }
}

/// Computes the next due date of a task from its textual date and rule.
///
/// # Arguments
/// * `now` - The caller's current date; results are always strictly after it
/// * `last_date` - The task's current due date as `YYYYMMDD`
/// * `rule` - The repeat rule text (see [`crate::rule`])
///
/// # Returns
/// * `Ok(NextDate::Terminate)` for an empty rule
/// * `Ok(NextDate::Scheduled(date))` with `date > now` otherwise
pub fn next_occurrence(
    now: CalendarDate,
    last_date: &str,
    rule: &str,
) -> Result<NextDate, RecurrenceError> {
    let last_date: CalendarDate = last_date.parse()?;
    let rule: RecurrenceRule = rule.parse()?;
    rule.next_date(now, last_date)
}

impl RecurrenceRule {
    /// Resolves the next occurrence after `now` for a task last due on `last`.
    pub fn next_date(
        &self,
        now: CalendarDate,
        last: CalendarDate,
    ) -> Result<NextDate, RecurrenceError> {
        let next = match self {
            RecurrenceRule::None => return Ok(NextDate::Terminate),
            RecurrenceRule::DailyInterval { days } => next_daily(now, last, *days)?,
            RecurrenceRule::Yearly => next_yearly(now, last)?,
            RecurrenceRule::WeekdaySet(weekdays) => next_weekday(now, weekdays)?,
            RecurrenceRule::MonthDaySet { days, months } => {
                next_month_day(now, last, days, months).ok_or_else(|| {
                    RecurrenceError::NoMatchingMonthDay {
                        rule: self.to_string(),
                    }
                })?
            }
        };
        if !next.is_representable() {
            return Err(out_of_range(now));
        }
        Ok(NextDate::Scheduled(next))
    }
}

/// Picks the date to store for a task created or edited on `today`.
///
/// Dates on or after `today` are kept. A past date snaps to `today` when
/// the task does not repeat, and to the rule's next occurrence otherwise.
pub fn normalize_due_date(
    today: CalendarDate,
    date: CalendarDate,
    rule: &RecurrenceRule,
) -> Result<CalendarDate, RecurrenceError> {
    if date >= today {
        return Ok(date);
    }
    match rule.next_date(today, date)? {
        NextDate::Scheduled(next) => Ok(next),
        NextDate::Terminate => Ok(today),
    }
}

fn out_of_range(now: CalendarDate) -> RecurrenceError {
    RecurrenceError::DateOutOfRange {
        after: now.to_string(),
    }
}

/// Steps `days` at a time from `last`, jumping straight past `now`.
fn next_daily(
    now: CalendarDate,
    last: CalendarDate,
    days: u32,
) -> Result<CalendarDate, RecurrenceError> {
    let interval = u64::from(days);
    let offset = if now <= last {
        interval
    } else {
        // `now > last`, so the elapsed day count is positive.
        let elapsed = now.days_since(last).unsigned_abs();
        (elapsed / interval + 1) * interval
    };
    last.add_days(offset).ok_or_else(|| out_of_range(now))
}

/// Same month and day as `last`, in the first year that lands after `now`.
fn next_yearly(now: CalendarDate, last: CalendarDate) -> Result<CalendarDate, RecurrenceError> {
    let add = |years: u32| last.add_years(years).ok_or_else(|| out_of_range(now));

    if last > now {
        return add(1);
    }
    // `last <= now`, so the year difference is never negative.
    let years = u32::try_from(now.year() - last.year()).unwrap_or(0);
    let candidate = add(years)?;
    if candidate > now {
        Ok(candidate)
    } else {
        add(years + 1)
    }
}

/// First day after `now` falling on one of `weekdays`.
fn next_weekday(now: CalendarDate, weekdays: &[Weekday]) -> Result<CalendarDate, RecurrenceError> {
    (1..WEEKDAY_SEARCH_DAYS)
        .filter_map(|offset| now.add_days(offset))
        .find(|candidate| weekdays.contains(&candidate.weekday()))
        .ok_or_else(|| {
            RecurrenceError::NoMatchingWeekday(
                weekdays.iter().map(|w| w.number_from_monday()).collect(),
            )
        })
}

/// Earliest matching day in the anchor year or the one after it that is not
/// before `last` and is after `now`.
fn next_month_day(
    now: CalendarDate,
    last: CalendarDate,
    days: &[MonthDay],
    months: &[u32],
) -> Option<CalendarDate> {
    let start_year = last.year();

    (start_year..=start_year + 1)
        .flat_map(move |year| {
            (1..=12u32)
                .filter(move |month| months.is_empty() || months.contains(month))
                .map(move |month| (year, month))
        })
        .flat_map(move |(year, month)| {
            let last_day = days_in_month(year, month).unwrap_or(0);
            days.iter()
                .filter_map(move |day| day.resolve(last_day))
                .filter_map(move |day| CalendarDate::from_ymd(year, month, day))
        })
        .filter(|candidate| *candidate >= last && *candidate > now)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn next(now: &str, last: &str, rule: &str) -> Result<NextDate, RecurrenceError> {
        next_occurrence(date(now), last, rule)
    }

    fn scheduled(now: &str, last: &str, rule: &str) -> String {
        match next(now, last, rule) {
            Ok(NextDate::Scheduled(d)) => d.to_string(),
            other => panic!("expected a scheduled date for {rule:?}, got {other:?}"),
        }
    }

    mod dispatch_tests {
        use super::*;

        #[test]
        fn test_empty_rule_terminates() {
            assert_eq!(next("20240126", "20240126", ""), Ok(NextDate::Terminate));
            assert_eq!(next("20240126", "20200101", ""), Ok(NextDate::Terminate));
            assert_eq!(next("20200101", "20300101", ""), Ok(NextDate::Terminate));
        }

        #[test]
        fn test_invalid_date_is_reported_before_rule() {
            assert_eq!(
                next("20240126", "2024-01-26", "x 5"),
                Err(RecurrenceError::InvalidDateFormat("2024-01-26".to_string()))
            );
        }

        #[test]
        fn test_unknown_prefix_rejected() {
            assert!(matches!(
                next("20240126", "20240126", "x 5"),
                Err(RecurrenceError::InvalidRuleFormat { .. })
            ));
        }

        #[test]
        fn test_leap_day_anchor_in_non_leap_year_is_invalid_date() {
            assert_eq!(
                next("20240301", "20230229", "y"),
                Err(RecurrenceError::InvalidDateFormat("20230229".to_string()))
            );
        }

        #[rstest]
        #[case("99991231", "99991230", "d 1")]
        #[case("99991231", "99990101", "d 400")]
        #[case("99991231", "99991231", "y")]
        #[case("99991231", "99990101", "w 1")]
        #[case("99991231", "99991231", "m 1")]
        #[case("99991201", "99991231", "y")]
        fn test_past_year_9999_is_out_of_range(
            #[case] now: &str,
            #[case] last: &str,
            #[case] rule: &str,
        ) {
            assert_eq!(
                next(now, last, rule),
                Err(RecurrenceError::DateOutOfRange {
                    after: now.to_string()
                })
            );
        }

        #[test]
        fn test_last_representable_day_is_scheduled() {
            assert_eq!(scheduled("99991230", "99991229", "d 1"), "99991231");
            assert_eq!(scheduled("99991201", "99990101", "m -1"), "99991231");
        }

        #[test]
        fn test_scheduled_accessor() {
            assert_eq!(NextDate::Terminate.scheduled(), None);
            let d = date("20240101");
            assert_eq!(NextDate::Scheduled(d).scheduled(), Some(d));
        }
    }

    mod daily_tests {
        use super::*;

        #[rstest]
        #[case("20240301", "20240101", "d 30", "20240331")]
        #[case("20240126", "20240113", "d 7", "20240127")]
        #[case("20240126", "20240120", "d 20", "20240209")]
        #[case("20240126", "20240202", "d 30", "20240303")]
        #[case("20240126", "20240126", "d 1", "20240127")]
        #[case("20240126", "20240125", "d 1", "20240127")]
        #[case("20240126", "20200101", "d 400", "20240519")]
        fn test_daily(#[case] now: &str, #[case] last: &str, #[case] rule: &str, #[case] expected: &str) {
            assert_eq!(scheduled(now, last, rule), expected);
        }

        #[test]
        fn test_landing_exactly_on_now_moves_one_more_step() {
            // 20240101 + 2 * 30 days = 20240301 == now
            assert_eq!(scheduled("20240301", "20240101", "d 30"), "20240331");
        }

        #[rstest]
        #[case("d 401")]
        #[case("d 0")]
        fn test_bounds_rejected(#[case] rule: &str) {
            assert!(matches!(
                next("20240126", "20240126", rule),
                Err(RecurrenceError::InvalidRuleFormat { .. })
            ));
        }
    }

    mod yearly_tests {
        use super::*;

        #[rstest]
        #[case("20240126", "20240226", "20250226")]
        #[case("20240126", "20231106", "20241106")]
        #[case("20240126", "20200113", "20250113")]
        #[case("20240126", "20240126", "20250126")]
        #[case("20240126", "19990126", "20250126")]
        #[case("20240126", "19990127", "20240127")]
        fn test_yearly(#[case] now: &str, #[case] last: &str, #[case] expected: &str) {
            assert_eq!(scheduled(now, last, "y"), expected);
        }

        #[rstest]
        #[case("20240301", "20240229", "20250228")]
        #[case("20240228", "20240229", "20250228")]
        #[case("20270301", "20240229", "20280229")]
        #[case("20270227", "20240229", "20270228")]
        #[case("20160101", "20160229", "20170228")]
        fn test_leap_day_anchor_clamps_to_feb_28(
            #[case] now: &str,
            #[case] last: &str,
            #[case] expected: &str,
        ) {
            assert_eq!(scheduled(now, last, "y"), expected);
        }
    }

    mod weekday_tests {
        use super::*;

        #[test]
        fn test_wednesday_with_monday_and_wednesday_moves_to_monday() {
            // 20240131 is a Wednesday
            assert_eq!(date("20240131").weekday(), Weekday::Wed);
            assert_eq!(scheduled("20240131", "20240101", "w 1,3"), "20240205");
        }

        #[rstest]
        #[case("20240126", "w 7", "20240128")]
        #[case("20240126", "w 1,4,5", "20240129")]
        #[case("20240126", "w 5", "20240202")]
        #[case("20240128", "w 1", "20240129")]
        #[case("20240131", "w 1,2,3,4,5,6,7", "20240201")]
        fn test_weekdays(#[case] now: &str, #[case] rule: &str, #[case] expected: &str) {
            assert_eq!(scheduled(now, "20240101", rule), expected);
        }

        #[test]
        fn test_ignores_last_date() {
            assert_eq!(
                scheduled("20240126", "20300101", "w 1"),
                scheduled("20240126", "19990101", "w 1")
            );
        }

        #[test]
        fn test_empty_set_is_reported() {
            assert_eq!(
                next_weekday(date("20240126"), &[]),
                Err(RecurrenceError::NoMatchingWeekday(vec![]))
            );
        }
    }

    mod month_day_tests {
        use super::*;

        #[rstest]
        #[case("20240126", "20240126", "m 10,17", "20240210")]
        #[case("20240126", "20240409", "m 31", "20240531")]
        #[case("20240126", "20240126", "m -1", "20240131")]
        #[case("20240126", "20240126", "m -2", "20240130")]
        #[case("20240126", "20240126", "m 3 1,3,6", "20240303")]
        #[case("20240126", "20240126", "m 1,-1 2,8", "20240201")]
        #[case("20240126", "20241201", "m 1 1", "20250101")]
        #[case("20241231", "20241201", "m 15", "20250115")]
        fn test_month_days(#[case] now: &str, #[case] last: &str, #[case] rule: &str, #[case] expected: &str) {
            assert_eq!(scheduled(now, last, rule), expected);
        }

        #[test]
        fn test_last_day_of_february() {
            assert_eq!(scheduled("20230101", "20230101", "m -1 2"), "20230228");
            assert_eq!(scheduled("20240101", "20240101", "m -1 2"), "20240229");
            assert_eq!(scheduled("20240101", "20240101", "m -2 2"), "20240228");
        }

        #[test]
        fn test_day_31_skips_short_months() {
            assert_eq!(scheduled("20240401", "20240401", "m 31"), "20240531");
            assert_eq!(scheduled("20240201", "20240201", "m 30"), "20240330");
        }

        #[test]
        fn test_candidate_may_equal_last_date() {
            assert_eq!(scheduled("20240101", "20240110", "m 10"), "20240110");
        }

        #[rstest]
        #[case("20240126", "20240126", "m 31 2")]
        #[case("20240126", "20240126", "m 30 2")]
        #[case("20260101", "20200101", "m 1")]
        fn test_no_match_reported(#[case] now: &str, #[case] last: &str, #[case] rule: &str) {
            assert_eq!(
                next(now, last, rule),
                Err(RecurrenceError::NoMatchingMonthDay {
                    rule: rule.to_string()
                })
            );
        }
    }

    mod normalize_tests {
        use super::*;

        #[test]
        fn test_future_date_kept() {
            let rule: RecurrenceRule = "d 3".parse().unwrap();
            assert_eq!(
                normalize_due_date(date("20240126"), date("20240201"), &rule),
                Ok(date("20240201"))
            );
            assert_eq!(
                normalize_due_date(date("20240126"), date("20240126"), &RecurrenceRule::None),
                Ok(date("20240126"))
            );
        }

        #[test]
        fn test_past_one_shot_snaps_to_today() {
            assert_eq!(
                normalize_due_date(date("20240126"), date("20230101"), &RecurrenceRule::None),
                Ok(date("20240126"))
            );
        }

        #[test]
        fn test_past_recurring_moves_to_next_occurrence() {
            let rule: RecurrenceRule = "d 7".parse().unwrap();
            assert_eq!(
                normalize_due_date(date("20240126"), date("20240113"), &rule),
                Ok(date("20240127"))
            );
        }

        #[test]
        fn test_engine_error_propagates() {
            let rule: RecurrenceRule = "m 31 2".parse().unwrap();
            assert!(normalize_due_date(date("20240126"), date("20240101"), &rule).is_err());
        }
    }
}
