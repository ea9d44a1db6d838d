use chrono::{Duration, Weekday};
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use recur_core::calendar::CalendarDate;
use recur_core::models::Task;
use recur_core::rule::{MonthDay, RecurrenceRule};

pub fn display_tasks(tasks: &[Task], today: CalendarDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Date", "Due", "Repeat", "Comment"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));

        let mut title = String::new();
        if task.is_recurring() {
            title.push('↻'); // Recurring symbol
            title.push(' ');
        }
        title.push_str(&task.title);
        row.add_cell(Cell::new(title).add_attribute(Attribute::Bold));

        row.add_cell(Cell::new(task.date));

        let due_cell = Cell::new(relative_due(task.date, today));
        let due_cell = if task.date < today {
            due_cell.fg(Color::Red) // Overdue
        } else if task.date == today {
            due_cell.fg(Color::Yellow) // Due today
        } else {
            due_cell
        };
        row.add_cell(due_cell);

        row.add_cell(Cell::new(describe_repeat(&task.repeat)));
        row.add_cell(Cell::new(&task.comment));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_task(task: &Task, today: CalendarDate) {
    println!("Task {}: {}", task.id, task.title);
    println!("  Date:    {} ({})", task.date, relative_due(task.date, today));
    println!("  Repeat:  {}", describe_repeat(&task.repeat));
    if !task.comment.is_empty() {
        println!("  Comment: {}", task.comment);
    }
}

/// "today", "in 3 days", "2 weeks ago".
pub fn relative_due(date: CalendarDate, today: CalendarDate) -> String {
    let days = date.days_since(today);
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        _ => HumanTime::from(Duration::days(days)).to_string(),
    }
}

/// Plain-English reading of a repeat rule; the raw text if it does not parse.
pub fn describe_repeat(repeat: &str) -> String {
    let Ok(rule) = repeat.parse::<RecurrenceRule>() else {
        return repeat.to_string();
    };

    match rule {
        RecurrenceRule::None => "once".to_string(),
        RecurrenceRule::DailyInterval { days: 1 } => "every day".to_string(),
        RecurrenceRule::DailyInterval { days } => format!("every {} days", days),
        RecurrenceRule::Yearly => "every year".to_string(),
        RecurrenceRule::WeekdaySet(weekdays) => {
            let names: Vec<&str> = weekdays.iter().map(|w| weekday_name(*w)).collect();
            format!("every {}", names.join(", "))
        }
        RecurrenceRule::MonthDaySet { days, months } => {
            let days: Vec<String> = days.iter().map(|d| month_day_name(*d)).collect();
            if months.is_empty() {
                format!("monthly on {}", days.join(", "))
            } else {
                let months: Vec<&str> = months.iter().map(|m| month_name(*m)).collect();
                format!("on {} of {}", days.join(", "), months.join(", "))
            }
        }
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn month_day_name(day: MonthDay) -> String {
    match day {
        MonthDay::FromEnd(1) => "the last day".to_string(),
        MonthDay::FromEnd(2) => "the second-to-last day".to_string(),
        MonthDay::FromEnd(n) => format!("day {} from the end", n),
        MonthDay::Nth(n) => format!("day {}", n),
    }
}

fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}
