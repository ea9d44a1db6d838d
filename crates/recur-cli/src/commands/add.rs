use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use recur_core::calendar::CalendarDate;
use recur_core::models::NewTaskData;
use recur_core::repository::TaskRepository;

use crate::cli::AddCommand;
use crate::parser::parse_task_date;
use crate::views::table::describe_repeat;

pub async fn add_task(
    repo: &(impl TaskRepository + Sync),
    command: AddCommand,
    today: CalendarDate,
) -> Result<()> {
    let date = command
        .date
        .as_deref()
        .map(|d| parse_task_date(d, today))
        .transpose()?;

    let new_task_data = NewTaskData {
        title: command.title,
        date,
        comment: command.comment,
        repeat: command.repeat,
    };

    let added_task = repo.add_task(new_task_data, today).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        added_task.title.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        added_task.id.to_string().yellow()
    );
    println!("  {} Date: {}", "→".style(info_style), added_task.date);
    if added_task.is_recurring() {
        println!(
            "  {} Repeats {}",
            "→".style(info_style),
            describe_repeat(&added_task.repeat)
        );
    }

    Ok(())
}
