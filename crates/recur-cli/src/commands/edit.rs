use anyhow::Result;
use owo_colors::OwoColorize;
use recur_core::calendar::CalendarDate;
use recur_core::models::UpdateTaskData;
use recur_core::repository::TaskRepository;

use crate::cli::EditCommand;
use crate::parser::parse_task_date;
use crate::util::parse_task_id;
use crate::views::table::describe_repeat;

pub async fn edit_task(
    repo: &(impl TaskRepository + Sync),
    command: EditCommand,
    today: CalendarDate,
) -> Result<()> {
    let task_id = parse_task_id(&command.id)?;

    let date = command
        .date
        .as_deref()
        .map(|d| parse_task_date(d, today))
        .transpose()?;

    let repeat = if command.repeat_clear {
        Some(String::new())
    } else {
        command.repeat
    };

    let update_data = UpdateTaskData {
        title: command.title,
        date,
        comment: command.comment,
        repeat,
    };

    let task = repo.update_task(task_id, update_data, today).await?;

    println!("{} Updated task {}: {}", "✓".green().bold(), task.id, task.title);
    println!("  Date: {} ({})", task.date, describe_repeat(&task.repeat));

    Ok(())
}
