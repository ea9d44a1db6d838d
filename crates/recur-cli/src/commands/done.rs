use anyhow::Result;
use owo_colors::OwoColorize;
use recur_core::calendar::CalendarDate;
use recur_core::models::CompletionResult;
use recur_core::repository::TaskRepository;

use crate::cli::DoneCommand;
use crate::util::parse_task_id;

pub async fn complete_task(
    repo: &(impl TaskRepository + Sync),
    command: DoneCommand,
    today: CalendarDate,
) -> Result<()> {
    let task_id = parse_task_id(&command.id)?;

    match repo.complete_task(task_id, today).await? {
        CompletionResult::Deleted(id) => {
            println!("{} Completed task {} (one-time task removed)", "✓".green().bold(), id);
        }
        CompletionResult::Rescheduled(task) => {
            println!("{} Completed task: '{}'", "✓".green().bold(), task.title);
            println!("  {} Next due on {}", "↻".blue(), task.date.to_string().yellow());
        }
    }

    Ok(())
}
