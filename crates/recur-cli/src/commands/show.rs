use anyhow::{anyhow, Result};
use recur_core::calendar::CalendarDate;
use recur_core::error::CoreError;
use recur_core::repository::TaskRepository;

use crate::cli::ShowCommand;
use crate::util::parse_task_id;
use crate::views::table::display_task;

pub async fn show_task(
    repo: &(impl TaskRepository + Sync),
    command: ShowCommand,
    today: CalendarDate,
) -> Result<()> {
    let task_id = parse_task_id(&command.id)?;
    let task = repo
        .find_task_by_id(task_id)
        .await?
        .ok_or_else(|| anyhow!(CoreError::NotFound(task_id.to_string())))?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        display_task(&task, today);
    }

    Ok(())
}
