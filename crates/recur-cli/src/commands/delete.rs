use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use recur_core::error::CoreError;
use recur_core::repository::TaskRepository;

use crate::cli::DeleteCommand;
use crate::util::parse_task_id;

pub async fn delete_task(repo: &(impl TaskRepository + Sync), command: DeleteCommand) -> Result<()> {
    let task_id = parse_task_id(&command.id)?;
    let task = repo
        .find_task_by_id(task_id)
        .await?
        .ok_or_else(|| anyhow!(CoreError::NotFound(task_id.to_string())))?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete task '{}'?",
                task.title
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_task(task_id).await?;
    println!("Deleted task {}: '{}'", task.id, task.title);
    Ok(())
}
