use anyhow::Result;
use recur_core::calendar::CalendarDate;
use recur_core::models::TaskFilter;
use recur_core::repository::TaskRepository;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::views::table::display_tasks;

pub async fn list_tasks(
    repo: &(impl TaskRepository + Sync),
    command: ListCommand,
    config: &Config,
    today: CalendarDate,
) -> Result<()> {
    let filter = TaskFilter {
        search: command.search,
        limit: Some(command.limit.unwrap_or(config.search_limit)),
    };

    let tasks = repo.find_tasks(&filter).await?;

    if command.json {
        let body = serde_json::json!({ "tasks": tasks });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        display_tasks(&tasks, today);
    }

    Ok(())
}
