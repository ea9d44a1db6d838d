use crate::calendar::CalendarDate;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, TaskFilter, UpdateTaskData};
use crate::recurrence::{normalize_due_date, NextDate};
use crate::repository::SqliteRepository;
use crate::rule::RecurrenceRule;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Format of a date typed into the search box, e.g. `26.01.2024`.
const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// Validates user-supplied task fields and picks the date to store, along
/// with the rule in its canonical text form.
fn prepare_due_date(
    title: &str,
    date: Option<&str>,
    repeat: &str,
    today: CalendarDate,
) -> Result<(CalendarDate, String), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::InvalidInput("Task title is required".to_string()));
    }

    let date = match date.filter(|d| !d.is_empty()) {
        Some(text) => text.parse::<CalendarDate>()?,
        None => today,
    };
    let rule: RecurrenceRule = repeat.parse()?;

    let date = normalize_due_date(today, date, &rule)?;
    Ok((date, rule.to_string()))
}

/// `%term%` with LIKE wildcards in `term` matched literally under `ESCAPE '\'`.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData, today: CalendarDate) -> Result<Task, CoreError> {
        let (date, repeat) =
            prepare_due_date(&data.title, data.date.as_deref(), &data.repeat, today)?;

        let task: Task = sqlx::query_as(
            r#"INSERT INTO scheduler (date, title, comment, repeat)
            VALUES ($1, $2, $3, $4)
            RETURNING id, date, title, comment, repeat
            "#,
        )
        .bind(date)
        .bind(&data.title)
        .bind(&data.comment)
        .bind(&repeat)
        .fetch_one(self.pool())
        .await?;

        tracing::info!(id = task.id, date = %task.date, repeat = %task.repeat, "task created");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM scheduler WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, CoreError> {
        let limit = i64::from(filter.effective_limit());
        let term = filter.search.as_deref().map(str::trim).unwrap_or_default();

        if term.is_empty() {
            let tasks = sqlx::query_as("SELECT * FROM scheduler ORDER BY date LIMIT $1")
                .bind(limit)
                .fetch_all(self.pool())
                .await?;
            return Ok(tasks);
        }

        if let Ok(date) = NaiveDate::parse_from_str(term, SEARCH_DATE_FORMAT) {
            let tasks = sqlx::query_as(
                "SELECT * FROM scheduler WHERE date = $1 ORDER BY date LIMIT $2",
            )
            .bind(CalendarDate::from(date))
            .bind(limit)
            .fetch_all(self.pool())
            .await?;
            return Ok(tasks);
        }

        let tasks = sqlx::query_as(
            r#"SELECT * FROM scheduler
            WHERE title LIKE $1 ESCAPE '\' OR comment LIKE $1 ESCAPE '\'
            ORDER BY date LIMIT $2"#,
        )
        .bind(like_pattern(term))
        .bind(limit)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn update_task(
        &self,
        id: i64,
        data: UpdateTaskData,
        today: CalendarDate,
    ) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let existing: Task = sqlx::query_as("SELECT * FROM scheduler WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let title = data.title.unwrap_or(existing.title);
        let comment = data.comment.unwrap_or(existing.comment);
        let repeat = data.repeat.unwrap_or(existing.repeat);
        let date_text = data.date.unwrap_or_else(|| existing.date.to_string());
        let (date, repeat) = prepare_due_date(&title, Some(&date_text), &repeat, today)?;

        let task: Task = sqlx::query_as(
            r#"UPDATE scheduler
            SET date = $1, title = $2, comment = $3, repeat = $4
            WHERE id = $5
            RETURNING id, date, title, comment, repeat
            "#,
        )
        .bind(date)
        .bind(title)
        .bind(comment)
        .bind(repeat)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(id, date = %task.date, "task updated");
        Ok(task)
    }

    async fn complete_task(&self, id: i64, today: CalendarDate) -> Result<CompletionResult, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task: Task = sqlx::query_as("SELECT * FROM scheduler WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let rule: RecurrenceRule = task.repeat.parse()?;

        let result = match rule.next_date(today, task.date)? {
            NextDate::Terminate => {
                sqlx::query("DELETE FROM scheduler WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                tracing::info!(id, "one-shot task completed and removed");
                CompletionResult::Deleted(id)
            }
            NextDate::Scheduled(next) => {
                let rescheduled: Task = sqlx::query_as(
                    r#"UPDATE scheduler SET date = $1 WHERE id = $2
                    RETURNING id, date, title, comment, repeat
                    "#,
                )
                .bind(next)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
                tracing::info!(id, from = %task.date, to = %next, "recurring task rescheduled");
                CompletionResult::Rescheduled(rescheduled)
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM scheduler WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        tracing::info!(id, "task deleted");
        Ok(())
    }
}
