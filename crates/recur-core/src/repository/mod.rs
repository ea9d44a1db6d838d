use crate::calendar::CalendarDate;
use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, TaskFilter, UpdateTaskData};
use async_trait::async_trait;

pub mod tasks;

/// Task lifecycle operations.
///
/// Every mutating operation receives the caller's `today`; dates in the past
/// are moved forward through the recurrence engine before they are stored.
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData, today: CalendarDate) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, CoreError>;
    async fn update_task(
        &self,
        id: i64,
        data: UpdateTaskData,
        today: CalendarDate,
    ) -> Result<Task, CoreError>;
    async fn complete_task(&self, id: i64, today: CalendarDate) -> Result<CompletionResult, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<(), CoreError>;
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
