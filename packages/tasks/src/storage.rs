// ABOUTME: Task storage layer using SQLite
// ABOUTME: CRUD queries plus the single normalization step applied to every row read

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::types::{Task, TaskCreateInput, TaskPriority};
use taskgen_storage::StorageError;

/// A task row as stored. Optional columns stay nullable here; defaults are
/// substituted in [`TaskRow::normalize`], the one place rows are shaped for
/// consumers.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: i64,
    user_id: String,
    title: String,
    description: String,
    priority: TaskPriority,
    done: bool,
    completed: bool,
    category: Option<String>,
    category_id_int: Option<i64>,
    due: Option<DateTime<Utc>>,
    tags: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    /// Normalize a stored row into the API view: `due` falls back to the
    /// current timestamp, `tags` to the empty list, and the exposed
    /// `completed` value is the union of both stored flags.
    fn normalize(self) -> Task {
        let tags = self
            .tags
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        Task {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            done: self.done,
            completed: self.done || self.completed,
            category: self.category,
            category_id_int: self.category_id_int,
            due: self.due.unwrap_or_else(Utc::now),
            tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every task owned by `user_id`, normalized.
    pub async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>, StorageError> {
        let rows = sqlx::query_as::<_, TaskRow>("SELECT * FROM tasks WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(rows.into_iter().map(TaskRow::normalize).collect())
    }

    /// Insert one task for `user_id` and return the created row.
    pub async fn create_task(
        &self,
        user_id: &str,
        input: TaskCreateInput,
    ) -> Result<Task, StorageError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (
                user_id, title, description, category, priority,
                category_id_int, done, completed, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.priority)
        .bind(input.category_id_int)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let id = result.last_insert_rowid();
        debug!("Created task {} for user {}", id, user_id);

        self.fetch_task(id).await
    }

    /// Insert a batch of generated tasks in one transaction and return the
    /// created rows in insertion order.
    pub async fn create_tasks_batch(
        &self,
        user_id: &str,
        inputs: Vec<TaskCreateInput>,
    ) -> Result<Vec<Task>, StorageError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;
        let mut ids = Vec::with_capacity(inputs.len());

        for input in &inputs {
            let result = sqlx::query(
                r#"
                INSERT INTO tasks (
                    user_id, title, description, category, priority,
                    category_id_int, done, completed, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?, ?)
                "#,
            )
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.priority)
            .bind(input.category_id_int)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

            ids.push(result.last_insert_rowid());
        }

        tx.commit().await.map_err(StorageError::Sqlx)?;
        debug!("Inserted {} generated tasks for user {}", ids.len(), user_id);

        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            tasks.push(self.fetch_task(id).await?);
        }
        Ok(tasks)
    }

    /// Set both completion flags on the task owned by `user_id` and refresh
    /// its update timestamp. Returns `None` when no owned row matched; the
    /// flags are only ever written together, here.
    pub async fn set_done(
        &self,
        user_id: &str,
        id: i64,
        done: bool,
    ) -> Result<Option<Task>, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET done = ?, completed = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(done)
        .bind(done)
        .bind(Utc::now())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.fetch_task(id).await.map(Some)
    }

    /// Delete the task owned by `user_id`. Succeeds whether or not a row
    /// existed; callers get no existence signal.
    pub async fn delete_task(&self, user_id: &str, id: i64) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(())
    }

    async fn fetch_task(&self, id: i64) -> Result<Task, StorageError> {
        let row = sqlx::query_as::<_, TaskRow>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(row.normalize())
    }
}
