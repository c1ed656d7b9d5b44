// ABOUTME: Category storage layer using SQLite
// ABOUTME: Full-scan CRUD scoped to the owning user

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::types::Category;
use taskgen_storage::StorageError;

#[derive(Clone)]
pub struct CategoryStorage {
    pool: SqlitePool,
}

impl CategoryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every category owned by `user_id`. No pagination or ordering;
    /// the owned set is assumed small.
    pub async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>, StorageError> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }

    pub async fn create_category(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<Category, StorageError> {
        let result = sqlx::query(
            "INSERT INTO categories (user_id, name, created_at) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let id = result.last_insert_rowid();
        debug!("Created category {} for user {}", id, user_id);

        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }

    /// Rename the category owned by `user_id`. Returns `None` when no owned
    /// row matched.
    pub async fn update_category(
        &self,
        user_id: &str,
        id: i64,
        name: &str,
    ) -> Result<Option<Category>, StorageError> {
        let result = sqlx::query("UPDATE categories SET name = ? WHERE id = ? AND user_id = ?")
            .bind(name)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }

    /// Delete the category owned by `user_id`. Succeeds whether or not a row
    /// existed; tasks referencing the id keep their dangling reference.
    pub async fn delete_category(&self, user_id: &str, id: i64) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM categories WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(())
    }
}
