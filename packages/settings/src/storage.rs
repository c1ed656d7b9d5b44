// ABOUTME: Settings storage layer using SQLite
// ABOUTME: Get plus whole-record upsert keyed on the user identifier

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::types::{SettingsUpdateInput, UserSettings, DEFAULT_LANGUAGE};
use taskgen_storage::StorageError;

#[derive(Debug, FromRow)]
struct SettingsRow {
    user_id: String,
    dark_mode: Option<bool>,
    language: Option<String>,
    notifications_enabled: Option<bool>,
}

impl SettingsRow {
    fn normalize(self) -> UserSettings {
        UserSettings {
            user_id: self.user_id,
            dark_mode: self.dark_mode.unwrap_or(false),
            language: self.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            notifications_enabled: self.notifications_enabled.unwrap_or(true),
        }
    }
}

#[derive(Clone)]
pub struct SettingsStorage {
    pool: SqlitePool,
}

impl SettingsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the user's settings row, defaults applied. `None` when the user
    /// has never written settings; no row is auto-created.
    pub async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettings>, StorageError> {
        let row = sqlx::query_as::<_, SettingsRow>("SELECT * FROM settings WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(row.map(SettingsRow::normalize))
    }

    /// Insert-or-update the user's row, overwriting all three columns with
    /// the supplied values (absent values become NULL).
    pub async fn upsert_settings(
        &self,
        user_id: &str,
        input: SettingsUpdateInput,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO settings (user_id, dark_mode, language, notifications_enabled)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                dark_mode = excluded.dark_mode,
                language = excluded.language,
                notifications_enabled = excluded.notifications_enabled
            "#,
        )
        .bind(user_id)
        .bind(input.dark_mode)
        .bind(&input.language)
        .bind(input.notifications_enabled)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        debug!("Upserted settings for user {}", user_id);
        Ok(())
    }
}
