// ABOUTME: Type definitions for per-user settings

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "English";

/// The settings record as exposed by the API, defaults already applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub user_id: String,
    pub dark_mode: bool,
    pub language: String,
    pub notifications_enabled: bool,
}

/// A whole-record write. Absent fields are stored as NULL and read back as
/// defaults; there is no partial-update merge.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdateInput {
    pub dark_mode: Option<bool>,
    pub language: Option<String>,
    pub notifications_enabled: Option<bool>,
}
