// ABOUTME: Task type definitions
// ABOUTME: Priority enumeration, the normalized task view, and creation inputs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    /// Pick one of the three levels uniformly at random.
    pub fn random() -> Self {
        const LEVELS: [TaskPriority; 3] =
            [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low];
        *LEVELS
            .choose(&mut rand::thread_rng())
            .unwrap_or(&TaskPriority::Medium)
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            _ => Err(format!("invalid priority: {}", s)),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        };
        f.write_str(s)
    }
}

/// A task as exposed by the API: every optional stored field has already
/// been substituted with its default, so consumers never see a null
/// priority, due, or tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub done: bool,
    pub completed: bool,
    pub category: Option<String>,
    pub category_id_int: Option<i64>,
    pub due: DateTime<Utc>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TaskCreateInput {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub priority: TaskPriority,
    pub category_id_int: Option<i64>,
}
