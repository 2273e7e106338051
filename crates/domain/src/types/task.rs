//! Task and note value types
//!
//! Persistence of tasks and notes is owned by external collaborators; this
//! module defines the shapes, the serde layout matching the persisted tables,
//! and the in-memory visibility rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Day-type tag controlling task visibility
///
/// Serialized camelCase for compatibility with the persisted `filters[]`
/// column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskFilter {
    NormalDay,
    FastingDay,
    Holiday,
}

/// A to-do item attached to a time block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub is_sub_task: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub filters: Vec<TaskFilter>,
    pub order_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a task with a fresh v7 id and matching created/updated stamps
    pub fn new(title: impl Into<String>, order_index: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.into(),
            completed: false,
            is_sub_task: false,
            parent_id: None,
            filters: Vec::new(),
            order_index,
            block_id: None,
            reminder_enabled: false,
            reminder_time: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the task to a block
    pub fn with_block(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    /// Tag the task with day-type filters
    pub fn with_filters(mut self, filters: Vec<TaskFilter>) -> Self {
        self.filters = filters;
        self
    }

    /// Visibility under the selected day-type filters
    ///
    /// An empty selection shows every task; otherwise the task must carry at
    /// least one of the selected tags.
    pub fn is_visible(&self, selected: &[TaskFilter]) -> bool {
        selected.is_empty() || self.filters.iter().any(|f| selected.contains(f))
    }
}

/// Returns the tasks visible under `selected`, ordered by `order_index`
pub fn visible_tasks<'a>(tasks: &'a [Task], selected: &[TaskFilter]) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks.iter().filter(|t| t.is_visible(selected)).collect();
    visible.sort_by_key(|t| t.order_index);
    visible
}

/// A free-text note attached to a time block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a note with a fresh v7 id and matching created/updated stamps
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.into(),
            content: content.into(),
            block_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the note to a block
    pub fn with_block(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }
}
