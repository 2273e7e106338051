//! Application state and the pure reducer
//!
//! State is immutable: every command produces a fresh `AppState` through
//! [`reduce`]. The reducer takes the mutation timestamp from the caller so
//! that `updated_at` stamping stays deterministic under test.

use chrono::{DateTime, Utc};
use miqat_domain::types::task::visible_tasks;
use miqat_domain::{Note, Settings, Task, TaskFilter};
use serde::{Deserialize, Serialize};

/// Shared application state snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub settings: Option<Settings>,
    pub selected_filters: Vec<TaskFilter>,
}

impl AppState {
    /// Tasks passing the active filter selection, ordered for display
    pub fn visible_tasks(&self) -> Vec<&Task> {
        visible_tasks(&self.tasks, &self.selected_filters)
    }
}

/// Partial update for a task
///
/// Absent fields leave the task untouched. The nested options distinguish
/// "leave alone" from "clear": `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub is_sub_task: Option<bool>,
    pub parent_id: Option<Option<String>>,
    pub filters: Option<Vec<TaskFilter>>,
    pub order_index: Option<i64>,
    pub block_id: Option<Option<String>>,
    pub reminder_enabled: Option<bool>,
    pub reminder_time: Option<Option<DateTime<Utc>>>,
}

/// State mutation messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    SetTasks { tasks: Vec<Task> },
    AddTask { task: Task },
    UpdateTask { id: String, patch: TaskPatch },
    DeleteTask { id: String },
    ToggleTask { id: String },
    SetNotes { notes: Vec<Note> },
    UpsertNote { note: Note },
    DeleteNote { id: String },
    SetFilters { filters: Vec<TaskFilter> },
    SetSettings { settings: Settings },
}

/// Apply a command to a state snapshot, producing the next state
///
/// Commands naming an id not present in the state leave it unchanged.
pub fn reduce(state: &AppState, command: Command, now: DateTime<Utc>) -> AppState {
    let mut next = state.clone();
    match command {
        Command::SetTasks { tasks } => next.tasks = tasks,
        Command::AddTask { task } => next.tasks.push(task),
        Command::UpdateTask { id, patch } => {
            if let Some(task) = next.tasks.iter_mut().find(|task| task.id == id) {
                apply_patch(task, patch, now);
            }
        }
        Command::DeleteTask { id } => next.tasks.retain(|task| task.id != id),
        Command::ToggleTask { id } => {
            if let Some(task) = next.tasks.iter_mut().find(|task| task.id == id) {
                task.completed = !task.completed;
                task.updated_at = now;
            }
        }
        Command::SetNotes { notes } => next.notes = notes,
        Command::UpsertNote { note } => {
            match next.notes.iter_mut().find(|existing| existing.id == note.id) {
                Some(existing) => *existing = Note { updated_at: now, ..note },
                None => next.notes.push(note),
            }
        }
        Command::DeleteNote { id } => next.notes.retain(|note| note.id != id),
        Command::SetFilters { filters } => next.selected_filters = filters,
        Command::SetSettings { settings } => next.settings = Some(settings),
    }
    next
}

fn apply_patch(task: &mut Task, patch: TaskPatch, now: DateTime<Utc>) {
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(completed) = patch.completed {
        task.completed = completed;
    }
    if let Some(is_sub_task) = patch.is_sub_task {
        task.is_sub_task = is_sub_task;
    }
    if let Some(parent_id) = patch.parent_id {
        task.parent_id = parent_id;
    }
    if let Some(filters) = patch.filters {
        task.filters = filters;
    }
    if let Some(order_index) = patch.order_index {
        task.order_index = order_index;
    }
    if let Some(block_id) = patch.block_id {
        task.block_id = block_id;
    }
    if let Some(reminder_enabled) = patch.reminder_enabled {
        task.reminder_enabled = reminder_enabled;
    }
    if let Some(reminder_time) = patch.reminder_time {
        task.reminder_time = reminder_time;
    }
    task.updated_at = now;
}
