//! Task data structures.
//!
//! This module defines the core `Task` struct representing a single dated,
//! time-ranged work item, its checklist `Subtask` entries, and the
//! `TaskDraft` carrying user-supplied fields into the store at creation time.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::fields::{Category, Status};

/// A scheduled work item with a date, a wall-clock time range and an ordered
/// checklist of subtasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Minutes between start and end; never negative.
    pub duration_min: i64,
    pub status: Status,
    pub category: Category,
    pub created_at_utc: i64,
    /// Insertion order is display order; entries are only appended or have
    /// their `done` flag flipped.
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Count of completed subtasks.
    pub fn subtasks_done(&self) -> usize {
        self.subtasks.iter().filter(|s| s.done).count()
    }
}

/// A titled checklist entry owned by exactly one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub id: u64,
    pub title: String,
    pub done: bool,
}

/// A subtask staged in the creation form before its parent task exists.
/// Ids are assigned by the store on submit.
#[derive(Debug, Clone, Default)]
pub struct SubtaskDraft {
    pub title: String,
    pub done: bool,
}

impl SubtaskDraft {
    pub fn new(title: &str) -> Self {
        SubtaskDraft {
            title: title.to_string(),
            done: false,
        }
    }
}

/// User-supplied fields for creating a task. The store fills in `id` and
/// `created_at_utc`.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration_min: i64,
    pub status: Status,
    pub category: Category,
    pub subtasks: Vec<SubtaskDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serialises_with_kebab_case_enums() {
        let task = Task {
            id: 7,
            title: "Standup".into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            duration_min: 30,
            status: Status::InProgress,
            category: Category::Work,
            created_at_utc: 0,
            subtasks: vec![Subtask {
                id: 1,
                title: "agenda".into(),
                done: false,
            }],
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"in-progress\""));
        assert!(json.contains("\"work\""));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 7);
        assert_eq!(back.subtasks.len(), 1);
        assert_eq!(back.start, task.start);
    }
}
