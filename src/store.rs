//! The in-memory task store and its mutation operations.
//!
//! `TaskStore` owns the canonical task list for the lifetime of the process;
//! there is no persistence. All mutations go through the five operations
//! below. Every operation is synchronous and total: validation failures and
//! unknown ids degrade to silent no-ops rather than errors.

use chrono::{Duration, Local, NaiveTime, Utc};

use crate::fields::{Category, Status};
use crate::task::{Subtask, SubtaskDraft, Task, TaskDraft};

/// In-memory store for tasks.
///
/// The `revision` counter increments on every mutation that actually changes
/// the list, so readers can detect change by comparing revisions instead of
/// diffing snapshots.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    revision: u64,
    subtask_seq: u64,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TaskStore::default()
    }

    /// Read access to the task list, insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Current change counter. Bumped once per effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Generate the next task id: one past the largest id currently held.
    fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Generate a fresh subtask id from the store-wide counter.
    ///
    /// The counter is monotonic for the life of the store, so two subtasks
    /// created back to back never collide.
    fn next_subtask_id(&mut self) -> u64 {
        self.subtask_seq += 1;
        self.subtask_seq
    }

    /// Add a task from a draft, assigning its id and creation timestamp.
    ///
    /// Returns the new id, or `None` without mutating anything when the
    /// title is blank after trimming. Staged subtasks with blank titles are
    /// skipped; the rest get fresh ids in staged order.
    pub fn add_task(&mut self, draft: TaskDraft) -> Option<u64> {
        if draft.title.trim().is_empty() {
            return None;
        }
        let id = self.next_id();
        let subtasks = draft
            .subtasks
            .into_iter()
            .filter(|s| !s.title.trim().is_empty())
            .map(|s| Subtask {
                id: self.next_subtask_id(),
                title: s.title,
                done: s.done,
            })
            .collect();
        self.tasks.push(Task {
            id,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            start: draft.start,
            end: draft.end,
            duration_min: draft.duration_min.max(0),
            status: draft.status,
            category: draft.category,
            created_at_utc: Utc::now().timestamp(),
            subtasks,
        });
        self.revision += 1;
        Some(id)
    }

    /// Set the status of the task with the given id. Unknown ids are ignored.
    pub fn update_status(&mut self, task_id: u64, status: Status) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.status = status;
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Remove the task with the given id. Irreversible; unknown ids are
    /// ignored.
    pub fn delete_task(&mut self, task_id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        if self.tasks.len() != before {
            self.revision += 1;
            true
        } else {
            false
        }
    }

    /// Flip the `done` flag on one subtask. A no-op when either id is
    /// unknown. Has no effect on the parent task's status.
    pub fn toggle_subtask(&mut self, task_id: u64, subtask_id: u64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        match task.subtasks.iter_mut().find(|s| s.id == subtask_id) {
            Some(sub) => {
                sub.done = !sub.done;
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Append a new unchecked subtask to a task. A no-op when the title is
    /// blank after trimming or the task id is unknown.
    pub fn add_subtask(&mut self, task_id: u64, title: &str) -> bool {
        if title.trim().is_empty() {
            return false;
        }
        let id = self.next_subtask_id();
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        task.subtasks.push(Subtask {
            id,
            title: title.to_string(),
            done: false,
        });
        self.revision += 1;
        true
    }

    /// Build a store pre-populated with a small demonstration schedule
    /// around today's date.
    pub fn with_sample_data() -> Self {
        let mut store = TaskStore::new();
        let today = Local::now().date_naive();
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();

        let _ = store.add_task(TaskDraft {
            title: "Q3 Financial Review".into(),
            description: "Analyse the quarterly reports.".into(),
            date: today,
            start: hm(9, 0),
            end: hm(11, 0),
            duration_min: 120,
            status: Status::InProgress,
            category: Category::Work,
            subtasks: vec![
                SubtaskDraft {
                    title: "Gather data from Sales".into(),
                    done: true,
                },
                SubtaskDraft::new("Review expense reports"),
                SubtaskDraft::new("Draft executive summary"),
            ],
        });
        let _ = store.add_task(TaskDraft {
            title: "Grocery Shopping".into(),
            description: "Buy milk, eggs, and bread.".into(),
            date: today,
            start: hm(17, 30),
            end: hm(18, 15),
            duration_min: 45,
            status: Status::NotStarted,
            category: Category::Personal,
            subtasks: vec![SubtaskDraft::new("Check pantry")],
        });
        let _ = store.add_task(TaskDraft {
            title: "Server Migration".into(),
            description: "Critical security patch deployment.".into(),
            date: today + Duration::days(2),
            start: hm(10, 0),
            end: hm(12, 0),
            duration_min: 120,
            status: Status::NotStarted,
            category: Category::Urgent,
            subtasks: Vec::new(),
        });
        let _ = store.add_task(TaskDraft {
            title: "Weekly Standup".into(),
            description: "Team sync.".into(),
            date: today - Duration::days(1),
            start: hm(9, 0),
            end: hm(9, 30),
            duration_min: 30,
            status: Status::Completed,
            category: Category::Work,
            subtasks: Vec::new(),
        });
        store
    }
}
