//! Add-task form state for the terminal user interface.
//!
//! The form owns raw text for every field plus a canonical `TimeRange` that
//! the three time fields reconcile through on each edit. Malformed time
//! input is kept on screen but the canonical values only move when the text
//! parses, so the last valid triple always survives to submission.

use crate::datetime::{format_hhmm, TimeRange};
use crate::fields::{Category, Status};
use crate::task::{SubtaskDraft, TaskDraft};
use crate::tui::input::InputField;
use chrono::NaiveDate;

/// Field order in the form, top to bottom.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const START_FIELD: usize = 2;
pub const END_FIELD: usize = 3;
pub const DURATION_FIELD: usize = 4;
pub const CATEGORY_FIELD: usize = 5;
pub const STATUS_FIELD: usize = 6;
pub const SUBTASK_FIELD: usize = 7;

const FIELD_COUNT: usize = 8;

/// State of the add-task form overlay.
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub start: InputField,
    pub end: InputField,
    pub duration: InputField,
    pub category: usize,
    pub status: usize,
    /// Entry line for staging the next subtask.
    pub subtask_entry: InputField,
    /// Subtasks staged for submission; removable until then.
    pub staged: Vec<SubtaskDraft>,
    pub staged_selected: usize,
    pub current_field: usize,
    times: TimeRange,
}

impl TaskForm {
    /// A fresh form: 09:00–10:00, one hour, Work / Not Started.
    pub fn new() -> Self {
        let times = TimeRange::default();
        TaskForm {
            title: InputField::new(),
            description: InputField::new(),
            start: InputField::with_value(&format_hhmm(times.start)),
            end: InputField::with_value(&format_hhmm(times.end)),
            duration: InputField::with_value(&times.duration_min.to_string()),
            category: 0,
            status: 0,
            subtask_entry: InputField::new(),
            staged: Vec::new(),
            staged_selected: 0,
            current_field: TITLE_FIELD,
            times,
        }
    }

    /// The last valid start/end/duration triple.
    pub fn times(&self) -> TimeRange {
        self.times
    }

    pub fn selected_category(&self) -> Category {
        Category::ALL[self.category % Category::ALL.len()]
    }

    pub fn selected_status(&self) -> Status {
        Status::ALL[self.status % Status::ALL.len()]
    }

    /// Move to the next field, wrapping.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    /// Move to the previous field, wrapping.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
    }

    /// Route a typed character to the active field, reconciling times.
    pub fn handle_char(&mut self, c: char) {
        match self.current_field {
            TITLE_FIELD => self.title.insert(c),
            DESCRIPTION_FIELD => self.description.insert(c),
            START_FIELD => {
                self.start.insert(c);
                self.reconcile_start();
            }
            END_FIELD => {
                self.end.insert(c);
                self.reconcile_end();
            }
            DURATION_FIELD => {
                if c.is_ascii_digit() {
                    self.duration.insert(c);
                    self.reconcile_duration();
                }
            }
            SUBTASK_FIELD => self.subtask_entry.insert(c),
            _ => {}
        }
    }

    /// Route a backspace to the active field, reconciling times.
    pub fn handle_backspace(&mut self) {
        match self.current_field {
            TITLE_FIELD => self.title.backspace(),
            DESCRIPTION_FIELD => self.description.backspace(),
            START_FIELD => {
                self.start.backspace();
                self.reconcile_start();
            }
            END_FIELD => {
                self.end.backspace();
                self.reconcile_end();
            }
            DURATION_FIELD => {
                self.duration.backspace();
                self.reconcile_duration();
            }
            SUBTASK_FIELD => self.subtask_entry.backspace(),
            _ => {}
        }
    }

    /// Left/right arrows: cursor movement in text fields, option cycling in
    /// the category and status selectors.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            CATEGORY_FIELD => {
                self.category = cycle(self.category, Category::ALL.len(), right);
            }
            STATUS_FIELD => {
                self.status = cycle(self.status, Status::ALL.len(), right);
            }
            _ => {
                if let Some(field) = self.active_text_field() {
                    if right {
                        field.right();
                    } else {
                        field.left();
                    }
                }
            }
        }
    }

    /// The text input behind the active field, if it has one.
    fn active_text_field(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&mut self.title),
            DESCRIPTION_FIELD => Some(&mut self.description),
            START_FIELD => Some(&mut self.start),
            END_FIELD => Some(&mut self.end),
            DURATION_FIELD => Some(&mut self.duration),
            SUBTASK_FIELD => Some(&mut self.subtask_entry),
            _ => None,
        }
    }

    /// Stage the subtask entry, if non-blank, and clear the entry line.
    pub fn stage_subtask(&mut self) {
        let title = self.subtask_entry.value.trim().to_string();
        if title.is_empty() {
            return;
        }
        self.staged.push(SubtaskDraft::new(&title));
        self.subtask_entry.clear();
        self.staged_selected = self.staged.len() - 1;
    }

    /// Remove the selected staged subtask. Staged entries have no ids yet,
    /// so removal here is allowed; once submitted, subtasks are permanent.
    pub fn remove_selected_staged(&mut self) {
        if self.staged_selected < self.staged.len() {
            self.staged.remove(self.staged_selected);
            if self.staged_selected >= self.staged.len() && self.staged_selected > 0 {
                self.staged_selected -= 1;
            }
        }
    }

    /// Move the staged-subtask selection up or down.
    pub fn move_staged_selection(&mut self, down: bool) {
        if self.staged.is_empty() {
            return;
        }
        if down {
            self.staged_selected = (self.staged_selected + 1).min(self.staged.len() - 1);
        } else {
            self.staged_selected = self.staged_selected.saturating_sub(1);
        }
    }

    /// Build the draft for submission. Returns `None` when the title is
    /// blank; the store would reject it anyway, this just keeps the form
    /// open for correction.
    pub fn draft(&self, date: NaiveDate) -> Option<TaskDraft> {
        if self.title.value.trim().is_empty() {
            return None;
        }
        Some(TaskDraft {
            title: self.title.value.trim().to_string(),
            description: self.description.value.trim().to_string(),
            date,
            start: self.times.start,
            end: self.times.end,
            duration_min: self.times.duration_min,
            status: self.selected_status(),
            category: self.selected_category(),
            subtasks: self.staged.clone(),
        })
    }

    // Time reconciliation: each handler pushes the edited raw text into the
    // canonical TimeRange and, when it parses, rewrites the derived fields'
    // text. Unparseable text leaves the range and the other fields alone.

    fn reconcile_start(&mut self) {
        if self.times.set_start(&self.start.value) {
            self.end.set(&format_hhmm(self.times.end));
        }
    }

    fn reconcile_end(&mut self) {
        if self.times.set_end(&self.end.value) {
            self.duration.set(&self.times.duration_min.to_string());
        }
    }

    fn reconcile_duration(&mut self) {
        if let Ok(minutes) = self.duration.value.trim().parse::<i64>() {
            self.times.set_duration(minutes);
            self.end.set(&format_hhmm(self.times.end));
        }
    }
}

/// Step an index through `len` options in either direction, wrapping.
fn cycle(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut TaskForm, field: usize, text: &str) {
        form.current_field = field;
        // Clear via backspaces so reconciliation sees every edit.
        for _ in 0..40 {
            form.handle_backspace();
        }
        for c in text.chars() {
            form.handle_char(c);
        }
    }

    #[test]
    fn editing_start_moves_end_and_keeps_duration() {
        let mut form = TaskForm::new();
        type_into(&mut form, START_FIELD, "13:00");
        assert_eq!(form.times().duration_min, 60);
        assert_eq!(form.end.value, "14:00");
    }

    #[test]
    fn editing_end_recomputes_duration() {
        let mut form = TaskForm::new();
        type_into(&mut form, END_FIELD, "09:30");
        assert_eq!(form.times().duration_min, 30);
        assert_eq!(form.duration.value, "30");
    }

    #[test]
    fn editing_duration_moves_end() {
        let mut form = TaskForm::new();
        type_into(&mut form, DURATION_FIELD, "90");
        assert_eq!(form.end.value, "10:30");
    }

    #[test]
    fn malformed_time_text_keeps_last_valid_triple() {
        let mut form = TaskForm::new();
        type_into(&mut form, START_FIELD, "11:15");
        let good = form.times();
        // Corrupt the text in place; the canonical triple must not move.
        form.handle_char('x');
        form.handle_char('x');
        assert_eq!(form.times(), good);
        // The derived end field still shows the last valid value.
        assert_eq!(form.end.value, "12:15");
    }

    #[test]
    fn blank_title_never_produces_a_draft() {
        let mut form = TaskForm::new();
        type_into(&mut form, TITLE_FIELD, "   ");
        assert!(form
            .draft(chrono::NaiveDate::from_ymd_opt(2026, 8, 14).unwrap())
            .is_none());
    }

    #[test]
    fn staged_subtasks_can_be_removed_before_submit() {
        let mut form = TaskForm::new();
        type_into(&mut form, SUBTASK_FIELD, "first");
        form.stage_subtask();
        type_into(&mut form, SUBTASK_FIELD, "second");
        form.stage_subtask();
        assert_eq!(form.staged.len(), 2);
        form.move_staged_selection(false);
        form.remove_selected_staged();
        assert_eq!(form.staged.len(), 1);
        assert_eq!(form.staged[0].title, "second");
        // Blank entries never stage.
        type_into(&mut form, SUBTASK_FIELD, "   ");
        form.stage_subtask();
        assert_eq!(form.staged.len(), 1);
    }
}
