//! Enumerations for TUI state management.

/// Which screen the application is showing.
#[derive(Clone, Copy, PartialEq)]
pub enum AppState {
    /// Calendar, day agenda and task entry.
    Manage,
    /// Aggregate charts and the AI analysis panel.
    Dashboard,
    /// The add-task form overlay.
    AddTask,
    /// Inline prompt appending a subtask to the selected task.
    AddSubtask,
}

/// State of the single AI-analysis request slot.
pub enum AnalysisSlot {
    Idle,
    /// A request is in flight; further requests are ignored until it
    /// resolves.
    Pending(std::sync::mpsc::Receiver<String>),
    Done(String),
}
