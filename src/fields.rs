//! Closed enumerations for task categorisation.
//!
//! This module defines the two fixed classification axes for tasks: the
//! three-valued completion status and the three scheduling categories.
//! Neither enumeration is dynamically extensible.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task completion status. Any status may move to any other status directly;
/// nothing (including subtask completion) changes it automatically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[serde(alias = "NotStarted")]
    NotStarted,
    #[serde(alias = "InProgress")]
    InProgress,
    #[serde(alias = "Completed")]
    Completed,
}

impl Status {
    /// All statuses in display order.
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    /// The next status in cycling order (wraps around).
    pub fn cycled(self) -> Status {
        match self {
            Status::NotStarted => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed => Status::NotStarted,
        }
    }
}

/// Scheduling category used for grouping and colouring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[serde(alias = "Work")]
    Work,
    #[serde(alias = "Personal")]
    Personal,
    #[serde(alias = "Urgent")]
    Urgent,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Urgent];
}

/// Format a status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::NotStarted => "Not Started",
        Status::InProgress => "In Progress",
        Status::Completed => "Completed",
    }
}

/// Format a category for display.
pub fn format_category(c: Category) -> &'static str {
    match c {
        Category::Work => "Work",
        Category::Personal => "Personal",
        Category::Urgent => "Urgent",
    }
}

/// Glyph shown next to a category name.
pub fn category_icon(c: Category) -> &'static str {
    match c {
        Category::Work => "💼",
        Category::Personal => "🏠",
        Category::Urgent => "🔥",
    }
}
