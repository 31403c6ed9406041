//! Colour constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Category, Status};

/// Not Started indicator.
pub const STATUS_RED: Color = Color::Rgb(255, 75, 75);
/// In Progress indicator.
pub const STATUS_AMBER: Color = Color::Rgb(255, 165, 0);
/// Completed indicator.
pub const STATUS_GREEN: Color = Color::Rgb(0, 204, 150);

/// Work category accent.
pub const CATEGORY_BLUE: Color = Color::Rgb(59, 130, 246);
/// Personal category accent.
pub const CATEGORY_PURPLE: Color = Color::Rgb(168, 85, 247);
/// Urgent category accent.
pub const CATEGORY_RED: Color = Color::Rgb(239, 68, 68);

/// Accent used for the selected day and headers.
pub const INDIGO: Color = Color::Rgb(99, 102, 241);

/// Indicator colour for a status dot.
pub fn status_color(s: Status) -> Color {
    match s {
        Status::NotStarted => STATUS_RED,
        Status::InProgress => STATUS_AMBER,
        Status::Completed => STATUS_GREEN,
    }
}

/// Accent colour for a category.
pub fn category_color(c: Category) -> Color {
    match c {
        Category::Work => CATEGORY_BLUE,
        Category::Personal => CATEGORY_PURPLE,
        Category::Urgent => CATEGORY_RED,
    }
}
