//! # Zenith - Task & Calendar Manager
//!
//! A single-user task manager for the terminal: a month calendar with
//! per-day status dots, a filtered day agenda, a task creation form with
//! subtasks, and a dashboard with aggregate charts plus an optional
//! AI-generated workload analysis.
//!
//! ## Key Features
//!
//! - **Month Calendar**: Padded Sunday-to-Saturday grid with status-coloured
//!   indicator dots per day
//! - **Day Agenda**: Tasks for the selected day ordered by start time, with
//!   inline status cycling and subtask checklists
//! - **Time Reconciliation**: Start, end and duration stay consistent while
//!   editing; whichever field was not edited is recomputed
//! - **Dashboard**: Status and category distributions plus an AI workload
//!   summary via the Gemini API (`GEMINI_API_KEY`)
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch with the sample schedule
//! zenith
//!
//! # Launch with an empty schedule
//! zenith --empty
//!
//! # Shell completions
//! zenith completions bash
//! ```
//!
//! All data is held in memory for the session; nothing is persisted.

use clap::Parser;

pub mod analysis;
pub mod cli;
pub mod cmd;
pub mod datetime;
pub mod fields;
pub mod store;
pub mod task;
pub mod views;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
}

use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Ui) => cmd_ui(cli.empty),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
    }
}
