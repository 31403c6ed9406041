//! Read-side derivations over a task list snapshot.
//!
//! Everything here is a pure function of the slice it is given: the day
//! agenda, the per-day calendar dots, the dashboard distributions and the
//! plain-text schedule digest handed to the AI analyst. Nothing in this
//! module mutates the store.

use chrono::NaiveDate;

use crate::fields::{format_category, format_status, Category, Status};
use crate::task::Task;

/// Tasks scheduled on `day`, ordered by ascending start time. The sort is
/// stable, so tasks sharing a start keep their insertion order.
pub fn day_agenda(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    let mut agenda: Vec<&Task> = tasks.iter().filter(|t| t.date == day).collect();
    agenda.sort_by_key(|t| t.start);
    agenda
}

/// Statuses of at most the first three tasks on `day`, in list order.
/// Rendered as coloured indicator dots on the calendar cell.
pub fn day_dots(tasks: &[Task], day: NaiveDate) -> Vec<Status> {
    tasks
        .iter()
        .filter(|t| t.date == day)
        .take(3)
        .map(|t| t.status)
        .collect()
}

/// Task count per status across the entire list. Always yields all three
/// statuses in enum order, including zero counts.
pub fn status_distribution(tasks: &[Task]) -> [(Status, usize); 3] {
    Status::ALL.map(|s| (s, tasks.iter().filter(|t| t.status == s).count()))
}

/// Task count per category across the entire list. Categories with no tasks
/// are omitted.
pub fn category_distribution(tasks: &[Task]) -> Vec<(Category, usize)> {
    Category::ALL
        .into_iter()
        .map(|c| (c, tasks.iter().filter(|t| t.category == c).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

/// One line per task, newline-joined, for the AI analyst's context.
pub fn schedule_digest(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(digest_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn digest_line(t: &Task) -> String {
    let subtask_info = if t.subtasks.is_empty() {
        String::new()
    } else {
        format!(
            " ({}/{} subtasks done)",
            t.subtasks_done(),
            t.subtasks.len()
        )
    };
    format!(
        "- [{}] {} ({}): {} at {} - {} ({}m){}",
        t.date.format("%a %b %d %Y"),
        t.title,
        format_category(t.category),
        format_status(t.status),
        t.start.format("%H:%M"),
        t.end.format("%H:%M"),
        t.duration_min,
        subtask_info
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Subtask;
    use chrono::{NaiveDate, NaiveTime};

    fn task(id: u64, day: u32, start: (u32, u32), status: Status, category: Category) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: NaiveTime::from_hms_opt(start.0 + 1, start.1, 0).unwrap(),
            duration_min: 60,
            status,
            category,
            created_at_utc: 0,
            subtasks: Vec::new(),
        }
    }

    #[test]
    fn agenda_filters_by_day_and_sorts_by_start() {
        let tasks = vec![
            task(1, 14, (17, 30), Status::NotStarted, Category::Personal),
            task(2, 15, (8, 0), Status::NotStarted, Category::Work),
            task(3, 14, (9, 0), Status::InProgress, Category::Work),
        ];
        let day = NaiveDate::from_ymd_opt(2026, 8, 14).unwrap();
        let agenda = day_agenda(&tasks, day);
        let ids: Vec<u64> = agenda.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
        // Pure: same inputs, same output.
        let again: Vec<u64> = day_agenda(&tasks, day).iter().map(|t| t.id).collect();
        assert_eq!(ids, again);
    }

    #[test]
    fn agenda_sort_is_stable_for_equal_starts() {
        let tasks = vec![
            task(5, 14, (9, 0), Status::NotStarted, Category::Work),
            task(6, 14, (9, 0), Status::NotStarted, Category::Work),
        ];
        let day = NaiveDate::from_ymd_opt(2026, 8, 14).unwrap();
        let ids: Vec<u64> = day_agenda(&tasks, day).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn dots_cap_at_three_in_list_order() {
        let tasks = vec![
            task(1, 14, (9, 0), Status::NotStarted, Category::Work),
            task(2, 14, (8, 0), Status::InProgress, Category::Work),
            task(3, 14, (7, 0), Status::Completed, Category::Work),
            task(4, 14, (6, 0), Status::Completed, Category::Work),
        ];
        let day = NaiveDate::from_ymd_opt(2026, 8, 14).unwrap();
        let dots = day_dots(&tasks, day);
        assert_eq!(
            dots,
            vec![Status::NotStarted, Status::InProgress, Status::Completed]
        );
        assert!(day_dots(&tasks, NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()).is_empty());
    }

    #[test]
    fn status_distribution_keeps_zero_counts() {
        let tasks = vec![
            task(1, 14, (9, 0), Status::Completed, Category::Work),
            task(2, 14, (9, 0), Status::Completed, Category::Work),
        ];
        let dist = status_distribution(&tasks);
        assert_eq!(dist[0], (Status::NotStarted, 0));
        assert_eq!(dist[1], (Status::InProgress, 0));
        assert_eq!(dist[2], (Status::Completed, 2));
    }

    #[test]
    fn category_distribution_drops_zero_counts() {
        let tasks = vec![
            task(1, 14, (9, 0), Status::NotStarted, Category::Work),
            task(2, 14, (9, 0), Status::NotStarted, Category::Urgent),
        ];
        let dist = category_distribution(&tasks);
        assert_eq!(dist, vec![(Category::Work, 1), (Category::Urgent, 1)]);
        assert!(category_distribution(&[]).is_empty());
    }

    #[test]
    fn digest_lists_one_line_per_task_with_subtask_ratio() {
        let mut t = task(1, 14, (9, 0), Status::InProgress, Category::Work);
        t.title = "Q3 Review".into();
        t.subtasks = vec![
            Subtask {
                id: 1,
                title: "a".into(),
                done: true,
            },
            Subtask {
                id: 2,
                title: "b".into(),
                done: false,
            },
        ];
        let bare = task(2, 14, (17, 30), Status::NotStarted, Category::Personal);

        let digest = schedule_digest(&[t, bare]);
        let lines: Vec<&str> = digest.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "- [Fri Aug 14 2026] Q3 Review (Work): In Progress at 09:00 - 10:00 (60m) (1/2 subtasks done)"
        );
        assert!(!lines[1].contains("subtasks"));
    }
}
