//! Performance scorer
//!
//! Aggregates a task list into the statistics the analytics dashboard and
//! the Employee-of-the-Month ranking consume: per-status counts, an average
//! completion score over terminal tasks, and an earliness figure.

use chrono::NaiveDate;
use serde::Serialize;
use wr_models::{Task, TaskStatus};

/// Inclusive date window used to filter tasks before scoring
#[derive(Debug, Clone, Copy)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// The calendar month `(month, year)` as a window
    pub fn month(month: u32, year: i32) -> Option<Self> {
        let from = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            from,
            to: next.pred_opt()?,
        })
    }
}

/// Task counts partitioned by status
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub pending_verification: usize,
    pub completed: usize,
    pub not_completed: usize,
}

impl StatusCounts {
    fn record(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Pending => self.pending += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::PendingVerification => self.pending_verification += 1,
            TaskStatus::Completed => self.completed += 1,
            TaskStatus::NotCompleted => self.not_completed += 1,
        }
    }

    pub fn terminal(&self) -> usize {
        self.completed + self.not_completed
    }
}

/// Aggregate statistics over a task population
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    /// Tasks considered after window filtering
    pub total: usize,
    pub counts: StatusCounts,
    /// Average progress over terminal tasks; 0.0 for an empty set, never NaN
    pub score: f64,
    /// Mean of (due - completed) in days over completed tasks carrying both
    /// dates; positive means early
    pub avg_earliness_days: Option<f64>,
}

/// Score a task list, optionally restricted to a date window.
///
/// A windowed task is matched on its completed date, falling back to the
/// due date; tasks with neither are dropped from a windowed run.
pub fn summarize_performance(tasks: &[Task], window: Option<DateWindow>) -> PerformanceSummary {
    let considered: Vec<&Task> = tasks
        .iter()
        .filter(|task| match window {
            None => true,
            Some(w) => task
                .completed_date
                .or(task.due_date)
                .map(|d| w.contains(d))
                .unwrap_or(false),
        })
        .collect();

    let mut counts = StatusCounts::default();
    let mut terminal_progress_sum: i64 = 0;
    let mut earliness_sum: i64 = 0;
    let mut earliness_count: usize = 0;

    for task in &considered {
        counts.record(task.status);
        if task.status.is_terminal() {
            terminal_progress_sum += i64::from(task.progress());
        }
        if task.status == TaskStatus::Completed {
            if let Some(days) = task.earliness_days() {
                earliness_sum += days;
                earliness_count += 1;
            }
        }
    }

    let terminal = counts.terminal();
    let score = if terminal == 0 {
        0.0
    } else {
        terminal_progress_sum as f64 / terminal as f64
    };

    let avg_earliness_days = if earliness_count == 0 {
        None
    } else {
        Some(earliness_sum as f64 / earliness_count as f64)
    };

    PerformanceSummary {
        total: considered.len(),
        counts,
        score,
        avg_earliness_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus, progress: i32) -> Task {
        let mut t = Task::new("t", 2, 1);
        t.status = status;
        t.set_progress(progress);
        t
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_set_scores_zero() {
        let summary = summarize_performance(&[], None);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.score, 0.0);
        assert!(summary.score.is_finite());
        assert_eq!(summary.avg_earliness_days, None);
    }

    #[test]
    fn test_single_completed_task_scores_its_progress() {
        let tasks = vec![task(TaskStatus::Completed, 80)];
        let summary = summarize_performance(&tasks, None);
        assert_eq!(summary.score, 80.0);
        assert_eq!(summary.counts.completed, 1);
    }

    #[test]
    fn test_open_tasks_do_not_affect_score() {
        let tasks = vec![
            task(TaskStatus::Completed, 100),
            task(TaskStatus::InProgress, 10),
            task(TaskStatus::Pending, 0),
            task(TaskStatus::NotCompleted, 40),
        ];
        let summary = summarize_performance(&tasks, None);
        // (100 + 40) / 2 terminal tasks
        assert_eq!(summary.score, 70.0);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.counts.in_progress, 1);
        assert_eq!(summary.counts.terminal(), 2);
    }

    #[test]
    fn test_earliness_only_counts_completed_with_both_dates() {
        let mut early = task(TaskStatus::Completed, 100);
        early.due_date = Some(date(2024, 3, 10));
        early.completed_date = Some(date(2024, 3, 6));

        let mut late = task(TaskStatus::Completed, 90);
        late.due_date = Some(date(2024, 3, 10));
        late.completed_date = Some(date(2024, 3, 12));

        // No due date, excluded from the earliness figure
        let mut dateless = task(TaskStatus::Completed, 50);
        dateless.completed_date = Some(date(2024, 3, 1));

        let summary = summarize_performance(&[early, late, dateless], None);
        // (4 + -2) / 2
        assert_eq!(summary.avg_earliness_days, Some(1.0));
    }

    #[test]
    fn test_window_filters_on_completed_then_due_date() {
        let window = DateWindow::month(3, 2024).unwrap();

        let mut inside = task(TaskStatus::Completed, 100);
        inside.completed_date = Some(date(2024, 3, 15));

        let mut outside = task(TaskStatus::Completed, 0);
        outside.completed_date = Some(date(2024, 4, 2));

        let mut open_inside = task(TaskStatus::InProgress, 30);
        open_inside.due_date = Some(date(2024, 3, 20));

        let undated = task(TaskStatus::Pending, 0);

        let summary =
            summarize_performance(&[inside, outside, open_inside, undated], Some(window));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.score, 100.0);
    }

    #[test]
    fn test_month_window_bounds() {
        let window = DateWindow::month(12, 2024).unwrap();
        assert_eq!(window.from, date(2024, 12, 1));
        assert_eq!(window.to, date(2024, 12, 31));
        assert!(window.contains(date(2024, 12, 31)));
        assert!(!window.contains(date(2025, 1, 1)));

        let feb = DateWindow::month(2, 2024).unwrap();
        assert_eq!(feb.to, date(2024, 2, 29));
    }
}
