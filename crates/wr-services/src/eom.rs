//! Employee-of-the-Month selection
//!
//! Ranks employees by their performance score over a month's terminal tasks
//! and picks a single winner per company per month.

use serde::Serialize;
use wr_core::traits::Id;
use wr_models::Task;

use crate::scoring::{summarize_performance, DateWindow, PerformanceSummary};

/// One employee's scored month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EomCandidate {
    pub employee_id: Id,
    pub summary: PerformanceSummary,
}

/// Score every employee's tasks over `window` and return the candidates in
/// input order together with the winner, if any.
///
/// Employees with no terminal task in the window score 0.0 and still rank;
/// an empty input yields no winner. Ties keep the earliest candidate in
/// input order (a strictly-greater comparison never displaces the current
/// best), matching how the dashboards list employees.
pub fn select_employee_of_month(
    tasks_by_employee: &[(Id, Vec<Task>)],
    window: DateWindow,
) -> (Vec<EomCandidate>, Option<EomCandidate>) {
    let candidates: Vec<EomCandidate> = tasks_by_employee
        .iter()
        .map(|(employee_id, tasks)| EomCandidate {
            employee_id: *employee_id,
            summary: summarize_performance(tasks, Some(window)),
        })
        .collect();

    let mut winner: Option<&EomCandidate> = None;
    for candidate in &candidates {
        match winner {
            Some(best) if candidate.summary.score <= best.summary.score => {}
            _ => winner = Some(candidate),
        }
    }

    let winner = winner.cloned();
    (candidates, winner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wr_models::TaskStatus;

    fn completed(progress: i32, day: u32) -> Task {
        let mut t = Task::new("t", 2, 1);
        t.status = TaskStatus::Completed;
        t.set_progress(progress);
        t.completed_date = NaiveDate::from_ymd_opt(2024, 5, day);
        t
    }

    fn window() -> DateWindow {
        DateWindow::month(5, 2024).unwrap()
    }

    #[test]
    fn test_top_score_wins() {
        let input = vec![
            (1, vec![completed(60, 3)]),
            (2, vec![completed(90, 10)]),
            (3, vec![completed(75, 20)]),
        ];

        let (candidates, winner) = select_employee_of_month(&input, window());
        assert_eq!(candidates.len(), 3);
        let winner = winner.unwrap();
        assert_eq!(winner.employee_id, 2);
        assert_eq!(winner.summary.score, 90.0);
    }

    #[test]
    fn test_tie_keeps_input_order() {
        let input = vec![(7, vec![completed(80, 3)]), (8, vec![completed(80, 4)])];

        let (_, winner) = select_employee_of_month(&input, window());
        assert_eq!(winner.unwrap().employee_id, 7);
    }

    #[test]
    fn test_no_candidates_no_winner() {
        let (candidates, winner) = select_employee_of_month(&[], window());
        assert!(candidates.is_empty());
        assert!(winner.is_none());
    }

    #[test]
    fn test_employee_without_terminal_tasks_scores_zero() {
        let mut open = Task::new("t", 5, 1);
        open.status = TaskStatus::InProgress;
        open.due_date = NaiveDate::from_ymd_opt(2024, 5, 9);

        let input = vec![(5, vec![open]), (6, vec![completed(10, 2)])];
        let (candidates, winner) = select_employee_of_month(&input, window());
        assert_eq!(candidates[0].summary.score, 0.0);
        assert_eq!(winner.unwrap().employee_id, 6);
    }

    #[test]
    fn test_tasks_outside_window_ignored() {
        let input = vec![
            (1, vec![completed(100, 1)]),
            // June completion cannot win May
            (2, vec![{
                let mut t = completed(100, 1);
                t.completed_date = NaiveDate::from_ymd_opt(2024, 6, 1);
                t
            }]),
        ];

        let (candidates, winner) = select_employee_of_month(&input, window());
        assert_eq!(winner.unwrap().employee_id, 1);
        assert_eq!(candidates[1].summary.total, 0);
    }
}
