//! Task lifecycle services
//!
//! Assignment runs the create contract; status changes go through the
//! transition table below.
//!
//! Pending -> InProgress            (assignee)
//! InProgress -> PendingVerification (assignee)
//! PendingVerification -> Completed / NotCompleted (assigner or admin)

use chrono::NaiveDate;
use wr_contracts::base::Contract;
use wr_contracts::tasks::CreateTaskContract;
use wr_core::result::ServiceResult;
use wr_core::traits::UserContext;
use wr_models::{Task, TaskStatus};

/// Service for assigning a new task
pub struct AssignTaskService<'a, U: UserContext> {
    user: &'a U,
}

impl<'a, U: UserContext> AssignTaskService<'a, U> {
    pub fn new(user: &'a U) -> Self {
        Self { user }
    }

    pub fn call(&self, mut task: Task) -> ServiceResult<Task> {
        task.status = TaskStatus::Pending;
        task.set_progress(task.progress());

        let contract = CreateTaskContract::new(self.user);
        if let Err(errors) = contract.validate(&task) {
            return ServiceResult::failure(errors);
        }

        tracing::debug!(assigned_to = task.assigned_to_id, "task validated for assignment");
        ServiceResult::success(task)
    }
}

/// Service for moving a task through its lifecycle
pub struct TransitionTaskService<'a, U: UserContext> {
    user: &'a U,
    today: NaiveDate,
}

impl<'a, U: UserContext> TransitionTaskService<'a, U> {
    pub fn new(user: &'a U, today: NaiveDate) -> Self {
        Self { user, today }
    }

    pub fn call(&self, mut task: Task, to: TaskStatus, progress: Option<i32>) -> ServiceResult<Task> {
        if !transition_allowed(task.status, to) {
            return ServiceResult::failure_with_message(format!(
                "cannot move a task from {} to {}",
                task.status.as_str(),
                to.as_str()
            ));
        }

        let actor = self.user.employee_id();
        let allowed = match to {
            TaskStatus::InProgress | TaskStatus::PendingVerification => {
                actor == task.assigned_to_id
            }
            TaskStatus::Completed | TaskStatus::NotCompleted => {
                actor == task.assigned_by_id || self.user.is_admin()
            }
            TaskStatus::Pending => false,
        };
        if !allowed {
            return ServiceResult::failure_with_message(
                "you are not allowed to perform this transition",
            );
        }

        if let Some(progress) = progress {
            task.set_progress(progress);
        }

        task.status = to;
        if to.is_terminal() {
            task.completed_date = Some(self.today);
            if to == TaskStatus::Completed && progress.is_none() {
                task.set_progress(100);
            }
        }

        tracing::debug!(task = ?task.id, status = to.as_str(), "task transitioned");
        ServiceResult::success(task)
    }
}

fn transition_allowed(from: TaskStatus, to: TaskStatus) -> bool {
    matches!(
        (from, to),
        (TaskStatus::Pending, TaskStatus::InProgress)
            | (TaskStatus::InProgress, TaskStatus::PendingVerification)
            | (TaskStatus::PendingVerification, TaskStatus::Completed)
            | (TaskStatus::PendingVerification, TaskStatus::NotCompleted)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockUser;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn task_for(assignee: i64, assigner: i64, status: TaskStatus) -> Task {
        let mut t = Task::new("Prepare onboarding docs", assignee, assigner);
        t.status = status;
        t
    }

    #[test]
    fn test_assign_runs_contract() {
        let user = MockUser::manager(1);
        let service = AssignTaskService::new(&user);
        let result = service.call(Task::new("Prepare onboarding docs", 2, 1));
        assert!(result.is_success());
        assert_eq!(result.result().unwrap().status, TaskStatus::Pending);

        let unprivileged = MockUser::plain(3);
        let service = AssignTaskService::new(&unprivileged);
        assert!(service.call(Task::new("x", 2, 3)).is_failure());
    }

    #[test]
    fn test_assignee_starts_work() {
        let user = MockUser::plain(2);
        let service = TransitionTaskService::new(&user, today());

        let result = service.call(task_for(2, 1, TaskStatus::Pending), TaskStatus::InProgress, None);
        assert!(result.is_success());
        assert_eq!(result.result().unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn test_assigner_cannot_start_work_for_assignee() {
        let user = MockUser::manager(1);
        let service = TransitionTaskService::new(&user, today());
        let result = service.call(task_for(2, 1, TaskStatus::Pending), TaskStatus::InProgress, None);
        assert!(result.is_failure());
    }

    #[test]
    fn test_submit_for_verification_records_progress() {
        let user = MockUser::plain(2);
        let service = TransitionTaskService::new(&user, today());

        let result = service.call(
            task_for(2, 1, TaskStatus::InProgress),
            TaskStatus::PendingVerification,
            Some(95),
        );
        assert!(result.is_success());
        let task = result.unwrap();
        assert_eq!(task.status, TaskStatus::PendingVerification);
        assert_eq!(task.progress(), 95);
        assert_eq!(task.completed_date, None);
    }

    #[test]
    fn test_assigner_verifies_to_completed() {
        let user = MockUser::manager(1);
        let service = TransitionTaskService::new(&user, today());

        let result = service.call(
            task_for(2, 1, TaskStatus::PendingVerification),
            TaskStatus::Completed,
            None,
        );
        assert!(result.is_success());
        let task = result.unwrap();
        assert_eq!(task.completed_date, Some(today()));
        assert_eq!(task.progress(), 100);
    }

    #[test]
    fn test_verify_to_not_completed_keeps_progress() {
        let user = MockUser::manager(1);
        let service = TransitionTaskService::new(&user, today());

        let mut task = task_for(2, 1, TaskStatus::PendingVerification);
        task.set_progress(40);

        let result = service.call(task, TaskStatus::NotCompleted, None);
        let task = result.unwrap();
        assert_eq!(task.status, TaskStatus::NotCompleted);
        assert_eq!(task.progress(), 40);
        assert_eq!(task.completed_date, Some(today()));
    }

    #[test]
    fn test_assignee_cannot_self_verify() {
        let user = MockUser::plain(2);
        let service = TransitionTaskService::new(&user, today());
        let result = service.call(
            task_for(2, 1, TaskStatus::PendingVerification),
            TaskStatus::Completed,
            None,
        );
        assert!(result.is_failure());
    }

    #[test]
    fn test_illegal_transition_rejected() {
        let user = MockUser::plain(2);
        let service = TransitionTaskService::new(&user, today());
        let result = service.call(task_for(2, 1, TaskStatus::Pending), TaskStatus::Completed, None);
        assert!(result.is_failure());
    }

    #[test]
    fn test_terminal_tasks_cannot_move() {
        let user = MockUser::manager(1);
        let service = TransitionTaskService::new(&user, today());
        let result = service.call(
            task_for(2, 1, TaskStatus::Completed),
            TaskStatus::InProgress,
            None,
        );
        assert!(result.is_failure());
    }
}
