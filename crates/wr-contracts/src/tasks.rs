//! Task contracts

use validator::Validate;
use wr_core::error::ValidationErrors;
use wr_core::traits::{Permission, UserContext};
use wr_models::Task;

use crate::base::{merge_field_validations, Contract, ValidationResult};

/// Contract for assigning (creating) a task
pub struct CreateTaskContract<'a, U: UserContext> {
    user: &'a U,
}

impl<'a, U: UserContext> CreateTaskContract<'a, U> {
    pub fn new(user: &'a U) -> Self {
        Self { user }
    }

    fn validate_user_allowed(&self, errors: &mut ValidationErrors) {
        if !self.user.allowed(Permission::AssignTasks) {
            errors.add_base("You are not authorized to assign tasks");
        }
    }

    fn validate_assignment(&self, task: &Task, errors: &mut ValidationErrors) {
        if task.assigned_to_id == 0 {
            errors.add("assignedToId", "can't be blank");
        }
        if task.assigned_by_id != self.user.employee_id() {
            errors.add("assignedById", "must be the acting employee");
        }
    }

    fn validate_dates(&self, task: &Task, errors: &mut ValidationErrors) {
        if let (Some(start), Some(due)) = (task.start_date, task.due_date) {
            if due < start {
                errors.add("dueDate", "must not precede the start date");
            }
        }
    }
}

impl<'a, U: UserContext> Contract<Task> for CreateTaskContract<'a, U> {
    fn validate(&self, entity: &Task) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_user_allowed(&mut errors);
        merge_field_validations(&mut errors, entity.validate());
        self.validate_assignment(entity, &mut errors);
        self.validate_dates(entity, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn is_writable(&self, attribute: &str) -> bool {
        matches!(
            attribute,
            "title"
                | "description"
                | "assigned_to_id"
                | "priority"
                | "start_date"
                | "due_date"
        )
    }
}

/// Contract for updating task fields outside of a lifecycle transition
pub struct UpdateTaskContract<'a, U: UserContext> {
    user: &'a U,
}

impl<'a, U: UserContext> UpdateTaskContract<'a, U> {
    pub fn new(user: &'a U) -> Self {
        Self { user }
    }
}

impl<'a, U: UserContext> Contract<Task> for UpdateTaskContract<'a, U> {
    fn validate(&self, entity: &Task) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        let is_party = self.user.employee_id() == entity.assigned_to_id
            || self.user.employee_id() == entity.assigned_by_id;
        if !is_party && !self.user.is_admin() {
            errors.add_base("Only the assignee, the assigner, or an administrator may edit a task");
        }

        if !entity.is_open() {
            errors.add("status", "task is closed and can no longer be edited");
        }

        merge_field_validations(&mut errors, entity.validate());

        if let (Some(start), Some(due)) = (entity.start_date, entity.due_date) {
            if due < start {
                errors.add("dueDate", "must not precede the start date");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn is_writable(&self, attribute: &str) -> bool {
        matches!(
            attribute,
            "title" | "description" | "priority" | "start_date" | "due_date" | "progress"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockUser;
    use wr_models::TaskStatus;

    fn assigner() -> MockUser {
        let mut user = MockUser::plain(1);
        user.assign_tasks = true;
        user
    }

    #[test]
    fn test_assigner_with_permission_can_create() {
        let user = assigner();
        let contract = CreateTaskContract::new(&user);
        let task = Task::new("Write quarterly summary", 2, 1);
        assert!(contract.validate(&task).is_ok());
    }

    #[test]
    fn test_create_without_permission_fails() {
        let user = MockUser::plain(1);
        let contract = CreateTaskContract::new(&user);
        let task = Task::new("Write quarterly summary", 2, 1);
        assert!(contract.validate(&task).is_err());
    }

    #[test]
    fn test_create_requires_matching_assigner() {
        let user = assigner();
        let contract = CreateTaskContract::new(&user);
        // assigned_by 9 but acting employee is 1
        let task = Task::new("Write quarterly summary", 2, 9);
        let errors = contract.validate(&task).unwrap_err();
        assert!(errors.has_error("assignedById"));
    }

    #[test]
    fn test_due_before_start_rejected() {
        let user = assigner();
        let contract = CreateTaskContract::new(&user);

        let mut task = Task::new("Write quarterly summary", 2, 1);
        task.start_date = chrono::NaiveDate::from_ymd_opt(2024, 4, 10);
        task.due_date = chrono::NaiveDate::from_ymd_opt(2024, 4, 1);

        let errors = contract.validate(&task).unwrap_err();
        assert!(errors.has_error("dueDate"));
    }

    #[test]
    fn test_update_rejected_for_third_party() {
        let user = MockUser::plain(42);
        let contract = UpdateTaskContract::new(&user);
        let task = Task::new("Write quarterly summary", 2, 1);
        assert!(contract.validate(&task).is_err());
    }

    #[test]
    fn test_update_rejected_for_closed_task() {
        let user = MockUser::plain(2);
        let contract = UpdateTaskContract::new(&user);

        let mut task = Task::new("Write quarterly summary", 2, 1);
        task.status = TaskStatus::Completed;

        let errors = contract.validate(&task).unwrap_err();
        assert!(errors.has_error("status"));
    }

    #[test]
    fn test_assignee_can_update_open_task() {
        let user = MockUser::plain(2);
        let contract = UpdateTaskContract::new(&user);
        let task = Task::new("Write quarterly summary", 2, 1);
        assert!(contract.validate(&task).is_ok());
    }
}
