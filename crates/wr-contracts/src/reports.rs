//! Report contracts

use wr_core::error::ValidationErrors;
use wr_core::traits::UserContext;
use wr_models::{Report, ReportContent};

use crate::base::{Contract, ValidationResult};

/// Contract for creating or editing a daily report.
///
/// Reports belong to their author; only drafts can change.
pub struct ReportContract<'a, U: UserContext> {
    user: &'a U,
}

impl<'a, U: UserContext> ReportContract<'a, U> {
    pub fn new(user: &'a U) -> Self {
        Self { user }
    }

    fn validate_owner(&self, report: &Report, errors: &mut ValidationErrors) {
        if report.employee_id != self.user.employee_id() {
            errors.add("employeeId", "reports can only be written by their author");
        }
    }

    fn validate_content(&self, report: &Report, errors: &mut ValidationErrors) {
        if let ReportContent::TaskUpdates { updates } = &report.content {
            if updates.is_empty() {
                errors.add("content", "structured reports need at least one task update");
            }
            for update in updates {
                if !(0..=100).contains(&update.progress) {
                    errors.add("content", format!("progress for task {} must be within 0-100", update.task_id));
                }
            }
        }
    }
}

impl<'a, U: UserContext> Contract<Report> for ReportContract<'a, U> {
    fn validate(&self, entity: &Report) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_owner(entity, &mut errors);
        self.validate_content(entity, &mut errors);

        if entity.is_submitted() {
            errors.add("status", "submitted reports can no longer be edited");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn is_writable(&self, attribute: &str) -> bool {
        matches!(attribute, "content")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockUser;
    use chrono::NaiveDate;
    use wr_models::{ReportStatus, TaskUpdate};

    fn draft(employee_id: i64) -> Report {
        Report::new(employee_id, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap())
    }

    #[test]
    fn test_author_can_edit_own_draft() {
        let user = MockUser::plain(3);
        let contract = ReportContract::new(&user);
        assert!(contract.validate(&draft(3)).is_ok());
    }

    #[test]
    fn test_other_employee_cannot_edit() {
        let user = MockUser::plain(4);
        let contract = ReportContract::new(&user);
        let errors = contract.validate(&draft(3)).unwrap_err();
        assert!(errors.has_error("employeeId"));
    }

    #[test]
    fn test_submitted_report_is_frozen() {
        let user = MockUser::plain(3);
        let contract = ReportContract::new(&user);

        let mut report = draft(3);
        report.status = ReportStatus::Submitted;

        let errors = contract.validate(&report).unwrap_err();
        assert!(errors.has_error("status"));
    }

    #[test]
    fn test_out_of_range_task_update_rejected() {
        let user = MockUser::plain(3);
        let contract = ReportContract::new(&user);

        let mut report = draft(3);
        report.content = ReportContent::TaskUpdates {
            updates: vec![TaskUpdate {
                task_id: 9,
                progress: 150,
                note: None,
            }],
        };

        let errors = contract.validate(&report).unwrap_err();
        assert!(errors.has_error("content"));
    }

    #[test]
    fn test_empty_structured_report_rejected() {
        let user = MockUser::plain(3);
        let contract = ReportContract::new(&user);

        let mut report = draft(3);
        report.content = ReportContent::TaskUpdates { updates: vec![] };

        assert!(contract.validate(&report).is_err());
    }
}
