//! Leave request contracts

use wr_core::error::ValidationErrors;
use wr_core::traits::{Permission, UserContext};
use wr_models::LeaveRequest;

use crate::base::{Contract, ValidationResult};

/// Contract for filing a leave request
pub struct CreateLeaveContract<'a, U: UserContext> {
    user: &'a U,
}

impl<'a, U: UserContext> CreateLeaveContract<'a, U> {
    pub fn new(user: &'a U) -> Self {
        Self { user }
    }
}

impl<'a, U: UserContext> Contract<LeaveRequest> for CreateLeaveContract<'a, U> {
    fn validate(&self, entity: &LeaveRequest) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if entity.employee_id != self.user.employee_id() {
            errors.add("employeeId", "leave can only be requested for yourself");
        }
        if entity.end_date < entity.start_date {
            errors.add("endDate", "must not precede the start date");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn is_writable(&self, attribute: &str) -> bool {
        matches!(attribute, "start_date" | "end_date" | "leave_type" | "reason")
    }
}

/// Contract for reviewing (approving/rejecting) a leave request
pub struct ReviewLeaveContract<'a, U: UserContext> {
    user: &'a U,
}

impl<'a, U: UserContext> ReviewLeaveContract<'a, U> {
    pub fn new(user: &'a U) -> Self {
        Self { user }
    }
}

impl<'a, U: UserContext> Contract<LeaveRequest> for ReviewLeaveContract<'a, U> {
    fn validate(&self, entity: &LeaveRequest) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if !self.user.allowed(Permission::ReviewLeaves) {
            errors.add_base("You are not authorized to review leave requests");
        }
        if entity.employee_id == self.user.employee_id() {
            errors.add_base("You cannot review your own leave request");
        }
        if !entity.is_pending() {
            errors.add("status", "only pending requests can be reviewed");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn is_writable(&self, attribute: &str) -> bool {
        matches!(attribute, "status")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockUser;
    use chrono::NaiveDate;
    use wr_models::LeaveStatus;

    fn request(employee_id: i64) -> LeaveRequest {
        LeaveRequest::new(
            employee_id,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
        )
    }

    #[test]
    fn test_employee_can_request_own_leave() {
        let user = MockUser::plain(5);
        let contract = CreateLeaveContract::new(&user);
        assert!(contract.validate(&request(5)).is_ok());
    }

    #[test]
    fn test_cannot_request_for_someone_else() {
        let user = MockUser::plain(5);
        let contract = CreateLeaveContract::new(&user);
        assert!(contract.validate(&request(6)).is_err());
    }

    #[test]
    fn test_inverted_dates_rejected() {
        let user = MockUser::plain(5);
        let contract = CreateLeaveContract::new(&user);

        let mut req = request(5);
        req.end_date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        let errors = contract.validate(&req).unwrap_err();
        assert!(errors.has_error("endDate"));
    }

    #[test]
    fn test_reviewer_needs_permission() {
        let user = MockUser::plain(1);
        let contract = ReviewLeaveContract::new(&user);
        assert!(contract.validate(&request(5)).is_err());

        let mut reviewer = MockUser::plain(1);
        reviewer.review_leaves = true;
        let contract = ReviewLeaveContract::new(&reviewer);
        assert!(contract.validate(&request(5)).is_ok());
    }

    #[test]
    fn test_cannot_review_own_request() {
        let mut user = MockUser::plain(5);
        user.review_leaves = true;
        let contract = ReviewLeaveContract::new(&user);
        assert!(contract.validate(&request(5)).is_err());
    }

    #[test]
    fn test_only_pending_requests_reviewable() {
        let mut user = MockUser::plain(1);
        user.review_leaves = true;
        let contract = ReviewLeaveContract::new(&user);

        let mut req = request(5);
        req.status = LeaveStatus::Approved;

        let errors = contract.validate(&req).unwrap_err();
        assert!(errors.has_error("status"));
    }
}
