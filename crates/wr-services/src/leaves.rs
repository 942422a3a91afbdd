//! Leave request services

use chrono::{DateTime, Utc};
use wr_contracts::base::Contract;
use wr_contracts::leaves::{CreateLeaveContract, ReviewLeaveContract};
use wr_core::result::ServiceResult;
use wr_core::traits::UserContext;
use wr_models::{LeaveRequest, LeaveStatus};

/// Service for filing a leave request
pub struct RequestLeaveService<'a, U: UserContext> {
    user: &'a U,
}

impl<'a, U: UserContext> RequestLeaveService<'a, U> {
    pub fn new(user: &'a U) -> Self {
        Self { user }
    }

    pub fn call(&self, mut request: LeaveRequest) -> ServiceResult<LeaveRequest> {
        request.status = LeaveStatus::Pending;
        request.reviewed_by_id = None;
        request.reviewed_at = None;

        let contract = CreateLeaveContract::new(self.user);
        if let Err(errors) = contract.validate(&request) {
            return ServiceResult::failure(errors);
        }
        ServiceResult::success(request)
    }
}

/// Reviewer's verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    Approve,
    Reject,
}

/// Service for approving or rejecting a pending leave request
pub struct ReviewLeaveService<'a, U: UserContext> {
    user: &'a U,
    now: DateTime<Utc>,
}

impl<'a, U: UserContext> ReviewLeaveService<'a, U> {
    pub fn new(user: &'a U, now: DateTime<Utc>) -> Self {
        Self { user, now }
    }

    pub fn call(&self, mut request: LeaveRequest, decision: LeaveDecision) -> ServiceResult<LeaveRequest> {
        let contract = ReviewLeaveContract::new(self.user);
        if let Err(errors) = contract.validate(&request) {
            return ServiceResult::failure(errors);
        }

        request.status = match decision {
            LeaveDecision::Approve => LeaveStatus::Approved,
            LeaveDecision::Reject => LeaveStatus::Rejected,
        };
        request.reviewed_by_id = Some(self.user.employee_id());
        request.reviewed_at = Some(self.now);

        tracing::debug!(request = ?request.id, status = request.status.as_str(), "leave reviewed");
        ServiceResult::success(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockUser;
    use chrono::NaiveDate;

    fn request(employee_id: i64) -> LeaveRequest {
        LeaveRequest::new(
            employee_id,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
        )
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-20T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_request_resets_review_fields() {
        let user = MockUser::plain(5);
        let service = RequestLeaveService::new(&user);

        let mut req = request(5);
        req.status = LeaveStatus::Approved;
        req.reviewed_by_id = Some(1);

        let result = service.call(req);
        assert!(result.is_success());
        let req = result.unwrap();
        assert!(req.is_pending());
        assert_eq!(req.reviewed_by_id, None);
    }

    #[test]
    fn test_approve_records_reviewer() {
        let user = MockUser::manager(1);
        let service = ReviewLeaveService::new(&user, now());

        let result = service.call(request(5), LeaveDecision::Approve);
        assert!(result.is_success());
        let req = result.unwrap();
        assert_eq!(req.status, LeaveStatus::Approved);
        assert_eq!(req.reviewed_by_id, Some(1));
        assert_eq!(req.reviewed_at, Some(now()));
    }

    #[test]
    fn test_reject() {
        let user = MockUser::manager(1);
        let service = ReviewLeaveService::new(&user, now());
        let result = service.call(request(5), LeaveDecision::Reject);
        assert_eq!(result.unwrap().status, LeaveStatus::Rejected);
    }

    #[test]
    fn test_review_without_permission_fails() {
        let user = MockUser::plain(1);
        let service = ReviewLeaveService::new(&user, now());
        assert!(service.call(request(5), LeaveDecision::Approve).is_failure());
    }
}
