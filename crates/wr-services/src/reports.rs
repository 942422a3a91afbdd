//! Daily report services

use chrono::{DateTime, Utc};
use wr_contracts::base::Contract;
use wr_contracts::reports::ReportContract;
use wr_core::result::ServiceResult;
use wr_core::traits::UserContext;
use wr_models::{Report, ReportStatus};

/// Service for creating or editing a draft report
pub struct WriteReportService<'a, U: UserContext> {
    user: &'a U,
}

impl<'a, U: UserContext> WriteReportService<'a, U> {
    pub fn new(user: &'a U) -> Self {
        Self { user }
    }

    pub fn call(&self, report: Report) -> ServiceResult<Report> {
        let contract = ReportContract::new(self.user);
        if let Err(errors) = contract.validate(&report) {
            return ServiceResult::failure(errors);
        }
        ServiceResult::success(report)
    }
}

/// Service for submitting a draft report; submitting is one-way
pub struct SubmitReportService<'a, U: UserContext> {
    user: &'a U,
    now: DateTime<Utc>,
}

impl<'a, U: UserContext> SubmitReportService<'a, U> {
    pub fn new(user: &'a U, now: DateTime<Utc>) -> Self {
        Self { user, now }
    }

    pub fn call(&self, mut report: Report) -> ServiceResult<Report> {
        if report.employee_id != self.user.employee_id() {
            return ServiceResult::failure_with_message(
                "reports can only be submitted by their author",
            );
        }
        if report.is_submitted() {
            return ServiceResult::failure_with_message("report was already submitted");
        }

        report.status = ReportStatus::Submitted;
        report.submitted_at = Some(self.now);
        tracing::debug!(report = ?report.id, "report submitted");
        ServiceResult::success(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockUser;
    use chrono::NaiveDate;

    fn draft(employee_id: i64) -> Report {
        Report::new(employee_id, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap())
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-06T17:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_submit_marks_report() {
        let user = MockUser::plain(3);
        let service = SubmitReportService::new(&user, now());

        let result = service.call(draft(3));
        assert!(result.is_success());
        let report = result.unwrap();
        assert!(report.is_submitted());
        assert_eq!(report.submitted_at, Some(now()));
    }

    #[test]
    fn test_submit_is_one_way() {
        let user = MockUser::plain(3);
        let service = SubmitReportService::new(&user, now());

        let mut report = draft(3);
        report.status = ReportStatus::Submitted;
        assert!(service.call(report).is_failure());
    }

    #[test]
    fn test_only_author_submits() {
        let user = MockUser::plain(4);
        let service = SubmitReportService::new(&user, now());
        assert!(service.call(draft(3)).is_failure());
    }

    #[test]
    fn test_write_runs_contract() {
        let user = MockUser::plain(3);
        let service = WriteReportService::new(&user);
        assert!(service.call(draft(3)).is_success());
        assert!(service.call(draft(9)).is_failure());
    }
}
