//! Leave request model
//!
//! Table: leave_requests

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use wr_core::traits::{Entity, Id, Identifiable, Timestamped};

/// Kind of leave requested
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    #[default]
    Casual,
    Sick,
    Earned,
    Unpaid,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Casual => "casual",
            LeaveType::Sick => "sick",
            LeaveType::Earned => "earned",
            LeaveType::Unpaid => "unpaid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "casual" => Some(LeaveType::Casual),
            "sick" => Some(LeaveType::Sick),
            "earned" => Some(LeaveType::Earned),
            "unpaid" => Some(LeaveType::Unpaid),
            _ => None,
        }
    }
}

/// Review state of a leave request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(LeaveStatus::Pending),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }
}

/// Leave request entity
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: Option<Id>,
    pub employee_id: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub reviewed_by_id: Option<Id>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    pub fn new(employee_id: Id, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            employee_id,
            start_date,
            end_date,
            ..Default::default()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }

    /// Calendar days covered, inclusive of both ends
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl Identifiable for LeaveRequest {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for LeaveRequest {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for LeaveRequest {
    const TABLE_NAME: &'static str = "leave_requests";
    const TYPE_NAME: &'static str = "LeaveRequest";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_is_inclusive() {
        let req = LeaveRequest::new(
            1,
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        );
        assert_eq!(req.duration_days(), 3);
    }

    #[test]
    fn test_single_day_leave() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let req = LeaveRequest::new(1, day, day);
        assert_eq!(req.duration_days(), 1);
        assert!(req.is_pending());
    }
}
