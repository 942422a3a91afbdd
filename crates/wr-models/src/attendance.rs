//! Attendance model
//!
//! Table: attendances

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use wr_core::traits::{Entity, Id, Identifiable, Timestamped};

/// One attendance row per employee per day
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: Option<Id>,
    pub employee_id: Id,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Attendance {
    pub fn new(employee_id: Id, date: NaiveDate) -> Self {
        Self {
            employee_id,
            date,
            ..Default::default()
        }
    }

    /// Hours between check-in and check-out, if both are recorded
    pub fn hours_worked(&self) -> Option<f64> {
        match (self.check_in, self.check_out) {
            (Some(start), Some(end)) if end >= start => {
                Some((end - start).num_minutes() as f64 / 60.0)
            }
            _ => None,
        }
    }
}

impl Identifiable for Attendance {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Attendance {
    fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.updated_at
    }
}

impl Entity for Attendance {
    const TABLE_NAME: &'static str = "attendances";
    const TYPE_NAME: &'static str = "Attendance";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_worked() {
        let mut a = Attendance::new(1, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(a.hours_worked(), None);

        a.check_in = NaiveTime::from_hms_opt(9, 0, 0);
        a.check_out = NaiveTime::from_hms_opt(17, 30, 0);
        assert_eq!(a.hours_worked(), Some(8.5));
    }

    #[test]
    fn test_hours_worked_rejects_inverted_times() {
        let mut a = Attendance::new(1, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        a.check_in = NaiveTime::from_hms_opt(17, 0, 0);
        a.check_out = NaiveTime::from_hms_opt(9, 0, 0);
        assert_eq!(a.hours_worked(), None);
    }
}
