//! Employee of the Month model
//!
//! Table: employee_of_month
//!
//! One winner per (company, month, year); the score computed at selection
//! time is stored with the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wr_core::traits::{Entity, Id, Identifiable, Timestamped};

/// Employee-of-the-Month winner record
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeOfMonth {
    pub id: Option<Id>,
    pub company: String,
    /// 1-12
    pub month: u32,
    pub year: i32,
    pub employee_id: Id,
    pub score: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EmployeeOfMonth {
    pub fn new(company: impl Into<String>, month: u32, year: i32, employee_id: Id, score: f64) -> Self {
        Self {
            company: company.into(),
            month,
            year,
            employee_id,
            score,
            ..Default::default()
        }
    }
}

impl Identifiable for EmployeeOfMonth {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for EmployeeOfMonth {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for EmployeeOfMonth {
    const TABLE_NAME: &'static str = "employee_of_month";
    const TYPE_NAME: &'static str = "EmployeeOfMonth";
}
