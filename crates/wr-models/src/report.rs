//! Daily progress report model
//!
//! Table: reports
//!
//! One report per employee per day. Content is either free-form JSON or a
//! structured list of per-task completion updates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use wr_core::traits::{Entity, Id, Identifiable, Timestamped};

/// Report lifecycle; submitting is one-way
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Draft,
    Submitted,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Submitted => "submitted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ReportStatus::Draft),
            "submitted" => Some(ReportStatus::Submitted),
            _ => None,
        }
    }
}

/// Per-task completion update inside a structured report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub task_id: Id,
    /// Progress the employee reports for the task, 0-100
    pub progress: i32,
    pub note: Option<String>,
}

/// Report body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", untagged)]
pub enum ReportContent {
    /// Structured list of per-task updates
    TaskUpdates { updates: Vec<TaskUpdate> },
    /// Free-form JSON content
    Freeform(serde_json::Value),
}

impl Default for ReportContent {
    fn default() -> Self {
        ReportContent::Freeform(serde_json::Value::Null)
    }
}

/// Daily report entity
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Option<Id>,
    pub employee_id: Id,
    /// The day the report covers; (employee_id, report_date) is unique
    pub report_date: NaiveDate,
    pub content: ReportContent,
    pub status: ReportStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn new(employee_id: Id, report_date: NaiveDate) -> Self {
        Self {
            employee_id,
            report_date,
            ..Default::default()
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.status == ReportStatus::Submitted
    }
}

impl Identifiable for Report {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Report {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for Report {
    const TABLE_NAME: &'static str = "reports";
    const TYPE_NAME: &'static str = "Report";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_content_serializes_updates() {
        let content = ReportContent::TaskUpdates {
            updates: vec![TaskUpdate {
                task_id: 3,
                progress: 60,
                note: Some("blocked on review".into()),
            }],
        };
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["updates"][0]["taskId"], 3);
        assert_eq!(json["updates"][0]["progress"], 60);
    }

    #[test]
    fn test_freeform_content_roundtrip() {
        let content = ReportContent::Freeform(serde_json::json!({"mood": "good"}));
        let json = serde_json::to_string(&content).unwrap();
        let back: ReportContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, content);
    }
}
