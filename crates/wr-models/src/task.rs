//! Task model
//!
//! Table: tasks

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wr_core::traits::{Entity, Id, Identifiable, Timestamped};

/// Task lifecycle state
///
/// Completed and NotCompleted are terminal; only terminal tasks count
/// toward performance scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    PendingVerification,
    Completed,
    NotCompleted,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::NotCompleted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::PendingVerification => "pending_verification",
            TaskStatus::Completed => "completed",
            TaskStatus::NotCompleted => "not_completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "pending_verification" => Some(TaskStatus::PendingVerification),
            "completed" => Some(TaskStatus::Completed),
            "not_completed" => Some(TaskStatus::NotCompleted),
            _ => None,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Normal => "normal",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(TaskPriority::Low),
            "normal" => Some(TaskPriority::Normal),
            "high" => Some(TaskPriority::High),
            "urgent" => Some(TaskPriority::Urgent),
            _ => None,
        }
    }
}

/// One entry in a task's comment thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    pub author_id: Id,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Task entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub description: Option<String>,

    pub assigned_to_id: Id,
    pub assigned_by_id: Id,

    pub status: TaskStatus,

    /// Completion percentage, always within [0, 100]
    progress: i32,

    pub priority: TaskPriority,

    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,

    #[serde(default)]
    pub comments: Vec<TaskComment>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: None,
            assigned_to_id: 0,
            assigned_by_id: 0,
            status: TaskStatus::Pending,
            progress: 0,
            priority: TaskPriority::Normal,
            start_date: None,
            due_date: None,
            completed_date: None,
            comments: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl Task {
    pub fn new(title: impl Into<String>, assigned_to_id: Id, assigned_by_id: Id) -> Self {
        Self {
            title: title.into(),
            assigned_to_id,
            assigned_by_id,
            ..Default::default()
        }
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// Set the completion percentage; out-of-range values are clamped here,
    /// not left to input widgets.
    pub fn set_progress(&mut self, progress: i32) {
        self.progress = progress.clamp(0, 100);
    }

    /// Restore a stored progress value (already clamped at write time)
    pub fn with_progress(mut self, progress: i32) -> Self {
        self.set_progress(progress);
        self
    }

    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn add_comment(&mut self, author_id: Id, body: impl Into<String>, at: DateTime<Utc>) {
        self.comments.push(TaskComment {
            author_id,
            body: body.into(),
            created_at: at,
        });
    }

    /// Days between completion and due date; positive means finished early
    pub fn earliness_days(&self) -> Option<i64> {
        match (self.due_date, self.completed_date) {
            (Some(due), Some(done)) => Some((due - done).num_days()),
            _ => None,
        }
    }
}

impl Identifiable for Task {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Task {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for Task {
    const TABLE_NAME: &'static str = "tasks";
    const TYPE_NAME: &'static str = "Task";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_clamped() {
        let mut task = Task::new("Ship it", 2, 1);
        task.set_progress(150);
        assert_eq!(task.progress(), 100);
        task.set_progress(-5);
        assert_eq!(task.progress(), 0);
        task.set_progress(80);
        assert_eq!(task.progress(), 80);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::NotCompleted.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::PendingVerification.is_terminal());
    }

    #[test]
    fn test_earliness_days() {
        let mut task = Task::new("Report", 2, 1);
        assert_eq!(task.earliness_days(), None);

        task.due_date = NaiveDate::from_ymd_opt(2024, 3, 10);
        task.completed_date = NaiveDate::from_ymd_opt(2024, 3, 7);
        assert_eq!(task.earliness_days(), Some(3));

        // Finished late
        task.completed_date = NaiveDate::from_ymd_opt(2024, 3, 12);
        assert_eq!(task.earliness_days(), Some(-2));
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::PendingVerification,
            TaskStatus::Completed,
            TaskStatus::NotCompleted,
        ] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
    }
}
