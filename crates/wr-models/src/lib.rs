//! # wr-models
//!
//! Domain models for Work Radar.
//!
//! This crate contains all entity structs that map to Work Radar's database
//! tables. Each model implements the core traits from `wr-core`
//! (Entity, Identifiable, Timestamped).

pub use wr_core::traits::{Entity, Id, Identifiable, Timestamped};

// Core domain modules
pub mod employee;
pub mod task;
pub mod report;
pub mod attendance;
pub mod leave;
pub mod holiday;
pub mod announcement;
pub mod employee_of_month;

// Re-exports for convenience
pub use announcement::Announcement;
pub use attendance::Attendance;
pub use employee::{DashboardAccess, Employee, PermissionFlags};
pub use employee_of_month::EmployeeOfMonth;
pub use holiday::Holiday;
pub use leave::{LeaveRequest, LeaveStatus, LeaveType};
pub use report::{Report, ReportContent, ReportStatus, TaskUpdate};
pub use task::{Task, TaskComment, TaskPriority, TaskStatus};
