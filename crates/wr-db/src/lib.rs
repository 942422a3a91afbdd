//! # wr-db
//!
//! Database layer for Work Radar.
//!
//! This crate provides PostgreSQL database access using SQLx, including:
//!
//! - Connection pool management
//! - Repository pattern for CRUD operations
//! - Entity mappings for employees, tasks, reports, and the rest of the
//!   HR surface
//!
//! ## Example
//!
//! ```ignore
//! use wr_db::{Database, PoolConfig};
//! use wr_db::employees::EmployeeRepository;
//! use wr_db::repository::Repository;
//!
//! let app = wr_core::config::AppConfig::from_env()?;
//! let db = Database::connect(&PoolConfig::from(&app.database)).await?;
//!
//! let repo = EmployeeRepository::new(db.pool().clone());
//! let employee = repo.find_by_id(1).await?;
//! ```

pub mod pool;
pub mod repository;
pub mod employees;
pub mod tasks;
pub mod reports;
pub mod attendance;
pub mod leaves;
pub mod holidays;
pub mod announcements;
pub mod eom;

// Re-exports
pub use pool::{Database, PoolConfig};
pub use repository::{Repository, RepositoryError, RepositoryResult};
pub use announcements::{
    AnnouncementRepository, AnnouncementRow, CreateAnnouncementDto, UpdateAnnouncementDto,
};
pub use attendance::{
    AttendanceRepository, AttendanceRow, CreateAttendanceDto, UpdateAttendanceDto,
};
pub use employees::{CreateEmployeeDto, EmployeeRepository, EmployeeRow, UpdateEmployeeDto};
pub use eom::{EomRepository, EomRow};
pub use holidays::{CreateHolidayDto, HolidayRepository, HolidayRow, UpdateHolidayDto};
pub use leaves::{CreateLeaveDto, LeaveRepository, LeaveRow, UpdateLeaveDto};
pub use reports::{CreateReportDto, ReportRepository, ReportRow, UpdateReportDto};
pub use tasks::{CreateTaskDto, TaskRepository, TaskRow, UpdateTaskDto};
