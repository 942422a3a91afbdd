//! API handlers, one module per resource

pub mod analytics;
pub mod announcements;
pub mod attendance;
pub mod employee_of_month;
pub mod employees;
pub mod holidays;
pub mod leaves;
pub mod reports;
pub mod tasks;
