//! Employee model
//!
//! Table: employees

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wr_core::traits::{Entity, Id, Identifiable, Timestamped};

/// Which dashboard an employee sees after signing in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DashboardAccess {
    Admin,
    Manager,
    #[default]
    Employee,
}

impl DashboardAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardAccess::Admin => "admin",
            DashboardAccess::Manager => "manager",
            DashboardAccess::Employee => "employee",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(DashboardAccess::Admin),
            "manager" => Some(DashboardAccess::Manager),
            "employee" => Some(DashboardAccess::Employee),
            _ => None,
        }
    }
}

/// Booleans gating individual actions in the dashboards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PermissionFlags {
    pub assign_tasks: bool,
    pub review_leaves: bool,
    pub manage_holidays: bool,
    pub post_announcements: bool,
}

impl PermissionFlags {
    /// Everything on, as granted to admins
    pub fn all() -> Self {
        Self {
            assign_tasks: true,
            review_leaves: true,
            manage_holidays: true,
            post_announcements: true,
        }
    }
}

/// Employee entity
///
/// `team_lead_id` is a weak self-reference forming a forest over the
/// employee set; the hierarchy resolver in wr-services walks it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Option<Id>,

    /// Employee code, unique per company (e.g. "WR-0042")
    #[validate(length(min = 1, max = 64))]
    pub employee_code: String,

    #[validate(length(min = 1, max = 255))]
    pub first_name: String,

    #[validate(length(max = 255))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    pub department: Option<String>,
    pub role: Option<String>,

    /// The employee's manager, if any
    pub team_lead_id: Option<Id>,

    pub dashboard_access: DashboardAccess,

    #[serde(flatten)]
    pub permissions: PermissionFlags,

    pub active: bool,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Employee {
    fn default() -> Self {
        Self {
            id: None,
            employee_code: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            department: None,
            role: None,
            team_lead_id: None,
            dashboard_access: DashboardAccess::Employee,
            permissions: PermissionFlags::default(),
            active: true,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Employee {
    pub fn new(employee_code: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            employee_code: employee_code.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.dashboard_access == DashboardAccess::Admin
    }

    pub fn is_manager(&self) -> bool {
        self.dashboard_access == DashboardAccess::Manager
    }

    pub fn reports_to(&self, manager_id: Id) -> bool {
        self.team_lead_id == Some(manager_id)
    }
}

impl Identifiable for Employee {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Employee {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for Employee {
    const TABLE_NAME: &'static str = "employees";
    const TYPE_NAME: &'static str = "Employee";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_trims_missing_last_name() {
        let mut e = Employee::new("WR-1", "a@example.com");
        e.first_name = "Ada".into();
        assert_eq!(e.full_name(), "Ada");

        e.last_name = "Lovelace".into();
        assert_eq!(e.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_reports_to() {
        let mut e = Employee::new("WR-2", "b@example.com");
        assert!(!e.reports_to(1));
        e.team_lead_id = Some(1);
        assert!(e.reports_to(1));
    }

    #[test]
    fn test_dashboard_access_parse_roundtrip() {
        for access in [
            DashboardAccess::Admin,
            DashboardAccess::Manager,
            DashboardAccess::Employee,
        ] {
            assert_eq!(DashboardAccess::parse(access.as_str()), Some(access));
        }
        assert_eq!(DashboardAccess::parse("root"), None);
    }
}
