//! Core traits shared across the Work Radar crates

use chrono::{DateTime, Utc};

/// Primary key type
pub type Id = i64;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Option<Id>;
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
    fn is_new_record(&self) -> bool {
        !self.is_persisted()
    }
}

/// Trait for entities with timestamps (created_at, updated_at)
pub trait Timestamped {
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

/// Base trait for all domain entities
pub trait Entity: Identifiable + Send + Sync {
    /// The database table name
    const TABLE_NAME: &'static str;

    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}

/// Acting-employee context for permission checks.
///
/// Permission flags gate individual actions (assigning tasks, reviewing
/// leave requests, managing holidays, posting announcements); the dashboard
/// level decides which dashboard the caller sees.
pub trait UserContext: Send + Sync {
    fn employee_id(&self) -> Id;
    fn is_admin(&self) -> bool;
    fn is_manager(&self) -> bool;
    fn can_assign_tasks(&self) -> bool;
    fn can_review_leaves(&self) -> bool;
    fn can_manage_holidays(&self) -> bool;
    fn can_post_announcements(&self) -> bool;

    /// Admins implicitly hold every permission flag
    fn allowed(&self, permission: Permission) -> bool {
        if self.is_admin() {
            return true;
        }
        match permission {
            Permission::AssignTasks => self.can_assign_tasks(),
            Permission::ReviewLeaves => self.can_review_leaves(),
            Permission::ManageHolidays => self.can_manage_holidays(),
            Permission::PostAnnouncements => self.can_post_announcements(),
        }
    }
}

/// Action-gating permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    AssignTasks,
    ReviewLeaves,
    ManageHolidays,
    PostAnnouncements,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nobody;

    impl UserContext for Nobody {
        fn employee_id(&self) -> Id {
            7
        }
        fn is_admin(&self) -> bool {
            false
        }
        fn is_manager(&self) -> bool {
            false
        }
        fn can_assign_tasks(&self) -> bool {
            false
        }
        fn can_review_leaves(&self) -> bool {
            false
        }
        fn can_manage_holidays(&self) -> bool {
            false
        }
        fn can_post_announcements(&self) -> bool {
            false
        }
    }

    struct Admin;

    impl UserContext for Admin {
        fn employee_id(&self) -> Id {
            1
        }
        fn is_admin(&self) -> bool {
            true
        }
        fn is_manager(&self) -> bool {
            false
        }
        fn can_assign_tasks(&self) -> bool {
            false
        }
        fn can_review_leaves(&self) -> bool {
            false
        }
        fn can_manage_holidays(&self) -> bool {
            false
        }
        fn can_post_announcements(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_admin_holds_all_permissions() {
        assert!(Admin.allowed(Permission::AssignTasks));
        assert!(Admin.allowed(Permission::ReviewLeaves));
        assert!(!Nobody.allowed(Permission::AssignTasks));
    }
}
