//! # wr-services
//!
//! Business logic services for Work Radar.
//!
//! Services sit between the API handlers and the repositories: they run the
//! matching contract, apply domain rules, and hand back a `ServiceResult`.
//! The two pure computations the dashboards lean on, the team hierarchy
//! resolver and the performance scorer, live here as well.

pub mod hierarchy;
pub mod scoring;
pub mod eom;
pub mod tasks;
pub mod reports;
pub mod leaves;

pub use eom::{select_employee_of_month, EomCandidate};
pub use hierarchy::subordinates_of;
pub use scoring::{summarize_performance, DateWindow, PerformanceSummary, StatusCounts};

#[cfg(test)]
pub(crate) mod test_support {
    use wr_core::traits::{Id, UserContext};

    pub struct MockUser {
        pub id: Id,
        pub admin: bool,
        pub manager: bool,
        pub assign_tasks: bool,
        pub review_leaves: bool,
    }

    impl MockUser {
        pub fn plain(id: Id) -> Self {
            Self {
                id,
                admin: false,
                manager: false,
                assign_tasks: false,
                review_leaves: false,
            }
        }

        pub fn manager(id: Id) -> Self {
            Self {
                id,
                admin: false,
                manager: true,
                assign_tasks: true,
                review_leaves: true,
            }
        }
    }

    impl UserContext for MockUser {
        fn employee_id(&self) -> Id {
            self.id
        }
        fn is_admin(&self) -> bool {
            self.admin
        }
        fn is_manager(&self) -> bool {
            self.manager
        }
        fn can_assign_tasks(&self) -> bool {
            self.assign_tasks
        }
        fn can_review_leaves(&self) -> bool {
            self.review_leaves
        }
        fn can_manage_holidays(&self) -> bool {
            false
        }
        fn can_post_announcements(&self) -> bool {
            false
        }
    }
}
