//! Employee contracts

use validator::Validate;
use wr_core::error::ValidationErrors;
use wr_core::traits::UserContext;
use wr_models::Employee;

use crate::base::{merge_field_validations, Contract, ValidationResult};

/// Contract for creating or updating an employee record.
///
/// Employee records are managed from the admin dashboard only.
pub struct EmployeeContract<'a, U: UserContext> {
    user: &'a U,
}

impl<'a, U: UserContext> EmployeeContract<'a, U> {
    pub fn new(user: &'a U) -> Self {
        Self { user }
    }

    fn validate_user_allowed(&self, errors: &mut ValidationErrors) {
        if !self.user.is_admin() {
            errors.add_base("Only administrators can manage employee records");
        }
    }

    fn validate_team_lead(&self, employee: &Employee, errors: &mut ValidationErrors) {
        if let (Some(id), Some(lead_id)) = (employee.id, employee.team_lead_id) {
            if id == lead_id {
                errors.add("teamLeadId", "cannot reference the employee itself");
            }
        }
    }
}

impl<'a, U: UserContext> Contract<Employee> for EmployeeContract<'a, U> {
    fn validate(&self, entity: &Employee) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_user_allowed(&mut errors);
        merge_field_validations(&mut errors, entity.validate());
        self.validate_team_lead(entity, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn is_writable(&self, attribute: &str) -> bool {
        matches!(
            attribute,
            "employee_code"
                | "first_name"
                | "last_name"
                | "email"
                | "department"
                | "role"
                | "team_lead_id"
                | "dashboard_access"
                | "permissions"
                | "active"
        )
    }
}
