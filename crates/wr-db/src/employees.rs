//! Employee repository
//!
//! Database operations for employees.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use wr_core::traits::Id;
use wr_models::{DashboardAccess, Employee, PermissionFlags};

use crate::repository::{Repository, RepositoryError, RepositoryResult};

const EMPLOYEE_COLUMNS: &str = "id, employee_code, first_name, last_name, email, department, \
     role, team_lead_id, dashboard_access, assign_tasks, review_leaves, manage_holidays, \
     post_announcements, active, created_at, updated_at";

/// Employee database entity
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub team_lead_id: Option<i64>,
    pub dashboard_access: String,
    pub assign_tasks: bool,
    pub review_leaves: bool,
    pub manage_holidays: bool,
    pub post_announcements: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeRow {
    /// Convert the row into the domain model
    pub fn into_model(self) -> RepositoryResult<Employee> {
        let dashboard_access = DashboardAccess::parse(&self.dashboard_access).ok_or_else(|| {
            RepositoryError::Corrupt(format!(
                "employee {} has unknown dashboard access {:?}",
                self.id, self.dashboard_access
            ))
        })?;

        Ok(Employee {
            id: Some(self.id),
            employee_code: self.employee_code,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: self.department,
            role: self.role,
            team_lead_id: self.team_lead_id,
            dashboard_access,
            permissions: PermissionFlags {
                assign_tasks: self.assign_tasks,
                review_leaves: self.review_leaves,
                manage_holidays: self.manage_holidays,
                post_announcements: self.post_announcements,
            },
            active: self.active,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        })
    }
}

/// DTO for creating an employee
#[derive(Debug, Clone)]
pub struct CreateEmployeeDto {
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub team_lead_id: Option<Id>,
    pub dashboard_access: DashboardAccess,
    pub permissions: PermissionFlags,
}

/// DTO for updating an employee
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub team_lead_id: Option<Option<Id>>,
    pub dashboard_access: Option<DashboardAccess>,
    pub permissions: Option<PermissionFlags>,
    pub active: Option<bool>,
}

/// Employee repository implementation
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an employee by its unique code
    pub async fn find_by_code(&self, code: &str) -> RepositoryResult<Option<EmployeeRow>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Fetch the entire active employee list.
    ///
    /// The hierarchy resolver walks the full set in memory, so this is
    /// deliberately unpaginated.
    pub async fn find_active(&self) -> RepositoryResult<Vec<EmployeeRow>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE active = true ORDER BY employee_code ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Check if an employee code is unique
    pub async fn is_code_unique(
        &self,
        code: &str,
        exclude_id: Option<Id>,
    ) -> RepositoryResult<bool> {
        let query = match exclude_id {
            Some(id) => sqlx::query_scalar::<_, bool>(
                "SELECT NOT EXISTS(SELECT 1 FROM employees WHERE employee_code = $1 AND id != $2)",
            )
            .bind(code)
            .bind(id),
            None => sqlx::query_scalar::<_, bool>(
                "SELECT NOT EXISTS(SELECT 1 FROM employees WHERE employee_code = $1)",
            )
            .bind(code),
        };

        let unique = query.fetch_one(&self.pool).await?;
        Ok(unique)
    }
}

#[async_trait]
impl Repository<EmployeeRow, CreateEmployeeDto, UpdateEmployeeDto> for EmployeeRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<EmployeeRow>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<EmployeeRow>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY employee_code ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateEmployeeDto) -> RepositoryResult<EmployeeRow> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            INSERT INTO employees (
                employee_code, first_name, last_name, email, department, role,
                team_lead_id, dashboard_access, assign_tasks, review_leaves,
                manage_holidays, post_announcements, active, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, true, NOW(), NOW()
            )
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&dto.employee_code)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.department)
        .bind(&dto.role)
        .bind(dto.team_lead_id)
        .bind(dto.dashboard_access.as_str())
        .bind(dto.permissions.assign_tasks)
        .bind(dto.permissions.review_leaves)
        .bind(dto.permissions.manage_holidays)
        .bind(dto.permissions.post_announcements)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateEmployeeDto) -> RepositoryResult<EmployeeRow> {
        // team_lead_id uses a sentinel pair so Some(None) can clear the lead
        let (set_lead, lead_value) = match dto.team_lead_id {
            Some(value) => (true, value),
            None => (false, None),
        };

        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            UPDATE employees SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                email = COALESCE($3, email),
                department = COALESCE($4, department),
                role = COALESCE($5, role),
                team_lead_id = CASE WHEN $6 THEN $7 ELSE team_lead_id END,
                dashboard_access = COALESCE($8, dashboard_access),
                assign_tasks = COALESCE($9, assign_tasks),
                review_leaves = COALESCE($10, review_leaves),
                manage_holidays = COALESCE($11, manage_holidays),
                post_announcements = COALESCE($12, post_announcements),
                active = COALESCE($13, active),
                updated_at = NOW()
            WHERE id = $14
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.department)
        .bind(&dto.role)
        .bind(set_lead)
        .bind(lead_value)
        .bind(dto.dashboard_access.map(|a| a.as_str()))
        .bind(dto.permissions.map(|p| p.assign_tasks))
        .bind(dto.permissions.map(|p| p.review_leaves))
        .bind(dto.permissions.map(|p| p.manage_holidays))
        .bind(dto.permissions.map(|p| p.post_announcements))
        .bind(dto.active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Employee with id {} not found", id)))?;

        Ok(row)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Employee with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> EmployeeRow {
        EmployeeRow {
            id: 1,
            employee_code: "WR-0001".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            department: Some("Engineering".into()),
            role: Some("Lead".into()),
            team_lead_id: None,
            dashboard_access: "manager".into(),
            assign_tasks: true,
            review_leaves: true,
            manage_holidays: false,
            post_announcements: false,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_into_model() {
        let employee = sample_row().into_model().unwrap();
        assert_eq!(employee.id, Some(1));
        assert_eq!(employee.dashboard_access, DashboardAccess::Manager);
        assert!(employee.permissions.assign_tasks);
        assert!(!employee.permissions.manage_holidays);
    }

    #[test]
    fn test_row_with_unknown_access_is_corrupt() {
        let mut row = sample_row();
        row.dashboard_access = "superuser".into();
        assert!(matches!(
            row.into_model(),
            Err(RepositoryError::Corrupt(_))
        ));
    }
}
