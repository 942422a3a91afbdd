//! Employee API handlers
//!
//! Employee records are managed from the admin dashboard; the team
//! endpoint feeds the manager dashboard's subordinate list.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use wr_contracts::base::Contract;
use wr_contracts::employees::EmployeeContract;
use wr_core::traits::Id;
use wr_db::{CreateEmployeeDto, EmployeeRepository, Repository, UpdateEmployeeDto};
use wr_models::{DashboardAccess, Employee, PermissionFlags};
use wr_services::subordinates_of;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, Collection, CurrentEmployee, Pagination};

/// GET /api/v1/employees
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    pagination: Pagination,
) -> ApiResult<impl IntoResponse> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let rows = repo.find_all(pagination.page_size, pagination.offset).await?;
    let total = repo.count().await?;

    let employees = rows
        .into_iter()
        .map(|r| r.into_model())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Collection::new(employees, total, &pagination)))
}

/// GET /api/v1/employees/:id
pub async fn get(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let row = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee", id))?;

    Ok(Json(row.into_model()?))
}

/// GET /api/v1/employees/:id/team
///
/// Every employee reachable from `:id` through `team_lead_id`
/// back-references, in breadth-first order.
pub async fn team(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = EmployeeRepository::new(state.pool.clone());
    if !repo.exists(id).await? {
        return Err(ApiError::not_found("Employee", id));
    }

    let active = repo
        .find_active()
        .await?
        .into_iter()
        .map(|r| r.into_model())
        .collect::<Result<Vec<_>, _>>()?;

    let team = subordinates_of(id, &active);
    Ok(Json(Collection::complete(team)))
}

/// POST /api/v1/employees
pub async fn create(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Json(body): Json<CreateEmployeeRequest>,
) -> ApiResult<impl IntoResponse> {
    let employee = body.clone().into_model();

    let contract = EmployeeContract::new(&user);
    contract.validate(&employee)?;

    let repo = EmployeeRepository::new(state.pool.clone());
    if !repo.is_code_unique(&employee.employee_code, None).await? {
        return Err(ApiError::conflict(format!(
            "employee code {} is already taken",
            employee.employee_code
        )));
    }

    let row = repo
        .create(CreateEmployeeDto {
            employee_code: body.employee_code,
            first_name: body.first_name,
            last_name: body.last_name.unwrap_or_default(),
            email: body.email,
            department: body.department,
            role: body.role,
            team_lead_id: body.team_lead_id,
            dashboard_access: body.dashboard_access.unwrap_or_default(),
            permissions: body.permissions.unwrap_or_default(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(row.into_model()?)))
}

/// PATCH /api/v1/employees/:id
pub async fn update(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
    Json(body): Json<UpdateEmployeeRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee", id))?
        .into_model()?;

    let candidate = body.clone().apply_to(existing);
    let contract = EmployeeContract::new(&user);
    contract.validate(&candidate)?;

    let row = repo
        .update(
            id,
            UpdateEmployeeDto {
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                department: body.department,
                role: body.role,
                team_lead_id: body.team_lead_id,
                dashboard_access: body.dashboard_access,
                permissions: body.permissions,
                active: body.active,
            },
        )
        .await?;

    Ok(Json(row.into_model()?))
}

/// DELETE /api/v1/employees/:id
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    if !user.employee.is_admin() {
        return Err(ApiError::forbidden(
            "only administrators can delete employee records",
        ));
    }
    if user.id == id {
        return Err(ApiError::conflict("you cannot delete your own record"));
    }

    let repo = EmployeeRepository::new(state.pool.clone());
    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// Request types

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub employee_code: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub team_lead_id: Option<Id>,
    pub dashboard_access: Option<DashboardAccess>,
    pub permissions: Option<PermissionFlags>,
}

impl CreateEmployeeRequest {
    fn into_model(self) -> Employee {
        let mut employee = Employee::new(self.employee_code, self.email);
        employee.first_name = self.first_name;
        employee.last_name = self.last_name.unwrap_or_default();
        employee.department = self.department;
        employee.role = self.role;
        employee.team_lead_id = self.team_lead_id;
        employee.dashboard_access = self.dashboard_access.unwrap_or_default();
        employee.permissions = self.permissions.unwrap_or_default();
        employee
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    /// `null` clears the lead, absence leaves it unchanged
    #[serde(default, with = "double_option")]
    pub team_lead_id: Option<Option<Id>>,
    pub dashboard_access: Option<DashboardAccess>,
    pub permissions: Option<PermissionFlags>,
    pub active: Option<bool>,
}

impl UpdateEmployeeRequest {
    fn apply_to(self, mut employee: Employee) -> Employee {
        if let Some(v) = self.first_name {
            employee.first_name = v;
        }
        if let Some(v) = self.last_name {
            employee.last_name = v;
        }
        if let Some(v) = self.email {
            employee.email = v;
        }
        if let Some(v) = self.department {
            employee.department = Some(v);
        }
        if let Some(v) = self.role {
            employee.role = Some(v);
        }
        if let Some(v) = self.team_lead_id {
            employee.team_lead_id = v;
        }
        if let Some(v) = self.dashboard_access {
            employee.dashboard_access = v;
        }
        if let Some(v) = self.permissions {
            employee.permissions = v;
        }
        if let Some(v) = self.active {
            employee.active = v;
        }
        employee
    }
}

/// Distinguishes an absent field from an explicit `null`
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let absent: UpdateEmployeeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.team_lead_id, None);

        let cleared: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"teamLeadId": null}"#).unwrap();
        assert_eq!(cleared.team_lead_id, Some(None));

        let set: UpdateEmployeeRequest = serde_json::from_str(r#"{"teamLeadId": 7}"#).unwrap();
        assert_eq!(set.team_lead_id, Some(Some(7)));
    }

    #[test]
    fn test_apply_to_keeps_unmentioned_fields() {
        let mut existing = Employee::new("WR-1", "ada@example.com");
        existing.first_name = "Ada".into();
        existing.team_lead_id = Some(3);

        let body: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"lastName": "Lovelace"}"#).unwrap();
        let updated = body.apply_to(existing);
        assert_eq!(updated.first_name, "Ada");
        assert_eq!(updated.last_name, "Lovelace");
        assert_eq!(updated.team_lead_id, Some(3));
    }
}
