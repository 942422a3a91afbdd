//! Axum extractors for API handlers

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use sqlx::PgPool;
use std::sync::Arc;
use wr_core::config::AppConfig;
use wr_core::traits::{Id, UserContext};
use wr_db::{EmployeeRepository, Repository};
use wr_models::Employee;

use crate::error::ApiError;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}

/// The acting employee, resolved from the `x-employee-id` header.
///
/// Session handling lives outside this service; the reverse proxy in
/// front of it injects the header after authenticating the request.
pub struct CurrentEmployee {
    pub id: Id,
    pub employee: Employee,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentEmployee
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get("x-employee-id")
            .ok_or_else(|| ApiError::unauthorized("x-employee-id header required"))?;
        let id: Id = header
            .to_str()
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ApiError::unauthorized("x-employee-id must be a numeric id"))?;

        let repo = EmployeeRepository::new(app_state.pool.clone());
        let row = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("unknown employee"))?;
        let employee = row.into_model()?;

        if !employee.active {
            return Err(ApiError::forbidden("employee account is deactivated"));
        }

        Ok(CurrentEmployee { id, employee })
    }
}

impl UserContext for CurrentEmployee {
    fn employee_id(&self) -> Id {
        self.id
    }

    fn is_admin(&self) -> bool {
        self.employee.is_admin()
    }

    fn is_manager(&self) -> bool {
        self.employee.is_manager()
    }

    fn can_assign_tasks(&self) -> bool {
        self.employee.permissions.assign_tasks
    }

    fn can_review_leaves(&self) -> bool {
        self.employee.permissions.review_leaves
    }

    fn can_manage_holidays(&self) -> bool {
        self.employee.permissions.manage_holidays
    }

    fn can_post_announcements(&self) -> bool {
        self.employee.permissions.post_announcements
    }
}

/// Pagination query parameters
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_page_size() -> i64 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page_size: 20,
            offset: 0,
        }
    }
}

pub struct Pagination(pub PaginationParams);

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|_| Query(PaginationParams::default()));
        Ok(Pagination(params))
    }
}

impl std::ops::Deref for Pagination {
    type Target = PaginationParams;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Collection response body
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T: serde::Serialize> {
    pub total: i64,
    pub count: usize,
    pub page_size: i64,
    pub offset: i64,
    pub elements: Vec<T>,
}

impl<T: serde::Serialize> Collection<T> {
    pub fn new(elements: Vec<T>, total: i64, pagination: &PaginationParams) -> Self {
        Self {
            total,
            count: elements.len(),
            page_size: pagination.page_size,
            offset: pagination.offset,
            elements,
        }
    }

    /// For endpoints that return the whole set at once
    pub fn complete(elements: Vec<T>) -> Self {
        Self {
            total: elements.len() as i64,
            count: elements.len(),
            page_size: elements.len() as i64,
            offset: 0,
            elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_default() {
        let params = PaginationParams::default();
        assert_eq!(params.page_size, 20);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn test_pagination_params_from_query() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"pageSize": 5, "offset": 10}"#).unwrap();
        assert_eq!(params.page_size, 5);
        assert_eq!(params.offset, 10);
    }

    #[test]
    fn test_collection_page() {
        let params = PaginationParams {
            page_size: 2,
            offset: 4,
        };
        let collection = Collection::new(vec!["a", "b"], 9, &params);
        assert_eq!(collection.total, 9);
        assert_eq!(collection.count, 2);
        assert_eq!(collection.page_size, 2);
        assert_eq!(collection.offset, 4);
    }

    #[test]
    fn test_collection_complete() {
        let collection = Collection::complete(vec![1, 2, 3]);
        assert_eq!(collection.total, 3);
        assert_eq!(collection.count, 3);
        assert_eq!(collection.offset, 0);
    }
}
