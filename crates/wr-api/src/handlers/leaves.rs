//! Leave request API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use wr_core::traits::Id;
use wr_db::{CreateLeaveDto, LeaveRepository, Repository};
use wr_models::{LeaveRequest, LeaveType};
use wr_services::leaves::{LeaveDecision, RequestLeaveService, ReviewLeaveService};

use crate::error::{service_outcome, ApiError, ApiResult};
use crate::extractors::{AppState, Collection, CurrentEmployee, Pagination};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFilter {
    pub employee_id: Option<Id>,
    #[serde(default)]
    pub pending: bool,
}

/// GET /api/v1/leave_requests
pub async fn list(
    State(state): State<AppState>,
    user: CurrentEmployee,
    pagination: Pagination,
    Query(filter): Query<LeaveFilter>,
) -> ApiResult<impl IntoResponse> {
    let repo = LeaveRepository::new(state.pool.clone());

    if filter.pending {
        if !user.employee.permissions.review_leaves && !user.employee.is_admin() {
            return Err(ApiError::forbidden(
                "reviewing the pending queue needs the review permission",
            ));
        }
        let requests = repo
            .find_pending()
            .await?
            .into_iter()
            .map(|r| r.into_model())
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Json(Collection::complete(requests)));
    }

    if let Some(employee_id) = filter.employee_id {
        let requests = repo
            .find_by_employee(employee_id)
            .await?
            .into_iter()
            .map(|r| r.into_model())
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Json(Collection::complete(requests)));
    }

    let rows = repo.find_all(pagination.page_size, pagination.offset).await?;
    let total = repo.count().await?;
    let requests = rows
        .into_iter()
        .map(|r| r.into_model())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Collection::new(requests, total, &pagination)))
}

/// GET /api/v1/leave_requests/:id
pub async fn get(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = LeaveRepository::new(state.pool.clone());
    let row = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("LeaveRequest", id))?;

    Ok(Json(row.into_model()?))
}

/// POST /api/v1/leave_requests
pub async fn create(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Json(body): Json<CreateLeaveRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut request = LeaveRequest::new(user.id, body.start_date, body.end_date);
    request.leave_type = body.leave_type.unwrap_or_default();
    request.reason = body.reason.clone();

    let service = RequestLeaveService::new(&user);
    let request = service_outcome(service.call(request))?;

    let repo = LeaveRepository::new(state.pool.clone());
    let row = repo
        .create(CreateLeaveDto {
            employee_id: request.employee_id,
            start_date: request.start_date,
            end_date: request.end_date,
            leave_type: request.leave_type,
            reason: request.reason,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(row.into_model()?)))
}

/// POST /api/v1/leave_requests/:id/review
pub async fn review(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
    Json(body): Json<ReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = LeaveRepository::new(state.pool.clone());
    let request = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("LeaveRequest", id))?
        .into_model()?;

    let decision = match body.decision {
        Decision::Approve => LeaveDecision::Approve,
        Decision::Reject => LeaveDecision::Reject,
    };
    let service = ReviewLeaveService::new(&user, Utc::now());
    let request = service_outcome(service.call(request, decision))?;

    let reviewed_at = request
        .reviewed_at
        .ok_or_else(|| ApiError::internal("review lost its timestamp"))?;
    let row = repo
        .record_review(id, request.status, user.id, reviewed_at)
        .await?;

    Ok(Json(row.into_model()?))
}

/// DELETE /api/v1/leave_requests/:id
///
/// An employee may withdraw their own pending request.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = LeaveRepository::new(state.pool.clone());
    let request = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("LeaveRequest", id))?
        .into_model()?;

    if request.employee_id != user.id && !user.employee.is_admin() {
        return Err(ApiError::forbidden(
            "only the requester or an administrator may withdraw a leave request",
        ));
    }
    if !request.is_pending() && !user.employee.is_admin() {
        return Err(ApiError::conflict("reviewed requests cannot be withdrawn"));
    }

    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Request types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: Option<LeaveType>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub decision: Decision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_request_parses_decision() {
        let body: ReviewRequest = serde_json::from_str(r#"{"decision": "approve"}"#).unwrap();
        assert!(matches!(body.decision, Decision::Approve));

        let body: ReviewRequest = serde_json::from_str(r#"{"decision": "reject"}"#).unwrap();
        assert!(matches!(body.decision, Decision::Reject));
    }
}
