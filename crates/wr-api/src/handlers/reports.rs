//! Daily report API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use wr_core::traits::Id;
use wr_db::{
    reports::UpdateReportDto, CreateReportDto, Repository, ReportRepository,
};
use wr_models::{Report, ReportContent};
use wr_services::reports::{SubmitReportService, WriteReportService};

use crate::error::{service_outcome, ApiError, ApiResult};
use crate::extractors::{AppState, Collection, CurrentEmployee, Pagination};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    pub employee_id: Option<Id>,
}

/// GET /api/v1/reports
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    pagination: Pagination,
    Query(filter): Query<ReportFilter>,
) -> ApiResult<impl IntoResponse> {
    let repo = ReportRepository::new(state.pool.clone());

    if let Some(employee_id) = filter.employee_id {
        let reports = repo
            .find_by_employee(employee_id)
            .await?
            .into_iter()
            .map(|r| r.into_model())
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Json(Collection::complete(reports)));
    }

    let rows = repo.find_all(pagination.page_size, pagination.offset).await?;
    let total = repo.count().await?;
    let reports = rows
        .into_iter()
        .map(|r| r.into_model())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Collection::new(reports, total, &pagination)))
}

/// GET /api/v1/reports/:id
pub async fn get(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = ReportRepository::new(state.pool.clone());
    let row = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Report", id))?;

    Ok(Json(row.into_model()?))
}

/// POST /api/v1/reports
///
/// A second report for the same day comes back as a 409.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Json(body): Json<WriteReportRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut report = Report::new(user.id, body.report_date);
    report.content = body.content.clone();

    let service = WriteReportService::new(&user);
    let report = service_outcome(service.call(report))?;

    let repo = ReportRepository::new(state.pool.clone());
    let row = repo
        .create(CreateReportDto {
            employee_id: report.employee_id,
            report_date: report.report_date,
            content: report.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(row.into_model()?)))
}

/// PATCH /api/v1/reports/:id
pub async fn update(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
    Json(body): Json<UpdateReportRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = ReportRepository::new(state.pool.clone());
    let mut existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Report", id))?
        .into_model()?;

    existing.content = body.content;

    let service = WriteReportService::new(&user);
    let report = service_outcome(service.call(existing))?;

    let row = repo
        .update(
            id,
            UpdateReportDto {
                content: report.content,
            },
        )
        .await?;

    Ok(Json(row.into_model()?))
}

/// POST /api/v1/reports/:id/submit
pub async fn submit(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = ReportRepository::new(state.pool.clone());
    let report = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Report", id))?
        .into_model()?;

    let service = SubmitReportService::new(&user, Utc::now());
    let report = service_outcome(service.call(report))?;

    let submitted_at = report
        .submitted_at
        .ok_or_else(|| ApiError::internal("submission lost its timestamp"))?;
    let row = repo.mark_submitted(id, submitted_at).await?;

    Ok(Json(row.into_model()?))
}

/// DELETE /api/v1/reports/:id
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = ReportRepository::new(state.pool.clone());
    let report = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Report", id))?
        .into_model()?;

    if report.employee_id != user.id && !user.employee.is_admin() {
        return Err(ApiError::forbidden(
            "only the author or an administrator may delete a report",
        ));
    }
    if report.is_submitted() && !user.employee.is_admin() {
        return Err(ApiError::conflict("submitted reports cannot be deleted"));
    }

    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Request types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteReportRequest {
    pub report_date: NaiveDate,
    pub content: ReportContent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    pub content: ReportContent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wr_models::TaskUpdate;

    #[test]
    fn test_write_request_parses_structured_content() {
        let body: WriteReportRequest = serde_json::from_str(
            r#"{"reportDate": "2024-05-06", "content": {"updates": [{"taskId": 3, "progress": 55, "note": null}]}}"#,
        )
        .unwrap();

        assert_eq!(
            body.content,
            ReportContent::TaskUpdates {
                updates: vec![TaskUpdate {
                    task_id: 3,
                    progress: 55,
                    note: None
                }]
            }
        );
    }

    #[test]
    fn test_write_request_falls_back_to_freeform() {
        let body: WriteReportRequest = serde_json::from_str(
            r#"{"reportDate": "2024-05-06", "content": {"summary": "quiet day"}}"#,
        )
        .unwrap();
        assert!(matches!(body.content, ReportContent::Freeform(_)));
    }
}
