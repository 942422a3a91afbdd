//! Performance analytics handlers

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use wr_core::traits::Id;
use wr_db::TaskRepository;
use wr_services::{summarize_performance, DateWindow, PerformanceSummary};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, CurrentEmployee};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceQuery {
    pub employee_id: Option<Id>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResponse {
    pub employee_id: Id,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub summary: PerformanceSummary,
}

/// GET /api/v1/analytics/performance
///
/// Scores an employee's assigned tasks, over a single month when both
/// `month` and `year` are given, over everything otherwise. Employees see
/// their own figures; managers and admins may ask about anyone.
pub async fn performance(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Query(query): Query<PerformanceQuery>,
) -> ApiResult<impl IntoResponse> {
    let subject = query.employee_id.unwrap_or(user.id);
    if subject != user.id && !user.employee.is_admin() && !user.employee.is_manager() {
        return Err(ApiError::forbidden(
            "you may only view your own performance",
        ));
    }

    let window = match (query.month, query.year) {
        (Some(month), Some(year)) => Some(
            DateWindow::month(month, year)
                .ok_or_else(|| ApiError::bad_request("month must be between 1 and 12"))?,
        ),
        (None, None) => None,
        _ => {
            return Err(ApiError::bad_request(
                "month and year must be given together",
            ))
        }
    };

    let repo = TaskRepository::new(state.pool.clone());
    let tasks = repo
        .find_by_assignee(subject)
        .await?
        .into_iter()
        .map(|r| r.into_model())
        .collect::<Result<Vec<_>, _>>()?;

    let summary = summarize_performance(&tasks, window);

    Ok(Json(PerformanceResponse {
        employee_id: subject,
        month: query.month,
        year: query.year,
        summary,
    }))
}
