//! Employee-of-the-Month handlers
//!
//! The winner is computed from the month's terminal tasks and stored per
//! (company, month, year); recomputing replaces the stored record.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use wr_core::traits::Id;
use wr_db::{EomRepository, TaskRepository};
use wr_models::{EmployeeOfMonth, Task};
use wr_services::{select_employee_of_month, DateWindow, EomCandidate};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, Collection, CurrentEmployee};

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// GET /api/v1/employee_of_month?month=&year=
///
/// Without parameters, lists the company's stored winners.
pub async fn get(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    Query(query): Query<MonthQuery>,
) -> ApiResult<impl IntoResponse> {
    let company = &state.config.instance.company;
    let repo = EomRepository::new(state.pool.clone());

    match (query.month, query.year) {
        (Some(month), Some(year)) => {
            let row = repo
                .find_by_month(company, month, year)
                .await?
                .ok_or_else(|| {
                    ApiError::not_found("EmployeeOfMonth", format!("{}-{:02}", year, month))
                })?;
            Ok(Json(row.into_model()).into_response())
        }
        (None, None) => {
            let winners: Vec<_> = repo
                .find_by_company(company)
                .await?
                .into_iter()
                .map(|r| r.into_model())
                .collect();
            Ok(Json(Collection::complete(winners)).into_response())
        }
        _ => Err(ApiError::bad_request(
            "month and year must be given together",
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResponse {
    pub winner: Option<EmployeeOfMonth>,
    pub candidates: Vec<EomCandidate>,
}

/// POST /api/v1/employee_of_month/compute
pub async fn compute(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Json(body): Json<ComputeRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.employee.is_admin() && !user.employee.is_manager() {
        return Err(ApiError::forbidden(
            "only managers and administrators may run the selection",
        ));
    }

    let window = DateWindow::month(body.month, body.year)
        .ok_or_else(|| ApiError::bad_request("month must be between 1 and 12"))?;

    let task_repo = TaskRepository::new(state.pool.clone());
    let rows = task_repo.find_terminal_between(window.from, window.to).await?;

    // Rows come back ordered by assignee, so grouping preserves that order
    // and ties resolve toward the lower employee id.
    let mut grouped: Vec<(Id, Vec<Task>)> = Vec::new();
    for row in rows {
        let task = row.into_model()?;
        match grouped.last_mut() {
            Some((id, tasks)) if *id == task.assigned_to_id => tasks.push(task),
            _ => grouped.push((task.assigned_to_id, vec![task])),
        }
    }

    let (candidates, winner) = select_employee_of_month(&grouped, window);

    let company = state.config.instance.company.clone();
    let eom_repo = EomRepository::new(state.pool.clone());

    let stored = match &winner {
        Some(w) => {
            let record = EmployeeOfMonth::new(
                company,
                body.month,
                body.year,
                w.employee_id,
                w.summary.score,
            );
            let row = eom_repo.upsert(&record).await?;
            tracing::info!(
                employee = w.employee_id,
                month = body.month,
                year = body.year,
                score = w.summary.score,
                "employee of the month selected"
            );
            Some(row.into_model())
        }
        None => None,
    };

    Ok(Json(ComputeResponse {
        winner: stored,
        candidates,
    }))
}
