//! Attendance API handlers
//!
//! Check-in opens the day's row, check-out completes it. Both act on the
//! calling employee's own record.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use wr_core::traits::Id;
use wr_db::{
    attendance::UpdateAttendanceDto, AttendanceRepository, CreateAttendanceDto, Repository,
};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, Collection, CurrentEmployee};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceFilter {
    pub employee_id: Option<Id>,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// GET /api/v1/attendance?from=&to=
///
/// Defaults to the calling employee; only admins may look at others.
pub async fn list(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Query(filter): Query<AttendanceFilter>,
) -> ApiResult<impl IntoResponse> {
    let subject = filter.employee_id.unwrap_or(user.id);
    if subject != user.id && !user.employee.is_admin() && !user.employee.is_manager() {
        return Err(ApiError::forbidden(
            "you may only view your own attendance",
        ));
    }

    let repo = AttendanceRepository::new(state.pool.clone());
    let rows = repo
        .find_by_employee_between(subject, filter.from, filter.to)
        .await?;

    let records: Vec<_> = rows.into_iter().map(|r| r.into_model()).collect();
    Ok(Json(Collection::complete(records)))
}

/// POST /api/v1/attendance/check_in
pub async fn check_in(
    State(state): State<AppState>,
    user: CurrentEmployee,
) -> ApiResult<impl IntoResponse> {
    let now = Utc::now();
    let repo = AttendanceRepository::new(state.pool.clone());

    let row = repo
        .create(CreateAttendanceDto {
            employee_id: user.id,
            date: now.date_naive(),
            check_in: Some(now.time()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(row.into_model())))
}

/// POST /api/v1/attendance/check_out
pub async fn check_out(
    State(state): State<AppState>,
    user: CurrentEmployee,
) -> ApiResult<impl IntoResponse> {
    let now = Utc::now();
    let repo = AttendanceRepository::new(state.pool.clone());

    let today = repo
        .find_by_employee_and_date(user.id, now.date_naive())
        .await?
        .ok_or_else(|| ApiError::conflict("no check-in recorded for today"))?;

    if today.check_out.is_some() {
        return Err(ApiError::conflict("already checked out today"));
    }

    let row = repo
        .update(
            today.id,
            UpdateAttendanceDto {
                check_in: None,
                check_out: Some(now.time()),
            },
        )
        .await?;

    Ok(Json(row.into_model()))
}
