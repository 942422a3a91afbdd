//! Holiday API handlers
//!
//! Reading is open to everyone; writing needs the manage-holidays
//! permission.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;
use wr_core::traits::{Id, Permission, UserContext};
use wr_db::{holidays::UpdateHolidayDto, CreateHolidayDto, HolidayRepository, Repository};
use wr_models::Holiday;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, Collection, CurrentEmployee, Pagination};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /api/v1/holidays
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    pagination: Pagination,
    Query(filter): Query<HolidayFilter>,
) -> ApiResult<impl IntoResponse> {
    let repo = HolidayRepository::new(state.pool.clone());

    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        let holidays: Vec<_> = repo
            .find_between(from, to)
            .await?
            .into_iter()
            .map(|r| r.into_model())
            .collect();
        return Ok(Json(Collection::complete(holidays)));
    }

    let rows = repo.find_all(pagination.page_size, pagination.offset).await?;
    let total = repo.count().await?;
    let holidays: Vec<_> = rows.into_iter().map(|r| r.into_model()).collect();

    Ok(Json(Collection::new(holidays, total, &pagination)))
}

/// GET /api/v1/holidays/:id
pub async fn get(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = HolidayRepository::new(state.pool.clone());
    let row = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Holiday", id))?;

    Ok(Json(row.into_model()))
}

/// POST /api/v1/holidays
pub async fn create(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Json(body): Json<HolidayRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.allowed(Permission::ManageHolidays) {
        return Err(ApiError::forbidden("you may not manage holidays"));
    }

    let holiday = Holiday::new(body.name.clone(), body.date);
    if let Err(e) = holiday.validate() {
        return Err(ApiError::bad_request(e.to_string()));
    }

    let repo = HolidayRepository::new(state.pool.clone());
    let row = repo
        .create(CreateHolidayDto {
            name: body.name,
            date: body.date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(row.into_model())))
}

/// PATCH /api/v1/holidays/:id
pub async fn update(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
    Json(body): Json<UpdateHolidayRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.allowed(Permission::ManageHolidays) {
        return Err(ApiError::forbidden("you may not manage holidays"));
    }

    let repo = HolidayRepository::new(state.pool.clone());
    let row = repo
        .update(
            id,
            UpdateHolidayDto {
                name: body.name,
                date: body.date,
            },
        )
        .await?;

    Ok(Json(row.into_model()))
}

/// DELETE /api/v1/holidays/:id
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    if !user.allowed(Permission::ManageHolidays) {
        return Err(ApiError::forbidden("you may not manage holidays"));
    }

    let repo = HolidayRepository::new(state.pool.clone());
    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// Request types

#[derive(Debug, Deserialize)]
pub struct HolidayRequest {
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHolidayRequest {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
}
