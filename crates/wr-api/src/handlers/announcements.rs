//! Announcement API handlers
//!
//! Announcements show on every dashboard; posting needs the
//! post-announcements permission.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;
use wr_core::traits::{Id, Permission, UserContext};
use wr_db::{
    announcements::UpdateAnnouncementDto, AnnouncementRepository, CreateAnnouncementDto,
    Repository,
};
use wr_models::Announcement;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, Collection, CurrentEmployee, Pagination};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementFilter {
    #[serde(default)]
    pub published: bool,
}

/// GET /api/v1/announcements
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    pagination: Pagination,
    Query(filter): Query<AnnouncementFilter>,
) -> ApiResult<impl IntoResponse> {
    let repo = AnnouncementRepository::new(state.pool.clone());

    if filter.published {
        let announcements: Vec<_> = repo
            .find_published(pagination.page_size)
            .await?
            .into_iter()
            .map(|r| r.into_model())
            .collect();
        return Ok(Json(Collection::complete(announcements)));
    }

    let rows = repo.find_all(pagination.page_size, pagination.offset).await?;
    let total = repo.count().await?;
    let announcements: Vec<_> = rows.into_iter().map(|r| r.into_model()).collect();

    Ok(Json(Collection::new(announcements, total, &pagination)))
}

/// GET /api/v1/announcements/:id
pub async fn get(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = AnnouncementRepository::new(state.pool.clone());
    let row = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Announcement", id))?;

    Ok(Json(row.into_model()))
}

/// POST /api/v1/announcements
pub async fn create(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Json(body): Json<CreateAnnouncementRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.allowed(Permission::PostAnnouncements) {
        return Err(ApiError::forbidden("you may not post announcements"));
    }

    let announcement = Announcement::new(body.title.clone(), body.body.clone(), user.id);
    if let Err(e) = announcement.validate() {
        return Err(ApiError::bad_request(e.to_string()));
    }

    let published_at = if body.publish.unwrap_or(true) {
        Some(Utc::now())
    } else {
        None
    };

    let repo = AnnouncementRepository::new(state.pool.clone());
    let row = repo
        .create(CreateAnnouncementDto {
            title: body.title,
            body: body.body,
            author_id: user.id,
            published_at,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(row.into_model())))
}

/// PATCH /api/v1/announcements/:id
pub async fn update(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
    Json(body): Json<UpdateAnnouncementRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = AnnouncementRepository::new(state.pool.clone());
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Announcement", id))?;

    if existing.author_id != user.id && !user.employee.is_admin() {
        return Err(ApiError::forbidden(
            "only the author or an administrator may edit an announcement",
        ));
    }

    let published_at = match body.publish {
        Some(true) => Some(Utc::now()),
        _ => None,
    };

    let row = repo
        .update(
            id,
            UpdateAnnouncementDto {
                title: body.title,
                body: body.body,
                published_at,
            },
        )
        .await?;

    Ok(Json(row.into_model()))
}

/// DELETE /api/v1/announcements/:id
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = AnnouncementRepository::new(state.pool.clone());
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Announcement", id))?;

    if existing.author_id != user.id && !user.employee.is_admin() {
        return Err(ApiError::forbidden(
            "only the author or an administrator may delete an announcement",
        ));
    }

    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Request types

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub body: String,
    /// Defaults to publishing immediately
    pub publish: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub publish: Option<bool>,
}
