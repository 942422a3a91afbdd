//! Task API handlers
//!
//! Assignment and lifecycle changes run through the services in
//! wr-services; handlers load state, call the service, and persist the
//! outcome.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use wr_contracts::base::Contract;
use wr_contracts::tasks::UpdateTaskContract;
use wr_core::traits::Id;
use wr_db::{CreateTaskDto, Repository, TaskRepository, UpdateTaskDto};
use wr_models::{Task, TaskComment, TaskPriority, TaskStatus};
use wr_services::tasks::{AssignTaskService, TransitionTaskService};

use crate::error::{service_outcome, ApiError, ApiResult};
use crate::extractors::{AppState, Collection, CurrentEmployee, Pagination};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub assigned_to: Option<Id>,
    pub assigned_by: Option<Id>,
}

/// GET /api/v1/tasks
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    pagination: Pagination,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<impl IntoResponse> {
    let repo = TaskRepository::new(state.pool.clone());

    let rows = match (filter.assigned_to, filter.assigned_by) {
        (Some(assignee), _) => repo.find_by_assignee(assignee).await?,
        (None, Some(assigner)) => repo.find_by_assigner(assigner).await?,
        (None, None) => {
            let rows = repo.find_all(pagination.page_size, pagination.offset).await?;
            let total = repo.count().await?;
            let tasks = rows
                .into_iter()
                .map(|r| r.into_model())
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Json(Collection::new(tasks, total, &pagination)));
        }
    };

    let tasks = rows
        .into_iter()
        .map(|r| r.into_model())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(Collection::complete(tasks)))
}

/// GET /api/v1/tasks/:id
pub async fn get(
    State(state): State<AppState>,
    _user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = TaskRepository::new(state.pool.clone());
    let row = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task", id))?;

    Ok(Json(row.into_model()?))
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Json(body): Json<CreateTaskRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut task = Task::new(body.title.clone(), body.assigned_to_id, user.id);
    task.description = body.description.clone();
    task.priority = body.priority.unwrap_or_default();
    task.start_date = body.start_date;
    task.due_date = body.due_date;

    let service = AssignTaskService::new(&user);
    let task = service_outcome(service.call(task))?;

    let repo = TaskRepository::new(state.pool.clone());
    let row = repo
        .create(CreateTaskDto {
            title: task.title,
            description: task.description,
            assigned_to_id: task.assigned_to_id,
            assigned_by_id: task.assigned_by_id,
            priority: task.priority,
            start_date: task.start_date,
            due_date: task.due_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(row.into_model()?)))
}

/// PATCH /api/v1/tasks/:id
pub async fn update(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
    Json(body): Json<UpdateTaskRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = TaskRepository::new(state.pool.clone());
    let mut existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task", id))?
        .into_model()?;

    if let Some(title) = &body.title {
        existing.title = title.clone();
    }
    if let Some(description) = &body.description {
        existing.description = Some(description.clone());
    }
    if let Some(priority) = body.priority {
        existing.priority = priority;
    }
    if let Some(start) = body.start_date {
        existing.start_date = Some(start);
    }
    if let Some(due) = body.due_date {
        existing.due_date = Some(due);
    }
    if let Some(progress) = body.progress {
        existing.set_progress(progress);
    }

    let contract = UpdateTaskContract::new(&user);
    contract.validate(&existing)?;

    let row = repo
        .update(
            id,
            UpdateTaskDto {
                title: body.title,
                description: body.description,
                priority: body.priority,
                start_date: body.start_date,
                due_date: body.due_date,
                progress: body.progress,
            },
        )
        .await?;

    Ok(Json(row.into_model()?))
}

/// POST /api/v1/tasks/:id/status
pub async fn change_status(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
    Json(body): Json<StatusChangeRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = TaskRepository::new(state.pool.clone());
    let task = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task", id))?
        .into_model()?;

    let today = Utc::now().date_naive();
    let service = TransitionTaskService::new(&user, today);
    let task = service_outcome(service.call(task, body.status, body.progress))?;

    let row = repo
        .update_status(id, task.status, task.progress(), task.completed_date)
        .await?;

    Ok(Json(row.into_model()?))
}

/// POST /api/v1/tasks/:id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
    Json(body): Json<CommentRequest>,
) -> ApiResult<impl IntoResponse> {
    if body.body.trim().is_empty() {
        return Err(ApiError::bad_request("comment body can't be blank"));
    }

    let repo = TaskRepository::new(state.pool.clone());
    let task = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task", id))?
        .into_model()?;

    let is_party = user.id == task.assigned_to_id || user.id == task.assigned_by_id;
    if !is_party && !user.employee.is_admin() {
        return Err(ApiError::forbidden(
            "only the assignee, the assigner, or an administrator may comment",
        ));
    }

    let comment = TaskComment {
        author_id: user.id,
        body: body.body,
        created_at: Utc::now(),
    };
    let row = repo.add_comment(id, &comment).await?;

    Ok((StatusCode::CREATED, Json(row.into_model()?)))
}

/// DELETE /api/v1/tasks/:id
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentEmployee,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = TaskRepository::new(state.pool.clone());
    let task = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task", id))?
        .into_model()?;

    if user.id != task.assigned_by_id && !user.employee.is_admin() {
        return Err(ApiError::forbidden(
            "only the assigner or an administrator may delete a task",
        ));
    }

    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Request types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to_id: Id,
    pub priority: Option<TaskPriority>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub progress: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    pub status: TaskStatus,
    pub progress: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_change_request_accepts_camel_case() {
        let body: StatusChangeRequest =
            serde_json::from_str(r#"{"status": "inProgress"}"#).unwrap();
        assert_eq!(body.status, TaskStatus::InProgress);
        assert_eq!(body.progress, None);

        let body: StatusChangeRequest =
            serde_json::from_str(r#"{"status": "pendingVerification", "progress": 90}"#).unwrap();
        assert_eq!(body.status, TaskStatus::PendingVerification);
        assert_eq!(body.progress, Some(90));
    }
}
