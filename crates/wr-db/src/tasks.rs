//! Task repository
//!
//! Database operations for tasks. The comment thread is stored as a JSONB
//! array on the row.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use wr_core::traits::Id;
use wr_models::{Task, TaskComment, TaskPriority, TaskStatus};

use crate::repository::{Repository, RepositoryError, RepositoryResult};

const TASK_COLUMNS: &str = "id, title, description, assigned_to_id, assigned_by_id, status, \
     progress, priority, start_date, due_date, completed_date, comments, created_at, updated_at";

/// Task database entity
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to_id: i64,
    pub assigned_by_id: i64,
    pub status: String,
    pub progress: i32,
    pub priority: String,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub comments: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRow {
    /// Convert the row into the domain model
    pub fn into_model(self) -> RepositoryResult<Task> {
        let status = TaskStatus::parse(&self.status).ok_or_else(|| {
            RepositoryError::Corrupt(format!(
                "task {} has unknown status {:?}",
                self.id, self.status
            ))
        })?;
        let priority = TaskPriority::parse(&self.priority).ok_or_else(|| {
            RepositoryError::Corrupt(format!(
                "task {} has unknown priority {:?}",
                self.id, self.priority
            ))
        })?;
        let comments: Vec<TaskComment> = serde_json::from_value(self.comments)
            .map_err(|e| RepositoryError::Corrupt(format!("task {} comments: {}", self.id, e)))?;

        let mut task = Task::new(self.title, self.assigned_to_id, self.assigned_by_id)
            .with_progress(self.progress);
        task.id = Some(self.id);
        task.description = self.description;
        task.status = status;
        task.priority = priority;
        task.start_date = self.start_date;
        task.due_date = self.due_date;
        task.completed_date = self.completed_date;
        task.comments = comments;
        task.created_at = Some(self.created_at);
        task.updated_at = Some(self.updated_at);
        Ok(task)
    }
}

/// DTO for creating a task
#[derive(Debug, Clone)]
pub struct CreateTaskDto {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to_id: Id,
    pub assigned_by_id: Id,
    pub priority: TaskPriority,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

/// DTO for updating task fields
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub progress: Option<i32>,
}

/// Task repository implementation
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find all tasks assigned to an employee
    pub async fn find_by_assignee(&self, employee_id: Id) -> RepositoryResult<Vec<TaskRow>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE assigned_to_id = $1 ORDER BY created_at DESC"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Find all tasks assigned by an employee
    pub async fn find_by_assigner(&self, employee_id: Id) -> RepositoryResult<Vec<TaskRow>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE assigned_by_id = $1 ORDER BY created_at DESC"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Tasks in a terminal status whose completion falls in the window;
    /// feeds the Employee-of-the-Month scorer
    pub async fn find_terminal_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<TaskRow>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            SELECT {TASK_COLUMNS} FROM tasks
            WHERE status IN ('completed', 'not_completed')
              AND completed_date BETWEEN $1 AND $2
            ORDER BY assigned_to_id ASC, completed_date ASC
            "#
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Persist a status transition produced by the service layer
    pub async fn update_status(
        &self,
        id: Id,
        status: TaskStatus,
        progress: i32,
        completed_date: Option<NaiveDate>,
    ) -> RepositoryResult<TaskRow> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            UPDATE tasks SET
                status = $1,
                progress = $2,
                completed_date = $3,
                updated_at = NOW()
            WHERE id = $4
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(status.as_str())
        .bind(progress)
        .bind(completed_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Task with id {} not found", id)))?;

        Ok(row)
    }

    /// Append a comment to the task's thread
    pub async fn add_comment(&self, id: Id, comment: &TaskComment) -> RepositoryResult<TaskRow> {
        let value = serde_json::to_value(comment)
            .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            UPDATE tasks SET
                comments = comments || $1::jsonb,
                updated_at = NOW()
            WHERE id = $2
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(serde_json::Value::Array(vec![value]))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Task with id {} not found", id)))?;

        Ok(row)
    }
}

#[async_trait]
impl Repository<TaskRow, CreateTaskDto, UpdateTaskDto> for TaskRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<TaskRow>> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<TaskRow>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateTaskDto) -> RepositoryResult<TaskRow> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            INSERT INTO tasks (
                title, description, assigned_to_id, assigned_by_id, status,
                progress, priority, start_date, due_date, comments,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, 'pending', 0, $5, $6, $7, '[]'::jsonb, NOW(), NOW()
            )
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.assigned_to_id)
        .bind(dto.assigned_by_id)
        .bind(dto.priority.as_str())
        .bind(dto.start_date)
        .bind(dto.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateTaskDto) -> RepositoryResult<TaskRow> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            UPDATE tasks SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                priority = COALESCE($3, priority),
                start_date = COALESCE($4, start_date),
                due_date = COALESCE($5, due_date),
                progress = LEAST(100, GREATEST(0, COALESCE($6, progress))),
                updated_at = NOW()
            WHERE id = $7
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.priority.map(|p| p.as_str()))
        .bind(dto.start_date)
        .bind(dto.due_date)
        .bind(dto.progress)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Task with id {} not found", id)))?;

        Ok(row)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Task with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> TaskRow {
        TaskRow {
            id: 7,
            title: "Quarterly summary".into(),
            description: None,
            assigned_to_id: 2,
            assigned_by_id: 1,
            status: "in_progress".into(),
            progress: 40,
            priority: "high".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            due_date: NaiveDate::from_ymd_opt(2024, 4, 30),
            completed_date: None,
            comments: serde_json::json!([]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_into_model() {
        let task = sample_row().into_model().unwrap();
        assert_eq!(task.id, Some(7));
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.progress(), 40);
        assert!(task.comments.is_empty());
    }

    #[test]
    fn test_row_with_comments() {
        let mut row = sample_row();
        row.comments = serde_json::json!([
            {"authorId": 1, "body": "looks good", "createdAt": "2024-04-02T10:00:00Z"}
        ]);
        let task = row.into_model().unwrap();
        assert_eq!(task.comments.len(), 1);
        assert_eq!(task.comments[0].author_id, 1);
    }

    #[test]
    fn test_row_with_unknown_status_is_corrupt() {
        let mut row = sample_row();
        row.status = "paused".into();
        assert!(matches!(row.into_model(), Err(RepositoryError::Corrupt(_))));
    }

    #[test]
    fn test_out_of_range_progress_is_clamped_on_load() {
        let mut row = sample_row();
        row.progress = 140;
        assert_eq!(row.into_model().unwrap().progress(), 100);
    }
}
