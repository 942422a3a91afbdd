//! Leave request repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use wr_core::traits::Id;
use wr_models::{LeaveRequest, LeaveStatus, LeaveType};

use crate::repository::{Repository, RepositoryError, RepositoryResult};

const LEAVE_COLUMNS: &str = "id, employee_id, start_date, end_date, leave_type, reason, \
     status, reviewed_by_id, reviewed_at, created_at, updated_at";

/// Leave request database entity
#[derive(Debug, Clone, FromRow)]
pub struct LeaveRow {
    pub id: i64,
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: String,
    pub reason: Option<String>,
    pub status: String,
    pub reviewed_by_id: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaveRow {
    /// Convert the row into the domain model
    pub fn into_model(self) -> RepositoryResult<LeaveRequest> {
        let leave_type = LeaveType::parse(&self.leave_type).ok_or_else(|| {
            RepositoryError::Corrupt(format!(
                "leave request {} has unknown type {:?}",
                self.id, self.leave_type
            ))
        })?;
        let status = LeaveStatus::parse(&self.status).ok_or_else(|| {
            RepositoryError::Corrupt(format!(
                "leave request {} has unknown status {:?}",
                self.id, self.status
            ))
        })?;

        Ok(LeaveRequest {
            id: Some(self.id),
            employee_id: self.employee_id,
            start_date: self.start_date,
            end_date: self.end_date,
            leave_type,
            reason: self.reason,
            status,
            reviewed_by_id: self.reviewed_by_id,
            reviewed_at: self.reviewed_at,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        })
    }
}

/// DTO for creating a leave request
#[derive(Debug, Clone)]
pub struct CreateLeaveDto {
    pub employee_id: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    pub reason: Option<String>,
}

/// DTO for updating a pending leave request
#[derive(Debug, Clone, Default)]
pub struct UpdateLeaveDto {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub leave_type: Option<LeaveType>,
    pub reason: Option<String>,
}

/// Leave request repository implementation
pub struct LeaveRepository {
    pool: PgPool,
}

impl LeaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All requests by an employee, newest first
    pub async fn find_by_employee(&self, employee_id: Id) -> RepositoryResult<Vec<LeaveRow>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE employee_id = $1 \
             ORDER BY start_date DESC"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Requests still waiting for review, oldest first
    pub async fn find_pending(&self) -> RepositoryResult<Vec<LeaveRow>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE status = 'pending' \
             ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Persist a review decision produced by the service layer
    pub async fn record_review(
        &self,
        id: Id,
        status: LeaveStatus,
        reviewed_by_id: Id,
        reviewed_at: DateTime<Utc>,
    ) -> RepositoryResult<LeaveRow> {
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            r#"
            UPDATE leave_requests SET
                status = $1,
                reviewed_by_id = $2,
                reviewed_at = $3,
                updated_at = NOW()
            WHERE id = $4
            RETURNING {LEAVE_COLUMNS}
            "#
        ))
        .bind(status.as_str())
        .bind(reviewed_by_id)
        .bind(reviewed_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            RepositoryError::NotFound(format!("Leave request with id {} not found", id))
        })?;

        Ok(row)
    }
}

#[async_trait]
impl Repository<LeaveRow, CreateLeaveDto, UpdateLeaveDto> for LeaveRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<LeaveRow>> {
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<LeaveRow>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leave_requests")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateLeaveDto) -> RepositoryResult<LeaveRow> {
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            r#"
            INSERT INTO leave_requests (
                employee_id, start_date, end_date, leave_type, reason, status,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, 'pending', NOW(), NOW()
            )
            RETURNING {LEAVE_COLUMNS}
            "#
        ))
        .bind(dto.employee_id)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(dto.leave_type.as_str())
        .bind(&dto.reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateLeaveDto) -> RepositoryResult<LeaveRow> {
        // Only pending requests are editable
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            r#"
            UPDATE leave_requests SET
                start_date = COALESCE($1, start_date),
                end_date = COALESCE($2, end_date),
                leave_type = COALESCE($3, leave_type),
                reason = COALESCE($4, reason),
                updated_at = NOW()
            WHERE id = $5 AND status = 'pending'
            RETURNING {LEAVE_COLUMNS}
            "#
        ))
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(dto.leave_type.map(|t| t.as_str()))
        .bind(&dto.reason)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            RepositoryError::NotFound(format!("Pending leave request with id {} not found", id))
        })?;

        Ok(row)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM leave_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Leave request with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM leave_requests WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> LeaveRow {
        LeaveRow {
            id: 11,
            employee_id: 2,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            leave_type: "sick".into(),
            reason: Some("flu".into()),
            status: "pending".into(),
            reviewed_by_id: None,
            reviewed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_into_model() {
        let request = sample_row().into_model().unwrap();
        assert_eq!(request.leave_type, LeaveType::Sick);
        assert!(request.is_pending());
        assert_eq!(request.duration_days(), 3);
    }

    #[test]
    fn test_row_with_unknown_type_is_corrupt() {
        let mut row = sample_row();
        row.leave_type = "sabbatical".into();
        assert!(matches!(row.into_model(), Err(RepositoryError::Corrupt(_))));
    }
}
