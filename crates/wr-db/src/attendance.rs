//! Attendance repository
//!
//! One row per employee per day; check-in creates the row, check-out
//! completes it.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{FromRow, PgPool};
use wr_core::traits::Id;
use wr_models::Attendance;

use crate::repository::{Repository, RepositoryError, RepositoryResult};

const ATTENDANCE_COLUMNS: &str =
    "id, employee_id, date, check_in, check_out, created_at, updated_at";

/// Attendance database entity
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRow {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRow {
    pub fn into_model(self) -> Attendance {
        Attendance {
            id: Some(self.id),
            employee_id: self.employee_id,
            date: self.date,
            check_in: self.check_in,
            check_out: self.check_out,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

/// DTO for creating an attendance row on check-in
#[derive(Debug, Clone)]
pub struct CreateAttendanceDto {
    pub employee_id: Id,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
}

/// DTO for completing an attendance row
#[derive(Debug, Clone, Default)]
pub struct UpdateAttendanceDto {
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
}

/// Attendance repository implementation
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The one attendance row an employee may have for a given day
    pub async fn find_by_employee_and_date(
        &self,
        employee_id: Id,
        date: NaiveDate,
    ) -> RepositoryResult<Option<AttendanceRow>> {
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendances \
             WHERE employee_id = $1 AND date = $2"
        ))
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// An employee's rows inside a date range, oldest first
    pub async fn find_by_employee_between(
        &self,
        employee_id: Id,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<AttendanceRow>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendances \
             WHERE employee_id = $1 AND date BETWEEN $2 AND $3 ORDER BY date ASC"
        ))
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl Repository<AttendanceRow, CreateAttendanceDto, UpdateAttendanceDto> for AttendanceRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<AttendanceRow>> {
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendances WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<AttendanceRow>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendances ORDER BY date DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendances")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateAttendanceDto) -> RepositoryResult<AttendanceRow> {
        if self
            .find_by_employee_and_date(dto.employee_id, dto.date)
            .await?
            .is_some()
        {
            return Err(RepositoryError::Conflict(format!(
                "employee {} already has an attendance row for {}",
                dto.employee_id, dto.date
            )));
        }

        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            r#"
            INSERT INTO attendances (
                employee_id, date, check_in, created_at, updated_at
            ) VALUES (
                $1, $2, $3, NOW(), NOW()
            )
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(dto.employee_id)
        .bind(dto.date)
        .bind(dto.check_in)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateAttendanceDto) -> RepositoryResult<AttendanceRow> {
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            r#"
            UPDATE attendances SET
                check_in = COALESCE($1, check_in),
                check_out = COALESCE($2, check_out),
                updated_at = NOW()
            WHERE id = $3
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(dto.check_in)
        .bind(dto.check_out)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Attendance with id {} not found", id)))?;

        Ok(row)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM attendances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Attendance with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM attendances WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_into_model() {
        let row = AttendanceRow {
            id: 3,
            employee_id: 2,
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            check_in: NaiveTime::from_hms_opt(9, 0, 0),
            check_out: NaiveTime::from_hms_opt(17, 30, 0),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let attendance = row.into_model();
        assert_eq!(attendance.id, Some(3));
        assert_eq!(attendance.hours_worked(), Some(8.5));
    }
}
