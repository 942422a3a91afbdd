//! Report repository
//!
//! Database operations for daily reports. Report content is stored as
//! JSONB; (employee_id, report_date) is unique.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use wr_core::traits::Id;
use wr_models::{Report, ReportContent, ReportStatus};

use crate::repository::{Repository, RepositoryError, RepositoryResult};

const REPORT_COLUMNS: &str =
    "id, employee_id, report_date, content, status, submitted_at, created_at, updated_at";

/// Report database entity
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: i64,
    pub employee_id: i64,
    pub report_date: NaiveDate,
    pub content: serde_json::Value,
    pub status: String,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportRow {
    /// Convert the row into the domain model
    pub fn into_model(self) -> RepositoryResult<Report> {
        let status = ReportStatus::parse(&self.status).ok_or_else(|| {
            RepositoryError::Corrupt(format!(
                "report {} has unknown status {:?}",
                self.id, self.status
            ))
        })?;
        let content: ReportContent = serde_json::from_value(self.content)
            .map_err(|e| RepositoryError::Corrupt(format!("report {} content: {}", self.id, e)))?;

        Ok(Report {
            id: Some(self.id),
            employee_id: self.employee_id,
            report_date: self.report_date,
            content,
            status,
            submitted_at: self.submitted_at,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        })
    }
}

/// DTO for creating a report
#[derive(Debug, Clone)]
pub struct CreateReportDto {
    pub employee_id: Id,
    pub report_date: NaiveDate,
    pub content: ReportContent,
}

/// DTO for updating a draft report's content
#[derive(Debug, Clone)]
pub struct UpdateReportDto {
    pub content: ReportContent,
}

/// Report repository implementation
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The one report an employee may have for a given day
    pub async fn find_by_employee_and_date(
        &self,
        employee_id: Id,
        date: NaiveDate,
    ) -> RepositoryResult<Option<ReportRow>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE employee_id = $1 AND report_date = $2"
        ))
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// All reports by an employee, newest first
    pub async fn find_by_employee(&self, employee_id: Id) -> RepositoryResult<Vec<ReportRow>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE employee_id = $1 ORDER BY report_date DESC"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Persist a submission produced by the service layer
    pub async fn mark_submitted(
        &self,
        id: Id,
        submitted_at: DateTime<Utc>,
    ) -> RepositoryResult<ReportRow> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            UPDATE reports SET
                status = 'submitted',
                submitted_at = $1,
                updated_at = NOW()
            WHERE id = $2
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(submitted_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Report with id {} not found", id)))?;

        Ok(row)
    }
}

#[async_trait]
impl Repository<ReportRow, CreateReportDto, UpdateReportDto> for ReportRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ReportRow>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<ReportRow>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports ORDER BY report_date DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reports")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateReportDto) -> RepositoryResult<ReportRow> {
        // One report per employee per day
        if self
            .find_by_employee_and_date(dto.employee_id, dto.report_date)
            .await?
            .is_some()
        {
            return Err(RepositoryError::Conflict(format!(
                "employee {} already has a report for {}",
                dto.employee_id, dto.report_date
            )));
        }

        let content = serde_json::to_value(&dto.content)
            .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

        let row = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            INSERT INTO reports (
                employee_id, report_date, content, status, created_at, updated_at
            ) VALUES (
                $1, $2, $3, 'draft', NOW(), NOW()
            )
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(dto.employee_id)
        .bind(dto.report_date)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateReportDto) -> RepositoryResult<ReportRow> {
        let content = serde_json::to_value(&dto.content)
            .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

        let row = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            UPDATE reports SET
                content = $1,
                updated_at = NOW()
            WHERE id = $2 AND status = 'draft'
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            RepositoryError::NotFound(format!("Draft report with id {} not found", id))
        })?;

        Ok(row)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Report with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM reports WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wr_models::TaskUpdate;

    #[test]
    fn test_row_into_model_structured() {
        let row = ReportRow {
            id: 4,
            employee_id: 3,
            report_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            content: serde_json::json!({
                "updates": [{"taskId": 9, "progress": 50, "note": null}]
            }),
            status: "draft".into(),
            submitted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let report = row.into_model().unwrap();
        assert_eq!(
            report.content,
            ReportContent::TaskUpdates {
                updates: vec![TaskUpdate {
                    task_id: 9,
                    progress: 50,
                    note: None
                }]
            }
        );
        assert!(!report.is_submitted());
    }

    #[test]
    fn test_row_into_model_freeform() {
        let row = ReportRow {
            id: 5,
            employee_id: 3,
            report_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            content: serde_json::json!({"summary": "wrapped up the migration"}),
            status: "submitted".into(),
            submitted_at: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let report = row.into_model().unwrap();
        assert!(matches!(report.content, ReportContent::Freeform(_)));
        assert!(report.is_submitted());
    }
}
