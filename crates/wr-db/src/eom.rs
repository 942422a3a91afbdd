//! Employee-of-the-Month repository
//!
//! One winner per (company, month, year). Recomputing a month replaces
//! the existing record.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use wr_models::EmployeeOfMonth;

use crate::repository::RepositoryResult;

const EOM_COLUMNS: &str = "id, company, month, year, employee_id, score, created_at, updated_at";

/// Employee-of-the-Month database entity
#[derive(Debug, Clone, FromRow)]
pub struct EomRow {
    pub id: i64,
    pub company: String,
    pub month: i32,
    pub year: i32,
    pub employee_id: i64,
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EomRow {
    pub fn into_model(self) -> EmployeeOfMonth {
        EmployeeOfMonth {
            id: Some(self.id),
            company: self.company,
            month: self.month as u32,
            year: self.year,
            employee_id: self.employee_id,
            score: self.score,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

/// Employee-of-the-Month repository implementation
pub struct EomRepository {
    pool: PgPool,
}

impl EomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The stored winner for a month, if one has been computed
    pub async fn find_by_month(
        &self,
        company: &str,
        month: u32,
        year: i32,
    ) -> RepositoryResult<Option<EomRow>> {
        let row = sqlx::query_as::<_, EomRow>(&format!(
            "SELECT {EOM_COLUMNS} FROM employee_of_month \
             WHERE company = $1 AND month = $2 AND year = $3"
        ))
        .bind(company)
        .bind(month as i32)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Winners for a company, newest month first
    pub async fn find_by_company(&self, company: &str) -> RepositoryResult<Vec<EomRow>> {
        let rows = sqlx::query_as::<_, EomRow>(&format!(
            "SELECT {EOM_COLUMNS} FROM employee_of_month \
             WHERE company = $1 ORDER BY year DESC, month DESC"
        ))
        .bind(company)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert or replace the winner for a month
    pub async fn upsert(&self, winner: &EmployeeOfMonth) -> RepositoryResult<EomRow> {
        let row = sqlx::query_as::<_, EomRow>(&format!(
            r#"
            INSERT INTO employee_of_month (
                company, month, year, employee_id, score, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, NOW(), NOW()
            )
            ON CONFLICT (company, month, year) DO UPDATE SET
                employee_id = EXCLUDED.employee_id,
                score = EXCLUDED.score,
                updated_at = NOW()
            RETURNING {EOM_COLUMNS}
            "#
        ))
        .bind(&winner.company)
        .bind(winner.month as i32)
        .bind(winner.year)
        .bind(winner.employee_id)
        .bind(winner.score)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_into_model() {
        let row = EomRow {
            id: 2,
            company: "Acme".into(),
            month: 4,
            year: 2024,
            employee_id: 7,
            score: 86.5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let record = row.into_model();
        assert_eq!(record.month, 4);
        assert_eq!(record.employee_id, 7);
        assert!((record.score - 86.5).abs() < f64::EPSILON);
    }
}
