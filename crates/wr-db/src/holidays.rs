//! Holiday repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use wr_core::traits::Id;
use wr_models::Holiday;

use crate::repository::{Repository, RepositoryError, RepositoryResult};

const HOLIDAY_COLUMNS: &str = "id, name, date, created_at, updated_at";

/// Holiday database entity
#[derive(Debug, Clone, FromRow)]
pub struct HolidayRow {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HolidayRow {
    pub fn into_model(self) -> Holiday {
        Holiday {
            id: Some(self.id),
            name: self.name,
            date: self.date,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

/// DTO for creating a holiday
#[derive(Debug, Clone)]
pub struct CreateHolidayDto {
    pub name: String,
    pub date: NaiveDate,
}

/// DTO for updating a holiday
#[derive(Debug, Clone, Default)]
pub struct UpdateHolidayDto {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Holiday repository implementation
pub struct HolidayRepository {
    pool: PgPool,
}

impl HolidayRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Holidays falling inside a date range, oldest first
    pub async fn find_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<HolidayRow>> {
        let rows = sqlx::query_as::<_, HolidayRow>(&format!(
            "SELECT {HOLIDAY_COLUMNS} FROM holidays WHERE date BETWEEN $1 AND $2 \
             ORDER BY date ASC"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl Repository<HolidayRow, CreateHolidayDto, UpdateHolidayDto> for HolidayRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<HolidayRow>> {
        let row = sqlx::query_as::<_, HolidayRow>(&format!(
            "SELECT {HOLIDAY_COLUMNS} FROM holidays WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<HolidayRow>> {
        let rows = sqlx::query_as::<_, HolidayRow>(&format!(
            "SELECT {HOLIDAY_COLUMNS} FROM holidays ORDER BY date ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM holidays")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateHolidayDto) -> RepositoryResult<HolidayRow> {
        let row = sqlx::query_as::<_, HolidayRow>(&format!(
            r#"
            INSERT INTO holidays (name, date, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING {HOLIDAY_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(dto.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateHolidayDto) -> RepositoryResult<HolidayRow> {
        let row = sqlx::query_as::<_, HolidayRow>(&format!(
            r#"
            UPDATE holidays SET
                name = COALESCE($1, name),
                date = COALESCE($2, date),
                updated_at = NOW()
            WHERE id = $3
            RETURNING {HOLIDAY_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(dto.date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Holiday with id {} not found", id)))?;

        Ok(row)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM holidays WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Holiday with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM holidays WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
