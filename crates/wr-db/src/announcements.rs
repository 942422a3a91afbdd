//! Announcement repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use wr_core::traits::Id;
use wr_models::Announcement;

use crate::repository::{Repository, RepositoryError, RepositoryResult};

const ANNOUNCEMENT_COLUMNS: &str =
    "id, title, body, author_id, published_at, created_at, updated_at";

/// Announcement database entity
#[derive(Debug, Clone, FromRow)]
pub struct AnnouncementRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AnnouncementRow {
    pub fn into_model(self) -> Announcement {
        Announcement {
            id: Some(self.id),
            title: self.title,
            body: self.body,
            author_id: self.author_id,
            published_at: self.published_at,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

/// DTO for creating an announcement
#[derive(Debug, Clone)]
pub struct CreateAnnouncementDto {
    pub title: String,
    pub body: String,
    pub author_id: Id,
    pub published_at: Option<DateTime<Utc>>,
}

/// DTO for updating an announcement
#[derive(Debug, Clone, Default)]
pub struct UpdateAnnouncementDto {
    pub title: Option<String>,
    pub body: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Announcement repository implementation
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Published announcements, newest first
    pub async fn find_published(&self, limit: i64) -> RepositoryResult<Vec<AnnouncementRow>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements \
             WHERE published_at IS NOT NULL AND published_at <= NOW() \
             ORDER BY published_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl Repository<AnnouncementRow, CreateAnnouncementDto, UpdateAnnouncementDto>
    for AnnouncementRepository
{
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<AnnouncementRow>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<AnnouncementRow>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM announcements")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateAnnouncementDto) -> RepositoryResult<AnnouncementRow> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            r#"
            INSERT INTO announcements (
                title, body, author_id, published_at, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, NOW(), NOW()
            )
            RETURNING {ANNOUNCEMENT_COLUMNS}
            "#
        ))
        .bind(&dto.title)
        .bind(&dto.body)
        .bind(dto.author_id)
        .bind(dto.published_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateAnnouncementDto) -> RepositoryResult<AnnouncementRow> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            r#"
            UPDATE announcements SET
                title = COALESCE($1, title),
                body = COALESCE($2, body),
                published_at = COALESCE($3, published_at),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {ANNOUNCEMENT_COLUMNS}
            "#
        ))
        .bind(&dto.title)
        .bind(&dto.body)
        .bind(dto.published_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            RepositoryError::NotFound(format!("Announcement with id {} not found", id))
        })?;

        Ok(row)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Announcement with id {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM announcements WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
