//! Repository traits and base implementations
//!
//! Provides generic CRUD operations for database entities.

use async_trait::async_trait;
use wr_core::traits::Id;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl From<RepositoryError> for wr_core::error::WrError {
    fn from(err: RepositoryError) -> Self {
        use wr_core::error::WrError;
        match err {
            RepositoryError::NotFound(msg) => WrError::NotFound {
                entity: "record",
                field: "id",
                value: msg,
            },
            RepositoryError::Conflict(msg) => WrError::Conflict { message: msg },
            RepositoryError::Database(e) => WrError::Database(e.to_string()),
            RepositoryError::Corrupt(msg) => WrError::Internal(msg),
        }
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Base repository trait for CRUD operations
#[async_trait]
pub trait Repository<T, CreateDto, UpdateDto>: Send + Sync {
    /// Find an entity by ID
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<T>>;

    /// Find all entities with pagination
    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<T>>;

    /// Count all entities
    async fn count(&self) -> RepositoryResult<i64>;

    /// Create a new entity
    async fn create(&self, dto: CreateDto) -> RepositoryResult<T>;

    /// Update an existing entity
    async fn update(&self, id: Id, dto: UpdateDto) -> RepositoryResult<T>;

    /// Delete an entity by ID
    async fn delete(&self, id: Id) -> RepositoryResult<()>;

    /// Check if an entity exists
    async fn exists(&self, id: Id) -> RepositoryResult<bool>;
}
