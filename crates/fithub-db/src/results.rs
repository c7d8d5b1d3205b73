use sqlx::FromRow;
use thiserror::Error as ThisError;

/// Model errors
#[derive(Debug, Clone, ThisError)]
pub enum QueryError {
    #[error("{0} with id {1} not found")]
    MissingRecord(&'static str, u32),
}

#[derive(Debug, Clone, FromRow)]
pub struct Id<T> {
    pub id: T,
}
