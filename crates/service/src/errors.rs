use thiserror::Error;

use models::errors::ModelError;

/// Failures surfaced by catalog operations. The first three are domain
/// outcomes the caller can act on; `Db` is an infrastructure failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i32) -> Self { Self::NotFound(format!("{entity} {id} not found")) }

    pub fn name_taken(entity: &str, name: &str) -> Self {
        Self::Conflict(format!("{entity} name '{name}' already exists"))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::BadRequest(msg),
            ModelError::Conflict(detail) => ServiceError::Conflict(detail),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ModelError::from(e).into() }
}
