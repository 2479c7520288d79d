use actix_web::http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error;

/// Failures of the backend services. The templating core itself never fails;
/// these all come from persistence or from malformed requests.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("stored data is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Invalid(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Invalid(_) | ServiceError::Csv(_) => StatusCode::BAD_REQUEST,
            ServiceError::Database(_) | ServiceError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
