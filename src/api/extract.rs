//! Request extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// Record id taken from the `:id` path segment. Anything that is not a valid
/// id cannot name an existing record, so it is a 404 rather than a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(format!("No page at {}: {}", parts.uri.path(), e)))?;

        raw.parse::<i32>()
            .map(RecordId)
            .map_err(|_| AppError::NotFound(format!("No record with id {}", raw)))
    }
}
