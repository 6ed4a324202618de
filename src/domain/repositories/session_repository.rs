//! Repository trait for admin panel sessions.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for panel session ids.
///
/// Sessions are opaque UUIDs issued at login; logout is client-side
/// (the script drops the cookie), so there is no delete operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a newly issued session id.
    async fn insert(&self, session_id: &str) -> Result<(), AppError>;

    /// Returns true if the session id was issued by this service.
    async fn exists(&self, session_id: &str) -> Result<bool, AppError>;
}
