//! Repository trait for shop token storage.

use crate::domain::entities::{NewShopToken, ShopToken, TokenOverview};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for shop token management.
///
/// Tokens are identified by their raw token string; shop ids are unique
/// across the table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Inserts a new token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token or shop id already
    /// exists, [`AppError::Internal`] on database errors.
    async fn insert(&self, token: &NewShopToken) -> Result<(), AppError>;

    /// Replaces shop id, description, and expiry of an existing token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, token: &NewShopToken) -> Result<(), AppError>;

    /// Deletes a token and its dependent rows, returning the ids of the
    /// images it owned so their files can be removed. `None` when the
    /// token does not exist.
    async fn delete(&self, token: &str) -> Result<Option<Vec<String>>, AppError>;

    /// Finds a token by its raw value.
    async fn find(&self, token: &str) -> Result<Option<ShopToken>, AppError>;

    /// Returns true if the token exists, expired or not.
    async fn exists(&self, token: &str) -> Result<bool, AppError>;

    /// Returns the token currently owning the given shop id, if any.
    async fn shop_id_owner(&self, shop_id: &str) -> Result<Option<String>, AppError>;

    /// Lists all tokens with their item and image counts, ordered by
    /// token value (the panel's row order).
    async fn list_overview(&self) -> Result<Vec<TokenOverview>, AppError>;
}
