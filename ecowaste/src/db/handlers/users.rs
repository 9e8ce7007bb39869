//! User repository.

use crate::db::errors::Result;
use crate::db::models::users::{UserCreateDBRequest, UserDBResponse};
use crate::types::UserId;

#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user with the next free id.
    ///
    /// Fails with [`DbError::UniqueViolation`](crate::db::errors::DbError::UniqueViolation) when the
    /// email is taken; the existing account is left untouched.
    async fn create(&self, request: &UserCreateDBRequest) -> Result<UserDBResponse>;

    async fn get_by_id(&self, id: UserId) -> Result<Option<UserDBResponse>>;

    /// Exact match on the stored (normalized) email.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserDBResponse>>;
}
