//! Waste entry repository.

use crate::db::errors::Result;
use crate::db::models::entries::{EntryCreateDBRequest, EntryCreated, EntryDBResponse};
use crate::types::UserId;

#[async_trait::async_trait]
pub trait EntryStore: Send + Sync {
    /// Append an entry and add its credits to the owner's total.
    ///
    /// Implementations must apply both changes atomically with respect to other submissions for
    /// the same user, otherwise concurrent submissions can lose credit updates. Fails with
    /// [`DbError::NotFound`](crate::db::errors::DbError::NotFound) for an unknown owner, and with
    /// [`DbError::CreditOverflow`](crate::db::errors::DbError::CreditOverflow) without changing
    /// anything when the new total is out of range.
    async fn create(&self, request: &EntryCreateDBRequest) -> Result<EntryCreated>;

    /// Entries of one user, oldest first. Unknown users have none.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<EntryDBResponse>>;
}
