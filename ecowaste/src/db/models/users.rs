//! Store models for users.

use crate::types::UserId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Store request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub initial_credits: Decimal,
}

/// Store response for a user
#[derive(Debug, Clone, PartialEq)]
pub struct UserDBResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    /// Never decreases; grows by each entry's credits
    pub total_credits: Decimal,
    pub created_at: DateTime<Utc>,
}
