//! API request/response models for users.

use crate::db::models::entries::EntryDBResponse;
use crate::db::models::users::UserDBResponse;
use crate::types::UserId;
use crate::waste::CreditError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity carried by a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<UserDBResponse> for CurrentUser {
    fn from(db: UserDBResponse) -> Self {
        Self {
            id: db.id,
            username: db.username,
            email: db.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub email: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_credits: Decimal,
}

impl From<UserDBResponse> for UserResponse {
    fn from(db: UserDBResponse) -> Self {
        Self {
            id: db.id,
            username: db.username,
            display_name: db.display_name,
            email: db.email,
            total_credits: db.total_credits,
        }
    }
}

/// Aggregates over a user's entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_items_recycled: usize,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_credits_earned: Decimal,
    /// Zero when the user has no entries
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub average_credits_per_item: Decimal,
}

impl UserStats {
    pub fn from_entries(entries: &[EntryDBResponse]) -> Result<Self, CreditError> {
        let total_items_recycled = entries.len();
        let total_credits_earned = entries
            .iter()
            .try_fold(Decimal::ZERO, |total, entry| total.checked_add(entry.credits))
            .ok_or(CreditError::CreditOverflow)?;
        let average_credits_per_item = if total_items_recycled == 0 {
            Decimal::ZERO
        } else {
            total_credits_earned / Decimal::from(total_items_recycled)
        };
        Ok(Self {
            total_items_recycled,
            total_credits_earned,
            average_credits_per_item,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: UserResponse,
    pub stats: UserStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponse {
    pub success: bool,
    pub user: UserProfile,
}
