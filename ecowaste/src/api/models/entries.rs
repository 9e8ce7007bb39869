//! API request/response models for waste entries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::entries::EntryDBResponse;
use crate::types::{EntryId, UserId};
use crate::waste::{EntrySource, QuantityInput, WasteCategory};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWasteEntry {
    #[serde(default)]
    pub waste_name: String,
    /// Wire value of a waste category, e.g. `"plastic"` or `"e-waste"`
    #[serde(default)]
    pub waste_type: String,
    /// Kilograms, as a number or numeric string. Required for weighable types, ignored otherwise.
    #[serde(default)]
    pub quantity: Option<QuantityInput>,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to `manual`
    #[serde(default)]
    pub entry_type: Option<EntrySource>,
    #[serde(default)]
    pub ai_confidence: Option<f64>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub ai_raw_predictions: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WasteEntryResponse {
    pub id: EntryId,
    pub user_id: UserId,
    pub entry_type: EntrySource,
    pub waste_name: String,
    pub waste_type: WasteCategory,
    /// Present only for weighable types
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub quantity: Option<Decimal>,
    pub place: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub credits_earned: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub ai_raw_predictions: Option<Vec<serde_json::Value>>,
}

impl From<EntryDBResponse> for WasteEntryResponse {
    fn from(db: EntryDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            entry_type: db.source,
            waste_name: db.name,
            waste_type: db.category,
            quantity: db.quantity,
            place: db.place,
            notes: db.notes,
            credits_earned: db.credits,
            created_at: db.created_at,
            ai_confidence: db.ai_confidence,
            ai_raw_predictions: db.ai_raw_predictions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWasteEntryResponse {
    pub success: bool,
    pub entry: WasteEntryResponse,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub credits_earned: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub new_total_credits: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WasteEntriesResponse {
    pub success: bool,
    /// Oldest first
    pub entries: Vec<WasteEntryResponse>,
    pub total: usize,
}
