//! Store models for waste entries.

use crate::types::{EntryId, UserId};
use crate::waste::{EntrySource, Submission, WasteCategory};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Store request for recording a validated entry
#[derive(Debug, Clone)]
pub struct EntryCreateDBRequest {
    pub user_id: UserId,
    pub source: EntrySource,
    pub name: String,
    pub category: WasteCategory,
    pub quantity: Option<Decimal>,
    pub place: String,
    pub notes: Option<String>,
    pub credits: Decimal,
    pub ai_confidence: Option<f64>,
    pub ai_raw_predictions: Option<Vec<serde_json::Value>>,
}

impl EntryCreateDBRequest {
    pub fn new(user_id: UserId, submission: Submission) -> Self {
        Self {
            user_id,
            source: submission.source,
            name: submission.name,
            category: submission.category,
            quantity: submission.quantity,
            place: submission.place,
            notes: submission.notes,
            credits: submission.credits,
            ai_confidence: submission.ai_confidence,
            ai_raw_predictions: submission.ai_raw_predictions,
        }
    }
}

/// Store response for an entry. Entries are immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDBResponse {
    pub id: EntryId,
    pub user_id: UserId,
    pub source: EntrySource,
    pub name: String,
    pub category: WasteCategory,
    pub quantity: Option<Decimal>,
    pub place: String,
    pub notes: Option<String>,
    pub credits: Decimal,
    pub ai_confidence: Option<f64>,
    pub ai_raw_predictions: Option<Vec<serde_json::Value>>,
    pub created_at: DateTime<Utc>,
}

/// Result of recording an entry: the entry and the owner's updated balance.
#[derive(Debug, Clone)]
pub struct EntryCreated {
    pub entry: EntryDBResponse,
    pub new_total_credits: Decimal,
}
