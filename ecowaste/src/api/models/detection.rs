//! API request/response models for AI detection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classifier::Prediction;
use crate::waste::{Detection, WasteCategory};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectRequest {
    /// Encoded image, e.g. a base64 data URL. Treated as opaque bytes.
    #[serde(default)]
    pub image_data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    pub success: bool,
    pub detected_type: WasteCategory,
    /// Score of the top prediction, in `[0, 1]`
    pub confidence: f64,
    pub raw_predictions: Vec<Prediction>,
    pub suggested_name: String,
    /// 1 kg for weighable types, absent otherwise
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub suggested_quantity: Option<Decimal>,
}

impl From<Detection> for DetectResponse {
    fn from(detection: Detection) -> Self {
        Self {
            success: true,
            detected_type: detection.category,
            confidence: detection.confidence,
            raw_predictions: detection.predictions,
            suggested_name: detection.suggested_name,
            suggested_quantity: detection.suggested_quantity,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiTestRequest {
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub image_data: Option<serde_json::Value>,
    #[serde(default)]
    pub detected_type: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiTestReceived {
    pub has_image_data: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiTestResponse {
    pub success: bool,
    pub message: String,
    pub received: AiTestReceived,
    pub supported_waste_types: Vec<WasteCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiDetectionStats {
    pub total_detections: u64,
    /// Mean confidence as a percentage, one decimal place
    pub average_confidence: f64,
    /// `null` until something was detected
    pub most_detected_type: Option<WasteCategory>,
    pub categories_supported: usize,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub provider: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiStatsResponse {
    pub success: bool,
    pub ai_detection_stats: AiDetectionStats,
    pub model_info: ModelInfo,
}
