use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    AppState,
    api::{
        ApiJson,
        models::detection::{
            AiDetectionStats, AiStatsResponse, AiTestReceived, AiTestRequest, AiTestResponse, DetectRequest, DetectResponse,
            ModelInfo,
        },
    },
    classifier::classify_with_timeout,
    errors::{Error, ErrorResponse},
    waste::{SubmissionFlow, WasteCategory},
};

/// Classify an image and suggest an entry
///
/// The image payload is passed to the classifier as opaque bytes. Its top prediction is mapped
/// onto a waste category and used to prefill the entry form.
#[utoipa::path(
    post,
    path = "/api/ai/detect",
    request_body = DetectRequest,
    tag = "ai",
    responses(
        (status = 200, description = "Detection result", body = DetectResponse),
        (status = 400, description = "Missing image data", body = ErrorResponse),
        (status = 503, description = "Classifier failed or timed out", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn detect(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DetectRequest>,
) -> Result<Json<DetectResponse>, Error> {
    let image = request.image_data.trim().as_bytes();

    let mut flow = SubmissionFlow::ai();
    flow.supply_image(image)?;

    let predictions = match classify_with_timeout(state.classifier.as_ref(), image, state.config.classifier.timeout).await {
        Ok(predictions) => predictions,
        Err(e) => {
            warn!("Detection failed: {}", e);
            flow.detection_failed()?;
            return Err(e.into());
        }
    };

    let detection = flow.detection_succeeded(predictions)?;
    state.detection_stats.record(detection.category, detection.confidence);
    info!(
        "Detected {} with confidence {:.2}",
        detection.category, detection.confidence
    );

    Ok(Json(detection.into()))
}

/// JavaScript-style truthiness, so clients can send `""`, `0` or `false` for "no image".
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Echo a detection payload back
#[utoipa::path(
    post,
    path = "/api/ai/test",
    request_body = AiTestRequest,
    tag = "ai",
    responses(
        (status = 200, description = "What the server received", body = AiTestResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn ai_test(ApiJson(request): ApiJson<AiTestRequest>) -> Json<AiTestResponse> {
    Json(AiTestResponse {
        success: true,
        message: "AI detection test successful".to_string(),
        received: AiTestReceived {
            has_image_data: request.image_data.as_ref().is_some_and(is_present),
            detected_type: request.detected_type,
            confidence: request.confidence,
            timestamp: Utc::now(),
        },
        supported_waste_types: WasteCategory::ALL.to_vec(),
    })
}

/// Detection statistics since startup
#[utoipa::path(
    get,
    path = "/api/ai/stats",
    tag = "ai",
    responses(
        (status = 200, description = "Detection statistics", body = AiStatsResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn ai_stats(State(state): State<AppState>) -> Json<AiStatsResponse> {
    let snapshot = state.detection_stats.snapshot();

    Json(AiStatsResponse {
        success: true,
        ai_detection_stats: AiDetectionStats {
            total_detections: snapshot.total_detections,
            average_confidence: (snapshot.average_confidence * 1000.0).round() / 10.0,
            most_detected_type: snapshot.most_detected,
            categories_supported: WasteCategory::ALL.len(),
            last_updated: Utc::now(),
        },
        model_info: ModelInfo {
            name: "Waste Classification Model".to_string(),
            version: "1.0.0".to_string(),
            provider: "Mock classifier".to_string(),
            status: "Mock Mode".to_string(),
        },
    })
}
